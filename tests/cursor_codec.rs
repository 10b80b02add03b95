use catalog_query_api::{
    cursor::{self, Cursor, SortKey},
    error::AppError,
};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{TimeZone, Utc};
use uuid::Uuid;

fn sample() -> Cursor {
    let created_at = Utc
        .with_ymd_and_hms(2024, 3, 9, 14, 30, 5)
        .unwrap()
        + chrono::Duration::microseconds(123_456);
    Cursor::new(
        created_at,
        Uuid::parse_str("0d6f5a5e-3a4f-4bb0-9f4e-2f5d1f0a9c11").unwrap(),
    )
}

#[test]
fn round_trips_every_sort_shape() {
    let cursors = [
        sample(),
        sample().with_sort_key(SortKey::Name("Red, Shoe / size:42".into())),
        sample().with_sort_key(SortKey::Name("ข้าวสุนัข".into())),
        sample().with_sort_key(SortKey::Price(19.99)),
        sample().with_sort_key(SortKey::Price(100.0)),
    ];
    for c in cursors {
        let token = cursor::encode(&c);
        assert_eq!(cursor::decode(&token).unwrap(), c);
    }
}

#[test]
fn token_is_url_safe() {
    let token = cursor::encode(&sample().with_sort_key(SortKey::Name("a+b/c=d?".into())));
    assert!(
        token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    );
}

#[test]
fn inner_text_is_timestamp_then_id() {
    let c = sample();
    let inner = URL_SAFE_NO_PAD.decode(cursor::encode(&c)).unwrap();
    let inner = String::from_utf8(inner).unwrap();
    assert_eq!(
        inner,
        "2024-03-09T14:30:05.123456000Z,0d6f5a5e-3a4f-4bb0-9f4e-2f5d1f0a9c11"
    );
}

#[test]
fn accepts_offset_timestamps() {
    let inner = "2024-03-09T21:30:05.123456+07:00,0d6f5a5e-3a4f-4bb0-9f4e-2f5d1f0a9c11";
    let token = URL_SAFE_NO_PAD.encode(inner);
    assert_eq!(cursor::decode(&token).unwrap(), sample());
}

#[test]
fn rejects_malformed_tokens() {
    let bad = |inner: &str| URL_SAFE_NO_PAD.encode(inner);
    let cases = [
        "not base64 at all!!".to_string(),
        bad("2024-03-09T14:30:05Z"),
        bad("2024-03-09T14:30:05Z,0d6f5a5e-3a4f-4bb0-9f4e-2f5d1f0a9c11,price:1,extra"),
        bad("yesterday,0d6f5a5e-3a4f-4bb0-9f4e-2f5d1f0a9c11"),
        bad("2024-03-09T14:30:05Z,not-a-uuid"),
        bad("2024-03-09T14:30:05Z,0d6f5a5e-3a4f-4bb0-9f4e-2f5d1f0a9c11,color:red"),
        bad("2024-03-09T14:30:05Z,0d6f5a5e-3a4f-4bb0-9f4e-2f5d1f0a9c11,price:NaN"),
    ];
    for token in cases {
        assert!(
            matches!(cursor::decode(&token), Err(AppError::InvalidCursor(_))),
            "expected InvalidCursor for {token}"
        );
    }
}
