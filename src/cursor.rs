//! Opaque pagination tokens.
//!
//! A cursor marks the last row of a page in the `(sort column, product_id)`
//! order. Its inner text is `"<created_at>,<product_id>"`, followed by a
//! third `name:` or `price:` segment when the listing is sorted by one of
//! those columns. The whole string is wrapped in URL-safe base64 so it can
//! travel in a query string untouched.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, SecondsFormat, Utc};
use uuid::Uuid;

use crate::error::AppError;

/// Value of the primary sort column at the cursor position.
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    Name(String),
    Price(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cursor {
    pub created_at: DateTime<Utc>,
    pub product_id: Uuid,
    pub sort_key: Option<SortKey>,
}

impl Cursor {
    pub fn new(created_at: DateTime<Utc>, product_id: Uuid) -> Self {
        Self {
            created_at,
            product_id,
            sort_key: None,
        }
    }

    pub fn with_sort_key(mut self, sort_key: SortKey) -> Self {
        self.sort_key = Some(sort_key);
        self
    }
}

pub fn encode(cursor: &Cursor) -> String {
    let mut inner = format!(
        "{},{}",
        cursor.created_at.to_rfc3339_opts(SecondsFormat::Nanos, true),
        cursor.product_id
    );
    match &cursor.sort_key {
        Some(SortKey::Name(name)) => {
            inner.push_str(",name:");
            inner.push_str(&URL_SAFE_NO_PAD.encode(name.as_bytes()));
        }
        Some(SortKey::Price(price)) => {
            inner.push_str(",price:");
            inner.push_str(&price.to_string());
        }
        None => {}
    }
    URL_SAFE_NO_PAD.encode(inner.as_bytes())
}

pub fn decode(token: &str) -> Result<Cursor, AppError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(token.trim())
        .map_err(|err| AppError::InvalidCursor(err.to_string()))?;
    let inner = String::from_utf8(bytes)
        .map_err(|_| AppError::InvalidCursor("cursor is not valid UTF-8".into()))?;

    let parts: Vec<&str> = inner.split(',').collect();
    if !(2..=3).contains(&parts.len()) {
        return Err(AppError::InvalidCursor("invalid cursor format".into()));
    }

    let created_at = DateTime::parse_from_rfc3339(parts[0])
        .map_err(|err| AppError::InvalidCursor(format!("bad timestamp: {err}")))?
        .with_timezone(&Utc);
    let product_id = Uuid::parse_str(parts[1])
        .map_err(|err| AppError::InvalidCursor(format!("bad product id: {err}")))?;

    let sort_key = match parts.get(2) {
        Some(segment) => Some(decode_sort_key(segment)?),
        None => None,
    };

    Ok(Cursor {
        created_at,
        product_id,
        sort_key,
    })
}

fn decode_sort_key(segment: &str) -> Result<SortKey, AppError> {
    if let Some(encoded) = segment.strip_prefix("name:") {
        let bytes = URL_SAFE_NO_PAD
            .decode(encoded)
            .map_err(|err| AppError::InvalidCursor(err.to_string()))?;
        let name = String::from_utf8(bytes)
            .map_err(|_| AppError::InvalidCursor("sort value is not valid UTF-8".into()))?;
        return Ok(SortKey::Name(name));
    }
    if let Some(raw) = segment.strip_prefix("price:") {
        let price = raw
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite())
            .ok_or_else(|| AppError::InvalidCursor("bad price value".into()))?;
        return Ok(SortKey::Price(price));
    }
    Err(AppError::InvalidCursor("unknown sort segment".into()))
}
