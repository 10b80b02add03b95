use crate::{
    cursor::{self, Cursor},
    query::ProductSort,
};

/// Rows that can report their own position in a keyset scan.
pub trait Keyset {
    fn keyset(&self, sort: ProductSort) -> Cursor;
}

/// Split an over-read batch (up to `limit + 1` rows) into the page and the
/// token for the next one.
///
/// The token points at the last row kept, not the probe row, and is empty
/// when the batch held no extra row.
pub fn split_page<T: Keyset>(mut rows: Vec<T>, limit: usize, sort: ProductSort) -> (Vec<T>, String) {
    if limit == 0 || rows.len() <= limit {
        return (rows, String::new());
    }
    rows.truncate(limit);
    let next_cursor = rows
        .last()
        .map(|row| cursor::encode(&row.keyset(sort)))
        .unwrap_or_default();
    (rows, next_cursor)
}
