//! Tag cloud aggregate.

use serde::Serialize;
use sqlx::FromRow;

/// A tag and how many visible rows carry it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TagCount {
    pub tag: String,
    pub count: i64,
}
