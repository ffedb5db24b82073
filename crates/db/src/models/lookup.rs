//! Lookup table models.
//!
//! `property_types`, `neighborhoods`, and `statuses` share the same id/name
//! shape; `price_buckets` carry a display label that the pricing parser turns
//! into a numeric range at query time.

use hearth_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// A row from any of the id -> name lookup tables.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LookupEntry {
    pub id: DbId,
    pub name: String,
}

/// A row from the `price_buckets` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PriceBucket {
    pub id: DbId,
    pub label: String,
}
