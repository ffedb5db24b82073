//! Photo entity models.
//!
//! The full [`Photo`] row carries the binary payloads and is never
//! serialized; [`PhotoMeta`] is the JSON-safe projection used for gallery
//! listings.

use hearth_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A full row from the `photos` table, payloads included.
#[derive(Debug, Clone, FromRow)]
pub struct Photo {
    pub id: DbId,
    pub listing_id: DbId,
    pub image_data: Vec<u8>,
    pub thumbnail_data: Option<Vec<u8>>,
    pub display_order: i32,
    pub created_at: Timestamp,
}

/// Payload-free projection of a photo row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PhotoMeta {
    pub id: DbId,
    pub listing_id: DbId,
    pub display_order: i32,
    pub created_at: Timestamp,
}
