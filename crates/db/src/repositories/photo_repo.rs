//! Repository for the `photos` table.
//!
//! Originals are stored pre-compressed by the caller; thumbnails start out
//! NULL and are filled in by the lazy derivation path (or the staff backfill).

use hearth_core::types::DbId;
use sqlx::PgPool;

use crate::models::photo::{Photo, PhotoMeta};

const COLUMNS: &str = "id, listing_id, image_data, thumbnail_data, display_order, created_at";

const META_COLUMNS: &str = "id, listing_id, display_order, created_at";

/// Provides photo persistence and retrieval.
pub struct PhotoRepo;

impl PhotoRepo {
    /// Insert a photo with its (already compressed) payload. The thumbnail
    /// stays unset until first requested.
    pub async fn create(
        pool: &PgPool,
        listing_id: DbId,
        image_data: &[u8],
        display_order: i32,
    ) -> Result<PhotoMeta, sqlx::Error> {
        let query = format!(
            "INSERT INTO photos (listing_id, image_data, display_order)
             VALUES ($1, $2, $3)
             RETURNING {META_COLUMNS}"
        );
        sqlx::query_as::<_, PhotoMeta>(&query)
            .bind(listing_id)
            .bind(image_data)
            .bind(display_order)
            .fetch_one(pool)
            .await
    }

    /// Fetch a full photo row, payloads included.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Photo>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM photos WHERE id = $1");
        sqlx::query_as::<_, Photo>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a listing's photos in gallery order: display order ascending,
    /// photo id as tiebreak.
    pub async fn list_meta_by_listing(
        pool: &PgPool,
        listing_id: DbId,
    ) -> Result<Vec<PhotoMeta>, sqlx::Error> {
        let query = format!(
            "SELECT {META_COLUMNS} FROM photos
             WHERE listing_id = $1
             ORDER BY display_order ASC, id ASC"
        );
        sqlx::query_as::<_, PhotoMeta>(&query)
            .bind(listing_id)
            .fetch_all(pool)
            .await
    }

    /// Photo ids for a set of listings, in gallery order per listing. Used to
    /// decorate a browse page without pulling payloads.
    pub async fn ids_for_listings(
        pool: &PgPool,
        listing_ids: &[DbId],
    ) -> Result<Vec<(DbId, DbId)>, sqlx::Error> {
        sqlx::query_as::<_, (DbId, DbId)>(
            "SELECT listing_id, id FROM photos
             WHERE listing_id = ANY($1)
             ORDER BY listing_id ASC, display_order ASC, id ASC",
        )
        .bind(listing_ids)
        .fetch_all(pool)
        .await
    }

    /// Persist a derived thumbnail. Last writer wins; concurrent fills for
    /// the same photo are tolerated. Returns `false` if the row is gone.
    pub async fn save_thumbnail(
        pool: &PgPool,
        id: DbId,
        thumbnail: &[u8],
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE photos SET thumbnail_data = $2 WHERE id = $1")
            .bind(id)
            .bind(thumbnail)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Ids of photos a backfill pass should process: those missing a
    /// thumbnail, or every photo when `force` is set.
    pub async fn ids_for_backfill(pool: &PgPool, force: bool) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "SELECT id FROM photos
             WHERE $1 OR thumbnail_data IS NULL
             ORDER BY id ASC",
        )
        .bind(force)
        .fetch_all(pool)
        .await
    }
}
