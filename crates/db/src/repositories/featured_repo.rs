//! Repository for the featured-listing single-winner register.
//!
//! The register is a singleton row, so "at most one featured listing" is a
//! structural property: featuring is one UPSERT, with no scan-and-clear pass
//! over the listings table and no race window between clear and set.

use hearth_core::types::DbId;
use sqlx::PgPool;

use crate::models::listing::Listing;

/// Provides access to the featured-listing register.
pub struct FeaturedRepo;

impl FeaturedRepo {
    /// The currently featured listing id, if any.
    pub async fn featured_id(pool: &PgPool) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>("SELECT listing_id FROM featured_listing WHERE id = 1")
            .fetch_optional(pool)
            .await
    }

    /// The currently featured listing row, if any.
    pub async fn featured_listing(pool: &PgPool) -> Result<Option<Listing>, sqlx::Error> {
        sqlx::query_as::<_, Listing>(
            "SELECT l.id, l.address, l.price, l.description, l.bedrooms, l.bathrooms,
                    l.square_footage, l.property_type_id, l.neighborhood_id, l.status_id,
                    l.is_visible, l.created_by, l.listed_date
             FROM featured_listing f
             JOIN listings l ON l.id = f.listing_id",
        )
        .fetch_optional(pool)
        .await
    }

    /// Make `listing_id` the featured listing. Last writer wins.
    pub async fn set(pool: &PgPool, listing_id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO featured_listing (id, listing_id) VALUES (1, $1)
             ON CONFLICT (id) DO UPDATE
                 SET listing_id = EXCLUDED.listing_id, updated_at = NOW()",
        )
        .bind(listing_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Clear the register. Returns `true` if something was featured.
    pub async fn clear(pool: &PgPool) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM featured_listing WHERE id = 1")
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
