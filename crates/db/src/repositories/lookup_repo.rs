//! Repository for the lookup tables (property types, neighborhoods,
//! statuses, price buckets).
//!
//! Point lookups back the browse filter resolution: a filter id that does not
//! resolve here is silently dropped by the handler.

use hearth_core::types::DbId;
use sqlx::PgPool;

use crate::models::lookup::{LookupEntry, PriceBucket};

/// Provides reads over the externally managed lookup tables.
pub struct LookupRepo;

impl LookupRepo {
    pub async fn find_property_type(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<LookupEntry>, sqlx::Error> {
        sqlx::query_as::<_, LookupEntry>("SELECT id, name FROM property_types WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_neighborhood(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<LookupEntry>, sqlx::Error> {
        sqlx::query_as::<_, LookupEntry>("SELECT id, name FROM neighborhoods WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_status(pool: &PgPool, id: DbId) -> Result<Option<LookupEntry>, sqlx::Error> {
        sqlx::query_as::<_, LookupEntry>("SELECT id, name FROM statuses WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_price_bucket(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<PriceBucket>, sqlx::Error> {
        sqlx::query_as::<_, PriceBucket>("SELECT id, label FROM price_buckets WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn user_exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM users WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    pub async fn list_property_types(pool: &PgPool) -> Result<Vec<LookupEntry>, sqlx::Error> {
        sqlx::query_as::<_, LookupEntry>("SELECT id, name FROM property_types ORDER BY name")
            .fetch_all(pool)
            .await
    }

    pub async fn list_neighborhoods(pool: &PgPool) -> Result<Vec<LookupEntry>, sqlx::Error> {
        sqlx::query_as::<_, LookupEntry>("SELECT id, name FROM neighborhoods ORDER BY name")
            .fetch_all(pool)
            .await
    }

    pub async fn list_statuses(pool: &PgPool) -> Result<Vec<LookupEntry>, sqlx::Error> {
        sqlx::query_as::<_, LookupEntry>("SELECT id, name FROM statuses ORDER BY id")
            .fetch_all(pool)
            .await
    }

    /// Buckets in their configured order (ids ascend with price).
    pub async fn list_price_buckets(pool: &PgPool) -> Result<Vec<PriceBucket>, sqlx::Error> {
        sqlx::query_as::<_, PriceBucket>("SELECT id, label FROM price_buckets ORDER BY id")
            .fetch_all(pool)
            .await
    }
}
