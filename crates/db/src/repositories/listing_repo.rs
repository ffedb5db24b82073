//! Repository for the `listings` table, including the browse
//! filter/sort/paginate pipeline.

use hearth_core::browse::{SortMode, Visibility, PAGE_SIZE};
use hearth_core::pricing::PriceRange;
use hearth_core::types::DbId;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::models::listing::{CreateListing, Listing, UpdateListing};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, address, price, description, bedrooms, bathrooms, \
    square_footage, property_type_id, neighborhood_id, status_id, is_visible, \
    created_by, listed_date";

/// Fully resolved browse criteria.
///
/// Ids are only present here after they resolved to existing lookup rows;
/// malformed or dangling filter input never reaches this struct.
#[derive(Debug, Clone, Default)]
pub struct BrowseQuery {
    pub visibility: Visibility,
    pub neighborhood_id: Option<DbId>,
    pub property_type_id: Option<DbId>,
    pub price_range: Option<PriceRange>,
    pub sort: SortMode,
}

impl BrowseQuery {
    fn price_bounds(&self) -> (Option<Decimal>, Option<Decimal>) {
        match self.price_range {
            Some(range) => (Some(range.min), range.max),
            None => (None, None),
        }
    }
}

/// Provides listing CRUD and the browse pipeline.
pub struct ListingRepo;

impl ListingRepo {
    /// Insert a new listing, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateListing) -> Result<Listing, sqlx::Error> {
        let query = format!(
            "INSERT INTO listings (address, price, description, bedrooms, bathrooms, \
                 square_footage, property_type_id, neighborhood_id, status_id, created_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Listing>(&query)
            .bind(&input.address)
            .bind(input.price)
            .bind(&input.description)
            .bind(input.bedrooms)
            .bind(input.bathrooms)
            .bind(input.square_footage)
            .bind(input.property_type_id)
            .bind(input.neighborhood_id)
            .bind(input.status_id)
            .bind(input.created_by)
            .fetch_one(pool)
            .await
    }

    /// Find a listing by id regardless of visibility.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Listing>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM listings WHERE id = $1");
        sqlx::query_as::<_, Listing>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a visible listing by id. The public detail endpoint treats hidden
    /// listings as absent.
    pub async fn find_visible_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Listing>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM listings WHERE id = $1 AND is_visible");
        sqlx::query_as::<_, Listing>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Count listings matching the browse criteria.
    pub async fn count_browse(pool: &PgPool, query: &BrowseQuery) -> Result<i64, sqlx::Error> {
        let (price_min, price_max) = query.price_bounds();
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM listings
             WHERE ($1::BOOLEAN IS NULL OR is_visible = $1)
               AND ($2::BIGINT IS NULL OR neighborhood_id = $2)
               AND ($3::BIGINT IS NULL OR property_type_id = $3)
               AND ($4::NUMERIC IS NULL OR price >= $4)
               AND ($5::NUMERIC IS NULL OR price < $5)",
        )
        .bind(query.visibility.as_flag())
        .bind(query.neighborhood_id)
        .bind(query.property_type_id)
        .bind(price_min)
        .bind(price_max)
        .fetch_one(pool)
        .await
    }

    /// Fetch one page of the browse result set. `page` is 1-based and must
    /// already be clamped (the handler clamps before calling).
    pub async fn browse_page(
        pool: &PgPool,
        query: &BrowseQuery,
        page: i64,
    ) -> Result<Vec<Listing>, sqlx::Error> {
        let (price_min, price_max) = query.price_bounds();
        let sql = format!(
            "SELECT {COLUMNS} FROM listings
             WHERE ($1::BOOLEAN IS NULL OR is_visible = $1)
               AND ($2::BIGINT IS NULL OR neighborhood_id = $2)
               AND ($3::BIGINT IS NULL OR property_type_id = $3)
               AND ($4::NUMERIC IS NULL OR price >= $4)
               AND ($5::NUMERIC IS NULL OR price < $5)
             ORDER BY {order}
             LIMIT $6 OFFSET $7",
            order = query.sort.order_by()
        );
        sqlx::query_as::<_, Listing>(&sql)
            .bind(query.visibility.as_flag())
            .bind(query.neighborhood_id)
            .bind(query.property_type_id)
            .bind(price_min)
            .bind(price_max)
            .bind(PAGE_SIZE)
            .bind((page - 1) * PAGE_SIZE)
            .fetch_all(pool)
            .await
    }

    /// Update a listing. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateListing,
    ) -> Result<Option<Listing>, sqlx::Error> {
        let query = format!(
            "UPDATE listings SET
                address = COALESCE($2, address),
                price = COALESCE($3, price),
                description = COALESCE($4, description),
                bedrooms = COALESCE($5, bedrooms),
                bathrooms = COALESCE($6, bathrooms),
                square_footage = COALESCE($7, square_footage),
                property_type_id = COALESCE($8, property_type_id),
                neighborhood_id = COALESCE($9, neighborhood_id),
                status_id = COALESCE($10, status_id)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Listing>(&query)
            .bind(id)
            .bind(&input.address)
            .bind(input.price)
            .bind(&input.description)
            .bind(input.bedrooms)
            .bind(input.bathrooms)
            .bind(input.square_footage)
            .bind(input.property_type_id)
            .bind(input.neighborhood_id)
            .bind(input.status_id)
            .fetch_optional(pool)
            .await
    }

    /// Set a listing's visibility flag. Returns `None` if no such listing.
    pub async fn set_visibility(
        pool: &PgPool,
        id: DbId,
        is_visible: bool,
    ) -> Result<Option<Listing>, sqlx::Error> {
        let query = format!(
            "UPDATE listings SET is_visible = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Listing>(&query)
            .bind(id)
            .bind(is_visible)
            .fetch_optional(pool)
            .await
    }
}
