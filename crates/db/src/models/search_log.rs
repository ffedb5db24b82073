//! Search analytics models.

use hearth_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the append-only `search_log` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SearchLogEntry {
    pub id: DbId,
    pub property_type_id: Option<DbId>,
    pub neighborhood_id: Option<DbId>,
    pub price_bucket_id: Option<DbId>,
    pub searched_at: Timestamp,
}

/// DTO for recording one search event. At least one dimension is expected to
/// be present; dimensions the request did not filter on stay `None`.
#[derive(Debug, Clone, Default)]
pub struct NewSearchLogEntry {
    pub property_type_id: Option<DbId>,
    pub neighborhood_id: Option<DbId>,
    pub price_bucket_id: Option<DbId>,
}

impl NewSearchLogEntry {
    /// Whether any dimension resolved. Requests with no resolved filter are
    /// not logged at all.
    pub fn has_any_dimension(&self) -> bool {
        self.property_type_id.is_some()
            || self.neighborhood_id.is_some()
            || self.price_bucket_id.is_some()
    }
}

/// One aggregation row: a dimension's display name and its search count.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DimensionCount {
    pub name: String,
    pub count: i64,
}

/// Monthly roll-up of search events across the three filter dimensions.
///
/// The sections are independent: an entry missing its neighborhood still
/// counts toward the property-type and price-bucket sections.
#[derive(Debug, Clone, Serialize)]
pub struct MonthlyReport {
    pub year: i32,
    pub month: u32,
    pub by_property_type: Vec<DimensionCount>,
    pub by_neighborhood: Vec<DimensionCount>,
    pub by_price_bucket: Vec<DimensionCount>,
}

impl MonthlyReport {
    /// True when no dimension recorded anything for the period.
    pub fn is_empty(&self) -> bool {
        self.by_property_type.is_empty()
            && self.by_neighborhood.is_empty()
            && self.by_price_bucket.is_empty()
    }
}
