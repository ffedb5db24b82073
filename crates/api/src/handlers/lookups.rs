//! Lookup catalog handler: everything a client needs to render filter menus.

use axum::extract::State;
use axum::Json;
use hearth_db::models::lookup::{LookupEntry, PriceBucket};
use hearth_db::repositories::LookupRepo;
use serde::Serialize;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct LookupCatalog {
    pub property_types: Vec<LookupEntry>,
    pub neighborhoods: Vec<LookupEntry>,
    pub statuses: Vec<LookupEntry>,
    pub price_buckets: Vec<PriceBucket>,
}

/// GET /api/v1/lookups
pub async fn get_lookups(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<LookupCatalog>>> {
    let pool = &state.pool;
    let catalog = LookupCatalog {
        property_types: LookupRepo::list_property_types(pool).await?,
        neighborhoods: LookupRepo::list_neighborhoods(pool).await?,
        statuses: LookupRepo::list_statuses(pool).await?,
        price_buckets: LookupRepo::list_price_buckets(pool).await?,
    };
    Ok(Json(DataResponse { data: catalog }))
}
