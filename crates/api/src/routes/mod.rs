pub mod health;
pub mod listings;
pub mod lookups;
pub mod photos;
pub mod reports;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /listings                                browse (public, visible only)
/// /listings/{id}                           detail (public, visible only)
/// /featured-listing                        current homepage highlight
/// /lookups                                 filter menu catalog
/// /photos/{id}                             original image bytes
/// /photos/{id}/thumbnail                   cached/derived thumbnail
///
/// /staff/listings                          browse (visibility param honored), create
/// /staff/listings/{id}                     detail, update
/// /staff/listings/{id}/visibility          show/hide toggle (PUT)
/// /staff/featured-listing                  set or clear the register (PUT)
/// /staff/photos/backfill-thumbnails        batch thumbnail generation (POST)
/// /staff/reports/search                    monthly analytics (GET)
/// /staff/reports/search/export             CSV attachment (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Public browse, detail, and the featured register.
        .merge(listings::public_router())
        // Filter menu catalog.
        .merge(lookups::router())
        // Photo bytes and thumbnails.
        .nest("/photos", photos::public_router())
        // Staff CRUD surface (token-guarded per handler).
        .nest("/staff", listings::staff_router())
        .nest("/staff/photos", photos::staff_router())
        .nest("/staff/reports", reports::router())
}
