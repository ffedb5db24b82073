//! Route definitions for listing browsing, detail, and the featured register.
//!
//! Public routes are mounted at `/listings` and `/featured-listing`; the
//! staff surface at `/staff/listings` and `/staff/featured-listing`.
//!
//! ```text
//! GET /listings            browse_public
//! GET /listings/{id}       get_public
//! GET /featured-listing    get_featured
//!
//! GET  /staff/listings                  browse_staff
//! POST /staff/listings                  create (multipart)
//! GET  /staff/listings/{id}             get_staff
//! PUT  /staff/listings/{id}             update
//! PUT  /staff/listings/{id}/visibility  set_visibility
//! PUT  /staff/featured-listing          set_featured
//! ```

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, put};
use axum::Router;

use crate::handlers::listings;
use crate::state::AppState;

/// Multipart bodies carry up to a handful of 5 MiB photos plus form fields.
const CREATE_BODY_LIMIT: usize = 64 * 1024 * 1024;

pub fn public_router() -> Router<AppState> {
    Router::new()
        .route("/listings", get(listings::browse_public))
        .route("/listings/{id}", get(listings::get_public))
        .route("/featured-listing", get(listings::get_featured))
}

pub fn staff_router() -> Router<AppState> {
    Router::new()
        .route(
            "/listings",
            get(listings::browse_staff)
                .post(listings::create)
                .layer(DefaultBodyLimit::max(CREATE_BODY_LIMIT)),
        )
        .route(
            "/listings/{id}",
            get(listings::get_staff).put(listings::update),
        )
        .route("/listings/{id}/visibility", put(listings::set_visibility))
        .route("/featured-listing", put(listings::set_featured))
}
