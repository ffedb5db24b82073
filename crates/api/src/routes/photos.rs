//! Route definitions for photo serving and thumbnail maintenance.
//!
//! ```text
//! GET /photos/{id}             get_photo
//! GET /photos/{id}/thumbnail   get_thumbnail
//!
//! POST /staff/photos/backfill-thumbnails   backfill_thumbnails
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::photos;
use crate::state::AppState;

pub fn public_router() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(photos::get_photo))
        .route("/{id}/thumbnail", get(photos::get_thumbnail))
}

pub fn staff_router() -> Router<AppState> {
    Router::new().route(
        "/backfill-thumbnails",
        post(photos::backfill_thumbnails),
    )
}
