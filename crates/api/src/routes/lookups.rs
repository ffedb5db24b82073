//! Route definition for the lookup catalog.
//!
//! ```text
//! GET /lookups   get_lookups
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::lookups;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/lookups", get(lookups::get_lookups))
}
