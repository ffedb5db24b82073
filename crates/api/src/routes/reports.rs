//! Route definitions for staff analytics reports. Mounted at `/staff/reports`.
//!
//! ```text
//! GET /search          monthly_report (JSON)
//! GET /search/export   export_report (CSV attachment)
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::reports;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/search", get(reports::monthly_report))
        .route("/search/export", get(reports::export_report))
}
