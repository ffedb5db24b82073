//! Shared response envelope for API handlers.
//!
//! Non-entity responses use a `{ "data": ... }` envelope; [`DataResponse`]
//! keeps that shape type-checked instead of scattering ad-hoc
//! `serde_json::json!` bodies across handlers.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
