//! Staff-token authentication extractor for Axum handlers.
//!
//! The staff surface is trusted-caller only: one shared bearer token,
//! configured via `STAFF_API_TOKEN`. Accounts, roles, and session handling
//! live outside this service.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use hearth_core::error::CoreError;

use crate::error::AppError;
use crate::state::AppState;

/// Proof that a request presented the staff bearer token.
///
/// Use as an extractor parameter in any handler on the `/staff` surface:
///
/// ```ignore
/// async fn my_handler(_staff: StaffUser) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct StaffUser;

impl FromRequestParts<AppState> for StaffUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        match state.config.staff_token.as_deref() {
            Some(expected) if expected == token => Ok(StaffUser),
            _ => Err(AppError::Core(CoreError::Unauthorized(
                "Invalid staff token".into(),
            ))),
        }
    }
}
