//! Photo serving and the lazy thumbnail path.

use axum::body::Body;
use axum::extract::{Path, Query, State};
use axum::http::{header, Response, StatusCode};
use axum::Json;
use hearth_core::error::CoreError;
use hearth_core::imaging;
use hearth_core::types::DbId;
use hearth_db::repositories::PhotoRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::StaffUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Photo bytes are immutable once stored, so clients may cache aggressively.
const IMMUTABLE_CACHE: &str = "public, max-age=31536000";

fn image_response(content_type: &str, bytes: Vec<u8>) -> AppResult<Response<Body>> {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CACHE_CONTROL, IMMUTABLE_CACHE)
        .body(Body::from(bytes))
        .map_err(|err| AppError::InternalError(format!("Failed to build image response: {err}")))
}

/// GET /api/v1/photos/{id}
///
/// Serves the stored original. The content type is sniffed from the payload's
/// magic bytes since the store keeps no media type column.
pub async fn get_photo(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Response<Body>> {
    let photo = PhotoRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Photo", id }))?;
    let content_type = imaging::sniff_content_type(&photo.image_data);
    image_response(content_type, photo.image_data)
}

/// GET /api/v1/photos/{id}/thumbnail
///
/// Serves the cached thumbnail, deriving and persisting it on first access.
/// The persist is best-effort: a failed write still serves the derived bytes.
/// 404 only when the photo is absent or its original cannot be decoded.
pub async fn get_thumbnail(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Response<Body>> {
    let photo = PhotoRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Photo", id }))?;

    if let Some(thumbnail) = photo.thumbnail_data {
        return image_response("image/jpeg", thumbnail);
    }

    let derived = imaging::thumbnail(&photo.image_data).ok_or(AppError::Core(
        CoreError::NotFound { entity: "Photo", id },
    ))?;

    if let Err(err) = PhotoRepo::save_thumbnail(&state.pool, id, &derived).await {
        tracing::warn!(photo_id = id, %err, "failed to persist derived thumbnail");
    }

    image_response("image/jpeg", derived)
}

#[derive(Debug, Default, Deserialize)]
pub struct BackfillParams {
    /// Regenerate thumbnails even for photos that already have one.
    #[serde(default)]
    pub force: bool,
}

#[derive(Debug, Serialize)]
pub struct BackfillOutcome {
    pub generated: u64,
    pub failed: u64,
}

/// POST /api/v1/staff/photos/backfill-thumbnails
///
/// Walks the photo store and fills in missing thumbnails. Photos whose
/// originals cannot be decoded are counted as failures and skipped.
pub async fn backfill_thumbnails(
    State(state): State<AppState>,
    _staff: StaffUser,
    Query(params): Query<BackfillParams>,
) -> AppResult<Json<DataResponse<BackfillOutcome>>> {
    let ids = PhotoRepo::ids_for_backfill(&state.pool, params.force).await?;
    let mut outcome = BackfillOutcome {
        generated: 0,
        failed: 0,
    };

    for id in ids {
        let Some(photo) = PhotoRepo::find_by_id(&state.pool, id).await? else {
            continue;
        };
        match imaging::thumbnail(&photo.image_data) {
            Some(thumb) => {
                PhotoRepo::save_thumbnail(&state.pool, id, &thumb).await?;
                outcome.generated += 1;
            }
            None => {
                tracing::warn!(photo_id = id, "thumbnail backfill skipped undecodable photo");
                outcome.failed += 1;
            }
        }
    }

    tracing::info!(
        generated = outcome.generated,
        failed = outcome.failed,
        "thumbnail backfill complete"
    );
    Ok(Json(DataResponse { data: outcome }))
}
