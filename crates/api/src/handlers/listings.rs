//! Handlers for the listing browse pipeline and the staff CRUD surface.
//!
//! Browse parameters are caller-hostile by contract: malformed ids drop the
//! filter, unknown sort modes fall back to newest-first, and out-of-range
//! pages clamp. The browse path never fails over its query string.

use std::collections::HashMap;

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use hearth_core::browse::{self, SortMode, Visibility, PAGE_SIZE};
use hearth_core::error::CoreError;
use hearth_core::imaging;
use hearth_core::pricing;
use hearth_core::types::DbId;
use hearth_db::models::listing::{CreateListing, Listing, SetVisibility, UpdateListing};
use hearth_db::models::search_log::NewSearchLogEntry;
use hearth_db::repositories::{
    BrowseQuery, FeaturedRepo, ListingRepo, LookupRepo, PhotoRepo, SearchLogRepo,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::StaffUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Per-photo upload cap. Larger payloads are rejected before compression.
const MAX_PHOTO_BYTES: usize = 5 * 1024 * 1024;

// ---------------------------------------------------------------------------
// Browse
// ---------------------------------------------------------------------------

/// Raw browse query parameters.
///
/// Everything is an optional string so malformed input deserializes fine and
/// gets normalized here instead of bouncing with a 400.
#[derive(Debug, Default, Deserialize)]
pub struct BrowseParams {
    pub neighborhood: Option<String>,
    #[serde(rename = "type")]
    pub property_type: Option<String>,
    pub price: Option<String>,
    pub sort: Option<String>,
    pub visibility: Option<String>,
    pub page: Option<String>,
}

/// One listing in a browse page, decorated with its gallery photo ids and
/// the featured flag.
#[derive(Debug, Serialize)]
pub struct ListingSummary {
    #[serde(flatten)]
    pub listing: Listing,
    pub photo_ids: Vec<DbId>,
    pub is_featured: bool,
}

/// A page of browse results plus the metadata a client needs to render
/// pagination controls or a partial refresh.
#[derive(Debug, Serialize)]
pub struct BrowsePage {
    pub listings: Vec<ListingSummary>,
    pub has_listings: bool,
    pub total_count: i64,
    pub current_page: i64,
    pub total_pages: i64,
    pub page_size: i64,
    pub has_next: bool,
    pub has_previous: bool,
}

/// GET /api/v1/listings
///
/// Public browse: hard-restricted to visible listings regardless of any
/// `visibility` parameter.
pub async fn browse_public(
    State(state): State<AppState>,
    Query(params): Query<BrowseParams>,
) -> AppResult<Json<DataResponse<BrowsePage>>> {
    let page = browse(&state, &params, Visibility::VisibleOnly).await?;
    Ok(Json(DataResponse { data: page }))
}

/// GET /api/v1/staff/listings
///
/// Staff browse: the `visibility` parameter (`visible`/`hidden`/`all`) is
/// honored, defaulting to visible-only.
pub async fn browse_staff(
    State(state): State<AppState>,
    _staff: StaffUser,
    Query(params): Query<BrowseParams>,
) -> AppResult<Json<DataResponse<BrowsePage>>> {
    let visibility = Visibility::from_param(params.visibility.as_deref());
    let page = browse(&state, &params, visibility).await?;
    Ok(Json(DataResponse { data: page }))
}

/// The shared filter/sort/paginate pipeline.
async fn browse(
    state: &AppState,
    params: &BrowseParams,
    visibility: Visibility,
) -> AppResult<BrowsePage> {
    let pool = &state.pool;

    // Resolve each id filter; malformed ids and ids with no matching row are
    // silently dropped.
    let neighborhood = match browse::parse_id_param(params.neighborhood.as_deref()) {
        Some(id) => LookupRepo::find_neighborhood(pool, id).await?,
        None => None,
    };
    let property_type = match browse::parse_id_param(params.property_type.as_deref()) {
        Some(id) => LookupRepo::find_property_type(pool, id).await?,
        None => None,
    };
    let price_bucket = match browse::parse_id_param(params.price.as_deref()) {
        Some(id) => LookupRepo::find_price_bucket(pool, id).await?,
        None => None,
    };

    // A bucket with an unparseable label still counts as a resolved filter
    // for analytics, but applies no price predicate.
    let price_range = price_bucket
        .as_ref()
        .and_then(|bucket| pricing::parse_price_range(&bucket.label));

    let query = BrowseQuery {
        visibility,
        neighborhood_id: neighborhood.as_ref().map(|n| n.id),
        property_type_id: property_type.as_ref().map(|t| t.id),
        price_range,
        sort: SortMode::from_param(params.sort.as_deref()),
    };

    let total_count = ListingRepo::count_browse(pool, &query).await?;
    let total_pages = browse::total_pages(total_count);
    let current_page = browse::clamp_page(params.page.as_deref(), total_pages);

    let listings = ListingRepo::browse_page(pool, &query, current_page).await?;
    let summaries = summarize(state, listings).await?;

    // One analytics event per request when at least one filter dimension
    // resolved. Best-effort: the browse response never fails over this write.
    let entry = NewSearchLogEntry {
        property_type_id: property_type.as_ref().map(|t| t.id),
        neighborhood_id: neighborhood.as_ref().map(|n| n.id),
        price_bucket_id: price_bucket.as_ref().map(|b| b.id),
    };
    if entry.has_any_dimension() {
        if let Err(err) = SearchLogRepo::record(pool, &entry).await {
            tracing::warn!(%err, "failed to record search analytics event");
        }
    }

    Ok(BrowsePage {
        has_listings: !summaries.is_empty(),
        listings: summaries,
        total_count,
        current_page,
        total_pages,
        page_size: PAGE_SIZE,
        has_next: current_page < total_pages,
        has_previous: current_page > 1,
    })
}

/// Decorate listing rows with their gallery photo ids and the featured flag.
async fn summarize(
    state: &AppState,
    listings: Vec<Listing>,
) -> AppResult<Vec<ListingSummary>> {
    let ids: Vec<DbId> = listings.iter().map(|l| l.id).collect();
    let mut photos_by_listing: HashMap<DbId, Vec<DbId>> = HashMap::new();
    for (listing_id, photo_id) in PhotoRepo::ids_for_listings(&state.pool, &ids).await? {
        photos_by_listing.entry(listing_id).or_default().push(photo_id);
    }
    let featured_id = FeaturedRepo::featured_id(&state.pool).await?;

    Ok(listings
        .into_iter()
        .map(|listing| ListingSummary {
            photo_ids: photos_by_listing.remove(&listing.id).unwrap_or_default(),
            is_featured: featured_id == Some(listing.id),
            listing,
        })
        .collect())
}

// ---------------------------------------------------------------------------
// Detail
// ---------------------------------------------------------------------------

/// GET /api/v1/listings/{id}
///
/// Public detail view. Hidden listings are indistinguishable from absent ones.
pub async fn get_public(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ListingSummary>>> {
    let listing = ListingRepo::find_visible_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Listing",
            id,
        }))?;
    let summary = summarize(&state, vec![listing]).await?.remove(0);
    Ok(Json(DataResponse { data: summary }))
}

/// GET /api/v1/staff/listings/{id}
pub async fn get_staff(
    State(state): State<AppState>,
    _staff: StaffUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ListingSummary>>> {
    let listing = ListingRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Listing",
            id,
        }))?;
    let summary = summarize(&state, vec![listing]).await?.remove(0);
    Ok(Json(DataResponse { data: summary }))
}

// ---------------------------------------------------------------------------
// Featured listing
// ---------------------------------------------------------------------------

/// Body for the featured-listing register update.
#[derive(Debug, Deserialize)]
pub struct SetFeatured {
    /// The listing to feature, or `null` to clear the register.
    pub listing_id: Option<DbId>,
}

/// GET /api/v1/featured-listing
///
/// The current homepage highlight. `data` is `null` when nothing is featured
/// or the featured listing has since been hidden.
pub async fn get_featured(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Option<ListingSummary>>>> {
    let featured = FeaturedRepo::featured_listing(&state.pool).await?;
    let data = match featured {
        Some(listing) if listing.is_visible => {
            Some(summarize(&state, vec![listing]).await?.remove(0))
        }
        _ => None,
    };
    Ok(Json(DataResponse { data }))
}

/// PUT /api/v1/staff/featured-listing
///
/// UPSERT the single-winner register. Featuring a hidden listing is rejected;
/// `listing_id: null` clears the register.
pub async fn set_featured(
    State(state): State<AppState>,
    _staff: StaffUser,
    Json(input): Json<SetFeatured>,
) -> AppResult<Json<DataResponse<Option<Listing>>>> {
    match input.listing_id {
        Some(id) => {
            let listing = ListingRepo::find_by_id(&state.pool, id)
                .await?
                .ok_or(AppError::Core(CoreError::NotFound {
                    entity: "Listing",
                    id,
                }))?;
            if !listing.is_visible {
                return Err(AppError::Core(CoreError::Validation(
                    "Cannot feature a hidden listing".into(),
                )));
            }
            FeaturedRepo::set(&state.pool, id).await?;
            Ok(Json(DataResponse {
                data: Some(listing),
            }))
        }
        None => {
            FeaturedRepo::clear(&state.pool).await?;
            Ok(Json(DataResponse { data: None }))
        }
    }
}

// ---------------------------------------------------------------------------
// Staff CRUD
// ---------------------------------------------------------------------------

/// POST /api/v1/staff/listings
///
/// Multipart create: listing fields as text parts plus one or more `photos`
/// file parts. The listing row commits before any photo row is written; a
/// crash in between leaves a photo-less listing, by design.
pub async fn create(
    State(state): State<AppState>,
    _staff: StaffUser,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<Listing>>)> {
    let mut form = ListingForm::default();
    let mut photos: Vec<Vec<u8>> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| AppError::BadRequest(format!("Malformed multipart body: {err}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name == "photos" {
            let bytes = field
                .bytes()
                .await
                .map_err(|err| AppError::BadRequest(format!("Unreadable photo part: {err}")))?;
            photos.push(bytes.to_vec());
        } else {
            let value = field
                .text()
                .await
                .map_err(|err| AppError::BadRequest(format!("Unreadable field {name}: {err}")))?;
            form.set(&name, value);
        }
    }

    let input = form.build()?;
    input
        .validate()
        .map_err(|err| CoreError::Validation(err.to_string()))?;
    validate_photos(&photos)?;
    check_references(&state, &input).await?;

    let listing = ListingRepo::create(&state.pool, &input).await?;

    for (index, raw) in photos.iter().enumerate() {
        let compressed = imaging::compress(raw);
        PhotoRepo::create(&state.pool, listing.id, &compressed, index as i32 + 1).await?;
    }

    Ok((StatusCode::CREATED, Json(DataResponse { data: listing })))
}

/// PUT /api/v1/staff/listings/{id}
pub async fn update(
    State(state): State<AppState>,
    _staff: StaffUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateListing>,
) -> AppResult<Json<DataResponse<Listing>>> {
    input
        .validate()
        .map_err(|err| CoreError::Validation(err.to_string()))?;
    let listing = ListingRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Listing",
            id,
        }))?;
    Ok(Json(DataResponse { data: listing }))
}

/// PUT /api/v1/staff/listings/{id}/visibility
pub async fn set_visibility(
    State(state): State<AppState>,
    _staff: StaffUser,
    Path(id): Path<DbId>,
    Json(input): Json<SetVisibility>,
) -> AppResult<Json<DataResponse<Listing>>> {
    let listing = ListingRepo::set_visibility(&state.pool, id, input.is_visible)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Listing",
            id,
        }))?;
    Ok(Json(DataResponse { data: listing }))
}

// ---------------------------------------------------------------------------
// Multipart form plumbing
// ---------------------------------------------------------------------------

/// Accumulates text parts of the create form until all have arrived.
#[derive(Debug, Default)]
struct ListingForm {
    address: Option<String>,
    price: Option<String>,
    description: Option<String>,
    bedrooms: Option<String>,
    bathrooms: Option<String>,
    square_footage: Option<String>,
    property_type_id: Option<String>,
    neighborhood_id: Option<String>,
    status_id: Option<String>,
    created_by: Option<String>,
}

impl ListingForm {
    fn set(&mut self, name: &str, value: String) {
        match name {
            "address" => self.address = Some(value),
            "price" => self.price = Some(value),
            "description" => self.description = Some(value),
            "bedrooms" => self.bedrooms = Some(value),
            "bathrooms" => self.bathrooms = Some(value),
            "square_footage" => self.square_footage = Some(value),
            "property_type_id" => self.property_type_id = Some(value),
            "neighborhood_id" => self.neighborhood_id = Some(value),
            "status_id" => self.status_id = Some(value),
            "created_by" => self.created_by = Some(value),
            // Unknown parts are ignored, matching the permissive input policy.
            _ => {}
        }
    }

    fn build(self) -> Result<CreateListing, AppError> {
        Ok(CreateListing {
            address: required_text("address", self.address)?,
            price: parse_field("price", self.price)?,
            description: self.description.unwrap_or_default(),
            bedrooms: parse_field("bedrooms", self.bedrooms)?,
            bathrooms: parse_field("bathrooms", self.bathrooms)?,
            square_footage: parse_field("square_footage", self.square_footage)?,
            property_type_id: parse_field("property_type_id", self.property_type_id)?,
            neighborhood_id: parse_field("neighborhood_id", self.neighborhood_id)?,
            status_id: parse_field("status_id", self.status_id)?,
            created_by: parse_field("created_by", self.created_by)?,
        })
    }
}

fn required_text(name: &str, value: Option<String>) -> Result<String, AppError> {
    value.ok_or_else(|| AppError::Core(CoreError::Validation(format!("Missing field: {name}"))))
}

fn parse_field<T: std::str::FromStr>(name: &str, value: Option<String>) -> Result<T, AppError> {
    required_text(name, value)?
        .trim()
        .parse()
        .map_err(|_| AppError::Core(CoreError::Validation(format!("Invalid value for {name}"))))
}

fn validate_photos(photos: &[Vec<u8>]) -> Result<(), AppError> {
    if photos.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "At least one photo is required".into(),
        )));
    }
    for photo in photos {
        if photo.is_empty() {
            return Err(AppError::Core(CoreError::Validation(
                "Empty photo upload".into(),
            )));
        }
        if photo.len() > MAX_PHOTO_BYTES {
            return Err(AppError::Core(CoreError::Validation(
                "Image file too large (> 5 MiB)".into(),
            )));
        }
    }
    Ok(())
}

/// Verify the create DTO's foreign keys up front so the client gets a 400
/// with a field name instead of a constraint violation.
async fn check_references(state: &AppState, input: &CreateListing) -> Result<(), AppError> {
    let pool = &state.pool;
    if LookupRepo::find_property_type(pool, input.property_type_id)
        .await?
        .is_none()
    {
        return Err(AppError::Core(CoreError::Validation(
            "Unknown property_type_id".into(),
        )));
    }
    if LookupRepo::find_neighborhood(pool, input.neighborhood_id)
        .await?
        .is_none()
    {
        return Err(AppError::Core(CoreError::Validation(
            "Unknown neighborhood_id".into(),
        )));
    }
    if LookupRepo::find_status(pool, input.status_id).await?.is_none() {
        return Err(AppError::Core(CoreError::Validation(
            "Unknown status_id".into(),
        )));
    }
    if !LookupRepo::user_exists(pool, input.created_by).await? {
        return Err(AppError::Core(CoreError::Validation(
            "Unknown created_by".into(),
        )));
    }
    Ok(())
}
