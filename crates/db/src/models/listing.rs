//! Listing entity model and DTOs.

use hearth_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `listings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Listing {
    pub id: DbId,
    pub address: String,
    pub price: Decimal,
    pub description: String,
    pub bedrooms: i32,
    pub bathrooms: Decimal,
    pub square_footage: i32,
    pub property_type_id: DbId,
    pub neighborhood_id: DbId,
    pub status_id: DbId,
    pub is_visible: bool,
    pub created_by: DbId,
    pub listed_date: Timestamp,
}

/// DTO for creating a new listing. Built from the staff multipart form.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateListing {
    #[validate(length(min = 1, message = "address must not be empty"))]
    pub address: String,
    pub price: Decimal,
    #[serde(default)]
    pub description: String,
    #[validate(range(min = 0))]
    pub bedrooms: i32,
    pub bathrooms: Decimal,
    #[validate(range(min = 0))]
    pub square_footage: i32,
    pub property_type_id: DbId,
    pub neighborhood_id: DbId,
    pub status_id: DbId,
    pub created_by: DbId,
}

/// DTO for a partial listing update. Only non-`None` fields are applied.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateListing {
    #[validate(length(min = 1, message = "address must not be empty"))]
    pub address: Option<String>,
    pub price: Option<Decimal>,
    pub description: Option<String>,
    #[validate(range(min = 0))]
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<Decimal>,
    #[validate(range(min = 0))]
    pub square_footage: Option<i32>,
    pub property_type_id: Option<DbId>,
    pub neighborhood_id: Option<DbId>,
    pub status_id: Option<DbId>,
}

/// DTO for the visibility toggle endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SetVisibility {
    pub is_visible: bool,
}
