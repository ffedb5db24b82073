//! Shared harness for API integration tests.
//!
//! Builds the production router via [`hearth_api::router::build_app_router`]
//! so tests exercise the same middleware stack the binary runs, and provides
//! request/response helpers plus database fixtures.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

use hearth_api::config::ServerConfig;
use hearth_api::router::build_app_router;
use hearth_api::state::AppState;
use hearth_core::types::DbId;
use hearth_db::models::listing::{CreateListing, Listing};
use hearth_db::repositories::ListingRepo;

/// Token the test config accepts on `/staff` routes.
pub const STAFF_TOKEN: &str = "test-staff-token";

/// Build a test `ServerConfig` with safe defaults and a known staff token.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        staff_token: Some(STAFF_TOKEN.to_string()),
    }
}

/// Build the full application router over the given pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn get_auth(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("GET")
            .uri(uri)
            .header("Authorization", format!("Bearer {STAFF_TOKEN}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn put_json_auth(app: Router, uri: &str, body: Value) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("PUT")
            .uri(uri)
            .header("Authorization", format!("Bearer {STAFF_TOKEN}"))
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn post_auth(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Authorization", format!("Bearer {STAFF_TOKEN}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

// ---------------------------------------------------------------------------
// Database fixtures
// ---------------------------------------------------------------------------

/// Ids of the rows every scenario builds on.
pub struct Fixture {
    pub user_id: DbId,
    pub house_id: DbId,
    pub condo_id: DbId,
    pub old_town_id: DbId,
    pub riverside_id: DbId,
    pub status_active_id: DbId,
}

pub async fn seed(pool: &PgPool) -> Fixture {
    let user_id = sqlx::query_scalar::<_, DbId>(
        "INSERT INTO users (email, display_name) VALUES ($1, $2) RETURNING id",
    )
    .bind("agent@example.com")
    .bind("Test Agent")
    .fetch_one(pool)
    .await
    .expect("seed user");

    let house_id = insert_lookup(pool, "property_types", "House").await;
    let condo_id = insert_lookup(pool, "property_types", "Condo").await;
    let old_town_id = insert_lookup(pool, "neighborhoods", "Old Town").await;
    let riverside_id = insert_lookup(pool, "neighborhoods", "Riverside").await;

    let status_active_id =
        sqlx::query_scalar::<_, DbId>("SELECT id FROM statuses WHERE name = 'Active'")
            .fetch_one(pool)
            .await
            .expect("seeded Active status");

    Fixture {
        user_id,
        house_id,
        condo_id,
        old_town_id,
        riverside_id,
        status_active_id,
    }
}

async fn insert_lookup(pool: &PgPool, table: &str, name: &str) -> DbId {
    sqlx::query_scalar::<_, DbId>(&format!(
        "INSERT INTO {table} (name) VALUES ($1) RETURNING id"
    ))
    .bind(name)
    .fetch_one(pool)
    .await
    .unwrap_or_else(|e| panic!("seed {table}: {e}"))
}

pub async fn bucket_id(pool: &PgPool, label: &str) -> DbId {
    sqlx::query_scalar::<_, DbId>("SELECT id FROM price_buckets WHERE label = $1")
        .bind(label)
        .fetch_one(pool)
        .await
        .unwrap_or_else(|e| panic!("seeded bucket '{label}': {e}"))
}

pub async fn create_listing(
    pool: &PgPool,
    fixture: &Fixture,
    address: &str,
    price: i64,
) -> Listing {
    ListingRepo::create(
        pool,
        &CreateListing {
            address: address.to_string(),
            price: Decimal::from(price),
            description: String::new(),
            bedrooms: 3,
            bathrooms: Decimal::new(15, 1),
            square_footage: 1400,
            property_type_id: fixture.house_id,
            neighborhood_id: fixture.old_town_id,
            status_id: fixture.status_active_id,
            created_by: fixture.user_id,
        },
    )
    .await
    .expect("create listing")
}

/// Insert a photo payload directly, bypassing the multipart surface.
pub async fn create_photo(pool: &PgPool, listing_id: DbId, payload: &[u8], order: i32) -> DbId {
    hearth_db::repositories::PhotoRepo::create(pool, listing_id, payload, order)
        .await
        .expect("create photo")
        .id
}

/// A small valid PNG for photo round-trips.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    let mut out = std::io::Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut out, image::ImageFormat::Png)
        .expect("encode png");
    out.into_inner()
}
