//! Integration tests for the staff CRUD surface and the featured register.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{body_json, get, put_json_auth};
use hearth_db::repositories::PhotoRepo;
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

// ---------------------------------------------------------------------------
// Authentication
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn staff_routes_reject_missing_or_bad_tokens(pool: PgPool) {
    common::seed(&pool).await;
    let app = common::build_test_app(pool);

    let response = get(app.clone(), "/api/v1/staff/listings").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert!(json["error"].is_string());
    assert_eq!(json["code"], "UNAUTHORIZED");

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/v1/staff/listings")
                .header("Authorization", "Bearer wrong-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Create (multipart)
// ---------------------------------------------------------------------------

const BOUNDARY: &str = "hearth-test-boundary";

fn text_part(name: &str, value: &str) -> Vec<u8> {
    format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
    )
    .into_bytes()
}

fn photo_part(bytes: &[u8]) -> Vec<u8> {
    let mut part = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"photos\"; \
         filename=\"photo.png\"\r\nContent-Type: image/png\r\n\r\n"
    )
    .into_bytes();
    part.extend_from_slice(bytes);
    part.extend_from_slice(b"\r\n");
    part
}

fn create_body(fixture: &common::Fixture, photos: &[Vec<u8>]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend(text_part("address", "77 Harbor View"));
    body.extend(text_part("price", "425000"));
    body.extend(text_part("description", "Bright corner unit"));
    body.extend(text_part("bedrooms", "2"));
    body.extend(text_part("bathrooms", "1.5"));
    body.extend(text_part("square_footage", "980"));
    body.extend(text_part("property_type_id", &fixture.condo_id.to_string()));
    body.extend(text_part("neighborhood_id", &fixture.riverside_id.to_string()));
    body.extend(text_part("status_id", &fixture.status_active_id.to_string()));
    body.extend(text_part("created_by", &fixture.user_id.to_string()));
    for photo in photos {
        body.extend(photo_part(photo));
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

async fn post_multipart(
    app: axum::Router,
    uri: &str,
    body: Vec<u8>,
) -> axum::http::Response<Body> {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Authorization", format!("Bearer {}", common::STAFF_TOKEN))
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap(),
    )
    .await
    .unwrap()
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_persists_listing_and_compressed_photos(pool: PgPool) {
    let fixture = common::seed(&pool).await;
    let app = common::build_test_app(pool.clone());

    let photo = common::png_bytes(64, 48);
    let body = create_body(&fixture, std::slice::from_ref(&photo));
    let response = post_multipart(app.clone(), "/api/v1/staff/listings", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["address"], "77 Harbor View");
    assert_eq!(json["data"]["is_visible"], true);
    let listing_id = json["data"]["id"].as_i64().unwrap();

    let photos = PhotoRepo::list_meta_by_listing(&pool, listing_id).await.unwrap();
    assert_eq!(photos.len(), 1);
    assert_eq!(photos[0].display_order, 1);

    // Small images pass through compression untouched.
    let stored = PhotoRepo::find_by_id(&pool, photos[0].id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.image_data, photo);

    // The new listing is publicly browsable right away.
    let browse = body_json(get(app, "/api/v1/listings").await).await;
    assert_eq!(browse["data"]["total_count"], 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_without_photos_is_rejected(pool: PgPool) {
    let fixture = common::seed(&pool).await;
    let app = common::build_test_app(pool.clone());

    let body = create_body(&fixture, &[]);
    let response = post_multipart(app, "/api/v1/staff/listings", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Nothing was committed.
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM listings")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_rejects_dangling_lookup_ids(pool: PgPool) {
    let fixture = common::seed(&pool).await;
    let app = common::build_test_app(pool);

    let mut body = Vec::new();
    body.extend(text_part("address", "1 Nowhere Rd"));
    body.extend(text_part("price", "100000"));
    body.extend(text_part("bedrooms", "1"));
    body.extend(text_part("bathrooms", "1.0"));
    body.extend(text_part("square_footage", "500"));
    body.extend(text_part("property_type_id", "999999"));
    body.extend(text_part("neighborhood_id", &fixture.riverside_id.to_string()));
    body.extend(text_part("status_id", &fixture.status_active_id.to_string()));
    body.extend(text_part("created_by", &fixture.user_id.to_string()));
    body.extend(photo_part(&common::png_bytes(8, 8)));
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    let response = post_multipart(app, "/api/v1/staff/listings", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"]
        .as_str()
        .unwrap()
        .contains("property_type_id"));
}

// ---------------------------------------------------------------------------
// Update and visibility
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn update_patches_provided_fields(pool: PgPool) {
    let fixture = common::seed(&pool).await;
    let listing = common::create_listing(&pool, &fixture, "1 Stale Rd", 320_000).await;
    let app = common::build_test_app(pool);

    let response = put_json_auth(
        app,
        &format!("/api/v1/staff/listings/{}", listing.id),
        json!({ "price": "299000", "description": "Reduced" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["price"], "299000");
    assert_eq!(json["data"]["description"], "Reduced");
    assert_eq!(json["data"]["address"], "1 Stale Rd");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn visibility_toggle_round_trips(pool: PgPool) {
    let fixture = common::seed(&pool).await;
    let listing = common::create_listing(&pool, &fixture, "1 Blink St", 250_000).await;
    let app = common::build_test_app(pool);

    let uri = format!("/api/v1/staff/listings/{}/visibility", listing.id);
    let response = put_json_auth(app.clone(), &uri, json!({ "is_visible": false })).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["is_visible"], false);

    // Public detail now misses; staff detail still hits.
    let response = get(app.clone(), &format!("/api/v1/listings/{}", listing.id)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = put_json_auth(app.clone(), &uri, json!({ "is_visible": true })).await;
    assert_eq!(body_json(response).await["data"]["is_visible"], true);

    let response = get(app, &format!("/api/v1/listings/{}", listing.id)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn updating_missing_listing_is_404(pool: PgPool) {
    common::seed(&pool).await;
    let app = common::build_test_app(pool);

    let response = put_json_auth(
        app,
        "/api/v1/staff/listings/999999",
        json!({ "price": "1" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Featured register
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn featuring_replaces_and_clears(pool: PgPool) {
    let fixture = common::seed(&pool).await;
    let first = common::create_listing(&pool, &fixture, "1 Crown St", 400_000).await;
    let second = common::create_listing(&pool, &fixture, "2 Crown St", 500_000).await;
    let app = common::build_test_app(pool);

    let response = put_json_auth(
        app.clone(),
        "/api/v1/staff/featured-listing",
        json!({ "listing_id": first.id }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(get(app.clone(), "/api/v1/featured-listing").await).await;
    assert_eq!(json["data"]["id"], first.id);
    assert_eq!(json["data"]["is_featured"], true);

    // Re-pointing the register needs no intermediate clear.
    put_json_auth(
        app.clone(),
        "/api/v1/staff/featured-listing",
        json!({ "listing_id": second.id }),
    )
    .await;
    let json = body_json(get(app.clone(), "/api/v1/featured-listing").await).await;
    assert_eq!(json["data"]["id"], second.id);

    // Browse marks exactly the featured row.
    let browse = body_json(get(app.clone(), "/api/v1/listings").await).await;
    let featured_flags: Vec<bool> = browse["data"]["listings"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["is_featured"].as_bool().unwrap())
        .collect();
    assert_eq!(featured_flags.iter().filter(|f| **f).count(), 1);

    // Null clears.
    let response = put_json_auth(
        app.clone(),
        "/api/v1/staff/featured-listing",
        json!({ "listing_id": null }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(get(app, "/api/v1/featured-listing").await).await;
    assert!(json["data"].is_null());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn hidden_listings_cannot_be_featured(pool: PgPool) {
    let fixture = common::seed(&pool).await;
    let listing = common::create_listing(&pool, &fixture, "1 Veiled Way", 400_000).await;
    hearth_db::repositories::ListingRepo::set_visibility(&pool, listing.id, false)
        .await
        .unwrap();
    let app = common::build_test_app(pool);

    let response = put_json_auth(
        app.clone(),
        "/api/v1/staff/featured-listing",
        json!({ "listing_id": listing.id }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = put_json_auth(
        app,
        "/api/v1/staff/featured-listing",
        json!({ "listing_id": 999999 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn featured_hidden_after_selection_disappears_from_public(pool: PgPool) {
    let fixture = common::seed(&pool).await;
    let listing = common::create_listing(&pool, &fixture, "1 Crown St", 400_000).await;
    let app = common::build_test_app(pool.clone());

    put_json_auth(
        app.clone(),
        "/api/v1/staff/featured-listing",
        json!({ "listing_id": listing.id }),
    )
    .await;
    hearth_db::repositories::ListingRepo::set_visibility(&pool, listing.id, false)
        .await
        .unwrap();

    let json = body_json(get(app, "/api/v1/featured-listing").await).await;
    assert!(json["data"].is_null());
}
