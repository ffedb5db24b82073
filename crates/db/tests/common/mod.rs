//! Shared fixtures for database integration tests.
//!
//! The migration seeds statuses and price buckets; everything else a test
//! needs (users, property types, neighborhoods, listings) starts here.

#![allow(dead_code)]

use hearth_core::types::DbId;
use hearth_db::models::listing::{CreateListing, Listing};
use hearth_db::repositories::ListingRepo;
use rust_decimal::Decimal;
use sqlx::PgPool;

/// Ids of the rows every test scenario builds on.
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

/// Seeded price bucket id for a given label.
pub async fn bucket_id(pool: &PgPool, label: &str) -> DbId {
    sqlx::query_scalar::<_, DbId>("SELECT id FROM price_buckets WHERE label = $1")
        .bind(label)
        .fetch_one(pool)
        .await
        .unwrap_or_else(|e| panic!("seeded bucket '{label}': {e}"))
}

pub fn new_listing(fixture: &Fixture, address: &str, price: i64) -> CreateListing {
    CreateListing {
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
    }
}

pub async fn create_listing(
    pool: &PgPool,
    fixture: &Fixture,
    address: &str,
    price: i64,
) -> Listing {
    ListingRepo::create(pool, &new_listing(fixture, address, price))
        .await
        .expect("create listing")
}
