//! Webhook handlers against a real `PostgreSQL` schema.
//!
//! These tests require a `PostgreSQL` server reachable through
//! `DATABASE_URL`; `sqlx::test` creates a fresh database per test and
//! applies `crates/sync/migrations/`.
//!
//! Run with: cargo test -p shopify-sync-integration-tests -- --ignored

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use rust_decimal::Decimal;
use serde_json::json;
use shopify_sync_integration_tests::{count, post, row_text};
use sqlx::PgPool;

const SHIRT: &str =
    r#"{"id":1,"title":"Shirt","variants":[{"id":10,"product_id":1,"price":"19.99"}],"images":[]}"#;

// ============================================================================
// Products
// ============================================================================

#[sqlx::test(migrations = "../sync/migrations")]
#[ignore = "Requires PostgreSQL (DATABASE_URL)"]
async fn test_product_scenario(pool: PgPool) {
    let (status, body) = post(&pool, "/sync/product", SHIRT).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());

    let title: String = sqlx::query_scalar("SELECT title FROM shopify_products WHERE id = 1")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(title, "Shirt");

    let (product_id, price): (i64, Decimal) =
        sqlx::query_as("SELECT product_id, price FROM shopify_variants WHERE id = 10")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(product_id, 1);
    assert_eq!(price, Decimal::new(1999, 2));
}

#[sqlx::test(migrations = "../sync/migrations")]
#[ignore = "Requires PostgreSQL (DATABASE_URL)"]
async fn test_redelivery_overwrites_parent_and_keeps_dropped_children(pool: PgPool) {
    post(&pool, "/sync/product", SHIRT).await;
    let variant_before = row_text(&pool, "shopify_variants", 10).await;

    let (status, _) = post(
        &pool,
        "/sync/product",
        r#"{"id":1,"title":"Shirt V2","variants":[],"images":[]}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let title: String = sqlx::query_scalar("SELECT title FROM shopify_products WHERE id = 1")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(title, "Shirt V2");
    assert_eq!(row_text(&pool, "shopify_variants", 10).await, variant_before);
}

#[sqlx::test(migrations = "../sync/migrations")]
#[ignore = "Requires PostgreSQL (DATABASE_URL)"]
async fn test_identical_redelivery_is_idempotent(pool: PgPool) {
    let body = json!({
        "id": 2,
        "title": "Hat",
        "vendor": "Acme",
        "published_at": "2024-03-01T09:30:00-05:00",
        "variants": [{"id": 20, "product_id": 2, "price": "12.00", "weight": 0.25}],
        "images": [{"id": 200, "product_id": 2, "variant_ids": [20], "width": 640}]
    })
    .to_string();

    post(&pool, "/sync/product", &body).await;
    let product = row_text(&pool, "shopify_products", 2).await;
    let variant = row_text(&pool, "shopify_variants", 20).await;
    let image = row_text(&pool, "shopify_images", 200).await;

    post(&pool, "/sync/product", &body).await;

    assert_eq!(row_text(&pool, "shopify_products", 2).await, product);
    assert_eq!(row_text(&pool, "shopify_variants", 20).await, variant);
    assert_eq!(row_text(&pool, "shopify_images", 200).await, image);
    assert_eq!(count(&pool, "shopify_products").await, 1);
}

#[sqlx::test(migrations = "../sync/migrations")]
#[ignore = "Requires PostgreSQL (DATABASE_URL)"]
async fn test_update_touches_only_that_entity(pool: PgPool) {
    post(&pool, "/sync/product", r#"{"id": 1, "title": "Shirt"}"#).await;
    post(&pool, "/sync/product", r#"{"id": 2, "title": "Hat"}"#).await;
    let hat = row_text(&pool, "shopify_products", 2).await;

    post(&pool, "/sync/product", r#"{"id": 1, "title": "Shirt", "vendor": "Acme"}"#).await;

    let vendor: String = sqlx::query_scalar("SELECT vendor FROM shopify_products WHERE id = 1")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(vendor, "Acme");
    assert_eq!(row_text(&pool, "shopify_products", 2).await, hat);
}

#[sqlx::test(migrations = "../sync/migrations")]
#[ignore = "Requires PostgreSQL (DATABASE_URL)"]
async fn test_overwrite_is_full_column_replace(pool: PgPool) {
    post(&pool, "/sync/product", r#"{"id": 1, "title": "Shirt", "vendor": "Acme"}"#).await;

    // vendor omitted: replaced with the zero value, not merged
    post(&pool, "/sync/product", r#"{"id": 1, "title": "Shirt"}"#).await;

    let vendor: String = sqlx::query_scalar("SELECT vendor FROM shopify_products WHERE id = 1")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(vendor, "");
}

#[sqlx::test(migrations = "../sync/migrations")]
#[ignore = "Requires PostgreSQL (DATABASE_URL)"]
async fn test_malformed_price_is_stored_as_zero(pool: PgPool) {
    let body = r#"{"id":1,"variants":[{"id":10,"product_id":1,"price":"$19.99","compare_at_price":null}]}"#;

    let (status, _) = post(&pool, "/sync/product", body).await;

    assert_eq!(status, StatusCode::OK);
    let (price, compare_at): (Decimal, Decimal) =
        sqlx::query_as("SELECT price, compare_at_price FROM shopify_variants WHERE id = 10")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(price, Decimal::ZERO);
    assert_eq!(compare_at, Decimal::ZERO);
}

#[sqlx::test(migrations = "../sync/migrations")]
#[ignore = "Requires PostgreSQL (DATABASE_URL)"]
async fn test_image_variant_ids_array(pool: PgPool) {
    let body = r#"{"id":1,"images":[{"id":100,"product_id":1,"variant_ids":[10,11,12]}]}"#;

    post(&pool, "/sync/product", body).await;

    let variant_ids: Vec<i64> =
        sqlx::query_scalar("SELECT variant_ids FROM shopify_images WHERE id = 100")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(variant_ids, vec![10, 11, 12]);
}

#[sqlx::test(migrations = "../sync/migrations")]
#[ignore = "Requires PostgreSQL (DATABASE_URL)"]
async fn test_invalid_json_writes_nothing(pool: PgPool) {
    let (status, body) = post(&pool, "/sync/product", r#"{"id": 1, "title": "Shirt""#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.is_empty());
    assert_eq!(count(&pool, "shopify_products").await, 0);
}

#[sqlx::test(migrations = "../sync/migrations")]
#[ignore = "Requires PostgreSQL (DATABASE_URL)"]
async fn test_array_body_writes_nothing(pool: PgPool) {
    let (status, _) = post(&pool, "/sync/product", "[]").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(count(&pool, "shopify_products").await, 0);
}

#[sqlx::test(migrations = "../sync/migrations")]
#[ignore = "Requires PostgreSQL (DATABASE_URL)"]
async fn test_child_failure_keeps_committed_rows(pool: PgPool) {
    sqlx::query("DROP TABLE shopify_images")
        .execute(&pool)
        .await
        .unwrap();
    let body = r#"{"id":1,"title":"Shirt","variants":[{"id":10,"product_id":1}],"images":[{"id":100,"product_id":1}]}"#;

    let (status, _) = post(&pool, "/sync/product", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(count(&pool, "shopify_products").await, 1);
    assert_eq!(count(&pool, "shopify_variants").await, 1);
}

// ============================================================================
// Customers
// ============================================================================

#[sqlx::test(migrations = "../sync/migrations")]
#[ignore = "Requires PostgreSQL (DATABASE_URL)"]
async fn test_customer_with_addresses(pool: PgPool) {
    let body = json!({
        "id": 5,
        "email": "bob@biller.com",
        "accepts_marketing": true,
        "orders_count": 3,
        "total_spent": "199.65",
        "last_order_id": 450_789_469,
        "addresses": [{
            "id": 51,
            "customer_id": 5,
            "address1": "123 Elm St.",
            "city": "Ottawa",
            "province_code": "ON",
            "country_code": "CA",
            "country_name": "Canada",
            "default": true
        }]
    })
    .to_string();

    let (status, _) = post(&pool, "/sync/customer", &body).await;

    assert_eq!(status, StatusCode::OK);
    let (email, total_spent, last_order_id): (String, Decimal, i64) = sqlx::query_as(
        "SELECT email, total_spent, last_order_id FROM shopify_customers WHERE id = 5",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(email, "bob@biller.com");
    assert_eq!(total_spent, Decimal::new(19965, 2));
    assert_eq!(last_order_id, 450_789_469);

    let (address_one, is_default): (String, bool) = sqlx::query_as(
        "SELECT address_one, default_address FROM shopify_customer_addresses WHERE id = 51",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(address_one, "123 Elm St.");
    assert!(is_default);
}

#[sqlx::test(migrations = "../sync/migrations")]
#[ignore = "Requires PostgreSQL (DATABASE_URL)"]
async fn test_address_redelivery_overwrites_every_column(pool: PgPool) {
    let first = r#"{"id":5,"addresses":[{"id":51,"customer_id":5,"province_code":"ON","country_code":"CA","country_name":"Canada"}]}"#;
    let second = r#"{"id":5,"addresses":[{"id":51,"customer_id":5,"province_code":"NY","country_code":"US","country_name":"United States"}]}"#;

    post(&pool, "/sync/customer", first).await;
    post(&pool, "/sync/customer", second).await;

    let (province_code, country_code, country_name): (String, String, String) = sqlx::query_as(
        "SELECT province_code, country_code, country_name \
         FROM shopify_customer_addresses WHERE id = 51",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(province_code, "NY");
    assert_eq!(country_code, "US");
    assert_eq!(country_name, "United States");
}

#[sqlx::test(migrations = "../sync/migrations")]
#[ignore = "Requires PostgreSQL (DATABASE_URL)"]
async fn test_customer_type_mismatch_writes_nothing(pool: PgPool) {
    let (status, _) = post(&pool, "/sync/customer", r#"{"id": 5, "tax_exempt": "no"}"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(count(&pool, "shopify_customers").await, 0);
}
