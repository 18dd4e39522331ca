//! Database operations for the sync `PostgreSQL` database.
//!
//! ## Tables
//!
//! - `shopify_products` - One row per product, keyed by Shopify product ID
//! - `shopify_variants` - Product variants, keyed by Shopify variant ID
//! - `shopify_images` - Product images, keyed by Shopify image ID
//! - `shopify_customers` - One row per customer, keyed by Shopify customer ID
//! - `shopify_customer_addresses` - Customer addresses, keyed by Shopify address ID
//!
//! Every write is an `INSERT ... ON CONFLICT (id) DO UPDATE` that replaces
//! all mapped columns. Nothing is ever deleted.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/sync/migrations/` and run via:
//! ```bash
//! cargo run -p shopify-sync-cli -- migrate run
//! ```

pub mod customers;
pub mod products;
#[cfg(test)]
pub mod recording;

use async_trait::async_trait;
use shopify_sync_core::{
    AddressPayload, CustomerPayload, ImagePayload, ProductPayload, VariantPayload,
};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;
use thiserror::Error;

use crate::config::DatabaseConfig;

pub use customers::CustomerRepository;
pub use products::ProductRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Create a `PostgreSQL` connection pool.
///
/// Connects eagerly so that bad credentials or an unreachable host fail at
/// startup rather than on the first webhook.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(config.connect_options())
        .await
}

/// Row-level writes the webhook handlers depend on.
///
/// Each method upserts exactly one row and commits it on its own.
#[async_trait]
pub trait SyncStore: Send + Sync {
    async fn upsert_product(&self, product: &ProductPayload) -> Result<(), RepositoryError>;

    async fn upsert_variant(&self, variant: &VariantPayload) -> Result<(), RepositoryError>;

    async fn upsert_image(&self, image: &ImagePayload) -> Result<(), RepositoryError>;

    async fn upsert_customer(&self, customer: &CustomerPayload) -> Result<(), RepositoryError>;

    async fn upsert_address(&self, address: &AddressPayload) -> Result<(), RepositoryError>;

    /// Check that the store is reachable.
    async fn ping(&self) -> Result<(), RepositoryError>;
}

/// `PostgreSQL`-backed [`SyncStore`].
///
/// Each call acquires a pooled connection for a single statement.
#[derive(Debug, Clone)]
pub struct PgSyncStore {
    pool: PgPool,
}

impl PgSyncStore {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SyncStore for PgSyncStore {
    async fn upsert_product(&self, product: &ProductPayload) -> Result<(), RepositoryError> {
        ProductRepository::new(&self.pool).upsert(product).await
    }

    async fn upsert_variant(&self, variant: &VariantPayload) -> Result<(), RepositoryError> {
        ProductRepository::new(&self.pool)
            .upsert_variant(variant)
            .await
    }

    async fn upsert_image(&self, image: &ImagePayload) -> Result<(), RepositoryError> {
        ProductRepository::new(&self.pool).upsert_image(image).await
    }

    async fn upsert_customer(&self, customer: &CustomerPayload) -> Result<(), RepositoryError> {
        CustomerRepository::new(&self.pool).upsert(customer).await
    }

    async fn upsert_address(&self, address: &AddressPayload) -> Result<(), RepositoryError> {
        CustomerRepository::new(&self.pool)
            .upsert_address(address)
            .await
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
