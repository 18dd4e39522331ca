//! Upsert writer for decoded webhook payloads.
//!
//! A payload is written as a sequence of independent upserts: the parent
//! row first, then every child in the order it appears in the payload
//! (variants before images for products). The first failure stops the
//! sequence. Rows written before the failure stay committed; there is no
//! transaction around the sequence, so a redelivery of the same payload is
//! what repairs a partially written entity.

use std::fmt;

use shopify_sync_core::{CustomerPayload, ProductPayload};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::db::{RepositoryError, SyncStore};

/// Kind of row being written, for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Product,
    Variant,
    Image,
    Customer,
    Address,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Product => "product",
            Self::Variant => "variant",
            Self::Image => "image",
            Self::Customer => "customer",
            Self::Address => "address",
        };
        f.write_str(name)
    }
}

/// An upsert failed. Rows written earlier in the same request are kept.
#[derive(Debug, Error)]
#[error("failed to upsert {kind} {id}: {source}")]
pub struct StoreWriteError {
    pub kind: EntityKind,
    pub id: i64,
    #[source]
    pub source: RepositoryError,
}

impl StoreWriteError {
    const fn new(kind: EntityKind, id: i64, source: RepositoryError) -> Self {
        Self { kind, id, source }
    }
}

/// Rows written for one payload, by kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SyncSummary {
    pub parents: usize,
    pub variants: usize,
    pub images: usize,
    pub addresses: usize,
}

impl SyncSummary {
    const fn parent() -> Self {
        Self {
            parents: 1,
            variants: 0,
            images: 0,
            addresses: 0,
        }
    }

    /// Parent plus children.
    #[must_use]
    pub const fn rows_written(&self) -> usize {
        self.parents + self.variants + self.images + self.addresses
    }
}

/// Upsert a product, then its variants, then its images.
///
/// # Errors
///
/// Returns `StoreWriteError` for the first row that fails to write.
#[instrument(skip(store, product), fields(product_id = %product.id))]
pub async fn sync_product(
    store: &dyn SyncStore,
    product: &ProductPayload,
) -> Result<SyncSummary, StoreWriteError> {
    store
        .upsert_product(product)
        .await
        .map_err(|e| StoreWriteError::new(EntityKind::Product, product.id.as_i64(), e))?;
    let mut summary = SyncSummary::parent();

    for variant in &product.variants {
        store
            .upsert_variant(variant)
            .await
            .map_err(|e| StoreWriteError::new(EntityKind::Variant, variant.id.as_i64(), e))?;
        summary.variants += 1;
        debug!(variant_id = %variant.id, "Variant upserted");
    }

    for image in &product.images {
        store
            .upsert_image(image)
            .await
            .map_err(|e| StoreWriteError::new(EntityKind::Image, image.id.as_i64(), e))?;
        summary.images += 1;
        debug!(image_id = %image.id, "Image upserted");
    }

    Ok(summary)
}

/// Upsert a customer, then its addresses.
///
/// # Errors
///
/// Returns `StoreWriteError` for the first row that fails to write.
#[instrument(skip(store, customer), fields(customer_id = %customer.id))]
pub async fn sync_customer(
    store: &dyn SyncStore,
    customer: &CustomerPayload,
) -> Result<SyncSummary, StoreWriteError> {
    store
        .upsert_customer(customer)
        .await
        .map_err(|e| StoreWriteError::new(EntityKind::Customer, customer.id.as_i64(), e))?;
    let mut summary = SyncSummary::parent();

    for address in &customer.addresses {
        store
            .upsert_address(address)
            .await
            .map_err(|e| StoreWriteError::new(EntityKind::Address, address.id.as_i64(), e))?;
        summary.addresses += 1;
        debug!(address_id = %address.id, "Address upserted");
    }

    Ok(summary)
}
