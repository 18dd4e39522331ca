//! In-memory [`SyncStore`] that records every write, for handler tests.

#![allow(clippy::unwrap_used)]

use std::sync::Mutex;

use async_trait::async_trait;
use rust_decimal::Decimal;
use shopify_sync_core::{
    AddressId, AddressPayload, CustomerId, CustomerPayload, ImageId, ImagePayload, ProductId,
    ProductPayload, VariantId, VariantPayload,
};

use super::{RepositoryError, SyncStore};

/// One upsert as seen by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Write {
    Product(ProductId),
    Variant {
        id: VariantId,
        product_id: ProductId,
        price: Decimal,
    },
    Image(ImageId),
    Customer {
        id: CustomerId,
        total_spent: Decimal,
    },
    Address(AddressId),
}

#[derive(Debug, Default)]
pub struct RecordingStore {
    writes: Mutex<Vec<Write>>,
    fail_on: Option<Write>,
    unreachable: bool,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the upsert that would have recorded `write`.
    pub fn failing_on(write: Write) -> Self {
        Self {
            fail_on: Some(write),
            ..Self::default()
        }
    }

    /// Fail every call, as if the database were down.
    pub fn unreachable() -> Self {
        Self {
            unreachable: true,
            ..Self::default()
        }
    }

    pub fn writes(&self) -> Vec<Write> {
        self.writes.lock().unwrap().clone()
    }

    fn record(&self, write: Write) -> Result<(), RepositoryError> {
        if self.unreachable || self.fail_on.as_ref() == Some(&write) {
            return Err(RepositoryError::Database(sqlx::Error::Protocol(format!(
                "injected failure on {write:?}"
            ))));
        }
        self.writes.lock().unwrap().push(write);
        Ok(())
    }
}

#[async_trait]
impl SyncStore for RecordingStore {
    async fn upsert_product(&self, product: &ProductPayload) -> Result<(), RepositoryError> {
        self.record(Write::Product(product.id))
    }

    async fn upsert_variant(&self, variant: &VariantPayload) -> Result<(), RepositoryError> {
        self.record(Write::Variant {
            id: variant.id,
            product_id: variant.product_id,
            price: variant.price_amount(),
        })
    }

    async fn upsert_image(&self, image: &ImagePayload) -> Result<(), RepositoryError> {
        self.record(Write::Image(image.id))
    }

    async fn upsert_customer(&self, customer: &CustomerPayload) -> Result<(), RepositoryError> {
        self.record(Write::Customer {
            id: customer.id,
            total_spent: customer.total_spent_amount(),
        })
    }

    async fn upsert_address(&self, address: &AddressPayload) -> Result<(), RepositoryError> {
        self.record(Write::Address(address.id))
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        if self.unreachable {
            return Err(RepositoryError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}
