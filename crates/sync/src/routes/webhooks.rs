//! Shopify webhook receivers.
//!
//! Each handler decodes the body, upserts the parent row and then each
//! child row, and answers `200` with an empty body. Any failure is answered
//! with `400` (see [`SyncError`]).
//!
//! The body is read as raw bytes rather than through `Json` so that a
//! missing or unusual `Content-Type` header does not change the outcome.

use axum::{
    Router,
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    http::StatusCode,
    routing::post,
};
use shopify_sync_core::{CustomerPayload, ProductPayload, decode};
use tracing::{info, instrument};

use crate::error::SyncError;
use crate::services;
use crate::state::AppState;

/// Create webhook routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sync/product", post(sync_product))
        .route("/sync/customer", post(sync_customer))
}

/// Handle a product create/update webhook.
#[instrument(skip_all)]
async fn sync_product(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<StatusCode, SyncError> {
    let product: ProductPayload = decode(&body?)?;
    let summary = services::sync_product(state.store(), &product).await?;

    info!(
        product_id = %product.id,
        variants = summary.variants,
        images = summary.images,
        rows_written = summary.rows_written(),
        "Product synced"
    );
    Ok(StatusCode::OK)
}

/// Handle a customer create/update webhook.
#[instrument(skip_all)]
async fn sync_customer(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<StatusCode, SyncError> {
    let customer: CustomerPayload = decode(&body?)?;
    let summary = services::sync_customer(state.store(), &customer).await?;

    info!(
        customer_id = %customer.id,
        addresses = summary.addresses,
        rows_written = summary.rows_written(),
        "Customer synced"
    );
    Ok(StatusCode::OK)
}
