//! Unified error handling for the webhook handlers.
//!
//! Every failure is answered with `400 Bad Request` and an empty body.
//! Shopify treats any non-2xx as a failed delivery and retries it, and
//! since every write is an idempotent upsert the retry is safe. The detail
//! only goes to the logs.

use axum::extract::rejection::BytesRejection;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use shopify_sync_core::DecodeError;
use thiserror::Error;

use crate::services::StoreWriteError;

/// Application-level error type for the sync handlers.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The request body could not be read.
    #[error("Unreadable body: {0}")]
    UnreadableBody(#[from] BytesRejection),

    /// The body is not a well-formed payload.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// An upsert failed partway through the payload.
    #[error(transparent)]
    StoreWrite(#[from] StoreWriteError),
}

impl IntoResponse for SyncError {
    fn into_response(self) -> Response {
        match &self {
            Self::UnreadableBody(_) | Self::Decode(_) => {
                tracing::warn!(error = %self, "Rejected webhook payload");
            }
            Self::StoreWrite(e) => {
                let event_id = sentry::capture_error(&self);
                tracing::error!(
                    error = %self,
                    entity = %e.kind,
                    entity_id = e.id,
                    sentry_event_id = %event_id,
                    "Webhook write failed"
                );
            }
        }

        StatusCode::BAD_REQUEST.into_response()
    }
}
