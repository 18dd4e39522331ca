//! HTTP route handlers for the sync service.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health          - Liveness check
//! GET  /health/ready    - Readiness check (database reachable)
//!
//! # Webhooks (no signature verification)
//! POST /sync/product    - products/create and products/update
//! POST /sync/customer   - customers/create and customers/update
//! ```

pub mod health;
pub mod webhooks;

use axum::Router;

use crate::state::AppState;

/// Build the complete router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(webhooks::router())
}
