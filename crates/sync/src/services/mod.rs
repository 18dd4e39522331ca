//! Business logic services for the sync service.
//!
//! # Services
//!
//! - `sync` - Writes a decoded webhook payload to the store, parent first

pub mod sync;

pub use sync::{EntityKind, StoreWriteError, SyncSummary, sync_customer, sync_product};
