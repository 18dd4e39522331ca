//! Shopify Sync Core - Webhook payload types.
//!
//! This crate provides the types shared by the Shopify Sync components:
//! - `sync` - HTTP service that upserts webhook payloads into `PostgreSQL`
//! - `cli` - Command-line tools for migrations
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! database access, no HTTP. Decoding a webhook body and normalizing its
//! text-encoded amounts both happen here so they can be tested without a
//! database.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for external IDs and the lenient price parse
//! - [`webhook`] - Product and customer webhook payloads and the decoder

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;
pub mod webhook;

pub use types::*;
pub use webhook::{
    AddressPayload, CustomerPayload, DecodeError, ImagePayload, ProductPayload, VariantPayload,
    WebhookPayload, decode,
};
