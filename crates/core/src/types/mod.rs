//! Core types for Shopify Sync.
//!
//! This module provides type-safe wrappers for Shopify's external IDs and
//! the decimal handling used for text-encoded amounts.

pub mod id;
pub mod price;

pub use id::*;
pub use price::lenient_decimal;
