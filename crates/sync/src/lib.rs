//! Shopify Sync library.
//!
//! Receives Shopify product and customer webhooks and upserts them into
//! `PostgreSQL`, one row at a time, keyed by Shopify's own IDs.
//!
//! The binary in `main.rs` is a thin composition root: it loads
//! configuration, opens the pool, and serves [`routes::routes`] with an
//! [`state::AppState`] built around the pool.
//!
//! # Security
//!
//! Webhook signatures are **not** verified. Run behind a network boundary
//! that only Shopify (or a verifying proxy) can reach.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod routes;
pub mod services;
pub mod state;
