//! Driftwear Core - Shared types library.
//!
//! This crate provides common types used across all Driftwear components:
//! - `storefront` - Session-scoped cart and wishlist stores
//! - `cli` - Command-line tools for inspecting persisted stores
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no storage access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, and quantities

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
