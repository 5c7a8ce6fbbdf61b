//! Driftwear Storefront library.
//!
//! Session-scoped state for the customer-facing storefront: the shopping
//! cart and the wishlist. Both stores are plain objects owned by a
//! [`StorefrontSession`](session::StorefrontSession) and persisted through an
//! injected [`KeyValueStore`](storage::KeyValueStore) backend.
//!
//! # Modules
//!
//! - [`models`] - Cart lines, wishlist entries and their persisted shape
//! - [`services`] - The cart and wishlist stores plus pricing rules
//! - [`storage`] - Durable key-value backends (memory, file)
//! - [`persistence`] - Snapshot encoding and load-or-empty recovery
//! - [`subscribers`] - Observer registry used to notify UI consumers

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod models;
pub mod persistence;
pub mod services;
pub mod session;
pub mod storage;
pub mod subscribers;
pub mod telemetry;

pub use config::StoreConfig;
pub use error::StorageError;
pub use services::{CartOutcome, CartStore, PricingPolicy, WishlistStore};
pub use session::StorefrontSession;
