//! Integration tests for Driftwear.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p driftwear-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_persistence` - File-backed cart round-trips and recovery
//! - `wishlist_persistence` - File-backed wishlist round-trips and recovery
//! - `cart_properties` - Property tests for quantity merging and totals
//!
//! This library holds the fixtures shared by those test files.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::atomic::{AtomicUsize, Ordering};

use driftwear_storefront::StorageError;
use driftwear_storefront::models::{CartItem, WishlistEntry};
use driftwear_storefront::storage::{KeyValueStore, MemoryStorage};
use rust_decimal::Decimal;

/// A cart item with a whole-dollar price and no variant attributes.
#[must_use]
pub fn item(product_id: &str, price: i64, stock_limit: u32) -> CartItem {
    CartItem::new(
        product_id,
        format!("Product {product_id}"),
        Decimal::from(price),
        stock_limit,
    )
}

/// A wishlist entry with a whole-dollar price.
#[must_use]
pub fn entry(id: &str, price: i64) -> WishlistEntry {
    WishlistEntry::new(id, format!("Product {id}"), Decimal::from(price), "tops")
}

/// A backend whose reads succeed but whose writes always fail.
///
/// Used to check that a failing write never turns into an error from a store
/// operation.
#[derive(Debug, Default)]
pub struct ReadOnlyStorage {
    inner: MemoryStorage,
    rejected_writes: AtomicUsize,
}

impl ReadOnlyStorage {
    /// A backend pre-populated with one slot.
    #[must_use]
    pub fn with_slot(slot: &str, value: &str) -> Self {
        Self {
            inner: MemoryStorage::with_slot(slot, value),
            rejected_writes: AtomicUsize::new(0),
        }
    }

    /// How many writes have been refused.
    #[must_use]
    pub fn rejected_writes(&self) -> usize {
        self.rejected_writes.load(Ordering::SeqCst)
    }
}

impl KeyValueStore for ReadOnlyStorage {
    fn read(&self, slot: &str) -> Result<Option<String>, StorageError> {
        self.inner.read(slot)
    }

    fn write(&self, _slot: &str, _value: &str) -> Result<(), StorageError> {
        self.rejected_writes.fetch_add(1, Ordering::SeqCst);
        Err(StorageError::Unavailable("storage is read-only".to_string()))
    }

    fn remove(&self, _slot: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("storage is read-only".to_string()))
    }
}

/// A backend whose reads always fail.
#[derive(Debug, Default)]
pub struct UnreadableStorage;

impl KeyValueStore for UnreadableStorage {
    fn read(&self, slot: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Io {
            slot: slot.to_string(),
            source: std::io::Error::other("disk on fire"),
        })
    }

    fn write(&self, _slot: &str, _value: &str) -> Result<(), StorageError> {
        Ok(())
    }

    fn remove(&self, _slot: &str) -> Result<(), StorageError> {
        Ok(())
    }
}
