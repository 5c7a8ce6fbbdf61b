//! Durable key-value storage used by the session stores.
//!
//! A store reads one named slot when it is created and rewrites the whole
//! slot after every mutation. Backends only move opaque strings around; the
//! snapshot format lives in [`crate::persistence`].
//!
//! # Backends
//!
//! - [`MemoryStorage`] - in-process map, used in tests and when embedding
//! - [`FileStorage`] - one JSON file per slot under a base directory

use std::sync::Arc;

use crate::error::{Result, StorageError};

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// A durable key-value persistence primitive.
///
/// Methods take `&self`; backends that hold mutable state use interior
/// mutability so one backend can be shared between the cart and the
/// wishlist through an [`Arc`].
pub trait KeyValueStore {
    /// Read a slot. Returns `Ok(None)` if the slot has never been written.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn read(&self, slot: &str) -> Result<Option<String>>;

    /// Replace the contents of a slot.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn write(&self, slot: &str, value: &str) -> Result<()>;

    /// Delete a slot. Deleting a missing slot is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn remove(&self, slot: &str) -> Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn read(&self, slot: &str) -> Result<Option<String>> {
        (**self).read(slot)
    }

    fn write(&self, slot: &str, value: &str) -> Result<()> {
        (**self).write(slot, value)
    }

    fn remove(&self, slot: &str) -> Result<()> {
        (**self).remove(slot)
    }
}

/// Check that a slot name is safe to use as a file stem.
///
/// # Errors
///
/// Returns `StorageError::InvalidSlot` unless the name is non-empty and made
/// only of ASCII letters, digits, `-` and `_`.
pub fn validate_slot(slot: &str) -> Result<()> {
    let valid = !slot.is_empty()
        && slot
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidSlot(slot.to_string()))
    }
}
