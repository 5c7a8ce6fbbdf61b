//! In-memory storage backend.

use std::collections::HashMap;
use std::sync::RwLock;

use super::{KeyValueStore, validate_slot};
use crate::error::{Result, StorageError};

/// A `HashMap`-backed [`KeyValueStore`].
///
/// Contents live as long as the value does. Wrap it in an `Arc` to share a
/// single backend between stores and inspect it afterwards.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slots: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend with one slot already populated.
    #[must_use]
    pub fn with_slot(slot: impl Into<String>, value: impl Into<String>) -> Self {
        let mut slots = HashMap::new();
        slots.insert(slot.into(), value.into());
        Self {
            slots: RwLock::new(slots),
        }
    }

    /// Number of populated slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.read().map_or(0, |slots| slots.len())
    }

    /// Whether no slot has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned<E>(_: E) -> StorageError {
    StorageError::Unavailable("memory storage lock poisoned".to_string())
}

impl KeyValueStore for MemoryStorage {
    fn read(&self, slot: &str) -> Result<Option<String>> {
        validate_slot(slot)?;
        let slots = self.slots.read().map_err(poisoned)?;
        Ok(slots.get(slot).cloned())
    }

    fn write(&self, slot: &str, value: &str) -> Result<()> {
        validate_slot(slot)?;
        let mut slots = self.slots.write().map_err(poisoned)?;
        slots.insert(slot.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, slot: &str) -> Result<()> {
        validate_slot(slot)?;
        let mut slots = self.slots.write().map_err(poisoned)?;
        slots.remove(slot);
        Ok(())
    }
}
