//! The wishlist store.
//!
//! An insertion-ordered set of product snapshots keyed by product id.

use driftwear_core::ProductId;
use serde::Serialize;
use tracing::instrument;

use crate::models::WishlistEntry;
use crate::persistence;
use crate::storage::KeyValueStore;
use crate::subscribers::{SubscriptionId, Subscribers};

/// What wishlist subscribers receive after each change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WishlistView {
    pub entries: Vec<WishlistEntry>,
    pub count: usize,
}

/// The session's wishlist.
#[derive(Debug)]
pub struct WishlistStore<S> {
    storage: S,
    slot: String,
    entries: Vec<WishlistEntry>,
    subscribers: Subscribers<WishlistView>,
}

impl<S: KeyValueStore> WishlistStore<S> {
    /// Load the wishlist from `slot`, or start empty.
    ///
    /// Duplicate ids in persisted state keep their first occurrence.
    #[instrument(skip_all, fields(slot = %slot))]
    pub fn load(storage: S, slot: &str) -> Self {
        let stored: Vec<WishlistEntry> = persistence::load_or_empty(&storage, slot);
        let stored_len = stored.len();

        let mut entries: Vec<WishlistEntry> = Vec::with_capacity(stored_len);
        for entry in stored {
            if !entries.iter().any(|kept| kept.id == entry.id) {
                entries.push(entry);
            }
        }
        if entries.len() != stored_len {
            tracing::warn!(
                stored = stored_len,
                kept = entries.len(),
                "Dropped duplicate wishlist entries"
            );
        }
        tracing::debug!(entries = entries.len(), "Wishlist loaded");

        Self {
            storage,
            slot: slot.to_string(),
            entries,
            subscribers: Subscribers::new(),
        }
    }

    /// Append `entry` unless its id is already saved.
    ///
    /// Returns `true` if the entry was added.
    pub fn add_item(&mut self, entry: WishlistEntry) -> bool {
        if self.contains(&entry.id) {
            return false;
        }
        tracing::debug!(product_id = %entry.id, "Adding wishlist entry");
        self.entries.push(entry);
        self.commit();
        true
    }

    /// Remove the entry with `id`.
    ///
    /// Returns `true` if an entry was removed.
    pub fn remove_item(&mut self, id: &ProductId) -> bool {
        let Some(index) = self.entries.iter().position(|entry| entry.id == *id) else {
            return false;
        };
        self.entries.remove(index);
        tracing::debug!(product_id = %id, "Removed wishlist entry");
        self.commit();
        true
    }

    /// Add the entry if absent, remove it if present.
    ///
    /// Returns `true` if the entry is saved afterwards.
    pub fn toggle(&mut self, entry: WishlistEntry) -> bool {
        if self.remove_item(&entry.id) {
            false
        } else {
            self.add_item(entry)
        }
    }

    /// Delete every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        tracing::debug!(slot = %self.slot, "Cleared wishlist");
        self.commit();
    }

    /// Register a callback invoked after every change.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: Fn(&WishlistView) + Send + Sync + 'static,
    {
        self.subscribers.subscribe(callback)
    }

    /// Remove a callback registered with [`subscribe`](Self::subscribe).
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    fn commit(&self) {
        persistence::save(&self.storage, &self.slot, &self.entries);
        if !self.subscribers.is_empty() {
            self.subscribers.notify(&self.view());
        }
    }
}

impl<S> WishlistStore<S> {
    /// Whether `id` is saved.
    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.entries.iter().any(|entry| entry.id == *id)
    }

    /// The saved entry for `id`.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&WishlistEntry> {
        self.entries.iter().find(|entry| entry.id == *id)
    }

    /// Entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[WishlistEntry] {
        &self.entries
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Storage slot this wishlist writes to.
    #[must_use]
    pub fn slot(&self) -> &str {
        &self.slot
    }

    /// Snapshot handed to subscribers.
    #[must_use]
    pub fn view(&self) -> WishlistView {
        WishlistView {
            entries: self.entries.clone(),
            count: self.entries.len(),
        }
    }
}
