//! Per-session root owning the cart and the wishlist.
//!
//! A session is constructed once (per browser session, per CLI invocation)
//! and passed by reference to whatever renders or mutates the stores. There
//! is no global state: two sessions over two backends never see each other.

use crate::config::StoreConfig;
use crate::services::{CartStore, WishlistStore};
use crate::storage::KeyValueStore;

/// The cart and wishlist for one shopper.
///
/// Both stores share the backend `S`, so `S` is usually an `Arc` around a
/// concrete backend.
#[derive(Debug)]
pub struct StorefrontSession<S> {
    cart: CartStore<S>,
    wishlist: WishlistStore<S>,
}

impl<S: KeyValueStore + Clone> StorefrontSession<S> {
    /// Load both stores from `storage` using the slots and pricing in `config`.
    pub fn open(storage: S, config: &StoreConfig) -> Self {
        let cart = CartStore::load(storage.clone(), &config.cart_slot, config.pricing);
        let wishlist = WishlistStore::load(storage, &config.wishlist_slot);
        tracing::info!(
            cart_lines = cart.lines().len(),
            wishlist_entries = wishlist.count(),
            "Session opened"
        );
        Self { cart, wishlist }
    }
}

impl<S: KeyValueStore> StorefrontSession<S> {
    /// Empty both stores, e.g. on sign-out.
    pub fn clear_all(&mut self) {
        self.cart.clear();
        self.wishlist.clear();
    }
}

impl<S> StorefrontSession<S> {
    #[must_use]
    pub const fn cart(&self) -> &CartStore<S> {
        &self.cart
    }

    pub const fn cart_mut(&mut self) -> &mut CartStore<S> {
        &mut self.cart
    }

    #[must_use]
    pub const fn wishlist(&self) -> &WishlistStore<S> {
        &self.wishlist
    }

    pub const fn wishlist_mut(&mut self) -> &mut WishlistStore<S> {
        &mut self.wishlist
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use driftwear_core::ProductId;
    use rust_decimal::Decimal;

    use super::*;
    use crate::models::{CartItem, WishlistEntry};
    use crate::storage::{KeyValueStore, MemoryStorage};

    #[test]
    fn test_stores_use_separate_slots() {
        let storage = Arc::new(MemoryStorage::new());
        let config = StoreConfig::default();
        let mut session = StorefrontSession::open(Arc::clone(&storage), &config);

        session
            .cart_mut()
            .add_one(CartItem::new("P1", "Tee", Decimal::from(20), 3));
        session
            .wishlist_mut()
            .add_item(WishlistEntry::new("P2", "Hoodie", Decimal::from(60), "tops"));

        assert_eq!(storage.len(), 2);

        let reopened = StorefrontSession::open(storage, &config);
        assert_eq!(reopened.cart().count(), 1);
        assert!(reopened.wishlist().contains(&ProductId::new("P2")));
    }

    #[test]
    fn test_clear_all() {
        let storage = Arc::new(MemoryStorage::new());
        let config = StoreConfig::default();
        let mut session = StorefrontSession::open(Arc::clone(&storage), &config);
        session
            .cart_mut()
            .add_one(CartItem::new("P1", "Tee", Decimal::from(20), 3));
        session
            .wishlist_mut()
            .add_item(WishlistEntry::new("P1", "Tee", Decimal::from(20), "tops"));

        session.clear_all();

        assert!(session.cart().is_empty());
        assert!(session.wishlist().is_empty());
        let raw = storage.read("cart").ok().flatten();
        assert!(raw.is_some_and(|raw| raw.contains("\"items\":[]")));
    }

    #[test]
    fn test_sessions_do_not_share_state() {
        let config = StoreConfig::default();
        let mut first = StorefrontSession::open(Arc::new(MemoryStorage::new()), &config);
        let second = StorefrontSession::open(Arc::new(MemoryStorage::new()), &config);

        first
            .cart_mut()
            .add_one(CartItem::new("P1", "Tee", Decimal::from(20), 3));

        assert_eq!(first.cart().count(), 1);
        assert_eq!(second.cart().count(), 0);
    }
}
