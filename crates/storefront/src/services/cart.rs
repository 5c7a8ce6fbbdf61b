//! The shopping cart store.
//!
//! Lines are merged by [`LineKey`], quantities are clamped to each variant's
//! stock limit, and the whole line list is written back to storage after
//! every change. None of the operations return errors: bad quantities are
//! normalised and storage failures are logged.

use driftwear_core::{ProductId, clamp_quantity};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::instrument;

use super::pricing::{CartTotals, PricingPolicy};
use crate::models::{CartItem, CartLine, LineKey};
use crate::persistence;
use crate::storage::KeyValueStore;
use crate::subscribers::{SubscriptionId, Subscribers};

/// What a cart mutation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartOutcome {
    /// A new line was appended.
    Added {
        quantity: u32,
        /// The requested quantity was outside `[1, stock_limit]`.
        clamped: bool,
    },
    /// The quantity of an existing line was increased.
    Merged { quantity: u32, clamped: bool },
    /// The quantity of an existing line was set.
    Updated { quantity: u32, clamped: bool },
    /// A line was deleted.
    Removed,
    /// All lines were deleted.
    Cleared,
    /// Nothing matched, or the variant is out of stock.
    Unchanged,
}

impl CartOutcome {
    /// Whether the cart contents changed.
    #[must_use]
    pub const fn is_change(self) -> bool {
        !matches!(self, Self::Unchanged)
    }

    /// Whether the requested quantity was saturated.
    #[must_use]
    pub const fn was_clamped(self) -> bool {
        matches!(
            self,
            Self::Added { clamped: true, .. }
                | Self::Merged { clamped: true, .. }
                | Self::Updated { clamped: true, .. }
        )
    }
}

/// What cart subscribers receive after each change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartView {
    pub lines: Vec<CartLine>,
    pub totals: CartTotals,
}

/// The session's shopping cart.
#[derive(Debug)]
pub struct CartStore<S> {
    storage: S,
    slot: String,
    pricing: PricingPolicy,
    lines: Vec<CartLine>,
    subscribers: Subscribers<CartView>,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Load the cart from `slot`, or start empty.
    ///
    /// Persisted lines that break the cart invariants (duplicate keys,
    /// out-of-range quantities) are repaired on load.
    #[instrument(skip_all, fields(slot = %slot))]
    pub fn load(storage: S, slot: &str, pricing: PricingPolicy) -> Self {
        let stored: Vec<CartLine> = persistence::load_or_empty(&storage, slot);
        let stored_len = stored.len();
        let lines = normalize(stored);
        if lines.len() != stored_len {
            tracing::warn!(
                stored = stored_len,
                kept = lines.len(),
                "Repaired persisted cart lines"
            );
        }
        tracing::debug!(lines = lines.len(), "Cart loaded");

        Self {
            storage,
            slot: slot.to_string(),
            pricing,
            lines,
            subscribers: Subscribers::new(),
        }
    }

    /// Add `quantity` units of `item`.
    ///
    /// An existing line with the same key grows to
    /// `min(existing + quantity, stock_limit)`, and is deleted if that sum
    /// is zero or less; otherwise a new line is appended with `quantity`
    /// clamped into `[1, stock_limit]`. The line's stock limit is refreshed
    /// from `item`.
    pub fn add_item(&mut self, item: CartItem, quantity: i64) -> CartOutcome {
        let position = self.position(
            &item.product_id,
            item.size.as_deref(),
            item.color.as_deref(),
        );

        let outcome = match position {
            Some(index) => self.merge(index, &item, quantity),
            None => match clamp_quantity(quantity, item.stock_limit) {
                Some(clamped_qty) => {
                    tracing::debug!(
                        product_id = %item.product_id,
                        quantity = clamped_qty,
                        "Adding cart line"
                    );
                    self.lines.push(item.into_line(clamped_qty));
                    CartOutcome::Added {
                        quantity: clamped_qty,
                        clamped: i64::from(clamped_qty) != quantity,
                    }
                }
                None => {
                    tracing::debug!(product_id = %item.product_id, "Variant out of stock, not added");
                    CartOutcome::Unchanged
                }
            },
        };

        self.commit(outcome)
    }

    /// Add a single unit of `item`.
    pub fn add_one(&mut self, item: CartItem) -> CartOutcome {
        self.add_item(item, 1)
    }

    /// Delete the line with this key. Missing lines are ignored.
    pub fn remove_item(
        &mut self,
        product_id: &ProductId,
        size: Option<&str>,
        color: Option<&str>,
    ) -> CartOutcome {
        let outcome = match self.position(product_id, size, color) {
            Some(index) => {
                self.lines.remove(index);
                tracing::debug!(product_id = %product_id, "Removed cart line");
                CartOutcome::Removed
            }
            None => CartOutcome::Unchanged,
        };
        self.commit(outcome)
    }

    /// Set the quantity of the line with this key.
    ///
    /// A quantity of zero or less removes the line. Larger quantities are
    /// capped at the line's stock limit. Missing lines are ignored.
    pub fn update_quantity(
        &mut self,
        product_id: &ProductId,
        quantity: i64,
        size: Option<&str>,
        color: Option<&str>,
    ) -> CartOutcome {
        if quantity <= 0 {
            return self.remove_item(product_id, size, color);
        }

        let Some(index) = self.position(product_id, size, color) else {
            return CartOutcome::Unchanged;
        };
        let Some(stock_limit) = self.lines.get(index).map(|line| line.stock_limit) else {
            return CartOutcome::Unchanged;
        };

        let outcome = match clamp_quantity(quantity, stock_limit) {
            Some(clamped_qty) => {
                if let Some(line) = self.lines.get_mut(index) {
                    line.quantity = clamped_qty;
                }
                tracing::debug!(product_id = %product_id, quantity = clamped_qty, "Updated cart line");
                CartOutcome::Updated {
                    quantity: clamped_qty,
                    clamped: i64::from(clamped_qty) != quantity,
                }
            }
            None => {
                self.lines.remove(index);
                CartOutcome::Removed
            }
        };

        self.commit(outcome)
    }

    /// Delete every line.
    ///
    /// Always rewrites the slot, which also replaces any unreadable state
    /// left in storage.
    pub fn clear(&mut self) -> CartOutcome {
        self.lines.clear();
        tracing::debug!(slot = %self.slot, "Cleared cart");
        self.commit(CartOutcome::Cleared)
    }

    /// Register a callback invoked after every change.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: Fn(&CartView) + Send + Sync + 'static,
    {
        self.subscribers.subscribe(callback)
    }

    /// Remove a callback registered with [`subscribe`](Self::subscribe).
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    fn position(
        &self,
        product_id: &ProductId,
        size: Option<&str>,
        color: Option<&str>,
    ) -> Option<usize> {
        self.lines
            .iter()
            .position(|line| line.matches(product_id, size, color))
    }

    fn merge(&mut self, index: usize, item: &CartItem, quantity: i64) -> CartOutcome {
        let Some(existing) = self.lines.get(index).map(|line| line.quantity) else {
            return CartOutcome::Unchanged;
        };

        let requested = i64::from(existing).saturating_add(quantity);
        if requested <= 0 {
            self.lines.remove(index);
            tracing::debug!(product_id = %item.product_id, "Merged quantity reached zero, removed line");
            return CartOutcome::Removed;
        }

        match clamp_quantity(requested, item.stock_limit) {
            Some(clamped_qty) => {
                if let Some(line) = self.lines.get_mut(index) {
                    line.quantity = clamped_qty;
                    line.stock_limit = item.stock_limit;
                }
                tracing::debug!(
                    product_id = %item.product_id,
                    quantity = clamped_qty,
                    "Merged into existing cart line"
                );
                CartOutcome::Merged {
                    quantity: clamped_qty,
                    clamped: i64::from(clamped_qty) != requested,
                }
            }
            None => {
                self.lines.remove(index);
                tracing::debug!(product_id = %item.product_id, "Variant sold out, removed line");
                CartOutcome::Removed
            }
        }
    }

    /// Persist and notify if `outcome` changed anything.
    fn commit(&self, outcome: CartOutcome) -> CartOutcome {
        if outcome.is_change() {
            persistence::save(&self.storage, &self.slot, &self.lines);
            if !self.subscribers.is_empty() {
                self.subscribers.notify(&self.view());
            }
        }
        outcome
    }
}

impl<S> CartStore<S> {
    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// The line with this key, if present.
    #[must_use]
    pub fn line(&self, key: &LineKey) -> Option<&CartLine> {
        self.lines.iter().find(|line| {
            line.matches(&key.product_id, key.size.as_deref(), key.color.as_deref())
        })
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The pricing rules in effect.
    #[must_use]
    pub const fn pricing(&self) -> &PricingPolicy {
        &self.pricing
    }

    /// Storage slot this cart writes to.
    #[must_use]
    pub fn slot(&self) -> &str {
        &self.slot
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn count(&self) -> u64 {
        PricingPolicy::count(&self.lines)
    }

    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        PricingPolicy::subtotal(&self.lines)
    }

    #[must_use]
    pub fn tax(&self) -> Decimal {
        self.pricing.tax(self.subtotal())
    }

    #[must_use]
    pub fn shipping(&self) -> Decimal {
        self.pricing.shipping(self.subtotal())
    }

    #[must_use]
    pub fn grand_total(&self) -> Decimal {
        self.totals().grand_total
    }

    /// Every derived value at once.
    #[must_use]
    pub fn totals(&self) -> CartTotals {
        self.pricing.totals(&self.lines)
    }

    /// Snapshot handed to subscribers.
    #[must_use]
    pub fn view(&self) -> CartView {
        CartView {
            lines: self.lines.clone(),
            totals: self.totals(),
        }
    }
}

/// Enforce the cart invariants on lines read back from storage.
///
/// Lines with a zero stock limit are dropped, quantities are clamped and
/// duplicate keys are folded into the first occurrence.
fn normalize(stored: Vec<CartLine>) -> Vec<CartLine> {
    let mut lines: Vec<CartLine> = Vec::with_capacity(stored.len());
    for mut line in stored {
        let existing = lines.iter_mut().find(|kept| {
            kept.matches(&line.product_id, line.size.as_deref(), line.color.as_deref())
        });
        match existing {
            Some(kept) => {
                let requested = i64::from(kept.quantity) + i64::from(line.quantity);
                if let Some(quantity) = clamp_quantity(requested, kept.stock_limit) {
                    kept.quantity = quantity;
                }
            }
            None => {
                if let Some(quantity) = clamp_quantity(i64::from(line.quantity), line.stock_limit)
                {
                    line.quantity = quantity;
                    lines.push(line);
                }
            }
        }
    }
    lines
}
