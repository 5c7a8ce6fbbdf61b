//! Cart totals.
//!
//! Totals are pure functions of the current lines. Nothing here is cached:
//! every call recomputes from the slice it is given.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::CartLine;

/// Tax and shipping rules applied to a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingPolicy {
    /// Fraction of the subtotal charged as tax (`0.10` = 10%).
    pub tax_rate: Decimal,
    /// Shipping is free when the subtotal is strictly above this amount.
    pub free_shipping_threshold: Decimal,
    /// Shipping fee charged otherwise.
    pub flat_shipping: Decimal,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            tax_rate: Decimal::new(10, 2),
            free_shipping_threshold: Decimal::ONE_HUNDRED,
            flat_shipping: Decimal::TEN,
        }
    }
}

/// Derived monetary values for a set of cart lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    /// Sum of line quantities.
    pub count: u64,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub shipping: Decimal,
    pub grand_total: Decimal,
}

impl PricingPolicy {
    /// Sum of `quantity` over all lines.
    #[must_use]
    pub fn count(lines: &[CartLine]) -> u64 {
        lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Sum of `unit_price × quantity` over all lines.
    #[must_use]
    pub fn subtotal(lines: &[CartLine]) -> Decimal {
        lines.iter().map(CartLine::line_total).sum()
    }

    /// Tax owed on `subtotal`.
    #[must_use]
    pub fn tax(&self, subtotal: Decimal) -> Decimal {
        subtotal * self.tax_rate
    }

    /// Shipping owed for `subtotal`.
    #[must_use]
    pub fn shipping(&self, subtotal: Decimal) -> Decimal {
        if subtotal > self.free_shipping_threshold {
            Decimal::ZERO
        } else {
            self.flat_shipping
        }
    }

    /// All totals in one pass.
    #[must_use]
    pub fn totals(&self, lines: &[CartLine]) -> CartTotals {
        let subtotal = Self::subtotal(lines);
        let tax = self.tax(subtotal);
        let shipping = self.shipping(subtotal);
        CartTotals {
            count: Self::count(lines),
            subtotal,
            tax,
            shipping,
            grand_total: subtotal + tax + shipping,
        }
    }
}
