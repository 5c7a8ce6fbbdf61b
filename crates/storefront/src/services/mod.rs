//! Session store services.
//!
//! - [`cart`] - line merging, quantity clamping and totals
//! - [`wishlist`] - de-duplicated saved products
//! - [`pricing`] - tax and shipping rules

pub mod cart;
pub mod pricing;
pub mod wishlist;

pub use cart::{CartOutcome, CartStore, CartView};
pub use pricing::{CartTotals, PricingPolicy};
pub use wishlist::{WishlistStore, WishlistView};
