//! Domain models for the session stores.
//!
//! These are the shapes that are persisted and handed to subscribers. The
//! display fields (name, price, image) are snapshots taken when the product
//! was added; the stores never refresh them from the catalog.

pub mod cart;
pub mod wishlist;

pub use cart::{CartItem, CartLine, LineKey};
pub use wishlist::WishlistEntry;

/// Default storage slot names.
pub mod slots {
    /// Slot holding the serialized cart lines.
    pub const CART: &str = "cart";

    /// Slot holding the serialized wishlist entries.
    pub const WISHLIST: &str = "wishlist";
}
