//! Wishlist commands.

use std::fmt::Write as _;

use clap::Args;
use driftwear_core::{CurrencyCode, Price, ProductId};
use driftwear_storefront::models::WishlistEntry;
use driftwear_storefront::services::WishlistStore;
use driftwear_storefront::storage::KeyValueStore;
use rust_decimal::Decimal;

use super::{CommandError, OutputMode};

/// Arguments for `wishlist add`.
#[derive(Debug, Args)]
pub struct SaveEntryArgs {
    /// Catalog product ID
    pub id: String,

    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub price: Decimal,

    #[arg(long)]
    pub category: String,

    #[arg(long)]
    pub brand: Option<String>,

    #[arg(long)]
    pub image: Option<String>,

    /// Available sizes, comma separated
    #[arg(long, value_delimiter = ',')]
    pub sizes: Option<Vec<String>>,

    /// Available colors, comma separated
    #[arg(long, value_delimiter = ',')]
    pub colors: Option<Vec<String>>,
}

impl From<SaveEntryArgs> for WishlistEntry {
    fn from(args: SaveEntryArgs) -> Self {
        Self {
            id: ProductId::new(args.id),
            name: args.name,
            price: args.price,
            image_ref: args.image.unwrap_or_default(),
            brand: args.brand,
            category: args.category,
            sizes: args.sizes,
            colors: args.colors,
        }
    }
}

/// Render the wishlist as a list or as JSON.
///
/// # Errors
///
/// Returns `CommandError::Render` if JSON serialization fails.
pub fn show<S>(
    wishlist: &WishlistStore<S>,
    currency: CurrencyCode,
    mode: OutputMode,
) -> Result<String, CommandError> {
    if mode == OutputMode::Json {
        return Ok(serde_json::to_string_pretty(&wishlist.view())?);
    }

    if wishlist.is_empty() {
        return Ok("Wishlist is empty".to_string());
    }

    let mut out = String::new();
    for entry in wishlist.entries() {
        let brand = entry.brand.as_deref().unwrap_or("-");
        let _ = writeln!(
            out,
            "{:<12} {:<28} {:<12} {:<10} {:>10}",
            entry.id,
            entry.name,
            brand,
            entry.category,
            Price::new(entry.price, currency).display(),
        );
    }
    let _ = write!(out, "\n{} saved", wishlist.count());
    Ok(out)
}

/// Save a product.
pub fn add<S: KeyValueStore>(wishlist: &mut WishlistStore<S>, entry: WishlistEntry) -> String {
    let id = entry.id.clone();
    if wishlist.add_item(entry) {
        format!("Saved {id}")
    } else {
        format!("{id} is already saved")
    }
}

/// Remove a saved product.
pub fn remove<S: KeyValueStore>(wishlist: &mut WishlistStore<S>, id: &ProductId) -> String {
    if wishlist.remove_item(id) {
        format!("Removed {id}")
    } else {
        format!("{id} was not saved")
    }
}

/// Report whether a product is saved.
pub fn contains<S>(wishlist: &WishlistStore<S>, id: &ProductId) -> String {
    if wishlist.contains(id) {
        format!("{id} is saved")
    } else {
        format!("{id} is not saved")
    }
}

/// Remove every saved product.
pub fn clear<S: KeyValueStore>(wishlist: &mut WishlistStore<S>) -> String {
    wishlist.clear();
    "Wishlist cleared".to_string()
}
