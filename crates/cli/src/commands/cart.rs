//! Cart commands.

use std::fmt::Write as _;

use clap::Args;
use driftwear_core::{CurrencyCode, Price, ProductId};
use driftwear_storefront::models::CartItem;
use driftwear_storefront::services::{CartOutcome, CartStore};
use driftwear_storefront::storage::KeyValueStore;
use rust_decimal::Decimal;

use super::{CommandError, OutputMode};

/// Arguments for `cart add`.
#[derive(Debug, Args)]
pub struct AddItemArgs {
    /// Catalog product ID
    pub product_id: String,

    /// Display name
    #[arg(long)]
    pub name: String,

    /// Unit price
    #[arg(long)]
    pub price: Decimal,

    /// Maximum quantity available for this variant
    #[arg(long)]
    pub stock: u32,

    /// Quantity to add
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    pub qty: i64,

    #[arg(long)]
    pub size: Option<String>,

    #[arg(long)]
    pub color: Option<String>,

    /// Image URL or path
    #[arg(long)]
    pub image: Option<String>,
}

impl From<AddItemArgs> for CartItem {
    fn from(args: AddItemArgs) -> Self {
        Self {
            product_id: ProductId::new(args.product_id),
            name: args.name,
            unit_price: args.price,
            image_ref: args.image.unwrap_or_default(),
            size: args.size,
            color: args.color,
            stock_limit: args.stock,
        }
    }
}

/// Render the cart as a table or as JSON.
///
/// # Errors
///
/// Returns `CommandError::Render` if JSON serialization fails.
pub fn show<S>(
    cart: &CartStore<S>,
    currency: CurrencyCode,
    mode: OutputMode,
) -> Result<String, CommandError> {
    if mode == OutputMode::Json {
        return Ok(serde_json::to_string_pretty(&cart.view())?);
    }

    let money = |amount: Decimal| Price::new(amount, currency).display();
    let mut out = String::new();

    if cart.is_empty() {
        out.push_str("Cart is empty\n");
    } else {
        for line in cart.lines() {
            let _ = writeln!(
                out,
                "{:<28} {:>3} x {:>10} = {:>10}",
                variant_label(&line.product_id, line.size.as_deref(), line.color.as_deref()),
                line.quantity,
                money(line.unit_price),
                money(line.line_total()),
            );
        }
        out.push('\n');
    }

    let totals = cart.totals();
    let _ = writeln!(out, "Items:    {}", totals.count);
    let _ = writeln!(out, "Subtotal: {}", money(totals.subtotal));
    let _ = writeln!(out, "Tax:      {}", money(totals.tax));
    let _ = writeln!(out, "Shipping: {}", money(totals.shipping));
    let _ = write!(out, "Total:    {}", money(totals.grand_total));
    Ok(out)
}

/// Add `qty` units of `item`.
pub fn add<S: KeyValueStore>(cart: &mut CartStore<S>, item: CartItem, qty: i64) -> String {
    let label = variant_label(&item.product_id, item.size.as_deref(), item.color.as_deref());
    let stock_limit = item.stock_limit;
    let outcome = cart.add_item(item, qty);
    describe(&label, outcome, stock_limit, qty)
}

/// Set the quantity of a line.
pub fn set<S: KeyValueStore>(
    cart: &mut CartStore<S>,
    product_id: &ProductId,
    qty: i64,
    size: Option<&str>,
    color: Option<&str>,
) -> String {
    let label = variant_label(product_id, size, color);
    let stock_limit = cart
        .lines()
        .iter()
        .find(|line| line.matches(product_id, size, color))
        .map_or(0, |line| line.stock_limit);
    let outcome = cart.update_quantity(product_id, qty, size, color);
    describe(&label, outcome, stock_limit, qty)
}

/// Remove a line.
pub fn remove<S: KeyValueStore>(
    cart: &mut CartStore<S>,
    product_id: &ProductId,
    size: Option<&str>,
    color: Option<&str>,
) -> String {
    let label = variant_label(product_id, size, color);
    let outcome = cart.remove_item(product_id, size, color);
    describe(&label, outcome, 0, 0)
}

/// Remove every line.
pub fn clear<S: KeyValueStore>(cart: &mut CartStore<S>) -> String {
    cart.clear();
    "Cart cleared".to_string()
}

fn variant_label(product_id: &ProductId, size: Option<&str>, color: Option<&str>) -> String {
    match (size, color) {
        (None, None) => product_id.to_string(),
        (Some(size), None) => format!("{product_id} ({size})"),
        (None, Some(color)) => format!("{product_id} ({color})"),
        (Some(size), Some(color)) => format!("{product_id} ({size} / {color})"),
    }
}

fn describe(label: &str, outcome: CartOutcome, stock_limit: u32, requested: i64) -> String {
    // A non-positive add raised to one unit is not a stock shortage.
    let limited = match outcome {
        CartOutcome::Added { quantity, clamped } => {
            clamped && quantity == stock_limit && requested > i64::from(stock_limit)
        }
        CartOutcome::Merged { quantity, clamped } | CartOutcome::Updated { quantity, clamped } => {
            clamped && quantity == stock_limit
        }
        _ => false,
    };
    let clamp_note = if limited {
        format!(" (limited to {stock_limit} in stock)")
    } else {
        String::new()
    };

    match outcome {
        CartOutcome::Added { quantity, .. } => format!("Added {label} x{quantity}{clamp_note}"),
        CartOutcome::Merged { quantity, .. } => {
            format!("{label} now x{quantity}{clamp_note}")
        }
        CartOutcome::Updated { quantity, .. } => {
            format!("Set {label} to x{quantity}{clamp_note}")
        }
        CartOutcome::Removed => format!("Removed {label}"),
        CartOutcome::Cleared => "Cart cleared".to_string(),
        CartOutcome::Unchanged => format!("No change for {label}"),
    }
}

#[cfg(test)]
mod tests {
    use driftwear_storefront::PricingPolicy;
    use driftwear_storefront::storage::MemoryStorage;

    use super::*;

    fn cart() -> CartStore<MemoryStorage> {
        CartStore::load(MemoryStorage::new(), "cart", PricingPolicy::default())
    }

    fn args(qty: i64) -> AddItemArgs {
        AddItemArgs {
            product_id: "H1".to_string(),
            name: "Box Logo Hoodie".to_string(),
            price: Decimal::new(8950, 2),
            stock: 2,
            qty,
            size: Some("L".to_string()),
            color: None,
            image: None,
        }
    }

    #[test]
    fn test_add_reports_clamping() {
        let mut cart = cart();
        let message = add(&mut cart, args(5).into(), 5);
        assert_eq!(message, "Added H1 (L) x2 (limited to 2 in stock)");
    }

    #[test]
    fn test_add_raised_to_one_has_no_stock_note() {
        let mut cart = cart();
        let mut item: CartItem = args(0).into();
        item.stock_limit = 4;
        assert_eq!(add(&mut cart, item, 0), "Added H1 (L) x1");
    }

    #[test]
    fn test_merge_over_stock_reports_limit() {
        let mut cart = cart();
        add(&mut cart, args(1).into(), 1);
        assert_eq!(
            add(&mut cart, args(3).into(), 3),
            "H1 (L) now x2 (limited to 2 in stock)"
        );
    }

    #[test]
    fn test_set_and_remove_messages() {
        let mut cart = cart();
        add(&mut cart, args(1).into(), 1);
        let id = ProductId::new("H1");

        assert_eq!(set(&mut cart, &id, 2, Some("L"), None), "Set H1 (L) to x2");
        assert_eq!(set(&mut cart, &id, 2, None, None), "No change for H1");
        assert_eq!(remove(&mut cart, &id, Some("L"), None), "Removed H1 (L)");
    }

    #[test]
    fn test_show_table_totals() {
        let mut cart = cart();
        add(&mut cart, args(1).into(), 1);
        let table = show(&cart, CurrencyCode::USD, OutputMode::Table).expect("render");
        assert!(table.contains("H1 (L)"));
        assert!(table.contains("Subtotal: $89.50"));
        assert!(table.contains("Tax:      $8.95"));
        assert!(table.contains("Shipping: $10.00"));
        assert!(table.contains("Total:    $108.45"));
    }

    #[test]
    fn test_show_empty() {
        let cart = cart();
        let table = show(&cart, CurrencyCode::USD, OutputMode::Table).expect("render");
        assert!(table.starts_with("Cart is empty"));
    }

    #[test]
    fn test_show_json() {
        let mut cart = cart();
        add(&mut cart, args(1).into(), 1);
        let json = show(&cart, CurrencyCode::USD, OutputMode::Json).expect("render");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(value["totals"]["count"], 1);
        assert_eq!(value["lines"][0]["productId"], "H1");
    }
}
