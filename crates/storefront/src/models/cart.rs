//! Cart line types.

use driftwear_core::ProductId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Identity of a cart line: product plus optional size and color.
///
/// `None` is its own variant, distinct from every concrete value, so a
/// one-size cap and the same cap in size "M" are two different lines.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineKey {
    pub product_id: ProductId,
    pub size: Option<String>,
    pub color: Option<String>,
}

impl LineKey {
    /// Build a key from borrowed parts.
    #[must_use]
    pub fn new(product_id: &ProductId, size: Option<&str>, color: Option<&str>) -> Self {
        Self {
            product_id: product_id.clone(),
            size: size.map(str::to_owned),
            color: color.map(str::to_owned),
        }
    }
}

/// A product variant being added to the cart.
///
/// Carries the display snapshot and the stock limit the catalog reported for
/// the variant at the time of the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItem {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Decimal,
    pub image_ref: String,
    pub size: Option<String>,
    pub color: Option<String>,
    /// Maximum quantity allowed for this variant.
    pub stock_limit: u32,
}

impl CartItem {
    /// Create an item with no size, color or image.
    pub fn new(
        product_id: impl Into<ProductId>,
        name: impl Into<String>,
        unit_price: Decimal,
        stock_limit: u32,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            name: name.into(),
            unit_price,
            image_ref: String::new(),
            size: None,
            color: None,
            stock_limit,
        }
    }

    #[must_use]
    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    #[must_use]
    pub fn with_image(mut self, image_ref: impl Into<String>) -> Self {
        self.image_ref = image_ref.into();
        self
    }

    /// Turn the item into a line holding `quantity` units.
    #[must_use]
    pub fn into_line(self, quantity: u32) -> CartLine {
        CartLine {
            product_id: self.product_id,
            name: self.name,
            unit_price: self.unit_price,
            image_ref: self.image_ref,
            quantity,
            size: self.size,
            color: self.color,
            stock_limit: self.stock_limit,
        }
    }
}

/// A line in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Decimal,
    #[serde(default)]
    pub image_ref: String,
    /// Always within `[1, stock_limit]`.
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub stock_limit: u32,
}

impl CartLine {
    /// The line's identity.
    #[must_use]
    pub fn key(&self) -> LineKey {
        LineKey::new(&self.product_id, self.size.as_deref(), self.color.as_deref())
    }

    /// Whether this line has the given identity.
    #[must_use]
    pub fn matches(&self, product_id: &ProductId, size: Option<&str>, color: Option<&str>) -> bool {
        self.product_id == *product_id
            && self.size.as_deref() == size
            && self.color.as_deref() == color
    }

    /// `unit_price × quantity`.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}
