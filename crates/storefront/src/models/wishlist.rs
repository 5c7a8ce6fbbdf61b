//! Wishlist entry type.

use driftwear_core::ProductId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A saved product snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistEntry {
    /// Unique within the wishlist.
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub image_ref: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sizes: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<String>>,
}

impl WishlistEntry {
    /// Create an entry with only the required snapshot fields.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price: Decimal,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            image_ref: String::new(),
            brand: None,
            category: category.into(),
            sizes: None,
            colors: None,
        }
    }

    #[must_use]
    pub fn with_image(mut self, image_ref: impl Into<String>) -> Self {
        self.image_ref = image_ref.into();
        self
    }

    #[must_use]
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    #[must_use]
    pub fn with_sizes<I, T>(mut self, sizes: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.sizes = Some(sizes.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_colors<I, T>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.colors = Some(colors.into_iter().map(Into::into).collect());
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserializes_browser_shape() {
        let raw = r#"{
            "id": "P9",
            "name": "Cargo Pants",
            "price": 64,
            "imageRef": "/img/p9.webp",
            "category": "bottoms",
            "sizes": ["30", "32"]
        }"#;
        let entry: WishlistEntry = serde_json::from_str(raw).unwrap();
        assert_eq!(entry.id, ProductId::new("P9"));
        assert_eq!(entry.price, Decimal::from(64));
        assert_eq!(entry.brand, None);
        assert_eq!(entry.sizes.as_deref().map(<[String]>::len), Some(2));
    }

    #[test]
    fn test_builder_sets_optional_fields() {
        let entry = WishlistEntry::new("P1", "Tee", Decimal::from(30), "tops")
            .with_brand("Driftwear")
            .with_colors(["white", "black"]);
        assert_eq!(entry.brand.as_deref(), Some("Driftwear"));
        assert_eq!(
            entry.colors,
            Some(vec!["white".to_string(), "black".to_string()])
        );
    }
}
