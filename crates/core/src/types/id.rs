//! Newtype IDs for type-safe entity references.
//!
//! Catalog identifiers are opaque strings handed out by the catalog API.
//! Use the `define_string_id!` macro to create type-safe wrappers that prevent
//! accidentally mixing IDs from different entity types.

/// Macro to define a type-safe string ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<&str>`, `From<String>` and `Display` implementations
///
/// # Example
///
/// ```rust
/// # use driftwear_core::define_string_id;
/// define_string_id!(CategoryId);
/// define_string_id!(BrandId);
///
/// let category = CategoryId::new("hoodies");
/// let brand = BrandId::new("hoodies");
/// assert_eq!(category.as_str(), brand.as_str());
///
/// // These are different types, so this won't compile:
/// // let _: CategoryId = brand;
/// ```
#[macro_export]
macro_rules! define_string_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from anything string-like.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return the owned string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.pad(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

// Define standard entity IDs
define_string_id!(ProductId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_id_display() {
        let id = ProductId::new("P1");
        assert_eq!(id.to_string(), "P1");
        assert_eq!(id.as_str(), "P1");
    }

    #[test]
    fn test_product_id_serializes_transparently() {
        let id = ProductId::from("tee-042");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"tee-042\"");

        let back: ProductId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_product_id_conversions() {
        let owned = ProductId::from(String::from("cap-7"));
        assert_eq!(owned, ProductId::new("cap-7"));
        assert_eq!(owned.into_inner(), "cap-7");
    }
}
