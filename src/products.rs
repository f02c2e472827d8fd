//! Products

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque product identifier, as issued by the storefront catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create a product id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Product
///
/// Read-only reference data. Carts and wishlists never own a product, they take
/// a snapshot of its display fields when it is added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Product id (`_id` in storefront API payloads)
    #[serde(alias = "_id")]
    pub id: ProductId,

    /// Display name
    pub name: String,

    /// Price in whole rupees
    pub price: u64,

    /// Image URI
    #[serde(default)]
    pub image: String,

    /// Seller location label
    #[serde(default)]
    pub location: String,

    /// Catalog category, e.g. `electronics`
    #[serde(default)]
    pub category: String,

    /// Free-text description
    #[serde(default)]
    pub description: String,

    /// Seller display name
    #[serde(default)]
    pub seller: String,

    /// Seller contact phone
    #[serde(default)]
    pub phone: String,

    /// Condition label, e.g. `excellent`
    #[serde(default)]
    pub condition: String,

    /// Whether the listing can still be bought
    #[serde(default = "available_by_default")]
    pub is_available: bool,
}

fn available_by_default() -> bool {
    true
}

impl Product {
    /// Create an available product with only the fields a cart needs.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price: u64,
        image: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            image: image.into(),
            location: location.into(),
            category: String::new(),
            description: String::new(),
            seller: String::new(),
            phone: String::new(),
            condition: String::new(),
            is_available: true,
        }
    }

    /// Set the catalog category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }
}
