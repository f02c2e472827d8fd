//! Wishlist

use serde::{Deserialize, Serialize};

use crate::products::{Product, ProductId};

/// One product's entry in the saved-for-later list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishlistEntry {
    /// Referenced product (`_id` when the whole product was saved)
    #[serde(alias = "_id")]
    pub id: ProductId,

    /// Product name when wishlisted
    pub name: String,

    /// Price in whole rupees when wishlisted
    pub price: u64,

    /// Image URI when wishlisted
    #[serde(default)]
    pub image: String,

    /// Seller location when wishlisted
    #[serde(default)]
    pub location: String,
}

impl From<&Product> for WishlistEntry {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            image: product.image.clone(),
            location: product.location.clone(),
        }
    }
}

/// Outcome of toggling a product on the wishlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WishlistToggle {
    /// The product was not on the wishlist and has been added.
    Added,

    /// The product was on the wishlist and has been removed.
    Removed,
}
