//! Cart Lines

use serde::{Deserialize, Serialize};

use crate::{
    products::{Product, ProductId},
    wishlist::WishlistEntry,
};

/// One product's entry in the shopping cart.
///
/// The display fields are a snapshot taken when the product was first added, so
/// totals stay correct if the catalog later changes or drops the product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Referenced product
    pub product_id: ProductId,

    /// Product name at add-time
    pub name: String,

    /// Unit price in whole rupees at add-time
    pub price: u64,

    /// Image URI at add-time
    #[serde(default)]
    pub image: String,

    /// Seller location at add-time
    #[serde(default)]
    pub location: String,

    /// Number of units, always at least 1 while the line is in a cart
    pub quantity: u32,
}

impl CartLine {
    /// Start a new line for a product with a quantity of 1.
    pub fn from_product(product: &Product) -> Self {
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            image: product.image.clone(),
            location: product.location.clone(),
            quantity: 1,
        }
    }

    /// Start a new line from a wishlist entry's snapshot with a quantity of 1.
    pub fn from_wishlist_entry(entry: &WishlistEntry) -> Self {
        Self {
            product_id: entry.id.clone(),
            name: entry.name.clone(),
            price: entry.price,
            image: entry.image.clone(),
            location: entry.location.clone(),
            quantity: 1,
        }
    }

    /// Unit price multiplied by quantity.
    pub fn line_total(&self) -> u64 {
        self.price.saturating_mul(u64::from(self.quantity))
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn from_product_snapshots_display_fields() {
        let product = Product::new("1", "iPhone 12 Pro", 45_000, "phone.jpg", "delhi");

        let line = CartLine::from_product(&product);

        assert_eq!(line.product_id, product.id);
        assert_eq!(line.name, "iPhone 12 Pro");
        assert_eq!(line.price, 45_000);
        assert_eq!(line.image, "phone.jpg");
        assert_eq!(line.location, "delhi");
        assert_eq!(line.quantity, 1);
    }

    #[test]
    fn line_total_multiplies_price_by_quantity() {
        let mut line = CartLine::from_product(&Product::new("2", "Table", 3_500, "", "mumbai"));
        line.quantity = 3;

        assert_eq!(line.line_total(), 10_500);
    }

    #[test]
    fn serializes_with_storefront_field_names() -> TestResult {
        let line = CartLine::from_product(&Product::new("3", "Handbag", 8_000, "bag.jpg", "bangalore"));

        let json: serde_json::Value = serde_json::to_value(&line)?;

        assert_eq!(json["productId"], "3");
        assert_eq!(json["quantity"], 1);
        assert_eq!(json["location"], "bangalore");

        Ok(())
    }

    #[test]
    fn deserializes_line_without_location_or_image() -> TestResult {
        let line: CartLine = serde_json::from_str(
            r#"{"productId": "4", "name": "Kettle", "price": 600, "quantity": 2}"#,
        )?;

        assert_eq!(line.location, "");
        assert_eq!(line.image, "");
        assert_eq!(line.quantity, 2);

        Ok(())
    }
}
