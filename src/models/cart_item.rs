//! Cart line item.
//!
//! `total_price` is derived and has no setter. Every path that can change the
//! price or quantity (constructor, setters, decoding) recomputes it, so a
//! `CartItem` can never carry a stale line total.

use serde::{Deserialize, Serialize};

/// One product line in a cart or in an order snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredCartItem")]
pub struct CartItem {
    product_id: String,
    product_name: String,
    product_price: f64,
    product_image: String,
    quantity: u32,
    total_price: f64,
}

/// Wire shape; any `totalPrice` found in stored data is ignored.
#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct StoredCartItem {
    product_id: String,
    product_name: String,
    product_price: f64,
    product_image: String,
    quantity: u32,
}

impl From<StoredCartItem> for CartItem {
    fn from(stored: StoredCartItem) -> Self {
        Self::new(
            stored.product_id,
            stored.product_name,
            stored.product_price,
            stored.product_image,
            stored.quantity,
        )
    }
}

impl CartItem {
    /// Creates a line item and computes its total.
    pub fn new(
        product_id: impl Into<String>,
        product_name: impl Into<String>,
        product_price: f64,
        product_image: impl Into<String>,
        quantity: u32,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            product_name: product_name.into(),
            product_price,
            product_image: product_image.into(),
            quantity,
            total_price: product_price * f64::from(quantity),
        }
    }

    /// Id of the product on this line.
    #[must_use]
    pub fn product_id(&self) -> &str {
        &self.product_id
    }

    /// Points the line at another product.
    pub fn set_product_id(&mut self, product_id: impl Into<String>) {
        self.product_id = product_id.into();
    }

    /// Product name as shown at the time it was added.
    #[must_use]
    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    /// Renames the line.
    pub fn set_product_name(&mut self, product_name: impl Into<String>) {
        self.product_name = product_name.into();
    }

    /// Unit price.
    #[must_use]
    pub const fn product_price(&self) -> f64 {
        self.product_price
    }

    /// Sets the unit price and recomputes the line total.
    pub fn set_product_price(&mut self, product_price: f64) {
        self.product_price = product_price;
        self.recompute_total();
    }

    /// Image URL, empty when the product has none.
    #[must_use]
    pub fn product_image(&self) -> &str {
        &self.product_image
    }

    /// Replaces the image URL.
    pub fn set_product_image(&mut self, product_image: impl Into<String>) {
        self.product_image = product_image.into();
    }

    /// Number of units.
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Sets the quantity and recomputes the line total.
    pub fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
        self.recompute_total();
    }

    /// Unit price times quantity.
    #[must_use]
    pub const fn total_price(&self) -> f64 {
        self.total_price
    }

    fn recompute_total(&mut self) {
        self.total_price = self.product_price * f64::from(self.quantity);
    }
}
