//! Catalogue product model.

use serde::{Deserialize, Serialize};

/// A product in the catalogue.
///
/// Names are stored lowercased by convention; name search is a prefix range
/// over the stored value and only matches that form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Product {
    /// Key
    pub id: String,
    /// Searchable name
    pub name: String,
    /// Long description
    pub description: String,
    /// Unit price
    pub price: f64,
    /// Category used for equality filtering
    pub category: String,
    /// Download URL of the product image
    pub image_url: String,
    /// Units in stock
    pub stock: i32,
}

impl Product {
    /// Creates a product with an empty description, image and no stock.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: f64,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            category: category.into(),
            ..Self::default()
        }
    }
}
