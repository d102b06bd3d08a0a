//! Product entity - catalogue documents keyed by a caller-chosen id.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Unique identifier for the product
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Lowercased product name, used for prefix search
    pub name: String,
    /// Long description
    pub description: String,
    /// Unit price
    pub price: f64,
    /// Category for equality filtering
    pub category: String,
    /// Image download URL
    pub image_url: String,
    /// Units in stock
    pub stock: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
