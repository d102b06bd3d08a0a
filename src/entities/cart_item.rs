//! Cart item entity - the per-user cart as a sub-collection.
//!
//! Each row is one line in one user's cart, keyed by `(user_id, product_id)`,
//! so adding the same product again replaces the line.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Cart line database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cart_items")]
pub struct Model {
    /// Cart owner
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: String,
    /// Product in this line
    #[sea_orm(primary_key, auto_increment = false)]
    pub product_id: String,
    /// Product name at the time it was added
    pub product_name: String,
    /// Unit price at the time it was added
    pub product_price: f64,
    /// Product image URL
    pub product_image: String,
    /// Number of units
    pub quantity: i64,
    /// `product_price * quantity`
    pub total_price: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
