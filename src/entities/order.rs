//! Order entity - one document per checkout.
//!
//! The key is a random UUID generated at insert time. Line items and the
//! shipping address are embedded as JSON, as a snapshot of the cart.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Order database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    /// Store-assigned key
    #[sea_orm(primary_key, auto_increment = false)]
    pub order_id: String,
    /// Owning user (no foreign key)
    pub user_id: String,
    /// JSON array of cart line items
    pub items: Json,
    /// Amount charged
    pub total_amount: f64,
    /// Status string, e.g. `"PENDING"`
    pub status: String,
    /// When the order was placed
    pub order_date: DateTimeUtc,
    /// JSON shipping address object
    pub shipping_address: Json,
    /// `"CASH_ON_DELIVERY"`, `"CREDIT_CARD"` or `"UPI"`
    pub payment_method: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
