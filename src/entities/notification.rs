//! Notification entity - append-only log of push intents.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Notification database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "notifications")]
pub struct Model {
    /// Store-assigned key
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Event kind, `"order_status"` for status changes
    pub notification_type: String,
    /// Order the push is about
    pub order_id: String,
    /// New order status
    pub status: String,
    /// Push title
    pub title: String,
    /// Push body
    pub message: String,
    /// Device routing token
    pub token: String,
    /// When the intent was recorded
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
