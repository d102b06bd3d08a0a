//! Notification intent records.
//!
//! The data layer never delivers a push. It only appends these records; an
//! external dispatcher reads them and talks to the push service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Type tag written for order status changes.
pub const ORDER_STATUS_NOTIFICATION: &str = "order_status";

/// One pending push, as recorded in the `notifications` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Key assigned by the store
    pub id: String,
    /// What kind of event triggered it
    #[serde(rename = "type")]
    pub notification_type: String,
    /// Order the notification is about
    pub order_id: String,
    /// Status the order moved to
    pub status: String,
    /// Push title
    pub title: String,
    /// Push body
    pub message: String,
    /// Device routing token
    pub token: String,
    /// When the intent was recorded
    pub created_at: DateTime<Utc>,
}
