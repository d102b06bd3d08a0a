//! Notification intent log.
//!
//! Records are only ever appended. A dispatcher outside this crate picks them
//! up and delivers the push.

use super::collections;
use crate::{
    entities::{self, notification},
    models::{Notification, OrderStatus, notification::ORDER_STATUS_NOTIFICATION},
    errors::Result,
};
use chrono::Utc;
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::debug;
use uuid::Uuid;

impl From<notification::Model> for Notification {
    fn from(model: notification::Model) -> Self {
        Self {
            id: model.id,
            notification_type: model.notification_type,
            order_id: model.order_id,
            status: model.status,
            title: model.title,
            message: model.message,
            token: model.token,
            created_at: model.created_at,
        }
    }
}

/// Appends an order-status notification intent.
///
/// Usually called with a transaction handle so the record commits together
/// with the status write.
pub async fn record_order_status<C>(
    db: &C,
    order_id: &str,
    status: OrderStatus,
    title: &str,
    message: &str,
    token: &str,
) -> Result<Notification>
where
    C: ConnectionTrait,
{
    let model = notification::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        notification_type: Set(ORDER_STATUS_NOTIFICATION.to_string()),
        order_id: Set(order_id.to_string()),
        status: Set(status.as_str().to_string()),
        title: Set(title.to_string()),
        message: Set(message.to_string()),
        token: Set(token.to_string()),
        created_at: Set(Utc::now()),
    };
    let stored = model.insert(db).await?;
    debug!(
        "Appended {} record {} to {}",
        stored.notification_type,
        stored.id,
        collections::NOTIFICATIONS
    );
    Ok(stored.into())
}

/// All intents recorded for one order, oldest first.
pub async fn get_notifications_for_order<C>(db: &C, order_id: &str) -> Result<Vec<Notification>>
where
    C: ConnectionTrait,
{
    Ok(entities::Notification::find()
        .filter(notification::Column::OrderId.eq(order_id))
        .order_by_asc(notification::Column::CreatedAt)
        .all(db)
        .await?
        .into_iter()
        .map(Notification::from)
        .collect())
}

/// Every recorded intent, oldest first.
pub async fn get_all_notifications<C>(db: &C) -> Result<Vec<Notification>>
where
    C: ConnectionTrait,
{
    Ok(entities::Notification::find()
        .order_by_asc(notification::Column::CreatedAt)
        .all(db)
        .await?
        .into_iter()
        .map(Notification::from)
        .collect())
}
