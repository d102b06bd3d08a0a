//! Order business logic - placing orders, queries, and status changes.
//!
//! Orders are keyed by a random id generated here at insert time; creating the
//! same order twice stores two documents. Status writes accept any
//! [`OrderStatus`] regardless of the current one. The one multi-document
//! operation, [`update_order_status_with_notification`], runs inside a
//! database transaction so the status write and the notification record commit
//! together or not at all.

use super::{collections, notification};
use crate::{
    entities::{self, order},
    errors::{Error, Result},
    models::{CartItem, Notification, Order, OrderStatus, PaymentMethod, ShippingAddress},
};
use chrono::{DateTime, Utc};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*, sea_query::Expr};
use tracing::{debug, info, instrument};
use uuid::Uuid;

impl TryFrom<order::Model> for Order {
    type Error = Error;

    fn try_from(model: order::Model) -> Result<Self> {
        let invalid = |field: &str, e: serde_json::Error| Error::InvalidDocument {
            collection: collections::ORDERS,
            key: model.order_id.clone(),
            reason: format!("{field}: {e}"),
        };
        let items: Vec<CartItem> =
            serde_json::from_value(model.items.clone()).map_err(|e| invalid("items", e))?;
        let shipping_address: ShippingAddress =
            serde_json::from_value(model.shipping_address.clone())
                .map_err(|e| invalid("shipping_address", e))?;
        let status = model.status.parse::<OrderStatus>()?;
        let payment_method = model.payment_method.parse::<PaymentMethod>()?;

        Ok(Self::restore(
            model.order_id,
            model.user_id,
            items,
            model.total_amount,
            status,
            model.order_date,
            shipping_address,
            payment_method,
        ))
    }
}

fn decode_all(models: Vec<order::Model>) -> Result<Vec<Order>> {
    models.into_iter().map(Order::try_from).collect()
}

/// Stores a new order under a freshly generated key and returns it with the
/// key filled in.
///
/// Any id already present on `draft` is ignored. There is no idempotency key:
/// retrying after an ambiguous failure can store a duplicate.
#[instrument(skip(db, draft), fields(user_id = %draft.user_id))]
pub async fn create_order<C>(db: &C, draft: &Order) -> Result<Order>
where
    C: ConnectionTrait,
{
    let order_id = Uuid::new_v4().to_string();

    let model = order::ActiveModel {
        order_id: Set(order_id.clone()),
        user_id: Set(draft.user_id.clone()),
        items: Set(serde_json::to_value(&draft.items)?),
        total_amount: Set(draft.total_amount),
        status: Set(draft.status().as_str().to_string()),
        order_date: Set(draft.order_date()),
        shipping_address: Set(serde_json::to_value(&draft.shipping_address)?),
        payment_method: Set(draft.payment_method.as_str().to_string()),
    };
    entities::Order::insert(model).exec_without_returning(db).await?;

    info!(
        "Created order {} for user {} ({} items, total {})",
        order_id,
        draft.user_id,
        draft.items.len(),
        draft.total_amount
    );
    let mut created = draft.clone();
    created.assign_id(order_id);
    Ok(created)
}

/// Retrieves an order by key, `None` if it does not exist.
pub async fn get_order_by_id<C>(db: &C, order_id: &str) -> Result<Option<Order>>
where
    C: ConnectionTrait,
{
    entities::Order::find_by_id(order_id.to_string())
        .one(db)
        .await?
        .map(Order::try_from)
        .transpose()
}

/// Retrieves all orders of one user, newest first.
pub async fn get_user_orders<C>(db: &C, user_id: &str) -> Result<Vec<Order>>
where
    C: ConnectionTrait,
{
    decode_all(
        entities::Order::find()
            .filter(order::Column::UserId.eq(user_id))
            .order_by_desc(order::Column::OrderDate)
            .all(db)
            .await?,
    )
}

/// Retrieves every order, newest first. Intended for admin views.
pub async fn get_all_orders<C>(db: &C) -> Result<Vec<Order>>
where
    C: ConnectionTrait,
{
    decode_all(
        entities::Order::find()
            .order_by_desc(order::Column::OrderDate)
            .all(db)
            .await?,
    )
}

/// Retrieves orders currently in `status`, newest first.
pub async fn get_orders_by_status<C>(db: &C, status: OrderStatus) -> Result<Vec<Order>>
where
    C: ConnectionTrait,
{
    decode_all(
        entities::Order::find()
            .filter(order::Column::Status.eq(status.as_str()))
            .order_by_desc(order::Column::OrderDate)
            .all(db)
            .await?,
    )
}

/// Retrieves orders placed within `[start, end]` (both inclusive), newest first.
pub async fn get_orders_by_date_range<C>(
    db: &C,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<Vec<Order>>
where
    C: ConnectionTrait,
{
    decode_all(
        entities::Order::find()
            .filter(order::Column::OrderDate.gte(start))
            .filter(order::Column::OrderDate.lte(end))
            .order_by_desc(order::Column::OrderDate)
            .all(db)
            .await?,
    )
}

/// Overwrites the status field of one order.
///
/// # Errors
/// Returns `Error::DocumentNotFound` if the order does not exist.
#[instrument(skip(db))]
pub async fn update_order_status<C>(db: &C, order_id: &str, status: OrderStatus) -> Result<()>
where
    C: ConnectionTrait,
{
    let result = entities::Order::update_many()
        .col_expr(order::Column::Status, Expr::value(status.as_str()))
        .filter(order::Column::OrderId.eq(order_id))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Err(Error::DocumentNotFound {
            collection: collections::ORDERS,
            key: order_id.to_string(),
        });
    }
    info!("Order {} moved to {}", order_id, status);
    Ok(())
}

/// Changes an order's status and, if the owner has a push token, records a
/// notification intent, all in one transaction.
///
/// Steps: read the order (abort if missing), take its owner, write the new
/// status, read the owner's token, and append a notification only when a token
/// is present. A missing owner profile counts as "no token". Any error drops
/// the transaction before commit, so no partial write is ever visible.
///
/// Returns the recorded notification, if one was written. Nothing is sent.
///
/// # Errors
/// - `Error::OrderNotFound` if the order does not exist
/// - `Error::TransactionAborted` if the order has no owner
#[instrument(skip(db, title, message))]
pub async fn update_order_status_with_notification(
    db: &DatabaseConnection,
    order_id: &str,
    status: OrderStatus,
    title: &str,
    message: &str,
) -> Result<Option<Notification>> {
    let txn = db.begin().await?;

    let stored = entities::Order::find_by_id(order_id.to_string())
        .one(&txn)
        .await?
        .ok_or_else(|| Error::OrderNotFound {
            order_id: order_id.to_string(),
        })?;

    if stored.user_id.is_empty() {
        return Err(Error::TransactionAborted {
            reason: format!("order {order_id} has no owning user"),
        });
    }
    let user_id = stored.user_id.clone();

    let mut active: order::ActiveModel = stored.into();
    active.status = Set(status.as_str().to_string());
    active.update(&txn).await?;

    let token = super::user::get_fcm_token(&txn, &user_id).await?;
    let recorded = match token {
        Some(token) => Some(
            notification::record_order_status(&txn, order_id, status, title, message, &token)
                .await?,
        ),
        None => {
            debug!("User {} has no push token, skipping notification", user_id);
            None
        }
    };

    txn.commit().await?;

    if recorded.is_some() {
        info!("Order {} moved to {} with notification queued", order_id, status);
    } else {
        info!("Order {} moved to {} without notification", order_id, status);
    }
    Ok(recorded)
}
