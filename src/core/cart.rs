//! Cart operations - one cart per user, one row per product line.
//!
//! Lines are keyed by `(user_id, product_id)`. Adding a product that is
//! already in the cart replaces the line.

use super::collections;
use crate::{
    entities::{self, cart_item},
    errors::{Error, Result},
    models::CartItem,
};
use sea_orm::{QueryOrder, Set, prelude::*, sea_query::{Expr, OnConflict}};
use tracing::{debug, info, instrument};

fn to_active_model(user_id: &str, item: &CartItem) -> cart_item::ActiveModel {
    cart_item::ActiveModel {
        user_id: Set(user_id.to_string()),
        product_id: Set(item.product_id().to_string()),
        product_name: Set(item.product_name().to_string()),
        product_price: Set(item.product_price()),
        product_image: Set(item.product_image().to_string()),
        quantity: Set(i64::from(item.quantity())),
        total_price: Set(item.total_price()),
    }
}

impl TryFrom<cart_item::Model> for CartItem {
    type Error = Error;

    fn try_from(model: cart_item::Model) -> Result<Self> {
        let quantity = u32::try_from(model.quantity).map_err(|_| Error::InvalidDocument {
            collection: collections::CARTS,
            key: format!("{}/{}", model.user_id, model.product_id),
            reason: format!("quantity {} out of range", model.quantity),
        })?;
        Ok(Self::new(
            model.product_id,
            model.product_name,
            model.product_price,
            model.product_image,
            quantity,
        ))
    }
}

/// Adds a line to the user's cart, replacing any line for the same product.
#[instrument(skip(db, item), fields(product_id = %item.product_id()))]
pub async fn add_to_cart<C>(db: &C, user_id: &str, item: &CartItem) -> Result<()>
where
    C: ConnectionTrait,
{
    entities::CartItem::insert(to_active_model(user_id, item))
        .on_conflict(
            OnConflict::columns([cart_item::Column::UserId, cart_item::Column::ProductId])
                .update_columns([
                    cart_item::Column::ProductName,
                    cart_item::Column::ProductPrice,
                    cart_item::Column::ProductImage,
                    cart_item::Column::Quantity,
                    cart_item::Column::TotalPrice,
                ])
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;
    debug!("Cart of {} now holds {}", user_id, item.product_id());
    Ok(())
}

/// Sets the quantity of one line. The stored line total is recomputed from
/// the stored unit price in the same statement.
///
/// # Errors
/// Returns `Error::DocumentNotFound` if the line is not in the cart.
#[instrument(skip(db))]
pub async fn update_cart_item_quantity<C>(
    db: &C,
    user_id: &str,
    product_id: &str,
    quantity: u32,
) -> Result<()>
where
    C: ConnectionTrait,
{
    let quantity = i64::from(quantity);
    let result = entities::CartItem::update_many()
        .col_expr(cart_item::Column::Quantity, Expr::value(quantity))
        .col_expr(
            cart_item::Column::TotalPrice,
            Expr::col(cart_item::Column::ProductPrice).mul(quantity),
        )
        .filter(cart_item::Column::UserId.eq(user_id))
        .filter(cart_item::Column::ProductId.eq(product_id))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Err(Error::DocumentNotFound {
            collection: collections::CARTS,
            key: format!("{user_id}/{product_id}"),
        });
    }
    Ok(())
}

/// Removes one line. Removing a line that is not there succeeds.
pub async fn remove_from_cart<C>(db: &C, user_id: &str, product_id: &str) -> Result<()>
where
    C: ConnectionTrait,
{
    entities::CartItem::delete_by_id((user_id.to_string(), product_id.to_string()))
        .exec(db)
        .await?;
    Ok(())
}

/// All lines in the user's cart, ordered by product id.
pub async fn get_cart_items<C>(db: &C, user_id: &str) -> Result<Vec<CartItem>>
where
    C: ConnectionTrait,
{
    entities::CartItem::find()
        .filter(cart_item::Column::UserId.eq(user_id))
        .order_by_asc(cart_item::Column::ProductId)
        .all(db)
        .await?
        .into_iter()
        .map(CartItem::try_from)
        .collect()
}

/// Empties the user's cart with a single delete.
#[instrument(skip(db))]
pub async fn clear_cart<C>(db: &C, user_id: &str) -> Result<()>
where
    C: ConnectionTrait,
{
    let result = entities::CartItem::delete_many()
        .filter(cart_item::Column::UserId.eq(user_id))
        .exec(db)
        .await?;
    info!("Cleared {} lines from cart of {}", result.rows_affected, user_id);
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_add_and_list_cart() -> Result<()> {
        let db = setup_test_db().await?;
        add_to_cart(&db, "u1", &CartItem::new("p2", "shirt", 15.0, "", 2)).await?;
        add_to_cart(&db, "u1", &CartItem::new("p1", "shoe", 40.0, "", 1)).await?;
        add_to_cart(&db, "u2", &CartItem::new("p1", "shoe", 40.0, "", 5)).await?;

        let items = get_cart_items(&db, "u1").await?;
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].product_id(), "p1");
        assert_eq!(items[1].total_price(), 30.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_add_same_product_replaces_line() -> Result<()> {
        let db = setup_test_db().await?;
        add_to_cart(&db, "u1", &CartItem::new("p1", "shoe", 40.0, "", 1)).await?;
        add_to_cart(&db, "u1", &CartItem::new("p1", "shoe", 35.0, "", 3)).await?;

        let items = get_cart_items(&db, "u1").await?;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity(), 3);
        assert_eq!(items[0].total_price(), 105.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_quantity_rewrites_total() -> Result<()> {
        let db = setup_test_db().await?;
        add_to_cart(&db, "u1", &CartItem::new("p1", "shoe", 12.5, "img", 1)).await?;

        update_cart_item_quantity(&db, "u1", "p1", 4).await?;

        let stored = entities::CartItem::find_by_id(("u1".to_string(), "p1".to_string()))
            .one(&db)
            .await?
            .unwrap();
        assert_eq!(stored.quantity, 4);
        assert_eq!(stored.total_price, 50.0);
        assert_eq!(stored.product_image, "img");
        Ok(())
    }

    #[tokio::test]
    async fn test_update_quantity_missing_line() -> Result<()> {
        let db = setup_test_db().await?;
        let result = update_cart_item_quantity(&db, "u1", "p1", 2).await;
        assert!(matches!(result, Err(Error::DocumentNotFound { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_remove_from_cart_is_idempotent() -> Result<()> {
        let db = setup_test_db().await?;
        add_to_cart(&db, "u1", &CartItem::new("p1", "shoe", 40.0, "", 1)).await?;

        remove_from_cart(&db, "u1", "p1").await?;
        remove_from_cart(&db, "u1", "p1").await?;
        assert!(get_cart_items(&db, "u1").await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_clear_cart_only_touches_owner() -> Result<()> {
        let db = setup_test_db().await?;
        add_to_cart(&db, "u1", &CartItem::new("p1", "shoe", 40.0, "", 1)).await?;
        add_to_cart(&db, "u1", &CartItem::new("p2", "shirt", 15.0, "", 1)).await?;
        add_to_cart(&db, "u2", &CartItem::new("p1", "shoe", 40.0, "", 1)).await?;

        clear_cart(&db, "u1").await?;
        assert!(get_cart_items(&db, "u1").await?.is_empty());
        assert_eq!(get_cart_items(&db, "u2").await?.len(), 1);

        // Clearing an empty cart is fine
        clear_cart(&db, "u1").await?;
        Ok(())
    }
}
