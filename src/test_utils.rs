//! Shared test utilities.
//!
//! This module provides helpers for setting up in-memory stores and for
//! creating test documents with sensible defaults.

use crate::{
    config::database::create_tables,
    core::{auth::AuthSession, order, product, user},
    entities,
    errors::Result,
    models::{CartItem, Order, PaymentMethod, Product, ShippingAddress, User},
    repository::Repository,
};
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use tracing_subscriber::EnvFilter;

pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Creates an in-memory `SQLite` database with every collection created.
/// This is the standard setup for all store tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    create_tables(&db).await?;
    Ok(db)
}

/// A signed-out repository over a fresh in-memory store.
pub async fn setup_test_repository() -> Result<Repository> {
    let db = setup_test_db().await?;
    Ok(Repository::new(db, AuthSession::new(), "test-bucket"))
}

/// An address in Springfield addressed to `full_name`.
pub fn test_address(full_name: &str) -> ShippingAddress {
    ShippingAddress::new(full_name, "742 Evergreen Terrace", "Springfield", "OR", "97403", "555-0123")
}

/// Stores a customer profile with email `{user_id}@example.com`.
pub async fn create_test_user(
    db: &DatabaseConnection,
    user_id: &str,
    fcm_token: Option<&str>,
) -> Result<User> {
    let mut profile = User::new(user_id, format!("{user_id}@example.com"), "Test User", "555-0100");
    profile.fcm_token = fcm_token.map(str::to_string);
    user::create_user_profile(db, &profile).await?;
    Ok(profile)
}

/// Stores a product priced at 10.0 with five units in stock.
pub async fn create_test_product(
    db: &DatabaseConnection,
    id: &str,
    name: &str,
    category: &str,
) -> Result<Product> {
    let mut item = Product::new(id, name, 10.0, category);
    item.stock = 5;
    product::add_product(db, &item).await?;
    Ok(item)
}

/// An unsaved order for `user_id`: two shoes at 20.0 and four socks at 2.5.
///
/// The socks line has no image to exercise empty fields.
pub fn test_order(user_id: &str) -> Order {
    let items = vec![
        CartItem::new("p1", "shoe", 20.0, "https://img/p1.jpg", 2),
        CartItem::new("p2", "sock", 2.5, "", 4),
    ];
    Order::from_cart(user_id, items, test_address("Test User"), PaymentMethod::CreditCard)
}

/// Inserts a pending order with an explicit `order_date` and returns its id.
///
/// Bypasses [`order::create_order`] because orders are always dated "now"
/// through the public API.
pub async fn create_order_at(
    db: &DatabaseConnection,
    user_id: &str,
    order_date: DateTime<Utc>,
) -> Result<String> {
    let created = order::create_order(db, &test_order(user_id)).await?;
    let order_id = created.order_id().unwrap_or_default().to_string();

    let model = entities::order::ActiveModel {
        order_id: Set(order_id.clone()),
        order_date: Set(order_date),
        ..Default::default()
    };
    model.update(db).await?;
    Ok(order_id)
}
