//! Database configuration module.
//!
//! This module handles the store connection and collection (table) creation
//! using `SeaORM`. Tables are generated from the entity definitions with
//! `Schema::create_table_from_entity`, so the schema always matches the Rust
//! structs without hand-written SQL.

use crate::config::settings::Settings;
use crate::entities::{CartItem, Notification, Order, Product, User};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema};
use tracing::{debug, info, instrument};

/// Fallback when neither `DATABASE_URL` nor the settings name a database.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/myshop.sqlite?mode=rwc";

/// Resolves the database URL: `DATABASE_URL`, then settings, then the default.
#[must_use]
pub fn get_database_url(settings: &Settings) -> String {
    std::env::var("DATABASE_URL")
        .ok()
        .or_else(|| settings.database_url.clone())
        .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string())
}

/// Opens a connection to the store.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    debug!("Connecting to {}", database_url);
    Database::connect(database_url).await.map_err(Into::into)
}

async fn create_table_for<E>(db: &DatabaseConnection, schema: &Schema, entity: E) -> Result<()>
where
    E: EntityTrait,
{
    let builder = db.get_database_backend();
    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();
    db.execute(builder.build(&statement)).await?;
    Ok(())
}

/// Creates every collection used by the data layer, if missing.
#[instrument(skip(db))]
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let schema = Schema::new(db.get_database_backend());

    create_table_for(db, &schema, User).await?;
    create_table_for(db, &schema, Product).await?;
    create_table_for(db, &schema, Order).await?;
    create_table_for(db, &schema, CartItem).await?;
    create_table_for(db, &schema, Notification).await?;

    info!("Collections ensured: users, products, orders, cart_items, notifications");
    Ok(())
}
