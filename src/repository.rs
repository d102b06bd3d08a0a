//! Repository facade - the single entry point the application talks to.
//!
//! A [`Repository`] owns the backend handles (database connection, auth
//! session, storage bucket) and forwards every domain operation to the
//! functions in [`crate::core`]. It is built once at start-up and shared by
//! reference or by cloning; clones share the same connection pool and session.

use crate::{
    config::{Settings, database},
    core::{
        auth::{AuthSession, AuthUser},
        cart, notification, order, product,
        storage::{self, StorageRef},
        user,
    },
    errors::Result,
    models::{CartItem, Notification, Order, OrderStatus, Product, ShippingAddress, User},
};
use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;
use tracing::info;

/// Handle on every backend the data layer uses.
#[derive(Debug, Clone)]
pub struct Repository {
    db: DatabaseConnection,
    auth: AuthSession,
    bucket: String,
}

impl Repository {
    /// Wraps existing handles.
    pub fn new(db: DatabaseConnection, auth: AuthSession, bucket: impl Into<String>) -> Self {
        Self {
            db,
            auth,
            bucket: bucket.into(),
        }
    }

    /// Opens the configured database, ensures every collection exists, and
    /// returns a signed-out repository.
    pub async fn connect(settings: &Settings) -> Result<Self> {
        let url = database::get_database_url(settings);
        let db = database::create_connection(&url).await?;
        database::create_tables(&db).await?;
        info!("Repository ready (bucket {})", settings.storage_bucket);
        Ok(Self::new(db, AuthSession::new(), settings.storage_bucket.clone()))
    }

    /// The underlying connection, for callers that need a raw query.
    #[must_use]
    pub const fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    // Auth

    /// The signed-in principal, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<AuthUser> {
        self.auth.current_user()
    }

    /// Installs `user` as the signed-in principal, replacing any previous one.
    pub fn sign_in(&self, user: AuthUser) {
        self.auth.sign_in(user);
    }

    /// Clears the local session immediately; always succeeds.
    pub fn sign_out(&self) {
        self.auth.sign_out();
    }

    // Users

    /// Writes a whole profile, overwriting any stored one.
    pub async fn create_user_profile(&self, profile: &User) -> Result<()> {
        user::create_user_profile(&self.db, profile).await
    }

    /// Same overwrite semantics as [`Repository::create_user_profile`].
    pub async fn update_user_profile(&self, profile: &User) -> Result<()> {
        user::update_user_profile(&self.db, profile).await
    }

    /// Fetches a profile, `None` if it does not exist.
    pub async fn get_user_profile(&self, user_id: &str) -> Result<Option<User>> {
        user::get_user_profile(&self.db, user_id).await
    }

    /// Saves an address in the user's book and returns its index.
    pub async fn add_address(&self, user_id: &str, address: ShippingAddress) -> Result<usize> {
        user::add_address(&self.db, user_id, address).await
    }

    /// Replaces a saved address, keeping its default flag.
    pub async fn update_address(
        &self,
        user_id: &str,
        index: usize,
        address: ShippingAddress,
    ) -> Result<()> {
        user::update_address(&self.db, user_id, index, address).await
    }

    /// Deletes a saved address and returns it.
    pub async fn remove_address(&self, user_id: &str, index: usize) -> Result<ShippingAddress> {
        user::remove_address(&self.db, user_id, index).await
    }

    /// Makes one saved address the only default.
    pub async fn set_default_address(&self, user_id: &str, index: usize) -> Result<()> {
        user::set_default_address(&self.db, user_id, index).await
    }

    /// The user's default address, if any.
    pub async fn get_default_address(&self, user_id: &str) -> Result<Option<ShippingAddress>> {
        user::get_default_address(&self.db, user_id).await
    }

    /// Deletes every saved address of a user.
    pub async fn clear_addresses(&self, user_id: &str) -> Result<()> {
        user::clear_addresses(&self.db, user_id).await
    }

    /// Replaces the push token only.
    pub async fn update_fcm_token(&self, user_id: &str, token: &str) -> Result<()> {
        user::update_fcm_token(&self.db, user_id, token).await
    }

    /// Reads the push token, `None` if the user or token is missing.
    pub async fn get_fcm_token(&self, user_id: &str) -> Result<Option<String>> {
        user::get_fcm_token(&self.db, user_id).await
    }

    // Products

    /// Writes a product, overwriting any stored one with the same id.
    pub async fn add_product(&self, item: &Product) -> Result<()> {
        product::add_product(&self.db, item).await
    }

    /// Same overwrite semantics as [`Repository::add_product`].
    pub async fn update_product(&self, item: &Product) -> Result<()> {
        product::update_product(&self.db, item).await
    }

    /// Every product, ordered by id.
    pub async fn get_all_products(&self) -> Result<Vec<Product>> {
        product::get_all_products(&self.db).await
    }

    /// Products whose category matches exactly.
    pub async fn get_products_by_category(&self, category: &str) -> Result<Vec<Product>> {
        product::get_products_by_category(&self.db, category).await
    }

    /// Fetches a product, `None` if it does not exist.
    pub async fn get_product_by_id(&self, product_id: &str) -> Result<Option<Product>> {
        product::get_product_by_id(&self.db, product_id).await
    }

    /// Deletes a product; deleting a missing one succeeds.
    pub async fn delete_product(&self, product_id: &str) -> Result<()> {
        product::delete_product(&self.db, product_id).await
    }

    /// Prefix search; see [`product::search_products`] for its limits.
    pub async fn search_products(&self, query: &str) -> Result<Vec<Product>> {
        product::search_products(&self.db, query).await
    }

    // Orders

    /// Stores an order under a fresh key and returns it with the key set.
    pub async fn create_order(&self, draft: &Order) -> Result<Order> {
        order::create_order(&self.db, draft).await
    }

    /// Fetches an order, `None` if it does not exist.
    pub async fn get_order_by_id(&self, order_id: &str) -> Result<Option<Order>> {
        order::get_order_by_id(&self.db, order_id).await
    }

    /// A user's orders, newest first.
    pub async fn get_user_orders(&self, user_id: &str) -> Result<Vec<Order>> {
        order::get_user_orders(&self.db, user_id).await
    }

    /// Every order, newest first.
    pub async fn get_all_orders(&self) -> Result<Vec<Order>> {
        order::get_all_orders(&self.db).await
    }

    /// Orders currently in `status`, newest first.
    pub async fn get_orders_by_status(&self, status: OrderStatus) -> Result<Vec<Order>> {
        order::get_orders_by_status(&self.db, status).await
    }

    /// Orders placed within `[start, end]`, newest first.
    pub async fn get_orders_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Order>> {
        order::get_orders_by_date_range(&self.db, start, end).await
    }

    /// Writes a new status; any transition is accepted.
    pub async fn update_order_status(&self, order_id: &str, status: OrderStatus) -> Result<()> {
        order::update_order_status(&self.db, order_id, status).await
    }

    /// Status change plus notification intent, committed atomically.
    pub async fn update_order_status_with_notification(
        &self,
        order_id: &str,
        status: OrderStatus,
        title: &str,
        message: &str,
    ) -> Result<Option<Notification>> {
        order::update_order_status_with_notification(&self.db, order_id, status, title, message)
            .await
    }

    /// Notification records written for an order, oldest first.
    pub async fn get_notifications_for_order(&self, order_id: &str) -> Result<Vec<Notification>> {
        notification::get_notifications_for_order(&self.db, order_id).await
    }

    // Cart

    /// Puts a line in the user's cart, replacing one for the same product.
    pub async fn add_to_cart(&self, user_id: &str, item: &CartItem) -> Result<()> {
        cart::add_to_cart(&self.db, user_id, item).await
    }

    /// Sets a line's quantity and recomputes its stored total.
    pub async fn update_cart_item_quantity(
        &self,
        user_id: &str,
        product_id: &str,
        quantity: u32,
    ) -> Result<()> {
        cart::update_cart_item_quantity(&self.db, user_id, product_id, quantity).await
    }

    /// Drops a cart line; removing a missing one succeeds.
    pub async fn remove_from_cart(&self, user_id: &str, product_id: &str) -> Result<()> {
        cart::remove_from_cart(&self.db, user_id, product_id).await
    }

    /// The user's cart lines, ordered by product id.
    pub async fn get_cart_items(&self, user_id: &str) -> Result<Vec<CartItem>> {
        cart::get_cart_items(&self.db, user_id).await
    }

    /// Empties the user's cart in one statement.
    pub async fn clear_cart(&self, user_id: &str) -> Result<()> {
        cart::clear_cart(&self.db, user_id).await
    }

    // Storage

    /// Blob location of a product's image.
    #[must_use]
    pub fn product_image_ref(&self, product_id: &str) -> StorageRef {
        storage::product_image_ref(&self.bucket, product_id)
    }

    /// Blob location of a user's profile picture.
    #[must_use]
    pub fn user_profile_image_ref(&self, user_id: &str) -> StorageRef {
        storage::user_profile_image_ref(&self.bucket, user_id)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::{models::PaymentMethod, test_utils::*};

    #[tokio::test]
    async fn test_connect_with_in_memory_settings() -> Result<()> {
        init_test_tracing();
        let settings = Settings {
            database_url: Some("sqlite::memory:".to_string()),
            storage_bucket: "test-bucket".to_string(),
            products: Vec::new(),
        };
        // DATABASE_URL in the environment would win over settings
        if std::env::var("DATABASE_URL").is_ok() {
            return Ok(());
        }
        let repo = Repository::connect(&settings).await?;
        assert!(repo.get_all_products().await?.is_empty());
        assert_eq!(
            repo.product_image_ref("p1").url(),
            "gs://test-bucket/products/p1.jpg"
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_auth_through_facade() -> Result<()> {
        let repo = setup_test_repository().await?;
        assert!(repo.current_user().is_none());

        repo.sign_in(AuthUser::new("u1"));
        let clone = repo.clone();
        assert_eq!(clone.current_user().unwrap().uid, "u1");

        clone.sign_out();
        assert!(repo.current_user().is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_checkout_flow() -> Result<()> {
        let repo = setup_test_repository().await?;
        repo.create_user_profile(&User::new("u1", "a@b.c", "Ada", "555"))
            .await?;
        repo.update_fcm_token("u1", "tok-1").await?;

        repo.add_to_cart("u1", &CartItem::new("p1", "shoe", 40.0, "", 1))
            .await?;
        repo.add_to_cart("u1", &CartItem::new("p2", "sock", 2.5, "", 2))
            .await?;
        repo.update_cart_item_quantity("u1", "p1", 2).await?;

        let items = repo.get_cart_items("u1").await?;
        let draft = Order::from_cart("u1", items, test_address("Ada"), PaymentMethod::CashOnDelivery);
        assert_eq!(draft.total_amount, 85.0);

        let placed = repo.create_order(&draft).await?;
        repo.clear_cart("u1").await?;
        assert!(repo.get_cart_items("u1").await?.is_empty());

        let order_id = placed.order_id().unwrap();
        let recorded = repo
            .update_order_status_with_notification(
                order_id,
                OrderStatus::Shipped,
                "Shipped",
                "Your order is on its way",
            )
            .await?;
        assert!(recorded.is_some());

        let orders = repo.get_user_orders("u1").await?;
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].status(), OrderStatus::Shipped);
        assert_eq!(orders[0].items.len(), 2);
        assert_eq!(repo.get_notifications_for_order(order_id).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_concurrent_reads_share_one_repository() -> Result<()> {
        let repo = setup_test_repository().await?;
        repo.add_product(&Product::new("p1", "shoe", 10.0, "footwear"))
            .await?;

        let (a, b, c) = tokio::join!(
            repo.get_product_by_id("p1"),
            repo.search_products("sh"),
            repo.get_products_by_category("footwear"),
        );
        assert!(a?.is_some());
        assert_eq!(b?.len(), 1);
        assert_eq!(c?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_profile_is_absence() -> Result<()> {
        let repo = setup_test_repository().await?;
        assert!(repo.get_user_profile("nobody").await?.is_none());
        assert!(repo.get_product_by_id("nothing").await?.is_none());
        assert!(repo.get_order_by_id("nowhere").await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_address_book_through_facade() -> Result<()> {
        let repo = setup_test_repository().await?;
        repo.create_user_profile(&User::new("u1", "a@b.c", "Ada", "555"))
            .await?;
        repo.add_address("u1", test_address("Home")).await?;
        let work = repo.add_address("u1", test_address("Work")).await?;

        repo.set_default_address("u1", work).await?;
        assert_eq!(
            repo.get_default_address("u1").await?.unwrap().full_name,
            "Work"
        );

        repo.update_address("u1", 0, test_address("Cottage")).await?;
        repo.remove_address("u1", work).await?;
        assert_eq!(
            repo.get_default_address("u1").await?.unwrap().full_name,
            "Cottage"
        );

        repo.clear_addresses("u1").await?;
        assert!(repo.get_default_address("u1").await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_storage_refs() -> Result<()> {
        let repo = setup_test_repository().await?;
        assert_eq!(repo.product_image_ref("p1").path(), "products/p1.jpg");
        assert_eq!(
            repo.user_profile_image_ref("u1").path(),
            "profile_images/u1.jpg"
        );
        Ok(())
    }
}
