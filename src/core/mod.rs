//! Core operations - one module per collection, plus auth and storage.
//!
//! Every backend operation is an async free function over a
//! `ConnectionTrait`, so the same code runs against a plain connection or
//! inside a transaction. [`crate::repository::Repository`] bundles them behind
//! a single handle.

pub mod auth;
pub mod cart;
pub mod notification;
pub mod order;
pub mod product;
pub mod storage;
pub mod user;

/// Collection names as used in error messages and logs.
pub mod collections {
    /// User profiles
    pub const USERS: &str = "users";
    /// Catalogue
    pub const PRODUCTS: &str = "products";
    /// Orders
    pub const ORDERS: &str = "orders";
    /// Per-user cart lines
    pub const CARTS: &str = "carts";
    /// Push intents
    pub const NOTIFICATIONS: &str = "notifications";
}
