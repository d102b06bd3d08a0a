//! Entity module - Contains all SeaORM entity definitions for the database.
//! Each table stands in for one collection of the document store.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod cart_item;
pub mod notification;
pub mod order;
pub mod product;
pub mod user;

// Re-export specific types to avoid conflicts
pub use cart_item::{Column as CartItemColumn, Entity as CartItem, Model as CartItemModel};
pub use notification::{
    Column as NotificationColumn, Entity as Notification, Model as NotificationModel,
};
pub use order::{Column as OrderColumn, Entity as Order, Model as OrderModel};
pub use product::{Column as ProductColumn, Entity as Product, Model as ProductModel};
pub use user::{Column as UserColumn, Entity as User, Model as UserModel};
