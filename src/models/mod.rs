//! Domain models - the shapes the application layer works with.
//!
//! These are independent of the storage schema in [`crate::entities`]; the
//! operations in [`crate::core`] convert between the two.

pub mod address;
pub mod cart_item;
pub mod notification;
pub mod order;
pub mod product;
pub mod status;
pub mod user;

pub use address::{MAX_ADDRESSES, ShippingAddress};
pub use cart_item::CartItem;
pub use notification::Notification;
pub use order::Order;
pub use product::Product;
pub use status::{OrderStatus, PaymentMethod, UserType};
pub use user::User;
