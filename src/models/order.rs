//! Order model.
//!
//! An order embeds a snapshot of the cart lines at checkout; it never points
//! back at the live cart. `order_date` is fixed when the value is built and
//! has no setter. The key is assigned by the store on creation.

use super::{CartItem, OrderStatus, PaymentMethod, ShippingAddress};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    order_id: Option<String>,
    /// Owner of the order (not enforced as a reference)
    pub user_id: String,
    /// Line items as they were at checkout
    pub items: Vec<CartItem>,
    /// Amount charged
    pub total_amount: f64,
    status: OrderStatus,
    order_date: DateTime<Utc>,
    /// Where the order ships to
    pub shipping_address: ShippingAddress,
    /// How the order is paid for
    pub payment_method: PaymentMethod,
}

impl Default for Order {
    fn default() -> Self {
        Self {
            order_id: None,
            user_id: String::new(),
            items: Vec::new(),
            total_amount: 0.0,
            status: OrderStatus::Pending,
            order_date: Utc::now(),
            shipping_address: ShippingAddress::default(),
            payment_method: PaymentMethod::default(),
        }
    }
}

impl Order {
    /// Builds a new `Pending` order dated now.
    pub fn new(
        user_id: impl Into<String>,
        items: Vec<CartItem>,
        total_amount: f64,
        shipping_address: ShippingAddress,
        payment_method: PaymentMethod,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            items,
            total_amount,
            shipping_address,
            payment_method,
            ..Self::default()
        }
    }

    /// Builds a new order from cart lines, charging the sum of their totals.
    pub fn from_cart(
        user_id: impl Into<String>,
        items: Vec<CartItem>,
        shipping_address: ShippingAddress,
        payment_method: PaymentMethod,
    ) -> Self {
        let total_amount = items.iter().map(CartItem::total_price).sum();
        Self::new(user_id, items, total_amount, shipping_address, payment_method)
    }

    /// Rebuilds an order exactly as it was stored.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn restore(
        order_id: String,
        user_id: String,
        items: Vec<CartItem>,
        total_amount: f64,
        status: OrderStatus,
        order_date: DateTime<Utc>,
        shipping_address: ShippingAddress,
        payment_method: PaymentMethod,
    ) -> Self {
        Self {
            order_id: Some(order_id),
            user_id,
            items,
            total_amount,
            status,
            order_date,
            shipping_address,
            payment_method,
        }
    }

    /// Key assigned by the store, `None` until the order has been created.
    #[must_use]
    pub fn order_id(&self) -> Option<&str> {
        self.order_id.as_deref()
    }

    pub(crate) fn assign_id(&mut self, order_id: String) {
        self.order_id = Some(order_id);
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn status(&self) -> OrderStatus {
        self.status
    }

    /// Moves the order to another status. Any transition is accepted.
    pub fn set_status(&mut self, status: OrderStatus) {
        self.status = status;
    }

    /// When the order was placed.
    #[must_use]
    pub const fn order_date(&self) -> DateTime<Utc> {
        self.order_date
    }
}
