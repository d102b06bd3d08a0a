//! Closed enums for the string-typed fields of orders and users.
//!
//! The store keeps these as plain text. Decoding goes through [`FromStr`], so
//! a value written by some other client that we do not recognise becomes an
//! explicit error instead of leaking through as free text.

use crate::errors::Error;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Lifecycle state of an order.
///
/// The usual path is `Pending -> Confirmed -> Shipped -> Delivered`, but no
/// ordering is enforced when a status is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Placed, awaiting confirmation
    #[default]
    Pending,
    /// Accepted by the shop
    Confirmed,
    /// Handed to the courier
    Shipped,
    /// Received by the customer
    Delivered,
    /// Called off before delivery
    Cancelled,
}

impl OrderStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::Confirmed,
        Self::Shipped,
        Self::Delivered,
        Self::Cancelled,
    ];

    /// The stored representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::Shipped => "SHIPPED",
            Self::Delivered => "DELIVERED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| Error::UnknownOrderStatus {
                value: s.to_string(),
            })
    }
}

/// Role of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserType {
    /// Regular shopper
    #[default]
    Customer,
    /// Store administrator
    Admin,
}

impl UserType {
    /// The stored representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "CUSTOMER",
            Self::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CUSTOMER" => Ok(Self::Customer),
            "ADMIN" => Ok(Self::Admin),
            _ => Err(Error::UnknownUserType {
                value: s.to_string(),
            }),
        }
    }
}

/// How an order is paid for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    /// Paid to the courier on delivery
    #[default]
    CashOnDelivery,
    /// Card payment at checkout
    CreditCard,
    /// Unified Payments Interface transfer
    Upi,
}

impl PaymentMethod {
    /// Every accepted payment method.
    pub const ALL: [Self; 3] = [Self::CashOnDelivery, Self::CreditCard, Self::Upi];

    /// The stored representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CashOnDelivery => "CASH_ON_DELIVERY",
            Self::CreditCard => "CREDIT_CARD",
            Self::Upi => "UPI",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|method| method.as_str() == s)
            .ok_or_else(|| Error::UnknownPaymentMethod {
                value: s.to_string(),
            })
    }
}
