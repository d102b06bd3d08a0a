//! Unified error type for the storefront data layer.
//!
//! Absence of a single document is never an error here: lookups return
//! `Ok(None)`. Everything in this enum is a real failure that the caller
//! decides how to surface.

use thiserror::Error;

/// All failures produced by the data layer.
#[derive(Debug, Error)]
pub enum Error {
    /// Backend failure (connection, constraint, query execution).
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Settings could not be read or parsed.
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// A partial update targeted a document that does not exist.
    #[error("No document '{key}' in collection '{collection}'")]
    DocumentNotFound {
        /// Collection (table) name
        collection: &'static str,
        /// Document key
        key: String,
    },

    /// The transactional status update could not find the order.
    #[error("Order not found: {order_id}")]
    OrderNotFound {
        /// Order key that was looked up
        order_id: String,
    },

    /// A transaction was aborted before commit; nothing was written.
    #[error("Transaction aborted: {reason}")]
    TransactionAborted {
        /// Why the transaction gave up
        reason: String,
    },

    /// A stored order status string is not one of the known statuses.
    #[error("Unrecognized order status: {value:?}")]
    UnknownOrderStatus {
        /// The raw stored value
        value: String,
    },

    /// A stored user type string is not one of the known roles.
    #[error("Unrecognized user type: {value:?}")]
    UnknownUserType {
        /// The raw stored value
        value: String,
    },

    /// A stored payment method string is not one of the accepted methods.
    #[error("Unrecognized payment method: {value:?}")]
    UnknownPaymentMethod {
        /// The raw stored value
        value: String,
    },

    /// The user's address book is full.
    #[error("User '{user_id}' already has the maximum of {limit} addresses")]
    AddressLimitReached {
        /// Owner of the address book
        user_id: String,
        /// Maximum number of saved addresses
        limit: usize,
    },

    /// No saved address at this position in the user's address book.
    #[error("User '{user_id}' has no address at index {index}")]
    AddressNotFound {
        /// Owner of the address book
        user_id: String,
        /// Position that was requested
        index: usize,
    },

    /// A stored document exists but cannot be turned into a domain value.
    #[error("Invalid document '{key}' in collection '{collection}': {reason}")]
    InvalidDocument {
        /// Collection (table) name
        collection: &'static str,
        /// Document key
        key: String,
        /// What did not decode
        reason: String,
    },

    /// JSON column failed to encode or decode.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
