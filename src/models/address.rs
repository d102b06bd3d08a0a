//! Shipping address value type.

use serde::{Deserialize, Serialize};

/// Most addresses a user may keep in their address book.
pub const MAX_ADDRESSES: usize = 5;

/// A delivery address, embedded in orders and in a user's address book.
///
/// All fields are free-form; nothing here validates postal formats.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShippingAddress {
    /// Recipient name
    pub full_name: String,
    /// Street and house number
    pub street_address: String,
    /// City
    pub city: String,
    /// State or region
    pub state: String,
    /// Postal code
    pub zip_code: String,
    /// Contact phone for the courier
    pub phone: String,
    /// Marks the preferred entry of an address book; unused on orders
    pub is_default: bool,
}

impl ShippingAddress {
    /// Builds an address from all of its parts.
    pub fn new(
        full_name: impl Into<String>,
        street_address: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        zip_code: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            street_address: street_address.into(),
            city: city.into(),
            state: state.into(),
            zip_code: zip_code.into(),
            phone: phone.into(),
            is_default: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_decode_as_empty() {
        let address: ShippingAddress =
            serde_json::from_str(r#"{"fullName":"Ada","city":"London"}"#).unwrap();
        assert_eq!(address.full_name, "Ada");
        assert_eq!(address.city, "London");
        assert!(address.zip_code.is_empty());
        assert!(!address.is_default);
    }
}
