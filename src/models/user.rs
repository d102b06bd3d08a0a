//! User profile model.

use super::{MAX_ADDRESSES, ShippingAddress, UserType};
use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};

/// A shopper or administrator profile.
///
/// `favorite_products` behaves as an insertion-ordered set: adding an id that
/// is already present does nothing, removing one that is absent does nothing.
///
/// `addresses` is an address book of at most [`MAX_ADDRESSES`] entries. The
/// book methods keep exactly one entry flagged `is_default` whenever it is
/// non-empty; assigning the field directly bypasses that.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    /// Key, matches the identity provider's uid
    pub user_id: String,
    /// Contact email
    pub email: String,
    /// Display name
    pub full_name: String,
    /// Contact phone
    pub phone_number: String,
    /// Saved delivery addresses, oldest first
    pub addresses: Vec<ShippingAddress>,
    /// Account role
    pub user_type: UserType,
    favorite_products: Vec<String>,
    /// Download URL of the profile picture
    pub profile_image_url: Option<String>,
    /// Push-notification routing token
    pub fcm_token: Option<String>,
}

impl User {
    /// Creates a customer profile with no addresses or favourites.
    pub fn new(
        user_id: impl Into<String>,
        email: impl Into<String>,
        full_name: impl Into<String>,
        phone_number: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            email: email.into(),
            full_name: full_name.into(),
            phone_number: phone_number.into(),
            ..Self::default()
        }
    }

    /// Appends an address and returns its index.
    ///
    /// The first address becomes the default. A later one only does if it
    /// arrives with `is_default` set, which clears the flag everywhere else.
    ///
    /// # Errors
    /// Returns `Error::AddressLimitReached` when the book is already full.
    pub fn add_address(&mut self, mut address: ShippingAddress) -> Result<usize> {
        if self.addresses.len() >= MAX_ADDRESSES {
            return Err(Error::AddressLimitReached {
                user_id: self.user_id.clone(),
                limit: MAX_ADDRESSES,
            });
        }
        if self.addresses.is_empty() {
            address.is_default = true;
        } else if address.is_default {
            self.clear_default();
        }
        self.addresses.push(address);
        Ok(self.addresses.len() - 1)
    }

    /// Replaces the address at `index`, keeping its default flag.
    ///
    /// # Errors
    /// Returns `Error::AddressNotFound` if `index` is out of range.
    pub fn update_address(&mut self, index: usize, mut address: ShippingAddress) -> Result<()> {
        let slot = self.address_mut(index)?;
        address.is_default = slot.is_default;
        *slot = address;
        Ok(())
    }

    /// Removes and returns the address at `index`.
    ///
    /// Removing the default hands the flag to the first remaining address.
    ///
    /// # Errors
    /// Returns `Error::AddressNotFound` if `index` is out of range.
    pub fn remove_address(&mut self, index: usize) -> Result<ShippingAddress> {
        self.address_mut(index)?;
        let removed = self.addresses.remove(index);
        if removed.is_default {
            if let Some(first) = self.addresses.first_mut() {
                first.is_default = true;
            }
        }
        Ok(removed)
    }

    /// Makes the address at `index` the only default.
    ///
    /// # Errors
    /// Returns `Error::AddressNotFound` if `index` is out of range; the book
    /// is left untouched.
    pub fn set_default_address(&mut self, index: usize) -> Result<()> {
        self.address_mut(index)?;
        self.clear_default();
        self.addresses[index].is_default = true;
        Ok(())
    }

    /// The address flagged as default, if any.
    #[must_use]
    pub fn default_address(&self) -> Option<&ShippingAddress> {
        self.addresses.iter().find(|address| address.is_default)
    }

    /// Empties the address book.
    pub fn clear_addresses(&mut self) {
        self.addresses.clear();
    }

    fn clear_default(&mut self) {
        for address in &mut self.addresses {
            address.is_default = false;
        }
    }

    fn address_mut(&mut self, index: usize) -> Result<&mut ShippingAddress> {
        let user_id = &self.user_id;
        self.addresses
            .get_mut(index)
            .ok_or_else(|| Error::AddressNotFound {
                user_id: user_id.clone(),
                index,
            })
    }

    /// Whether the account is a store administrator.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.user_type == UserType::Admin
    }

    /// Favourite product ids in the order they were added.
    #[must_use]
    pub fn favorite_products(&self) -> &[String] {
        &self.favorite_products
    }

    /// Replaces the favourites, dropping duplicates but keeping first-seen order.
    pub fn set_favorite_products(&mut self, product_ids: impl IntoIterator<Item = String>) {
        self.favorite_products.clear();
        for product_id in product_ids {
            self.add_favorite_product(product_id);
        }
    }

    /// Returns `true` if the id was not already a favourite.
    pub fn add_favorite_product(&mut self, product_id: impl Into<String>) -> bool {
        let product_id = product_id.into();
        if self.favorite_products.contains(&product_id) {
            return false;
        }
        self.favorite_products.push(product_id);
        true
    }

    /// Returns `true` if the id was a favourite.
    pub fn remove_favorite_product(&mut self, product_id: &str) -> bool {
        let before = self.favorite_products.len();
        self.favorite_products.retain(|id| id != product_id);
        self.favorite_products.len() != before
    }
}
