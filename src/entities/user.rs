//! User entity - one profile document per account, keyed by the auth uid.
//!
//! `addresses` and `favorite_products` are JSON arrays so the profile keeps the
//! same embedded shape it has in the domain model.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Identity provider uid
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: String,
    /// Contact email
    pub email: String,
    /// Display name
    pub full_name: String,
    /// Contact phone
    pub phone_number: String,
    /// JSON array of saved addresses, at most one flagged default
    pub addresses: Json,
    /// `"CUSTOMER"` or `"ADMIN"`
    pub user_type: String,
    /// JSON array of product ids
    pub favorite_products: Json,
    /// Profile picture URL
    pub profile_image_url: Option<String>,
    /// Push-notification routing token
    pub fcm_token: Option<String>,
}

/// Profiles are standalone documents
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
