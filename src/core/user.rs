//! User profile operations.
//!
//! Profiles are whole-document writes keyed by the auth uid. The partial
//! updates are the address book edits, each a transactional read-modify-write
//! of the `addresses` column, and replacing the push token.

use super::collections;
use crate::{
    entities::{self, user},
    errors::{Error, Result},
    models::{ShippingAddress, User, UserType},
};
use sea_orm::{
    Set, TransactionTrait,
    prelude::*,
    sea_query::{Expr, OnConflict},
};
use tracing::{debug, info, instrument};

fn to_active_model(profile: &User) -> Result<user::ActiveModel> {
    Ok(user::ActiveModel {
        user_id: Set(profile.user_id.clone()),
        email: Set(profile.email.clone()),
        full_name: Set(profile.full_name.clone()),
        phone_number: Set(profile.phone_number.clone()),
        addresses: Set(serde_json::to_value(&profile.addresses)?),
        user_type: Set(profile.user_type.as_str().to_string()),
        favorite_products: Set(serde_json::to_value(profile.favorite_products())?),
        profile_image_url: Set(profile.profile_image_url.clone()),
        fcm_token: Set(profile.fcm_token.clone()),
    })
}

fn decode_json<T>(key: &str, field: &str, value: Json) -> Result<T>
where
    T: serde::de::DeserializeOwned + Default,
{
    if value.is_null() {
        return Ok(T::default());
    }
    serde_json::from_value(value).map_err(|e| Error::InvalidDocument {
        collection: collections::USERS,
        key: key.to_string(),
        reason: format!("{field}: {e}"),
    })
}

impl TryFrom<user::Model> for User {
    type Error = Error;

    fn try_from(model: user::Model) -> Result<Self> {
        let addresses: Vec<ShippingAddress> =
            decode_json(&model.user_id, "addresses", model.addresses)?;
        let favorites: Vec<String> =
            decode_json(&model.user_id, "favorite_products", model.favorite_products)?;

        let mut profile = Self::new(
            model.user_id,
            model.email,
            model.full_name,
            model.phone_number,
        );
        profile.addresses = addresses;
        profile.user_type = model.user_type.parse::<UserType>()?;
        profile.set_favorite_products(favorites);
        profile.profile_image_url = model.profile_image_url;
        profile.fcm_token = model.fcm_token;
        Ok(profile)
    }
}

/// Writes the full profile, replacing any stored document with the same id.
///
/// Fields absent from `profile` are not merged from the old document.
#[instrument(skip(db, profile), fields(user_id = %profile.user_id))]
pub async fn create_user_profile<C>(db: &C, profile: &User) -> Result<()>
where
    C: ConnectionTrait,
{
    entities::User::insert(to_active_model(profile)?)
        .on_conflict(
            OnConflict::column(user::Column::UserId)
                .update_columns([
                    user::Column::Email,
                    user::Column::FullName,
                    user::Column::PhoneNumber,
                    user::Column::Addresses,
                    user::Column::UserType,
                    user::Column::FavoriteProducts,
                    user::Column::ProfileImageUrl,
                    user::Column::FcmToken,
                ])
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;
    info!("Stored profile {}", profile.user_id);
    Ok(())
}

/// Same overwrite semantics as [`create_user_profile`].
pub async fn update_user_profile<C>(db: &C, profile: &User) -> Result<()>
where
    C: ConnectionTrait,
{
    create_user_profile(db, profile).await
}

/// Fetches a profile, returning `None` when no document exists.
pub async fn get_user_profile<C>(db: &C, user_id: &str) -> Result<Option<User>>
where
    C: ConnectionTrait,
{
    let model = entities::User::find_by_id(user_id.to_string()).one(db).await?;
    debug!("Profile lookup for '{}': found={}", user_id, model.is_some());
    model.map(User::try_from).transpose()
}

/// Loads a profile, lets `edit` change its address book, and writes the book
/// back, all inside one transaction.
///
/// Nothing is written when `edit` fails.
async fn edit_address_book<T, F>(db: &DatabaseConnection, user_id: &str, edit: F) -> Result<T>
where
    F: FnOnce(&mut User) -> Result<T>,
{
    let txn = db.begin().await?;

    let model = entities::User::find_by_id(user_id.to_string())
        .one(&txn)
        .await?
        .ok_or_else(|| Error::DocumentNotFound {
            collection: collections::USERS,
            key: user_id.to_string(),
        })?;

    let mut profile = User::try_from(model.clone())?;
    let outcome = edit(&mut profile)?;

    let mut active: user::ActiveModel = model.into();
    active.addresses = Set(serde_json::to_value(&profile.addresses)?);
    active.update(&txn).await?;

    txn.commit().await?;
    debug!("User {} now has {} addresses", user_id, profile.addresses.len());
    Ok(outcome)
}

/// Appends one address to a stored profile and returns its index.
///
/// The first address saved becomes the default. The read and the write run in
/// one transaction so concurrent appends do not drop each other's address.
///
/// # Errors
/// Returns `Error::DocumentNotFound` if the profile does not exist, or
/// `Error::AddressLimitReached` if it already holds
/// [`MAX_ADDRESSES`](crate::models::MAX_ADDRESSES).
#[instrument(skip(db, address))]
pub async fn add_address(
    db: &DatabaseConnection,
    user_id: &str,
    address: ShippingAddress,
) -> Result<usize> {
    let index = edit_address_book(db, user_id, |profile| profile.add_address(address)).await?;
    info!("Saved address {} for user {}", index, user_id);
    Ok(index)
}

/// Replaces the saved address at `index`; its default flag is kept.
///
/// # Errors
/// Returns `Error::DocumentNotFound` for a missing profile and
/// `Error::AddressNotFound` for an index past the end of the book.
#[instrument(skip(db, address))]
pub async fn update_address(
    db: &DatabaseConnection,
    user_id: &str,
    index: usize,
    address: ShippingAddress,
) -> Result<()> {
    edit_address_book(db, user_id, |profile| profile.update_address(index, address)).await
}

/// Deletes the saved address at `index` and returns it.
///
/// If it was the default, the first remaining address takes over.
///
/// # Errors
/// Returns `Error::DocumentNotFound` for a missing profile and
/// `Error::AddressNotFound` for an index past the end of the book.
#[instrument(skip(db))]
pub async fn remove_address(
    db: &DatabaseConnection,
    user_id: &str,
    index: usize,
) -> Result<ShippingAddress> {
    let removed = edit_address_book(db, user_id, |profile| profile.remove_address(index)).await?;
    info!("Removed address {} for user {}", index, user_id);
    Ok(removed)
}

/// Clears the old default and flags the address at `index`, atomically.
///
/// # Errors
/// Returns `Error::DocumentNotFound` for a missing profile and
/// `Error::AddressNotFound` for an index past the end of the book. In both
/// cases the stored default is unchanged.
#[instrument(skip(db))]
pub async fn set_default_address(
    db: &DatabaseConnection,
    user_id: &str,
    index: usize,
) -> Result<()> {
    edit_address_book(db, user_id, |profile| profile.set_default_address(index)).await?;
    info!("Address {} is now the default for user {}", index, user_id);
    Ok(())
}

/// Reads the default address, `None` if the user or a default is missing.
pub async fn get_default_address<C>(db: &C, user_id: &str) -> Result<Option<ShippingAddress>>
where
    C: ConnectionTrait,
{
    Ok(get_user_profile(db, user_id)
        .await?
        .and_then(|profile| profile.default_address().cloned()))
}

/// Deletes every saved address of a user.
///
/// # Errors
/// Returns `Error::DocumentNotFound` if the profile does not exist.
#[instrument(skip(db))]
pub async fn clear_addresses(db: &DatabaseConnection, user_id: &str) -> Result<()> {
    edit_address_book(db, user_id, |profile| {
        profile.clear_addresses();
        Ok(())
    })
    .await?;
    info!("Cleared address book for user {}", user_id);
    Ok(())
}

/// Replaces the push token without touching any other field.
///
/// # Errors
/// Returns `Error::DocumentNotFound` if the profile does not exist.
#[instrument(skip(db, token))]
pub async fn update_fcm_token<C>(db: &C, user_id: &str, token: &str) -> Result<()>
where
    C: ConnectionTrait,
{
    let result = entities::User::update_many()
        .col_expr(user::Column::FcmToken, Expr::value(token.to_string()))
        .filter(user::Column::UserId.eq(user_id))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Err(Error::DocumentNotFound {
            collection: collections::USERS,
            key: user_id.to_string(),
        });
    }
    debug!("Push token refreshed for {}", user_id);
    Ok(())
}

/// Reads the push token, `None` if the user or the token is missing.
pub async fn get_fcm_token<C>(db: &C, user_id: &str) -> Result<Option<String>>
where
    C: ConnectionTrait,
{
    Ok(entities::User::find_by_id(user_id.to_string())
        .one(db)
        .await?
        .and_then(|model| model.fcm_token))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{models::MAX_ADDRESSES, test_utils::*};

    #[tokio::test]
    async fn test_missing_profile_is_none() -> Result<()> {
        let db = setup_test_db().await?;
        assert!(get_user_profile(&db, "nobody").await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_create_and_fetch_profile() -> Result<()> {
        let db = setup_test_db().await?;
        let mut profile = User::new("u1", "ada@example.com", "Ada", "555-0100");
        profile.add_favorite_product("p1");
        profile.add_address(test_address("Ada"))?;
        create_user_profile(&db, &profile).await?;

        let stored = get_user_profile(&db, "u1").await?.unwrap();
        assert_eq!(stored, profile);
        Ok(())
    }

    #[tokio::test]
    async fn test_create_overwrites_without_merge() -> Result<()> {
        let db = setup_test_db().await?;
        let mut first = User::new("u1", "old@example.com", "Old", "1");
        first.fcm_token = Some("token-1".to_string());
        first.add_favorite_product("p1");
        create_user_profile(&db, &first).await?;

        let second = User::new("u1", "new@example.com", "New", "2");
        update_user_profile(&db, &second).await?;

        let stored = get_user_profile(&db, "u1").await?.unwrap();
        assert_eq!(stored.email, "new@example.com");
        assert!(stored.fcm_token.is_none());
        assert!(stored.favorite_products().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_add_address_appends() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_user(&db, "u1", None).await?;

        assert_eq!(add_address(&db, "u1", test_address("Home")).await?, 0);
        assert_eq!(add_address(&db, "u1", test_address("Work")).await?, 1);

        let stored = get_user_profile(&db, "u1").await?.unwrap();
        let names: Vec<_> = stored.addresses.iter().map(|a| a.full_name.as_str()).collect();
        assert_eq!(names, ["Home", "Work"]);
        assert!(stored.addresses[0].is_default);
        Ok(())
    }

    #[tokio::test]
    async fn test_add_address_to_missing_user_fails() -> Result<()> {
        let db = setup_test_db().await?;
        let result = add_address(&db, "ghost", test_address("Home")).await;
        assert!(matches!(result, Err(Error::DocumentNotFound { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_update_fcm_token_is_partial() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_user(&db, "u1", None).await?;
        add_address(&db, "u1", test_address("Home")).await?;

        update_fcm_token(&db, "u1", "fresh-token").await?;

        let stored = get_user_profile(&db, "u1").await?.unwrap();
        assert_eq!(stored.fcm_token.as_deref(), Some("fresh-token"));
        assert_eq!(stored.addresses.len(), 1);
        assert_eq!(stored.email, "u1@example.com");
        assert_eq!(get_fcm_token(&db, "u1").await?.as_deref(), Some("fresh-token"));
        Ok(())
    }

    #[tokio::test]
    async fn test_update_fcm_token_missing_user() -> Result<()> {
        let db = setup_test_db().await?;
        let result = update_fcm_token(&db, "ghost", "t").await;
        assert!(matches!(result, Err(Error::DocumentNotFound { .. })));
        assert!(get_fcm_token(&db, "ghost").await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_stored_user_type_is_rejected() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_user(&db, "u1", None).await?;
        entities::User::update_many()
            .col_expr(user::Column::UserType, Expr::value("SUPERUSER"))
            .filter(user::Column::UserId.eq("u1"))
            .exec(&db)
            .await?;

        let result = get_user_profile(&db, "u1").await;
        assert!(matches!(result, Err(Error::UnknownUserType { .. })));
        Ok(())
    }

    async fn stored_names(db: &DatabaseConnection, user_id: &str) -> Result<Vec<String>> {
        let stored = get_user_profile(db, user_id).await?.unwrap();
        Ok(stored.addresses.into_iter().map(|a| a.full_name).collect())
    }

    #[tokio::test]
    async fn test_address_book_cap_is_enforced() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_user(&db, "u1", None).await?;
        for i in 0..MAX_ADDRESSES {
            add_address(&db, "u1", test_address(&format!("Home {i}"))).await?;
        }

        let result = add_address(&db, "u1", test_address("One too many")).await;
        assert!(matches!(result, Err(Error::AddressLimitReached { limit: 5, .. })));
        assert_eq!(stored_names(&db, "u1").await?.len(), MAX_ADDRESSES);
        Ok(())
    }

    #[tokio::test]
    async fn test_set_default_address_swaps_flag() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_user(&db, "u1", None).await?;
        add_address(&db, "u1", test_address("Home")).await?;
        add_address(&db, "u1", test_address("Work")).await?;
        assert_eq!(
            get_default_address(&db, "u1").await?.unwrap().full_name,
            "Home"
        );

        set_default_address(&db, "u1", 1).await?;

        let stored = get_user_profile(&db, "u1").await?.unwrap();
        assert!(!stored.addresses[0].is_default);
        assert!(stored.addresses[1].is_default);
        assert_eq!(
            get_default_address(&db, "u1").await?.unwrap().full_name,
            "Work"
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_set_default_out_of_range_changes_nothing() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_user(&db, "u1", None).await?;
        add_address(&db, "u1", test_address("Home")).await?;

        let result = set_default_address(&db, "u1", 4).await;
        assert!(matches!(result, Err(Error::AddressNotFound { index: 4, .. })));
        assert_eq!(
            get_default_address(&db, "u1").await?.unwrap().full_name,
            "Home"
        );

        let result = set_default_address(&db, "ghost", 0).await;
        assert!(matches!(result, Err(Error::DocumentNotFound { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_update_and_remove_address() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_user(&db, "u1", None).await?;
        add_address(&db, "u1", test_address("Home")).await?;
        add_address(&db, "u1", test_address("Work")).await?;

        update_address(&db, "u1", 1, test_address("Office")).await?;
        assert_eq!(stored_names(&db, "u1").await?, ["Home", "Office"]);

        let removed = remove_address(&db, "u1", 0).await?;
        assert_eq!(removed.full_name, "Home");
        assert_eq!(stored_names(&db, "u1").await?, ["Office"]);
        assert_eq!(
            get_default_address(&db, "u1").await?.unwrap().full_name,
            "Office"
        );

        let result = remove_address(&db, "u1", 3).await;
        assert!(matches!(result, Err(Error::AddressNotFound { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_clear_addresses_keeps_profile() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_user(&db, "u1", Some("tok")).await?;
        add_address(&db, "u1", test_address("Home")).await?;

        clear_addresses(&db, "u1").await?;

        let stored = get_user_profile(&db, "u1").await?.unwrap();
        assert!(stored.addresses.is_empty());
        assert_eq!(stored.fcm_token.as_deref(), Some("tok"));
        assert!(get_default_address(&db, "u1").await?.is_none());
        assert!(get_default_address(&db, "ghost").await?.is_none());

        let result = clear_addresses(&db, "ghost").await;
        assert!(matches!(result, Err(Error::DocumentNotFound { .. })));
        Ok(())
    }
}
