//! Local handle on the identity provider's session.
//!
//! The provider itself lives outside this crate. It installs the signed-in
//! principal with [`AuthSession::sign_in`]; the rest of the data layer only
//! reads it. Signing out clears the local slot and never fails.

use serde::{Deserialize, Serialize};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::info;

/// The authenticated principal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    /// Provider uid, also the key of the user's profile document
    pub uid: String,
    /// Verified email, if the provider has one
    pub email: Option<String>,
    /// Display name from the provider
    pub display_name: Option<String>,
}

impl AuthUser {
    /// Creates a principal with only a uid.
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            email: None,
            display_name: None,
        }
    }

    /// Adds an email.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// Shared slot holding the current principal.
///
/// Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct AuthSession {
    current: Arc<RwLock<Option<AuthUser>>>,
}

impl AuthSession {
    /// Creates a signed-out session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The signed-in principal, or `None`.
    #[must_use]
    pub fn current_user(&self) -> Option<AuthUser> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Installs a principal, replacing any previous one.
    pub fn sign_in(&self, user: AuthUser) {
        info!("Signed in as {}", user.uid);
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(user);
    }

    /// Clears the principal locally. Does not wait on any server.
    pub fn sign_out(&self) {
        let previous = self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(user) = previous {
            info!("Signed out {}", user.uid);
        }
    }
}
