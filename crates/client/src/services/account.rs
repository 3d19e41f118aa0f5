//! Account management service.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use tracing::instrument;

use crate::api::types::{PasswordChangeRequest, ProfileUpdateRequest, UserResponse};
use crate::api::{ApiClient, ApiError};
use crate::models::{MIN_PASSWORD_LENGTH, ProfileUpdate, User};
use crate::stores::SessionStore;

/// Errors from account operations. The validation variants are local;
/// nothing is sent to the backend until they pass.
#[derive(Debug, Error)]
pub enum AccountError {
    /// No authenticated session.
    #[error("sign in to manage the account")]
    AuthRequired,
    #[error("first name cannot be empty")]
    EmptyFirstName,
    #[error("last name cannot be empty")]
    EmptyLastName,
    #[error("shipping address cannot be empty")]
    EmptyShippingAddress,
    #[error("current password is required")]
    MissingCurrentPassword,
    #[error("new password must be at least {min} characters")]
    PasswordTooShort {
        /// Minimum allowed length.
        min: usize,
    },
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Account service for the signed-in user.
#[derive(Clone)]
pub struct Account {
    inner: Arc<AccountInner>,
}

struct AccountInner {
    api: ApiClient,
    session: SessionStore,
}

impl Account {
    pub(crate) fn new(api: ApiClient, session: SessionStore) -> Self {
        Self {
            inner: Arc::new(AccountInner { api, session }),
        }
    }

    /// Profile of the signed-in user, fetched fresh from the backend.
    #[instrument(skip(self))]
    pub async fn profile(&self) -> Result<User, AccountError> {
        if !self.inner.session.is_authenticated() {
            return Err(AccountError::AuthRequired);
        }

        let response: UserResponse = self.inner.api.get("/users/me").await?;
        Ok(response.into())
    }

    /// Update names, birth date, and shipping address.
    ///
    /// Email is fixed at registration and deliberately absent from the
    /// update. The session store's cached profile is synced on success.
    #[instrument(skip(self, update))]
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User, AccountError> {
        if !self.inner.session.is_authenticated() {
            return Err(AccountError::AuthRequired);
        }
        if update.first_name.trim().is_empty() {
            return Err(AccountError::EmptyFirstName);
        }
        if update.last_name.trim().is_empty() {
            return Err(AccountError::EmptyLastName);
        }
        if update.shipping_address.trim().is_empty() {
            return Err(AccountError::EmptyShippingAddress);
        }

        let request = ProfileUpdateRequest {
            first_name: update.first_name.trim(),
            last_name: update.last_name.trim(),
            birth_date: update.birth_date,
            shipping_address: update.shipping_address.trim(),
        };
        let response: UserResponse = self.inner.api.put("/users/me", &request).await?;

        let user = User::from(response);
        self.inner.session.sync_user(user.clone());
        Ok(user)
    }

    /// Change the password. The current password is re-verified server-side.
    #[instrument(skip(self, current, new))]
    pub async fn change_password(
        &self,
        current: &SecretString,
        new: &SecretString,
    ) -> Result<(), AccountError> {
        if !self.inner.session.is_authenticated() {
            return Err(AccountError::AuthRequired);
        }
        if current.expose_secret().is_empty() {
            return Err(AccountError::MissingCurrentPassword);
        }
        if new.expose_secret().chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AccountError::PasswordTooShort {
                min: MIN_PASSWORD_LENGTH,
            });
        }

        let request = PasswordChangeRequest {
            current_password: current.expose_secret(),
            new_password: new.expose_secret(),
        };
        let _: serde_json::Value = self.inner.api.put("/users/me/password", &request).await?;
        Ok(())
    }
}
