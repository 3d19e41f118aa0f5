//! Auth session store.
//!
//! Owns the login/register/logout state machine and the durable session
//! token. There is at most one session per process; every authenticated
//! request reads the token this store manages.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use tokio::sync::watch;
use tracing::{instrument, warn};

use crate::api::types::{LoginRequest, LoginResponse, RegisterRequest, UserResponse};
use crate::api::{ApiClient, ApiError};
use crate::models::{Credentials, Registration, RegistrationError, User};
use crate::token::TokenSlot;

/// Errors from login, logout, and session restore.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The password was empty; the backend is never consulted.
    #[error("password cannot be empty")]
    EmptyPassword,
    /// The backend rejected the attempt or could not be reached.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors from the two-phase register-then-login workflow.
#[derive(Debug, Error)]
pub enum RegisterError {
    /// Local validation failed; nothing was sent.
    #[error(transparent)]
    Invalid(#[from] RegistrationError),
    /// The backend rejected the registration; no account was created.
    #[error("registration rejected: {0}")]
    Rejected(#[source] ApiError),
    /// The account was created, but the follow-up login failed. Signing in
    /// manually is the way forward; registering again would fail.
    #[error("account created but automatic sign-in failed: {0}")]
    LoginAfterRegister(#[source] AuthError),
}

/// Where the session currently stands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    /// No token, no user.
    #[default]
    Unauthenticated,
    /// A login or restore is mid-flight.
    Authenticating,
    /// Token verified against the backend; requests carry it.
    Authenticated { user: User },
}

/// Auth session store.
///
/// Cheap to clone; clones observe and mutate the same session.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<SessionStoreInner>,
}

struct SessionStoreInner {
    api: ApiClient,
    token: TokenSlot,
    state: watch::Sender<SessionState>,
}

impl SessionStore {
    pub(crate) fn new(api: ApiClient) -> Self {
        let token = api.token_slot();
        let (state, _) = watch::channel(SessionState::default());
        Self {
            inner: Arc::new(SessionStoreInner { api, token, state }),
        }
    }

    /// Current session state snapshot.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.inner.state.borrow().clone()
    }

    /// Subscribe to session state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.inner.state.subscribe()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(
            &*self.inner.state.borrow(),
            SessionState::Authenticated { .. }
        )
    }

    /// The signed-in user, if any.
    #[must_use]
    pub fn user(&self) -> Option<User> {
        match &*self.inner.state.borrow() {
            SessionState::Authenticated { user } => Some(user.clone()),
            _ => None,
        }
    }

    /// Sign in, verify the token by fetching the profile, and persist the
    /// session for later restores.
    ///
    /// Any previous session is torn down the moment the attempt starts. On
    /// failure the store is left cleanly unauthenticated.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::EmptyPassword`] without touching the network,
    /// or the normalized backend error.
    #[instrument(skip(self, credentials), fields(email = %credentials.email))]
    pub async fn login(&self, credentials: &Credentials) -> Result<User, AuthError> {
        if credentials.password.expose_secret().is_empty() {
            return Err(AuthError::EmptyPassword);
        }

        self.teardown().await;
        self.inner.state.send_replace(SessionState::Authenticating);

        match self.authenticate(credentials).await {
            Ok(user) => {
                self.inner.state.send_replace(SessionState::Authenticated {
                    user: user.clone(),
                });

                // Persistence is best-effort; the live session works either way.
                if let Err(e) = self.inner.token.persist().await {
                    warn!(error = %e, "Failed to persist session token");
                }

                Ok(user)
            }
            Err(e) => {
                self.teardown().await;
                Err(e)
            }
        }
    }

    /// Create an account, then sign in with the same credentials.
    ///
    /// The backend does not auto-login on register, so this chains into
    /// [`SessionStore::login`]. The two phases fail distinctly: a
    /// [`RegisterError::LoginAfterRegister`] means the account exists.
    #[instrument(skip(self, registration), fields(email = %registration.email))]
    pub async fn register(&self, registration: &Registration) -> Result<User, RegisterError> {
        registration.validate()?;

        let request = RegisterRequest {
            first_name: registration.first_name.trim(),
            last_name: registration.last_name.trim(),
            email: registration.email.as_str(),
            password: registration.password.expose_secret(),
        };
        let _: serde_json::Value = self
            .inner
            .api
            .post("/auth/register", &request)
            .await
            .map_err(RegisterError::Rejected)?;

        let credentials = Credentials {
            email: registration.email.clone(),
            password: registration.password.clone(),
        };
        self.login(&credentials)
            .await
            .map_err(RegisterError::LoginAfterRegister)
    }

    /// Sign out. Purely local and always succeeds; there is no server-side
    /// session to revoke.
    #[instrument(skip(self))]
    pub async fn logout(&self) {
        self.teardown().await;
    }

    /// Restore a persisted session from disk, verifying the token by
    /// fetching the profile.
    ///
    /// Returns `Ok(false)` when there is nothing usable on disk; a missing
    /// or unreadable session file just means starting signed out.
    ///
    /// # Errors
    ///
    /// Returns the backend error if the persisted token is rejected or the
    /// profile fetch fails; the stale session is torn down first.
    #[instrument(skip(self))]
    pub async fn restore(&self) -> Result<bool, AuthError> {
        match self.inner.token.load_persisted().await {
            Ok(true) => {}
            Ok(false) => return Ok(false),
            Err(e) => {
                warn!(error = %e, "Ignoring unreadable session file");
                return Ok(false);
            }
        }

        self.inner.state.send_replace(SessionState::Authenticating);

        match self.inner.api.get::<UserResponse>("/users/me").await {
            Ok(profile) => {
                self.inner.state.send_replace(SessionState::Authenticated {
                    user: profile.into(),
                });
                Ok(true)
            }
            Err(e) => {
                self.teardown().await;
                Err(AuthError::Api(e))
            }
        }
    }

    /// Swap the cached profile inside an authenticated session after an
    /// account update. No-op when signed out.
    pub(crate) fn sync_user(&self, user: User) {
        self.inner.state.send_if_modified(|state| {
            if let SessionState::Authenticated { user: current } = state {
                *current = user;
                true
            } else {
                false
            }
        });
    }

    /// POST the credentials, install the token, and fetch the profile the
    /// token belongs to.
    async fn authenticate(&self, credentials: &Credentials) -> Result<User, AuthError> {
        let response: LoginResponse = self
            .inner
            .api
            .post(
                "/auth/login",
                &LoginRequest {
                    email: credentials.email.as_str(),
                    password: credentials.password.expose_secret(),
                },
            )
            .await?;

        self.inner
            .token
            .set(SecretString::from(response.token))
            .await;

        let profile: UserResponse = self.inner.api.get("/users/me").await?;
        Ok(profile.into())
    }

    /// Drop the token, remove the persisted session file, and reset the
    /// state machine.
    async fn teardown(&self) {
        self.inner.token.clear().await;
        if let Err(e) = self.inner.token.clear_persisted().await {
            warn!(error = %e, "Failed to remove persisted session file");
        }
        self.inner
            .state
            .send_replace(SessionState::Unauthenticated);
    }
}
