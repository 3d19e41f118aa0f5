//! Session commands.
//!
//! ```bash
//! ridgeline auth register --first-name Ada --last-name Byron -e ada@example.com -p "correct horse"
//! ridgeline auth login -e ada@example.com -p "correct horse"
//! ridgeline auth status
//! ridgeline auth logout
//! ```
//!
//! `login` and `register` persist the session token, so later commands
//! in other processes stay signed in until `logout`.

use ridgeline_client::Storefront;
use ridgeline_client::models::{Credentials, Registration};
use ridgeline_client::stores::{AuthError, RegisterError, SessionState};
use ridgeline_core::{Email, EmailError};
use secrecy::SecretString;
use thiserror::Error;

/// Errors that can occur during session commands.
#[derive(Debug, Error)]
pub enum AuthCommandError {
    /// The email address failed local validation.
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Sign-in failed.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Registration failed.
    #[error(transparent)]
    Register(#[from] RegisterError),
}

/// Create an account and sign in with it.
pub async fn register(
    storefront: &Storefront,
    first_name: &str,
    last_name: &str,
    email: &str,
    password: &str,
) -> Result<(), AuthCommandError> {
    let registration = Registration {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        email: Email::parse(email)?,
        password: SecretString::from(password.to_string()),
    };

    let user = storefront.session().register(&registration).await?;
    tracing::info!("Account created. Signed in as {} <{}>", user.full_name(), user.email);
    Ok(())
}

/// Sign in and persist the session for later commands.
pub async fn login(
    storefront: &Storefront,
    email: &str,
    password: &str,
) -> Result<(), AuthCommandError> {
    let credentials = Credentials {
        email: Email::parse(email)?,
        password: SecretString::from(password.to_string()),
    };

    let user = storefront.session().login(&credentials).await?;
    tracing::info!("Signed in as {} <{}>", user.full_name(), user.email);
    Ok(())
}

/// Sign out and forget the stored session.
pub async fn logout(storefront: &Storefront) {
    storefront.session().logout().await;
    tracing::info!("Signed out");
}

/// Report who is signed in.
pub async fn status(storefront: &Storefront) {
    super::restore_session(storefront).await;

    match storefront.session().state() {
        SessionState::Authenticated { user } => {
            tracing::info!("Signed in as {} <{}>", user.full_name(), user.email);
        }
        _ => tracing::info!("Signed out"),
    }
}
