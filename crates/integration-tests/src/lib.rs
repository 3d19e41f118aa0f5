//! Test harness for the Ridgeline client crates.
//!
//! [`TestBackend`] serves the production wire contract from an in-process
//! axum server on an ephemeral port; the fixtures here wire a
//! [`Storefront`] to it with a throwaway session file. Tests drive the
//! public client API and use the backend's hit counters and fault
//! injection to pin down request behavior.

#![cfg_attr(not(test), forbid(unsafe_code))]

mod backend;

pub use backend::{DECLINE_CARD, TestBackend};

use std::path::PathBuf;
use std::time::Duration;

use ridgeline_client::models::{Credentials, Registration};
use ridgeline_client::{ClientConfig, Storefront};
use ridgeline_core::Email;
use secrecy::SecretString;
use uuid::Uuid;

/// A card number the mock accepts.
pub const VALID_CARD: &str = "4111 1111 1111 1111";
/// An expiry safely in the future.
pub const VALID_EXPIRY: &str = "12/30";
pub const VALID_CVV: &str = "123";
/// Password every generated test account uses.
pub const TEST_PASSWORD: &str = "correct horse battery";

/// Session file path that no other test shares.
#[must_use]
pub fn temp_session_file() -> PathBuf {
    std::env::temp_dir().join(format!("ridgeline-test-session-{}.json", Uuid::new_v4()))
}

/// Client configuration pointing at the mock backend.
#[must_use]
pub fn test_config(backend: &TestBackend) -> ClientConfig {
    ClientConfig {
        api_url: backend.base_url(),
        timeout: Duration::from_secs(5),
        session_file: temp_session_file(),
    }
}

/// A storefront wired to the mock backend.
#[must_use]
pub fn test_storefront(backend: &TestBackend) -> Storefront {
    Storefront::new(&test_config(backend))
}

/// An email address no other test shares.
///
/// # Panics
///
/// Panics if the generated address fails validation.
#[must_use]
pub fn unique_email() -> Email {
    Email::parse(&format!("shopper-{}@example.com", Uuid::new_v4())).expect("valid test email")
}

/// Register a fresh account on the storefront and leave it signed in.
/// Returns the credentials for tests that need to sign in again.
///
/// # Panics
///
/// Panics if registration fails; tests call this as setup.
pub async fn sign_in(storefront: &Storefront) -> Credentials {
    let credentials = Credentials {
        email: unique_email(),
        password: SecretString::from(TEST_PASSWORD.to_string()),
    };
    let registration = Registration {
        first_name: "Test".to_string(),
        last_name: "Shopper".to_string(),
        email: credentials.email.clone(),
        password: credentials.password.clone(),
    };
    storefront
        .session()
        .register(&registration)
        .await
        .expect("register test account");
    credentials
}
