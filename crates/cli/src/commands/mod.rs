//! CLI command implementations.
//!
//! Each module owns one subcommand family and prints its results through
//! `tracing`. Commands that need a signed-in user start by restoring the
//! session persisted by `ridgeline auth login`.

pub mod account;
pub mod auth;
pub mod cart;
pub mod checkout;
pub mod orders;
pub mod products;

use ridgeline_client::Storefront;

/// Restore the persisted session, if there is one.
///
/// A missing or stale session is not an error here; the command that
/// needed it will fail with its own sign-in message.
pub async fn restore_session(storefront: &Storefront) {
    if let Err(e) = storefront.restore_session().await {
        tracing::warn!("Stored session is no longer valid: {e}");
    }
}
