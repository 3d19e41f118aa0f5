//! Account profile commands.
//!
//! ```bash
//! ridgeline account show
//! ridgeline account update --first-name Ada --last-name Byron \
//!     --birth-date 1990-05-12 --shipping-address "1 Main St, Bozeman MT"
//! ridgeline account change-password --current "old one" --new "better one"
//! ```
//!
//! `update` replaces the whole profile; the email address is fixed at
//! registration and never part of it.

use chrono::NaiveDate;
use ridgeline_client::Storefront;
use ridgeline_client::models::ProfileUpdate;
use ridgeline_client::services::AccountError;
use secrecy::SecretString;

/// Show the signed-in user's profile.
pub async fn show(storefront: &Storefront) -> Result<(), AccountError> {
    super::restore_session(storefront).await;

    let user = storefront.account().profile().await?;

    tracing::info!("{} <{}>", user.full_name(), user.email);
    if let Some(birth_date) = user.birth_date {
        tracing::info!("  Born: {birth_date}");
    }
    if let Some(address) = &user.shipping_address {
        tracing::info!("  Ships to: {address}");
    }
    Ok(())
}

/// Replace the profile fields.
pub async fn update(
    storefront: &Storefront,
    first_name: &str,
    last_name: &str,
    birth_date: NaiveDate,
    shipping_address: &str,
) -> Result<(), AccountError> {
    super::restore_session(storefront).await;

    let update = ProfileUpdate {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        birth_date,
        shipping_address: shipping_address.to_string(),
    };

    let user = storefront.account().update_profile(&update).await?;
    tracing::info!("Profile updated for {} <{}>", user.full_name(), user.email);
    Ok(())
}

/// Change the account password.
pub async fn change_password(
    storefront: &Storefront,
    current: &str,
    new: &str,
) -> Result<(), AccountError> {
    super::restore_session(storefront).await;

    let current = SecretString::from(current.to_string());
    let new = SecretString::from(new.to_string());
    storefront.account().change_password(&current, &new).await?;

    tracing::info!("Password changed");
    Ok(())
}
