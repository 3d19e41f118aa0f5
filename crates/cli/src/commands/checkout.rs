//! Checkout command.
//!
//! ```bash
//! ridgeline checkout --address "1 Main St, Bozeman MT" \
//!     --card-number "4111 1111 1111 1111" --expiry 12/27 --cvv 123
//! ```
//!
//! Runs both checkout phases in one invocation: price the cart against
//! the billing address, show the quote, then pay with the card. The card
//! is validated locally before anything is sent.

use ridgeline_client::Storefront;
use ridgeline_client::models::{CardDetails, PaymentMethod};
use ridgeline_client::stores::{CartError, CheckoutError};
use thiserror::Error;

/// Errors that can occur during the checkout command.
#[derive(Debug, Error)]
pub enum CheckoutCommandError {
    /// The cart could not be loaded before pricing.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// Pricing or payment failed.
    #[error(transparent)]
    Checkout(#[from] CheckoutError),
}

/// Price the cart and pay for it.
pub async fn run(
    storefront: &Storefront,
    address: &str,
    card_number: &str,
    expiry: &str,
    cvv: &str,
) -> Result<(), CheckoutCommandError> {
    super::restore_session(storefront).await;

    // Pricing starts from the local mirror, so fill it first.
    storefront.cart().refresh().await?;

    let quote = storefront
        .checkout()
        .initiate(address, PaymentMethod::Card)
        .await?;
    tracing::info!("Checkout #{} priced:", quote.id);
    tracing::info!("  Subtotal: {}", quote.subtotal);
    tracing::info!("  Tax:      {}", quote.tax);
    tracing::info!("  Shipping: {}", quote.shipping);
    tracing::info!("  Total:    {}", quote.total);

    let card = CardDetails {
        number: card_number.to_string(),
        expiry: expiry.to_string(),
        cvv: cvv.to_string(),
    };
    let receipt = storefront.checkout().pay(&card).await?;

    tracing::info!("Payment accepted. Order #{} created.", receipt.order_id);
    if let Some(message) = &receipt.message {
        tracing::info!("  {message}");
    }
    Ok(())
}
