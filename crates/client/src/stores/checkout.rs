//! Two-phase checkout flow.
//!
//! Phase one prices the cart into a server-side checkout session; phase two
//! pays for it. The phases are separate because the user reviews the priced
//! totals between them.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{instrument, warn};

use crate::api::types::{CheckoutRequest, CheckoutResponse, PaymentRequest, PaymentResponse};
use crate::api::{ApiClient, ApiError};
use crate::guard::OpGuard;
use crate::models::{CardDetails, CardError, CheckoutSession, PaymentMethod, PaymentReceipt};
use crate::stores::{CartStore, SessionStore};

/// Errors from the checkout flow.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The billing address was blank; nothing was sent.
    #[error("billing address cannot be empty")]
    EmptyBillingAddress,
    /// The cart mirror is empty; there is nothing to buy.
    #[error("cannot check out an empty cart")]
    EmptyCart,
    /// No authenticated session.
    #[error("sign in to check out")]
    AuthRequired,
    /// `pay` was called with no open checkout session.
    #[error("no checkout in progress")]
    NoActiveCheckout,
    /// The same operation is already running.
    #[error("checkout {0} already in progress")]
    OperationInFlight(&'static str),
    /// Local card validation failed; nothing was sent.
    #[error(transparent)]
    Card(#[from] CardError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Where the two-phase flow currently stands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CheckoutStage {
    /// Collecting a billing address; no server-side checkout exists yet.
    #[default]
    Address,
    /// A priced checkout session is open and awaiting payment.
    Payment { session: CheckoutSession },
}

/// Checkout flow store.
///
/// Cheap to clone; clones share the same flow state.
#[derive(Clone)]
pub struct CheckoutFlow {
    inner: Arc<CheckoutFlowInner>,
}

struct CheckoutFlowInner {
    api: ApiClient,
    session: SessionStore,
    cart: CartStore,
    stage: Mutex<CheckoutStage>,
    guard: OpGuard,
}

impl CheckoutFlow {
    pub(crate) fn new(api: ApiClient, session: SessionStore, cart: CartStore) -> Self {
        Self {
            inner: Arc::new(CheckoutFlowInner {
                api,
                session,
                cart,
                stage: Mutex::new(CheckoutStage::default()),
                guard: OpGuard::new(),
            }),
        }
    }

    /// Current stage snapshot.
    pub async fn stage(&self) -> CheckoutStage {
        self.inner.stage.lock().await.clone()
    }

    /// The open checkout session, if the flow is in the payment stage.
    pub async fn session(&self) -> Option<CheckoutSession> {
        match &*self.inner.stage.lock().await {
            CheckoutStage::Payment { session } => Some(session.clone()),
            CheckoutStage::Address => None,
        }
    }

    /// Open a priced checkout for the current cart and move to the payment
    /// stage.
    ///
    /// All validation is local; nothing is sent until the address, session,
    /// and cart pass. Calling this again while a checkout is open replaces
    /// it, which is how an address edit works.
    #[instrument(skip(self, billing_address))]
    pub async fn initiate(
        &self,
        billing_address: &str,
        method: PaymentMethod,
    ) -> Result<CheckoutSession, CheckoutError> {
        if billing_address.trim().is_empty() {
            return Err(CheckoutError::EmptyBillingAddress);
        }
        if !self.inner.session.is_authenticated() {
            return Err(CheckoutError::AuthRequired);
        }
        if self.inner.cart.snapshot().is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        let Some(_flight) = self.inner.guard.try_begin("initiate") else {
            return Err(CheckoutError::OperationInFlight("initiate"));
        };

        let response: CheckoutResponse = self
            .inner
            .api
            .post(
                "/checkout",
                &CheckoutRequest {
                    billing_address: billing_address.trim(),
                    payment_method: method,
                },
            )
            .await?;

        let session = CheckoutSession::from(response);
        *self.inner.stage.lock().await = CheckoutStage::Payment {
            session: session.clone(),
        };
        Ok(session)
    }

    /// Pay for the open checkout.
    ///
    /// Card details are validated locally before anything is sent. A failed
    /// payment keeps the checkout open so the caller can correct the card
    /// and retry; a successful one consumes it and returns the flow to the
    /// address stage.
    #[instrument(skip(self, card))]
    pub async fn pay(&self, card: &CardDetails) -> Result<PaymentReceipt, CheckoutError> {
        let checkout_id = match &*self.inner.stage.lock().await {
            CheckoutStage::Payment { session } => session.id,
            CheckoutStage::Address => return Err(CheckoutError::NoActiveCheckout),
        };

        card.validate()?;

        let Some(_flight) = self.inner.guard.try_begin("pay") else {
            return Err(CheckoutError::OperationInFlight("pay"));
        };

        let response: PaymentResponse = self
            .inner
            .api
            .post(
                &format!("/checkout/{checkout_id}/pay"),
                &PaymentRequest {
                    card_number: &card.number,
                    card_expiry: &card.expiry,
                    card_cvv: &card.cvv,
                },
            )
            .await?;

        *self.inner.stage.lock().await = CheckoutStage::Address;

        // The server emptied the cart as part of order creation; re-mirror
        // it. The payment already succeeded, so a refresh failure only gets
        // logged and the receipt is returned regardless.
        if let Err(e) = self.inner.cart.refresh().await {
            warn!(error = %e, "Cart refresh after payment failed");
        }

        Ok(response.into())
    }

    /// Abandon any open checkout and return to the address stage. The
    /// server-side session is left to expire on its own.
    pub async fn reset(&self) {
        *self.inner.stage.lock().await = CheckoutStage::Address;
    }
}
