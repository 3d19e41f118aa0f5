//! Storefront facade wiring the full client stack together.

use std::sync::Arc;

use crate::api::{ApiClient, ApiError};
use crate::config::ClientConfig;
use crate::services::{Account, Catalog, Orders};
use crate::stores::{AuthError, CartStore, CheckoutFlow, SessionStore};

/// Composition root for the Ridgeline client.
///
/// One [`ApiClient`] (and its token slot) is shared by every store and
/// service, so a login immediately authenticates cart, checkout, order,
/// and account traffic.
#[derive(Clone)]
pub struct Storefront {
    inner: Arc<StorefrontInner>,
}

struct StorefrontInner {
    api: ApiClient,
    session: SessionStore,
    cart: CartStore,
    checkout: CheckoutFlow,
    catalog: Catalog,
    orders: Orders,
    account: Account,
}

impl Storefront {
    /// Wire up the full client stack against one backend.
    ///
    /// # Panics
    ///
    /// Panics if the underlying HTTP client cannot be constructed, which
    /// only happens when the TLS backend fails to initialize.
    #[must_use]
    pub fn new(config: &ClientConfig) -> Self {
        let api = ApiClient::new(config);
        let session = SessionStore::new(api.clone());
        let cart = CartStore::new(api.clone(), session.clone());
        let checkout = CheckoutFlow::new(api.clone(), session.clone(), cart.clone());
        let catalog = Catalog::new(api.clone());
        let orders = Orders::new(api.clone(), session.clone());
        let account = Account::new(api.clone(), session.clone());

        Self {
            inner: Arc::new(StorefrontInner {
                api,
                session,
                cart,
                checkout,
                catalog,
                orders,
                account,
            }),
        }
    }

    /// Restore a persisted session, if one exists on disk.
    ///
    /// Convenience for process startup; see [`SessionStore::restore`].
    ///
    /// # Errors
    ///
    /// Returns the backend error if a persisted token turns out to be
    /// rejected.
    pub async fn restore_session(&self) -> Result<bool, AuthError> {
        self.inner.session.restore().await
    }

    /// Probe backend reachability via the unauthenticated health endpoint.
    ///
    /// # Errors
    ///
    /// Returns the normalized error when the backend is down or unhealthy.
    pub async fn probe_health(&self) -> Result<(), ApiError> {
        self.inner.api.probe_health().await
    }

    /// Get the auth session store.
    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.inner.session
    }

    /// Get the cart store.
    #[must_use]
    pub fn cart(&self) -> &CartStore {
        &self.inner.cart
    }

    /// Get the checkout flow.
    #[must_use]
    pub fn checkout(&self) -> &CheckoutFlow {
        &self.inner.checkout
    }

    /// Get the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get the order history service.
    #[must_use]
    pub fn orders(&self) -> &Orders {
        &self.inner.orders
    }

    /// Get the account service.
    #[must_use]
    pub fn account(&self) -> &Account {
        &self.inner.account
    }
}
