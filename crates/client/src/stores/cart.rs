//! Server-authoritative cart mirror.
//!
//! The backend owns the cart; this store keeps an observable local mirror
//! of it. Mutations go to the backend first and the mirror is updated only
//! from confirmed outcomes, so the mirror never shows state the server
//! might not have.

use std::sync::Arc;

use ridgeline_core::{CartItemId, ProductId};
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, instrument};

use crate::api::types::{AddItemRequest, CartItemRow, UpdateQuantityRequest};
use crate::api::{ApiClient, ApiError};
use crate::guard::OpGuard;
use crate::models::CartSnapshot;
use crate::stores::SessionStore;

/// Errors from cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// No authenticated session; the cart only exists server-side per user.
    #[error("sign in to use the cart")]
    AuthRequired,
    /// Quantity must be at least 1; zero is not an implicit removal.
    #[error("quantity must be at least 1")]
    ZeroQuantity,
    /// The item id is not in the current mirror; nothing was sent.
    #[error("item {0} is not in the cart")]
    UnknownItem(CartItemId),
    /// The same operation is already running.
    #[error("cart {0} already in progress")]
    OperationInFlight(&'static str),
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl CartError {
    /// Returns `true` when the backend never answered; see
    /// [`ApiError::is_connectivity`].
    #[must_use]
    pub fn is_connectivity(&self) -> bool {
        matches!(self, Self::Api(e) if e.is_connectivity())
    }
}

/// Cart store.
///
/// Cheap to clone; clones observe and mutate the same mirror.
#[derive(Clone)]
pub struct CartStore {
    inner: Arc<CartStoreInner>,
}

struct CartStoreInner {
    api: ApiClient,
    session: SessionStore,
    state: watch::Sender<CartSnapshot>,
    guard: OpGuard,
}

impl CartStore {
    pub(crate) fn new(api: ApiClient, session: SessionStore) -> Self {
        let (state, _) = watch::channel(CartSnapshot::default());
        Self {
            inner: Arc::new(CartStoreInner {
                api,
                session,
                state,
                guard: OpGuard::new(),
            }),
        }
    }

    /// Current mirror snapshot.
    #[must_use]
    pub fn snapshot(&self) -> CartSnapshot {
        self.inner.state.borrow().clone()
    }

    /// Subscribe to mirror changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CartSnapshot> {
        self.inner.state.subscribe()
    }

    /// Re-mirror the cart from the backend.
    ///
    /// Signed-out sessions have no server cart, so the mirror resets to
    /// empty without a network call. A refresh already in flight makes this
    /// call a silent no-op; the running refresh will deliver the result.
    ///
    /// # Errors
    ///
    /// On failure the previous snapshot is kept and the error propagates.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<(), CartError> {
        if !self.inner.session.is_authenticated() {
            self.inner.state.send_replace(CartSnapshot::default());
            return Ok(());
        }

        let Some(_flight) = self.inner.guard.try_begin("refresh") else {
            debug!("Cart refresh already in flight");
            return Ok(());
        };

        let rows: Vec<CartItemRow> = self.inner.api.get("/cart").await?;
        let snapshot = CartSnapshot::new(rows.into_iter().map(Into::into).collect());
        self.inner.state.send_replace(snapshot);
        Ok(())
    }

    /// Add a product to the cart, then re-mirror the whole cart.
    ///
    /// The backend may fold the addition into an existing line rather than
    /// appending one, so the authoritative result comes from a full refresh
    /// instead of a local guess. The add stays in flight until the refresh
    /// lands, so duplicate submissions are rejected for the whole window.
    #[instrument(skip(self))]
    pub async fn add_item(&self, product_id: ProductId, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            return Err(CartError::ZeroQuantity);
        }
        if !self.inner.session.is_authenticated() {
            return Err(CartError::AuthRequired);
        }
        let Some(_flight) = self.inner.guard.try_begin("add") else {
            return Err(CartError::OperationInFlight("add"));
        };

        let _: serde_json::Value = self
            .inner
            .api
            .post(
                "/cart/items",
                &AddItemRequest {
                    product_id,
                    quantity,
                },
            )
            .await?;

        self.refresh().await
    }

    /// Remove a cart line.
    ///
    /// Removal affects exactly one known line, so on success the mirror is
    /// patched locally instead of paying for a refresh round-trip.
    #[instrument(skip(self))]
    pub async fn remove_item(&self, item_id: CartItemId) -> Result<(), CartError> {
        if !self.inner.session.is_authenticated() {
            return Err(CartError::AuthRequired);
        }
        if !self.inner.state.borrow().contains(item_id) {
            return Err(CartError::UnknownItem(item_id));
        }
        let Some(_flight) = self.inner.guard.try_begin("remove") else {
            return Err(CartError::OperationInFlight("remove"));
        };

        self.inner
            .api
            .delete(&format!("/cart/items/{item_id}"))
            .await?;

        self.inner.state.send_modify(|cart| cart.remove(item_id));
        Ok(())
    }

    /// Change a line's quantity. Like removal, the mirror is patched
    /// locally on success.
    #[instrument(skip(self))]
    pub async fn update_quantity(
        &self,
        item_id: CartItemId,
        quantity: u32,
    ) -> Result<(), CartError> {
        if quantity == 0 {
            return Err(CartError::ZeroQuantity);
        }
        if !self.inner.session.is_authenticated() {
            return Err(CartError::AuthRequired);
        }
        if !self.inner.state.borrow().contains(item_id) {
            return Err(CartError::UnknownItem(item_id));
        }
        let Some(_flight) = self.inner.guard.try_begin("update") else {
            return Err(CartError::OperationInFlight("update"));
        };

        let _: serde_json::Value = self
            .inner
            .api
            .put(
                &format!("/cart/items/{item_id}"),
                &UpdateQuantityRequest { quantity },
            )
            .await?;

        self.inner
            .state
            .send_modify(|cart| cart.set_quantity(item_id, quantity));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_store_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<CartStore>();
    }

    #[test]
    fn test_cart_store_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CartStore>();
    }

    #[test]
    fn test_cart_error_display() {
        let err = CartError::UnknownItem(CartItemId::new(7));
        assert_eq!(err.to_string(), "item 7 is not in the cart");

        let err = CartError::OperationInFlight("add");
        assert_eq!(err.to_string(), "cart add already in progress");
    }

    #[test]
    fn test_is_connectivity() {
        assert!(CartError::Api(ApiError::Timeout).is_connectivity());
        assert!(!CartError::ZeroQuantity.is_connectivity());
        assert!(!CartError::Api(ApiError::Api {
            status: 500,
            message: "boom".to_string()
        })
        .is_connectivity());
    }
}
