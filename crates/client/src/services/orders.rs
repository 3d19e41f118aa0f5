//! Order history service.

use std::sync::Arc;

use ridgeline_core::OrderId;
use thiserror::Error;
use tracing::instrument;

use crate::api::types::{OrderDetailResponse, OrderSummaryRow};
use crate::api::{ApiClient, ApiError};
use crate::models::{OrderDetail, OrderSummary};
use crate::stores::SessionStore;

/// Errors from order history lookups.
#[derive(Debug, Error)]
pub enum OrderError {
    /// No authenticated session; orders belong to a user.
    #[error("sign in to view orders")]
    AuthRequired,
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Order history service for the signed-in user.
#[derive(Clone)]
pub struct Orders {
    inner: Arc<OrdersInner>,
}

struct OrdersInner {
    api: ApiClient,
    session: SessionStore,
}

impl Orders {
    pub(crate) fn new(api: ApiClient, session: SessionStore) -> Self {
        Self {
            inner: Arc::new(OrdersInner { api, session }),
        }
    }

    /// Order history, in the order the backend returns it (newest first).
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<OrderSummary>, OrderError> {
        if !self.inner.session.is_authenticated() {
            return Err(OrderError::AuthRequired);
        }

        let rows: Vec<OrderSummaryRow> = self.inner.api.get("/orders").await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Full order detail including line items priced at purchase time.
    #[instrument(skip(self))]
    pub async fn detail(&self, order_id: OrderId) -> Result<OrderDetail, OrderError> {
        if !self.inner.session.is_authenticated() {
            return Err(OrderError::AuthRequired);
        }

        let response: OrderDetailResponse =
            self.inner.api.get(&format!("/orders/{order_id}")).await?;
        Ok(response.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orders_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<Orders>();
    }

    #[test]
    fn test_order_error_display() {
        assert_eq!(OrderError::AuthRequired.to_string(), "sign in to view orders");
    }
}
