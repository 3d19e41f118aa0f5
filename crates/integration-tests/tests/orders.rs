//! Integration tests for order history reads. The order-producing path
//! itself is covered with the checkout tests.

use ridgeline_client::services::OrderError;
use ridgeline_core::OrderId;
use ridgeline_integration_tests::{TestBackend, sign_in, test_storefront};

#[tokio::test]
async fn test_new_accounts_have_no_orders() {
    let backend = TestBackend::spawn().await;
    let storefront = test_storefront(&backend);
    sign_in(&storefront).await;

    let orders = storefront.orders().list().await.expect("list orders");
    assert!(orders.is_empty());
}

#[tokio::test]
async fn test_orders_require_a_session() {
    let backend = TestBackend::spawn().await;
    let storefront = test_storefront(&backend);

    let err = storefront
        .orders()
        .list()
        .await
        .expect_err("signed-out order list");
    assert!(matches!(err, OrderError::AuthRequired));

    let err = storefront
        .orders()
        .detail(OrderId::new(1))
        .await
        .expect_err("signed-out order detail");
    assert!(matches!(err, OrderError::AuthRequired));

    assert_eq!(backend.hits("GET /orders"), 0);
    assert_eq!(backend.hits("GET /orders/{id}"), 0);
}

#[tokio::test]
async fn test_unknown_order_surfaces_the_backend_error() {
    let backend = TestBackend::spawn().await;
    let storefront = test_storefront(&backend);
    sign_in(&storefront).await;

    let err = storefront
        .orders()
        .detail(OrderId::new(424242))
        .await
        .expect_err("unknown order id");

    assert!(err.to_string().contains("Order not found"));
}
