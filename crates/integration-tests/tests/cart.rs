//! Integration tests for the cart mirror: refresh coalescing, the
//! add-then-refresh round trip, and local patching on remove and update.

use ridgeline_client::stores::CartError;
use ridgeline_core::{CartItemId, ProductId};
use ridgeline_integration_tests::{TestBackend, sign_in, test_storefront};

#[tokio::test]
async fn test_add_item_mirrors_the_server_cart() {
    let backend = TestBackend::spawn().await;
    let storefront = test_storefront(&backend);
    sign_in(&storefront).await;

    storefront
        .cart()
        .add_item(ProductId::new(1), 2)
        .await
        .expect("add to cart");

    let cart = storefront.cart().snapshot();
    assert_eq!(cart.items().len(), 1);
    let item = &cart.items()[0];
    assert_eq!(item.product.id, ProductId::new(1));
    assert_eq!(item.quantity, 2);
    assert_eq!(item.line_total().to_string(), "$119.98");
    assert_eq!(cart.total().to_string(), "$119.98");
    assert_eq!(cart.item_count(), 2);

    // One POST followed by the authoritative refresh.
    assert_eq!(backend.hits("POST /cart/items"), 1);
    assert_eq!(backend.hits("GET /cart"), 1);
}

#[tokio::test]
async fn test_adding_the_same_product_folds_into_one_line() {
    let backend = TestBackend::spawn().await;
    let storefront = test_storefront(&backend);
    sign_in(&storefront).await;

    storefront
        .cart()
        .add_item(ProductId::new(2), 1)
        .await
        .expect("first add");
    storefront
        .cart()
        .add_item(ProductId::new(2), 2)
        .await
        .expect("second add");

    // The server folded the second add into the existing line and the
    // refresh mirrored that, rather than guessing a second line locally.
    let cart = storefront.cart().snapshot();
    assert_eq!(cart.items().len(), 1);
    assert_eq!(cart.items()[0].quantity, 3);
    assert_eq!(cart.total().to_string(), "$73.50");
}

#[tokio::test]
async fn test_refresh_while_signed_out_empties_the_mirror_without_a_request() {
    let backend = TestBackend::spawn().await;
    let storefront = test_storefront(&backend);

    storefront.cart().refresh().await.expect("refresh");

    assert!(storefront.cart().snapshot().is_empty());
    assert_eq!(backend.hits("GET /cart"), 0);
}

#[tokio::test]
async fn test_concurrent_refreshes_coalesce_into_one_request() {
    let backend = TestBackend::spawn().await;
    let storefront = test_storefront(&backend);
    sign_in(&storefront).await;

    let before = backend.hits("GET /cart");
    let (a, b, c) = tokio::join!(
        storefront.cart().refresh(),
        storefront.cart().refresh(),
        storefront.cart().refresh(),
    );
    a.expect("first refresh");
    b.expect("coalesced refresh");
    c.expect("coalesced refresh");

    assert_eq!(backend.hits("GET /cart"), before + 1);
}

#[tokio::test]
async fn test_duplicate_add_is_rejected_while_the_first_is_in_flight() {
    let backend = TestBackend::spawn().await;
    let storefront = test_storefront(&backend);
    sign_in(&storefront).await;

    let (first, second) = tokio::join!(
        storefront.cart().add_item(ProductId::new(4), 1),
        storefront.cart().add_item(ProductId::new(4), 1),
    );

    let errors = [first, second]
        .into_iter()
        .filter(Result::is_err)
        .count();
    assert_eq!(errors, 1, "exactly one add should be rejected");
    assert_eq!(backend.hits("POST /cart/items"), 1);

    let cart = storefront.cart().snapshot();
    assert_eq!(cart.items().len(), 1);
    assert_eq!(cart.items()[0].quantity, 1);
}

#[tokio::test]
async fn test_add_with_zero_quantity_fails_locally() {
    let backend = TestBackend::spawn().await;
    let storefront = test_storefront(&backend);
    sign_in(&storefront).await;

    let err = storefront
        .cart()
        .add_item(ProductId::new(1), 0)
        .await
        .expect_err("zero quantity is invalid");

    assert!(matches!(err, CartError::ZeroQuantity));
    assert_eq!(backend.hits("POST /cart/items"), 0);
}

#[tokio::test]
async fn test_add_while_signed_out_fails_locally() {
    let backend = TestBackend::spawn().await;
    let storefront = test_storefront(&backend);

    let err = storefront
        .cart()
        .add_item(ProductId::new(1), 1)
        .await
        .expect_err("signed-out add is invalid");

    assert!(matches!(err, CartError::AuthRequired));
    assert_eq!(backend.hits("POST /cart/items"), 0);
}

#[tokio::test]
async fn test_update_quantity_patches_the_mirror_locally() {
    let backend = TestBackend::spawn().await;
    let storefront = test_storefront(&backend);
    sign_in(&storefront).await;

    storefront
        .cart()
        .add_item(ProductId::new(5), 1)
        .await
        .expect("add to cart");
    let item_id = storefront.cart().snapshot().items()[0].id;
    let refreshes_before = backend.hits("GET /cart");

    storefront
        .cart()
        .update_quantity(item_id, 3)
        .await
        .expect("update quantity");

    let cart = storefront.cart().snapshot();
    assert_eq!(cart.items()[0].quantity, 3);
    assert_eq!(cart.total().to_string(), "$269.85");
    assert_eq!(backend.hits("PUT /cart/items/{id}"), 1);
    assert_eq!(
        backend.hits("GET /cart"),
        refreshes_before,
        "update patches locally instead of refreshing"
    );

    // The server applied it too; a fresh mirror agrees.
    storefront.cart().refresh().await.expect("refresh");
    assert_eq!(storefront.cart().snapshot().items()[0].quantity, 3);
}

#[tokio::test]
async fn test_update_quantity_to_zero_fails_locally() {
    let backend = TestBackend::spawn().await;
    let storefront = test_storefront(&backend);
    sign_in(&storefront).await;

    storefront
        .cart()
        .add_item(ProductId::new(5), 1)
        .await
        .expect("add to cart");
    let item_id = storefront.cart().snapshot().items()[0].id;

    let err = storefront
        .cart()
        .update_quantity(item_id, 0)
        .await
        .expect_err("zero quantity is not removal");

    assert!(matches!(err, CartError::ZeroQuantity));
    assert_eq!(backend.hits("PUT /cart/items/{id}"), 0);
    assert_eq!(storefront.cart().snapshot().items()[0].quantity, 1);
}

#[tokio::test]
async fn test_remove_item_deletes_on_the_server_and_patches_locally() {
    let backend = TestBackend::spawn().await;
    let storefront = test_storefront(&backend);
    sign_in(&storefront).await;

    storefront
        .cart()
        .add_item(ProductId::new(1), 1)
        .await
        .expect("add first product");
    storefront
        .cart()
        .add_item(ProductId::new(7), 2)
        .await
        .expect("add second product");

    let cart = storefront.cart().snapshot();
    assert_eq!(cart.items().len(), 2);
    let removed_id = cart
        .items()
        .iter()
        .find(|item| item.product.id == ProductId::new(1))
        .expect("first product in cart")
        .id;

    // The backend answers 204 with no body here.
    storefront
        .cart()
        .remove_item(removed_id)
        .await
        .expect("remove item");

    let cart = storefront.cart().snapshot();
    assert_eq!(cart.items().len(), 1);
    assert!(!cart.contains(removed_id));
    assert_eq!(cart.total().to_string(), "$79.98");

    // Server agrees after a refresh.
    storefront.cart().refresh().await.expect("refresh");
    assert_eq!(storefront.cart().snapshot().items().len(), 1);
}

#[tokio::test]
async fn test_remove_unknown_item_fails_without_a_request() {
    let backend = TestBackend::spawn().await;
    let storefront = test_storefront(&backend);
    sign_in(&storefront).await;
    storefront.cart().refresh().await.expect("refresh");

    let err = storefront
        .cart()
        .remove_item(CartItemId::new(9999))
        .await
        .expect_err("unknown item should fail");

    assert!(matches!(err, CartError::UnknownItem(_)));
    assert_eq!(backend.hits("DELETE /cart/items/{id}"), 0);
}

#[tokio::test]
async fn test_update_unknown_item_fails_without_a_request() {
    let backend = TestBackend::spawn().await;
    let storefront = test_storefront(&backend);
    sign_in(&storefront).await;
    storefront.cart().refresh().await.expect("refresh");

    let err = storefront
        .cart()
        .update_quantity(CartItemId::new(9999), 2)
        .await
        .expect_err("unknown item should fail");

    assert!(matches!(err, CartError::UnknownItem(_)));
    assert_eq!(backend.hits("PUT /cart/items/{id}"), 0);
}

#[tokio::test]
async fn test_failed_refresh_keeps_the_previous_snapshot() {
    let backend = TestBackend::spawn().await;
    let storefront = test_storefront(&backend);
    sign_in(&storefront).await;

    storefront
        .cart()
        .add_item(ProductId::new(8), 4)
        .await
        .expect("add to cart");
    let before = storefront.cart().snapshot();

    backend.fail_once("GET /cart");
    let err = storefront
        .cart()
        .refresh()
        .await
        .expect_err("injected failure should surface");

    assert!(!err.is_connectivity(), "a 500 is an answer, not an outage");
    assert_eq!(storefront.cart().snapshot(), before);
}
