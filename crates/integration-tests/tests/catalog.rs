//! Integration tests for catalog browsing and its cache behavior.

use ridgeline_client::ApiError;
use ridgeline_core::{Category, ProductId};
use ridgeline_integration_tests::{TestBackend, test_storefront};

#[tokio::test]
async fn test_product_list_is_cached() {
    let backend = TestBackend::spawn().await;
    let storefront = test_storefront(&backend);

    let first = storefront.catalog().all().await.expect("first list");
    assert_eq!(first.len(), 8);

    let second = storefront.catalog().all().await.expect("second list");
    assert_eq!(second.len(), 8);

    assert_eq!(backend.hits("GET /products"), 1, "second list hits cache");
}

#[tokio::test]
async fn test_product_lookup_is_cached_and_typed() {
    let backend = TestBackend::spawn().await;
    let storefront = test_storefront(&backend);

    let product = storefront
        .catalog()
        .by_id(ProductId::new(1))
        .await
        .expect("lookup product");
    assert_eq!(product.description, "Soccer cleats with firm-ground studs");
    assert_eq!(product.price.to_string(), "$59.99");
    assert_eq!(product.category(), Category::Soccer);
    assert!(product.in_stock());

    storefront
        .catalog()
        .by_id(ProductId::new(1))
        .await
        .expect("cached lookup");
    assert_eq!(backend.hits("GET /products/{id}"), 1);

    // Zero stock reads as not purchasable.
    let gloves = storefront
        .catalog()
        .by_id(ProductId::new(3))
        .await
        .expect("lookup gloves");
    assert!(!gloves.in_stock());
}

#[tokio::test]
async fn test_unknown_product_surfaces_the_backend_error() {
    let backend = TestBackend::spawn().await;
    let storefront = test_storefront(&backend);

    let err = storefront
        .catalog()
        .by_id(ProductId::new(999))
        .await
        .expect_err("unknown product");

    assert!(matches!(err, ApiError::Api { status: 404, .. }));
    assert!(err.to_string().contains("Product not found"));
}

#[tokio::test]
async fn test_search_bypasses_the_cache() {
    let backend = TestBackend::spawn().await;
    let storefront = test_storefront(&backend);

    let results = storefront.catalog().search("ball").await.expect("search");
    let descriptions: Vec<&str> = results
        .iter()
        .map(|product| product.description.as_str())
        .collect();
    assert!(descriptions.contains(&"Futsal ball, size 4"));
    assert!(descriptions.contains(&"Basketball, indoor-outdoor composite"));

    storefront
        .catalog()
        .search("ball")
        .await
        .expect("repeat search");
    assert_eq!(
        backend.hits("GET /products?search"),
        2,
        "searches are never cached"
    );
}

#[tokio::test]
async fn test_search_encodes_the_query() {
    let backend = TestBackend::spawn().await;
    let storefront = test_storefront(&backend);

    let results = storefront
        .catalog()
        .search("trail and road")
        .await
        .expect("multi-word search");

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].description, "Running shoes for trail and road");
}

#[tokio::test]
async fn test_by_category_filters_by_inferred_category() {
    let backend = TestBackend::spawn().await;
    let storefront = test_storefront(&backend);

    let running = storefront
        .catalog()
        .by_category(Category::Running)
        .await
        .expect("running products");
    assert_eq!(running.len(), 2);
    assert!(
        running
            .iter()
            .all(|product| product.category() == Category::Running)
    );

    // Products with no category keyword land in Other.
    let other = storefront
        .catalog()
        .by_category(Category::Other)
        .await
        .expect("uncategorized products");
    assert_eq!(other.len(), 1);
    assert_eq!(other[0].description, "Insulated water bottle");

    // The All filter keeps everything.
    let all = storefront
        .catalog()
        .by_category(Category::All)
        .await
        .expect("all products");
    assert_eq!(all.len(), 8);

    // Category filtering reuses the cached list.
    assert_eq!(backend.hits("GET /products"), 1);
}
