//! Product catalog service.
//!
//! Read-only browsing over `/products`. List and by-id lookups are cached
//! using `moka` (5-minute TTL); the catalog is the hottest read path and
//! tolerates staleness. Searches are never cached.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use ridgeline_core::{Category, ProductId};
use tracing::{debug, instrument};

use crate::api::types::ProductRow;
use crate::api::{ApiClient, ApiError};
use crate::models::Product;

/// Cached value types.
#[derive(Clone)]
enum CacheValue {
    Products(Arc<Vec<Product>>),
    Product(Arc<Product>),
}

/// Product catalog service.
#[derive(Clone)]
pub struct Catalog {
    inner: Arc<CatalogInner>,
}

struct CatalogInner {
    api: ApiClient,
    cache: Cache<String, CacheValue>,
}

impl Catalog {
    pub(crate) fn new(api: ApiClient) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Self {
            inner: Arc::new(CatalogInner { api, cache }),
        }
    }

    /// Full product list, served from cache when fresh.
    ///
    /// # Errors
    ///
    /// Returns the normalized backend error; a cache miss that fails to
    /// fetch caches nothing.
    #[instrument(skip(self))]
    pub async fn all(&self) -> Result<Arc<Vec<Product>>, ApiError> {
        let cache_key = "products".to_string();

        // Check cache
        if let Some(CacheValue::Products(products)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for products");
            return Ok(products);
        }

        let rows: Vec<ProductRow> = self.inner.api.get("/products").await?;
        let products: Arc<Vec<Product>> = Arc::new(rows.into_iter().map(Into::into).collect());

        // Cache the result
        self.inner
            .cache
            .insert(cache_key, CacheValue::Products(products.clone()))
            .await;

        Ok(products)
    }

    /// Search the catalog. Results change with every keystroke, so they
    /// bypass the cache.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Result<Vec<Product>, ApiError> {
        let path = format!("/products?search={}", urlencoding::encode(query));
        let rows: Vec<ProductRow> = self.inner.api.get(&path).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Single product lookup, cached like the list.
    #[instrument(skip(self))]
    pub async fn by_id(&self, product_id: ProductId) -> Result<Arc<Product>, ApiError> {
        let cache_key = format!("product:{product_id}");

        // Check cache
        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product");
            return Ok(product);
        }

        let row: ProductRow = self
            .inner
            .api
            .get(&format!("/products/{product_id}"))
            .await?;
        let product = Arc::new(Product::from(row));

        // Cache the result
        self.inner
            .cache
            .insert(cache_key, CacheValue::Product(product.clone()))
            .await;

        Ok(product)
    }

    /// Filter the cached product list by inferred category.
    ///
    /// The backend has no category field, so this is a client-side filter
    /// over [`Catalog::all`].
    #[instrument(skip(self))]
    pub async fn by_category(&self, category: Category) -> Result<Vec<Product>, ApiError> {
        let products = self.all().await?;
        Ok(products
            .iter()
            .filter(|product| category.matches(&product.description))
            .cloned()
            .collect())
    }
}
