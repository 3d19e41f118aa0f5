//! Catalog commands.
//!
//! ```bash
//! ridgeline products list --category running
//! ridgeline products search "trail shoe"
//! ridgeline products show 3
//! ```
//!
//! Browsing needs no session; these work signed out.

use ridgeline_client::models::Product;
use ridgeline_client::{ApiError, Storefront};
use ridgeline_core::{Category, ProductId};

/// List products, optionally narrowed to one category.
pub async fn list(storefront: &Storefront, category: Category) -> Result<(), ApiError> {
    let products = storefront.catalog().by_category(category).await?;

    if products.is_empty() {
        tracing::info!("No products in category '{category}'");
        return Ok(());
    }

    for product in &products {
        print_row(product);
    }
    tracing::info!("{} product(s)", products.len());
    Ok(())
}

/// Search products by free text.
pub async fn search(storefront: &Storefront, query: &str) -> Result<(), ApiError> {
    let products = storefront.catalog().search(query).await?;

    if products.is_empty() {
        tracing::info!("No products match '{query}'");
        return Ok(());
    }

    for product in &products {
        print_row(product);
    }
    tracing::info!("{} product(s)", products.len());
    Ok(())
}

/// Show one product in detail.
pub async fn show(storefront: &Storefront, id: i64) -> Result<(), ApiError> {
    let product = storefront.catalog().by_id(ProductId::new(id)).await?;

    tracing::info!("Product #{}", product.id);
    tracing::info!("  Description: {}", product.description);
    tracing::info!("  Category:    {}", product.category());
    tracing::info!("  Price:       {}", product.price);
    tracing::info!("  In stock:    {}", product.quantity_available);
    if let Some(url) = &product.image_url {
        tracing::info!("  Image:       {url}");
    }
    Ok(())
}

fn print_row(product: &Product) {
    let stock = if product.in_stock() {
        format!("{} in stock", product.quantity_available)
    } else {
        "out of stock".to_string()
    };
    tracing::info!("#{} {} - {} ({stock})", product.id, product.description, product.price);
}
