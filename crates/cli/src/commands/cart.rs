//! Cart commands.
//!
//! ```bash
//! ridgeline cart show
//! ridgeline cart add 3 --quantity 2
//! ridgeline cart set-quantity 17 5
//! ridgeline cart remove 17
//! ```
//!
//! `remove` and `set-quantity` take the cart item id printed by
//! `cart show`, not the product id.

use ridgeline_client::Storefront;
use ridgeline_client::stores::CartError;
use ridgeline_core::{CartItemId, ProductId};

/// Show the cart contents and total.
pub async fn show(storefront: &Storefront) -> Result<(), CartError> {
    super::restore_session(storefront).await;
    storefront.cart().refresh().await?;

    let cart = storefront.cart().snapshot();
    if cart.is_empty() {
        tracing::info!("Cart is empty");
        return Ok(());
    }

    for item in cart.items() {
        tracing::info!(
            "#{} {} x{} = {}",
            item.id,
            item.product.description,
            item.quantity,
            item.line_total()
        );
    }
    tracing::info!("Total: {} ({} items)", cart.total(), cart.item_count());
    Ok(())
}

/// Add a product to the cart.
pub async fn add(storefront: &Storefront, product_id: i64, quantity: u32) -> Result<(), CartError> {
    super::restore_session(storefront).await;
    storefront
        .cart()
        .add_item(ProductId::new(product_id), quantity)
        .await?;

    let cart = storefront.cart().snapshot();
    tracing::info!(
        "Added product {product_id} x{quantity}. Cart total: {} ({} items)",
        cart.total(),
        cart.item_count()
    );
    Ok(())
}

/// Remove a line from the cart.
pub async fn remove(storefront: &Storefront, item_id: i64) -> Result<(), CartError> {
    super::restore_session(storefront).await;

    // The membership check runs against the local mirror, so fill it first.
    storefront.cart().refresh().await?;
    storefront
        .cart()
        .remove_item(CartItemId::new(item_id))
        .await?;

    let cart = storefront.cart().snapshot();
    tracing::info!("Removed item {item_id}. Cart total: {}", cart.total());
    Ok(())
}

/// Change the quantity of a cart line.
pub async fn set_quantity(
    storefront: &Storefront,
    item_id: i64,
    quantity: u32,
) -> Result<(), CartError> {
    super::restore_session(storefront).await;

    storefront.cart().refresh().await?;
    storefront
        .cart()
        .update_quantity(CartItemId::new(item_id), quantity)
        .await?;

    let cart = storefront.cart().snapshot();
    tracing::info!("Item {item_id} set to x{quantity}. Cart total: {}", cart.total());
    Ok(())
}
