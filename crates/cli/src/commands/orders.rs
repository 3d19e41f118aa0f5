//! Order history commands.
//!
//! ```bash
//! ridgeline orders list
//! ridgeline orders show 41
//! ```

use ridgeline_client::Storefront;
use ridgeline_client::services::OrderError;
use ridgeline_core::OrderId;

/// List past orders, newest as the backend returns them.
pub async fn list(storefront: &Storefront) -> Result<(), OrderError> {
    super::restore_session(storefront).await;

    let orders = storefront.orders().list().await?;
    if orders.is_empty() {
        tracing::info!("No orders yet");
        return Ok(());
    }

    for order in &orders {
        tracing::info!(
            "#{} {} {} - {}",
            order.id,
            order.date.format("%Y-%m-%d"),
            order.status,
            order.total
        );
    }
    Ok(())
}

/// Show one order in detail.
pub async fn show(storefront: &Storefront, id: i64) -> Result<(), OrderError> {
    super::restore_session(storefront).await;

    let order = storefront.orders().detail(OrderId::new(id)).await?;

    tracing::info!(
        "Order #{} placed {} ({})",
        order.id,
        order.date.format("%Y-%m-%d %H:%M"),
        order.status
    );
    for line in &order.items {
        tracing::info!(
            "  {} x{} @ {} = {}",
            line.description,
            line.quantity,
            line.price_at_time,
            line.line_total()
        );
    }
    tracing::info!("Total: {}", order.total);
    if let Some(address) = &order.shipping_address {
        tracing::info!("Ships to: {address}");
    }
    if let Some(tracking) = &order.tracking_number {
        tracing::info!("Tracking: {tracking}");
    }
    Ok(())
}
