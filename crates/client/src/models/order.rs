//! Order history models.

use chrono::{DateTime, Utc};
use ridgeline_core::{Money, OrderId, OrderStatus, ProductId};

/// One row in the order history list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSummary {
    pub id: OrderId,
    pub date: DateTime<Utc>,
    pub status: OrderStatus,
    pub total: Money,
}

/// One line item inside an order, priced as it was at purchase time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub description: String,
    pub image_url: Option<String>,
    pub quantity: u32,
    pub price_at_time: Money,
}

impl OrderLine {
    /// Purchase-time price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Money {
        self.price_at_time.times(self.quantity)
    }
}

/// A full order, as shown on the order detail page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDetail {
    pub id: OrderId,
    pub date: DateTime<Utc>,
    pub status: OrderStatus,
    pub total: Money,
    pub items: Vec<OrderLine>,
    pub shipping_address: Option<String>,
    pub tracking_number: Option<String>,
}
