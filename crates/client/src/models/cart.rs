//! Cart mirror models.

use ridgeline_core::{CartItemId, Money, ProductId};

/// Product details embedded in a cart line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartProduct {
    pub id: ProductId,
    pub description: String,
    pub image_url: Option<String>,
    pub price: Money,
}

/// One line in the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItem {
    pub id: CartItemId,
    pub product: CartProduct,
    pub quantity: u32,
}

impl CartItem {
    /// Price times quantity for this line.
    #[must_use]
    pub fn line_total(&self) -> Money {
        self.product.price.times(self.quantity)
    }
}

/// A point-in-time mirror of the server-side cart.
///
/// Snapshots are immutable to consumers; only the cart store patches them,
/// and only after the backend confirmed the change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartSnapshot {
    items: Vec<CartItem>,
}

impl CartSnapshot {
    pub(crate) fn new(items: Vec<CartItem>) -> Self {
        Self { items }
    }

    /// Cart lines in backend order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Sum of line totals.
    #[must_use]
    pub fn total(&self) -> Money {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Whether an item id exists in this snapshot.
    #[must_use]
    pub fn contains(&self, item_id: CartItemId) -> bool {
        self.items.iter().any(|item| item.id == item_id)
    }

    pub(crate) fn remove(&mut self, item_id: CartItemId) {
        self.items.retain(|item| item.id != item_id);
    }

    pub(crate) fn set_quantity(&mut self, item_id: CartItemId, quantity: u32) {
        for item in &mut self.items {
            if item.id == item_id {
                item.quantity = quantity;
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn item(id: i64, price_cents: i64, quantity: u32) -> CartItem {
        CartItem {
            id: CartItemId::new(id),
            product: CartProduct {
                id: ProductId::new(id * 10),
                description: format!("Product {id}"),
                image_url: None,
                price: Money::new(Decimal::new(price_cents, 2)).unwrap(),
            },
            quantity,
        }
    }

    #[test]
    fn test_empty_snapshot() {
        let snapshot = CartSnapshot::default();
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.item_count(), 0);
        assert_eq!(snapshot.total(), Money::ZERO);
    }

    #[test]
    fn test_totals() {
        let snapshot = CartSnapshot::new(vec![item(1, 2999, 2), item(2, 1050, 1)]);
        assert_eq!(snapshot.item_count(), 3);
        assert_eq!(snapshot.total().to_string(), "$70.48");
    }

    #[test]
    fn test_contains() {
        let snapshot = CartSnapshot::new(vec![item(1, 2999, 2)]);
        assert!(snapshot.contains(CartItemId::new(1)));
        assert!(!snapshot.contains(CartItemId::new(9)));
    }

    #[test]
    fn test_remove() {
        let mut snapshot = CartSnapshot::new(vec![item(1, 2999, 2), item(2, 1050, 1)]);
        snapshot.remove(CartItemId::new(1));
        assert_eq!(snapshot.items().len(), 1);
        assert!(!snapshot.contains(CartItemId::new(1)));
    }

    #[test]
    fn test_set_quantity_recomputes_totals() {
        let mut snapshot = CartSnapshot::new(vec![item(1, 2999, 2)]);
        snapshot.set_quantity(CartItemId::new(1), 5);
        assert_eq!(snapshot.item_count(), 5);
        assert_eq!(snapshot.total().to_string(), "$149.95");
    }
}
