//! Catalog product model.

use ridgeline_core::{Category, Money, ProductId};

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: ProductId,
    pub description: String,
    pub image_url: Option<String>,
    pub price: Money,
    pub quantity_available: u32,
}

impl Product {
    /// Category inferred from the description; the backend has none.
    #[must_use]
    pub fn category(&self) -> Category {
        Category::infer(&self.description)
    }

    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.quantity_available > 0
    }
}
