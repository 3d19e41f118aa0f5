//! Wire-format DTOs for the backend API.
//!
//! The backend speaks camelCase JSON. These types mirror it field-for-field
//! and convert into the domain models the rest of the crate works with, so
//! wire spelling never leaks past this module.

use chrono::{DateTime, NaiveDate, Utc};
use ridgeline_core::{CartItemId, CheckoutId, Email, Money, OrderId, OrderStatus, ProductId};
use serde::{Deserialize, Serialize};

use crate::models::{
    CartItem, CartProduct, CheckoutSession, OrderDetail, OrderLine, OrderSummary, PaymentMethod,
    PaymentReceipt, Product, User,
};

// =============================================================================
// Auth
// =============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RegisterRequest<'a> {
    pub(crate) first_name: &'a str,
    pub(crate) last_name: &'a str,
    pub(crate) email: &'a str,
    pub(crate) password: &'a str,
}

#[derive(Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub(crate) email: &'a str,
    pub(crate) password: &'a str,
}

#[derive(Deserialize)]
pub(crate) struct LoginResponse {
    pub(crate) token: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UserResponse {
    pub(crate) first_name: String,
    pub(crate) last_name: String,
    pub(crate) email: Email,
    pub(crate) birth_date: Option<NaiveDate>,
    pub(crate) shipping_address: Option<String>,
}

impl From<UserResponse> for User {
    fn from(response: UserResponse) -> Self {
        Self {
            first_name: response.first_name,
            last_name: response.last_name,
            email: response.email,
            birth_date: response.birth_date,
            shipping_address: response.shipping_address,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProfileUpdateRequest<'a> {
    pub(crate) first_name: &'a str,
    pub(crate) last_name: &'a str,
    pub(crate) birth_date: NaiveDate,
    pub(crate) shipping_address: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PasswordChangeRequest<'a> {
    pub(crate) current_password: &'a str,
    pub(crate) new_password: &'a str,
}

// =============================================================================
// Cart
// =============================================================================

/// One flat cart row as the backend returns it. The server also sends a
/// per-row `subtotal`, which the mirror recomputes instead of storing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartItemRow {
    pub(crate) item_id: CartItemId,
    pub(crate) product_id: ProductId,
    pub(crate) product_description: String,
    pub(crate) image_url: Option<String>,
    pub(crate) price: Money,
    pub(crate) quantity: u32,
}

impl From<CartItemRow> for CartItem {
    fn from(row: CartItemRow) -> Self {
        Self {
            id: row.item_id,
            product: CartProduct {
                id: row.product_id,
                description: row.product_description,
                image_url: row.image_url,
                price: row.price,
            },
            quantity: row.quantity,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AddItemRequest {
    pub(crate) product_id: ProductId,
    pub(crate) quantity: u32,
}

#[derive(Serialize)]
pub(crate) struct UpdateQuantityRequest {
    pub(crate) quantity: u32,
}

// =============================================================================
// Checkout
// =============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CheckoutRequest<'a> {
    pub(crate) billing_address: &'a str,
    pub(crate) payment_method: PaymentMethod,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CheckoutResponse {
    pub(crate) checkout_id: CheckoutId,
    pub(crate) subtotal: Money,
    pub(crate) tax: Money,
    pub(crate) shipping: Money,
    pub(crate) total: Money,
}

impl From<CheckoutResponse> for CheckoutSession {
    fn from(response: CheckoutResponse) -> Self {
        Self {
            id: response.checkout_id,
            subtotal: response.subtotal,
            tax: response.tax,
            shipping: response.shipping,
            total: response.total,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PaymentRequest<'a> {
    pub(crate) card_number: &'a str,
    pub(crate) card_expiry: &'a str,
    pub(crate) card_cvv: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PaymentResponse {
    pub(crate) order_id: OrderId,
    pub(crate) message: Option<String>,
}

impl From<PaymentResponse> for PaymentReceipt {
    fn from(response: PaymentResponse) -> Self {
        Self {
            order_id: response.order_id,
            message: response.message,
        }
    }
}

// =============================================================================
// Orders
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderSummaryRow {
    pub(crate) order_id: OrderId,
    pub(crate) order_date: DateTime<Utc>,
    pub(crate) status: OrderStatus,
    pub(crate) total_amount: Money,
}

impl From<OrderSummaryRow> for OrderSummary {
    fn from(row: OrderSummaryRow) -> Self {
        Self {
            id: row.order_id,
            date: row.order_date,
            status: row.status,
            total: row.total_amount,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderLineRow {
    pub(crate) product_id: ProductId,
    pub(crate) description: String,
    pub(crate) image_url: Option<String>,
    pub(crate) quantity: u32,
    pub(crate) price_at_time: Money,
}

impl From<OrderLineRow> for OrderLine {
    fn from(row: OrderLineRow) -> Self {
        Self {
            product_id: row.product_id,
            description: row.description,
            image_url: row.image_url,
            quantity: row.quantity,
            price_at_time: row.price_at_time,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderDetailResponse {
    pub(crate) order_id: OrderId,
    pub(crate) order_date: DateTime<Utc>,
    pub(crate) status: OrderStatus,
    pub(crate) total_amount: Money,
    pub(crate) items: Vec<OrderLineRow>,
    pub(crate) shipping_address: Option<String>,
    pub(crate) tracking_number: Option<String>,
}

impl From<OrderDetailResponse> for OrderDetail {
    fn from(response: OrderDetailResponse) -> Self {
        Self {
            id: response.order_id,
            date: response.order_date,
            status: response.status,
            total: response.total_amount,
            items: response.items.into_iter().map(Into::into).collect(),
            shipping_address: response.shipping_address,
            tracking_number: response.tracking_number,
        }
    }
}

// =============================================================================
// Catalog
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductRow {
    pub(crate) id: ProductId,
    pub(crate) description: String,
    pub(crate) image_url: Option<String>,
    pub(crate) price: Money,
    pub(crate) quantity_available: u32,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: row.id,
            description: row.description,
            image_url: row.image_url,
            price: row.price,
            quantity_available: row.quantity_available,
        }
    }
}
