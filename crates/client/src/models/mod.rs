//! Domain models produced and consumed by the client.
//!
//! Wire-format details (camelCase field names, flat cart rows) stay in the
//! API layer; these are the shapes the rest of the crate and its callers
//! work with.

mod cart;
mod checkout;
mod order;
mod product;
mod user;

pub use cart::{CartItem, CartProduct, CartSnapshot};
pub use checkout::{CardDetails, CardError, CheckoutSession, PaymentMethod, PaymentReceipt};
pub use order::{OrderDetail, OrderLine, OrderSummary};
pub use product::Product;
pub use user::{
    Credentials, MIN_PASSWORD_LENGTH, ProfileUpdate, Registration, RegistrationError, User,
};
