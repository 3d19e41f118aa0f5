//! Stateful stores: auth session, cart mirror, and checkout flow.
//!
//! Each store is a cheap-to-clone handle over shared state. Snapshots are
//! observable through `watch` channels so callers can react to changes
//! without polling.

mod cart;
mod checkout;
mod session;

pub use cart::{CartError, CartStore};
pub use checkout::{CheckoutError, CheckoutFlow, CheckoutStage};
pub use session::{AuthError, RegisterError, SessionState, SessionStore};
