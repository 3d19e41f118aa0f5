//! Stateless backend services: catalog, orders, and account.

mod account;
mod catalog;
mod orders;

pub use account::{Account, AccountError};
pub use catalog::Catalog;
pub use orders::{OrderError, Orders};
