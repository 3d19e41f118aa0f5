//! Ridgeline Client - typed storefront client.
//!
//! This crate is the programmatic storefront: sign in, browse the catalog,
//! mirror the cart, and walk the two-phase checkout, all against the
//! Ridgeline backend's JSON API.
//!
//! # Architecture
//!
//! All traffic flows through one request proxy that injects the bearer
//! token, applies the configured timeout, and normalizes backend errors.
//! On top of it sit three stateful stores (session, cart, checkout) and
//! three stateless services (catalog, orders, account), composed by
//! [`Storefront`].
//!
//! # Modules
//!
//! - [`models`] - Domain models (users, cart snapshots, products, orders)
//! - [`stores`] - Stateful stores with observable snapshots
//! - [`services`] - Stateless catalog/orders/account services

#![cfg_attr(not(test), forbid(unsafe_code))]

mod api;
mod config;
mod guard;
mod storefront;
mod token;

pub mod models;
pub mod services;
pub mod stores;

pub use api::ApiError;
pub use config::{ClientConfig, ConfigError};
pub use storefront::Storefront;
