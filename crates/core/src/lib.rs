//! Ridgeline Core - Shared types library.
//!
//! This crate provides common types used across all Ridgeline components:
//! - `client` - Typed storefront client (sessions, cart, checkout, catalog)
//! - `cli` - Command-line storefront for scripting and smoke tests
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no HTTP clients.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, money, categories,
//!   and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
