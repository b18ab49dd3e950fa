//! ShopEasy Core - Shared types library.
//!
//! This crate provides the domain types used across all ShopEasy components:
//! - `storefront` - Cart/wishlist engine, checkout simulation, and storage
//! - `cli` - Command-line front end driving the storefront
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no
//! randomness. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs, prices, emails, and list entries

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
