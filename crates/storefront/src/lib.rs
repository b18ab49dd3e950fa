//! ShopEasy storefront library.
//!
//! The cart/wishlist state engine, its durable store, the render facade
//! that turns engine state into snapshots and badge counts, and the
//! simulated one-time-code checkout. A front end owns one
//! [`Storefront`](state::Storefront) and feeds it [`Intent`](intent::Intent)s.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod checkout;
pub mod config;
pub mod intent;
pub mod notify;
pub mod render;
pub mod search;
pub mod services;
pub mod state;
pub mod store;

pub use config::StorefrontConfig;
pub use intent::{Intent, ListKind, Outcome};
pub use state::Storefront;
