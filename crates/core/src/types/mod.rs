//! Core types for ShopEasy.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod line;
pub mod price;

pub use email::{Email, EmailError};
pub use id::*;
pub use line::{LineItem, WishEntry};
pub use price::{Price, PriceError};
