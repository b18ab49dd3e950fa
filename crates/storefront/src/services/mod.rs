//! Account and preference services.
//!
//! # Services
//!
//! - `account` - Sign-in stand-in keyed by email address (no credentials)
//! - `preferences` - Delivery PIN and display language

pub mod account;
pub mod preferences;

pub use account::{AccountError, AccountService, UserProfile};
pub use preferences::{DEFAULT_LANGUAGE, Preferences};
