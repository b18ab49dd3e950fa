//! Sign-in stand-in.
//!
//! There are no passwords and nothing is verified. Signing in only records
//! which address the visitor typed so the header can greet them.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;

use shopeasy_core::{Email, EmailError};

use crate::store::{DurableStore, StorageBackend, keys};

/// Errors that can occur during account operations.
#[derive(Debug, Error)]
pub enum AccountError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),
}

/// Persisted identity of the signed-in visitor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Address entered at sign-in.
    #[serde(rename = "email")]
    pub address: Email,
    /// Local part of the address.
    #[serde(rename = "name")]
    pub display_name: String,
}

impl UserProfile {
    #[must_use]
    pub fn from_address(address: Email) -> Self {
        let display_name = address.local_part().to_string();
        Self {
            address,
            display_name,
        }
    }
}

/// Reads and writes the `user` slot.
#[derive(Debug, Clone)]
pub struct AccountService<B> {
    store: DurableStore<B>,
}

impl<B: StorageBackend> AccountService<B> {
    #[must_use]
    pub const fn new(store: DurableStore<B>) -> Self {
        Self { store }
    }

    /// Record `address` as the signed-in user.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::InvalidEmail` if the address does not parse.
    #[instrument(skip(self))]
    pub fn sign_in(&self, address: &str) -> Result<UserProfile, AccountError> {
        let profile = UserProfile::from_address(Email::parse(address)?);
        self.store.set(keys::USER, &profile);
        tracing::info!(name = %profile.display_name, "Signed in");
        Ok(profile)
    }

    pub fn sign_out(&self) {
        self.store.remove(keys::USER);
        tracing::info!("Signed out");
    }

    #[must_use]
    pub fn current_user(&self) -> Option<UserProfile> {
        self.store.get(keys::USER, None)
    }

    /// Header greeting for the current visitor.
    #[must_use]
    pub fn greeting(&self) -> String {
        match self.current_user() {
            Some(user) if !user.display_name.is_empty() => {
                format!("Hello, {}", user.display_name)
            }
            Some(_) => "Hello, User".to_string(),
            None => "Hello, Guest".to_string(),
        }
    }
}
