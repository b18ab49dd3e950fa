//! Contact address predicate for checkout.

use std::sync::LazyLock;

use regex::Regex;

use shopeasy_core::Email;

/// Provider accepted when none is configured.
pub const DEFAULT_CONTACT_DOMAIN: &str = "gmail.com";

static DEFAULT_POLICY: LazyLock<ContactPolicy> = LazyLock::new(|| {
    ContactPolicy::for_domain(DEFAULT_CONTACT_DOMAIN).expect("Invalid default contact regex")
});

/// Accepts `local-part@<domain>` addresses, case-insensitively.
///
/// The local part is limited to ASCII letters, digits, `_`, `.`, `+` and `-`.
#[derive(Debug, Clone)]
pub struct ContactPolicy {
    domain: String,
    pattern: Regex,
}

impl ContactPolicy {
    /// Build a policy for a mail domain such as `gmail.com`.
    ///
    /// # Errors
    ///
    /// Returns `regex::Error` if the resulting pattern cannot be compiled.
    pub fn for_domain(domain: &str) -> Result<Self, regex::Error> {
        let pattern = Regex::new(&format!(
            r"(?i)^[A-Za-z0-9_.+-]+@{}$",
            regex::escape(domain)
        ))?;
        Ok(Self {
            domain: domain.to_owned(),
            pattern,
        })
    }

    /// The accepted mail domain.
    #[must_use]
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Validate an address (surrounding whitespace ignored).
    #[must_use]
    pub fn accept(&self, address: &str) -> Option<Email> {
        let address = address.trim();
        if !self.pattern.is_match(address) {
            return None;
        }
        Email::parse(address).ok()
    }
}

impl Default for ContactPolicy {
    fn default() -> Self {
        DEFAULT_POLICY.clone()
    }
}
