//! Display channel for user-visible notices.
//!
//! The storefront never talks to a UI toolkit directly. Feedback that the
//! page used to show through alerts and button flashes is emitted as a
//! [`Notice`] to whatever [`Notifier`] the front end attaches.

use shopeasy_core::{Email, ProductId};

use crate::checkout::AbortReason;

/// A user-visible message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// A one-time code was "sent". Simulated: the code is displayed locally
    /// and never transmitted anywhere.
    CodeIssued { address: Email, code: String },
    /// The contact address failed the checkout policy for `domain`.
    AddressRejected { domain: String },
    /// Checkout ended without payment.
    CheckoutAborted(AbortReason),
    /// Checkout committed and the cart was emptied.
    PaymentSucceeded,
    /// A product was added to the wishlist.
    Wishlisted(ProductId),
    /// The product was already on the wishlist.
    AlreadyWishlisted(ProductId),
    /// A catalog search matched nothing.
    NoSearchResults,
}

impl Notice {
    /// Text to show the user.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::CodeIssued { address, code } => format!(
                "Demo OTP sent to {address}: {code}\n(This is a demo. No real email sent.)"
            ),
            Self::AddressRejected { domain } => {
                format!("Please enter a valid {domain} address.")
            }
            Self::CheckoutAborted(reason) => reason.message().to_string(),
            Self::PaymentSucceeded => "Payment successful! (Demo)".to_string(),
            Self::Wishlisted(_) => "Wishlisted ✓".to_string(),
            Self::AlreadyWishlisted(_) => "Already in ♥".to_string(),
            Self::NoSearchResults => "No products match your search.".to_string(),
        }
    }
}

/// Receiver of [`Notice`]s.
pub trait Notifier {
    fn notify(&mut self, notice: Notice);
}

impl<N: Notifier + ?Sized> Notifier for &mut N {
    fn notify(&mut self, notice: Notice) {
        (**self).notify(notice);
    }
}

/// Keeps every notice in order. Useful for tests and for UIs that drain
/// messages after each intent.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    notices: Vec<Notice>,
}

impl RecordingNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Notices received so far.
    #[must_use]
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Drain received notices.
    pub fn take(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }
}

/// Writes notices to the log. Issued codes are not logged.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&mut self, notice: Notice) {
        match &notice {
            Notice::CodeIssued { address, .. } => {
                tracing::info!(%address, "One-time code issued");
            }
            Notice::CheckoutAborted(reason) => {
                tracing::info!(reason = reason.as_str(), "Checkout aborted");
            }
            Notice::AddressRejected { domain } => {
                tracing::info!(%domain, "Contact address rejected");
            }
            other => tracing::info!(message = %other.message(), "Notice"),
        }
    }
}
