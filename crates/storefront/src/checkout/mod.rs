//! Simulated one-time-code checkout.
//!
//! ```text
//! Idle -> AwaitingContact -> CodeIssued -> Verifying -> Committed
//!   |            |                             |
//!   +--> Aborted <------------+----------------+
//! ```
//!
//! The machine is driven by discrete calls ([`Checkout::request`],
//! [`Checkout::submit_contact`], [`Checkout::submit_code`],
//! [`Checkout::cancel`]). Validation failures move the machine to
//! [`CheckoutPhase::Aborted`] and are reported through the display channel;
//! they are not errors. [`CheckoutError`] is returned only for calls made in
//! the wrong phase, which leave the state untouched.
//!
//! No code is ever transmitted: the issued code goes to the [`Notifier`].

mod contact;
mod otp;

use std::fmt;

use rand::Rng;
use thiserror::Error;
use tracing::instrument;
use uuid::Uuid;

use shopeasy_core::Email;

pub use contact::{ContactPolicy, DEFAULT_CONTACT_DOMAIN};
pub use otp::{CODE_DIGITS, OtpCode};

use crate::cart::CartEngine;
use crate::notify::{Notice, Notifier};
use crate::store::StorageBackend;

/// Why a checkout attempt ended without payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AbortReason {
    /// Checkout was requested with nothing in the cart.
    EmptyCart,
    /// The contact address failed the address predicate.
    InvalidAddress,
    /// The entered code did not match the issued one.
    InvalidCode,
    /// The user declined to provide an address or a code.
    Declined,
}

impl AbortReason {
    /// Short machine-readable reason.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EmptyCart => "empty cart",
            Self::InvalidAddress => "invalid address",
            Self::InvalidCode => "invalid code",
            Self::Declined => "declined",
        }
    }

    /// User-facing message.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::EmptyCart => "Cart is empty.",
            Self::InvalidAddress => "Please enter a valid email address.",
            Self::InvalidCode => "Invalid OTP.",
            Self::Declined => "Checkout cancelled.",
        }
    }
}

impl fmt::Display for AbortReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Observable checkout state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CheckoutPhase {
    #[default]
    Idle,
    AwaitingContact,
    CodeIssued,
    Verifying,
    Committed,
    Aborted(AbortReason),
}

impl CheckoutPhase {
    /// Whether the attempt has finished.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Committed | Self::Aborted(_))
    }
}

impl fmt::Display for CheckoutPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("idle"),
            Self::AwaitingContact => f.write_str("awaiting contact"),
            Self::CodeIssued => f.write_str("code issued"),
            Self::Verifying => f.write_str("verifying"),
            Self::Committed => f.write_str("committed"),
            Self::Aborted(reason) => write!(f, "aborted ({reason})"),
        }
    }
}

/// A checkout call made in a phase that does not accept it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CheckoutError {
    #[error("cannot {action} while checkout is {phase}")]
    UnexpectedStep {
        action: &'static str,
        phase: CheckoutPhase,
    },
}

enum State {
    Idle,
    AwaitingContact,
    CodeIssued { address: Email, code: OtpCode },
    Verifying,
    Committed,
    Aborted(AbortReason),
}

impl State {
    const fn phase(&self) -> CheckoutPhase {
        match self {
            Self::Idle => CheckoutPhase::Idle,
            Self::AwaitingContact => CheckoutPhase::AwaitingContact,
            Self::CodeIssued { .. } => CheckoutPhase::CodeIssued,
            Self::Verifying => CheckoutPhase::Verifying,
            Self::Committed => CheckoutPhase::Committed,
            Self::Aborted(reason) => CheckoutPhase::Aborted(*reason),
        }
    }
}

/// The checkout state machine.
pub struct Checkout {
    policy: ContactPolicy,
    state: State,
    attempt: Option<Uuid>,
}

impl fmt::Debug for Checkout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Checkout")
            .field("domain", &self.policy.domain())
            .field("phase", &self.phase())
            .field("attempt", &self.attempt)
            .finish()
    }
}

impl Default for Checkout {
    fn default() -> Self {
        Self::new(ContactPolicy::default())
    }
}

impl Checkout {
    #[must_use]
    pub fn new(policy: ContactPolicy) -> Self {
        Self {
            policy,
            state: State::Idle,
            attempt: None,
        }
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> CheckoutPhase {
        self.state.phase()
    }

    /// Identifier of the current attempt, for correlating log lines.
    #[must_use]
    pub const fn attempt(&self) -> Option<Uuid> {
        self.attempt
    }

    /// Start a new attempt, discarding any attempt in progress.
    ///
    /// Aborts immediately with [`AbortReason::EmptyCart`] if the cart has no
    /// lines.
    #[instrument(skip_all)]
    pub fn request<B: StorageBackend>(
        &mut self,
        engine: &CartEngine<B>,
        notifier: &mut impl Notifier,
    ) -> CheckoutPhase {
        self.state = State::Idle;
        let attempt = Uuid::new_v4();
        self.attempt = Some(attempt);

        if engine.cart().is_empty() {
            return self.abort(AbortReason::EmptyCart, notifier);
        }

        tracing::info!(
            %attempt,
            total = %engine.cart_total(),
            items = engine.cart_count(),
            "Checkout started"
        );
        self.state = State::AwaitingContact;
        self.phase()
    }

    /// Supply the contact address and issue a code.
    ///
    /// An address failing the [`ContactPolicy`] aborts the attempt without
    /// issuing a code.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::UnexpectedStep` unless the machine is
    /// awaiting a contact address.
    #[instrument(skip_all)]
    pub fn submit_contact<R: Rng + ?Sized>(
        &mut self,
        address: &str,
        rng: &mut R,
        notifier: &mut impl Notifier,
    ) -> Result<CheckoutPhase, CheckoutError> {
        self.expect_phase(CheckoutPhase::AwaitingContact, "submit a contact address")?;

        let Some(address) = self.policy.accept(address) else {
            let notice = Notice::AddressRejected {
                domain: self.policy.domain().to_string(),
            };
            return Ok(self.abort_with(AbortReason::InvalidAddress, notice, notifier));
        };

        let code = OtpCode::generate(rng);
        notifier.notify(Notice::CodeIssued {
            address: address.clone(),
            code: code.expose().to_string(),
        });
        tracing::info!(%address, "One-time code issued");

        self.state = State::CodeIssued { address, code };
        Ok(self.phase())
    }

    /// Supply the entered code.
    ///
    /// A match clears the cart and commits; a mismatch aborts and leaves the
    /// cart untouched. A match against a cart emptied since the code was
    /// issued aborts with [`AbortReason::EmptyCart`].
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::UnexpectedStep` unless a code has been issued.
    #[instrument(skip_all)]
    pub fn submit_code<B: StorageBackend>(
        &mut self,
        entered: &str,
        engine: &mut CartEngine<B>,
        notifier: &mut impl Notifier,
    ) -> Result<CheckoutPhase, CheckoutError> {
        self.expect_phase(CheckoutPhase::CodeIssued, "submit a code")?;

        let State::CodeIssued { address, code } = std::mem::replace(&mut self.state, State::Verifying)
        else {
            return Err(self.unexpected("submit a code"));
        };

        if !code.matches(entered) {
            return Ok(self.abort(AbortReason::InvalidCode, notifier));
        }
        if engine.cart().is_empty() {
            return Ok(self.abort(AbortReason::EmptyCart, notifier));
        }

        let total = engine.cart_total();
        engine.clear_cart();
        self.state = State::Committed;
        tracing::info!(%address, %total, "Checkout committed");
        notifier.notify(Notice::PaymentSucceeded);
        Ok(self.phase())
    }

    /// Abandon the attempt because the user declined to continue.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::UnexpectedStep` if no attempt is in progress.
    pub fn cancel(&mut self, notifier: &mut impl Notifier) -> Result<CheckoutPhase, CheckoutError> {
        match self.state {
            State::AwaitingContact | State::CodeIssued { .. } => {
                Ok(self.abort(AbortReason::Declined, notifier))
            }
            _ => Err(self.unexpected("cancel")),
        }
    }

    fn expect_phase(
        &self,
        expected: CheckoutPhase,
        action: &'static str,
    ) -> Result<(), CheckoutError> {
        if self.phase() == expected {
            Ok(())
        } else {
            Err(self.unexpected(action))
        }
    }

    const fn unexpected(&self, action: &'static str) -> CheckoutError {
        CheckoutError::UnexpectedStep {
            action,
            phase: self.phase(),
        }
    }

    fn abort(&mut self, reason: AbortReason, notifier: &mut impl Notifier) -> CheckoutPhase {
        self.abort_with(reason, Notice::CheckoutAborted(reason), notifier)
    }

    fn abort_with(
        &mut self,
        reason: AbortReason,
        notice: Notice,
        notifier: &mut impl Notifier,
    ) -> CheckoutPhase {
        tracing::info!(attempt = ?self.attempt, reason = reason.as_str(), "Checkout aborted");
        self.state = State::Aborted(reason);
        notifier.notify(notice);
        self.phase()
    }
}
