//! `shopeasy checkout`: interactive one-time-code checkout.
//!
//! Prompts for a contact address, then for the code shown by the notifier.
//! An empty answer (or end of input) at either prompt declines.

use std::io::{BufRead, Write};

use rand::Rng;

use shopeasy_storefront::checkout::CheckoutPhase;
use shopeasy_storefront::notify::Notifier;
use shopeasy_storefront::store::StorageBackend;
use shopeasy_storefront::{Intent, Storefront};

use crate::error::AppError;

/// Drive one checkout attempt to a terminal phase.
pub fn run<B: StorageBackend, N: Notifier, R: Rng + ?Sized>(
    storefront: &mut Storefront<B, N>,
    domain: &str,
    rng: &mut R,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<CheckoutPhase, AppError> {
    storefront.dispatch_with_rng(Intent::Checkout, rng)?;
    if storefront.checkout_phase().is_terminal() {
        return Ok(storefront.checkout_phase());
    }

    writeln!(
        out,
        "Order total: {}",
        storefront.format_price(storefront.cart_total())
    )?;

    let Some(address) = prompt(input, out, &format!("Enter your {domain} address: "))? else {
        return decline(storefront, rng);
    };
    storefront.dispatch_with_rng(Intent::SubmitContact { address }, rng)?;
    if storefront.checkout_phase() != CheckoutPhase::CodeIssued {
        return Ok(storefront.checkout_phase());
    }

    let Some(code) = prompt(input, out, "Enter the OTP: ")? else {
        return decline(storefront, rng);
    };
    storefront.dispatch_with_rng(Intent::SubmitCode { code }, rng)?;
    Ok(storefront.checkout_phase())
}

fn decline<B: StorageBackend, N: Notifier, R: Rng + ?Sized>(
    storefront: &mut Storefront<B, N>,
    rng: &mut R,
) -> Result<CheckoutPhase, AppError> {
    storefront.dispatch_with_rng(Intent::CancelCheckout, rng)?;
    Ok(storefront.checkout_phase())
}

/// Read one answer. `None` for a blank line or end of input.
fn prompt(
    input: &mut impl BufRead,
    out: &mut impl Write,
    label: &str,
) -> Result<Option<String>, AppError> {
    write!(out, "{label}")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let answer = line.trim_end_matches(['\r', '\n']);
    if answer.trim().is_empty() {
        Ok(None)
    } else {
        Ok(Some(answer.to_string()))
    }
}
