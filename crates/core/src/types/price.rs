//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are stored in the currency's standard unit (rupees, not paise) and
//! are never negative. On the wire a price is a plain JSON number, matching
//! the layout the storefront page has always written to local storage, so
//! only amounts that survive a trip through `f64` are accepted.

use core::fmt;
use core::iter::Sum;
use core::num::NonZeroU32;
use core::ops::Add;
use core::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The amount is below zero.
    #[error("price cannot be negative (got {0})")]
    Negative(Decimal),
    /// The amount would change when written as a JSON number.
    #[error("price {0} has more precision than can be stored")]
    Unrepresentable(Decimal),
    /// The input is not a decimal number.
    #[error("invalid price: {0}")]
    Invalid(String),
}

/// A non-negative unit price.
///
/// Arithmetic saturates at [`Decimal::MAX`] instead of panicking so that
/// totals over absurd quantities stay well-defined.
///
/// ## Examples
///
/// ```
/// use shopeasy_core::Price;
///
/// let price = Price::from(250_u32);
/// assert_eq!(price.to_string(), "250");
/// assert!("-1".parse::<Price>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(Decimal);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new price.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::Negative` if `amount` is below zero and
    /// `PriceError::Unrepresentable` if it would not read back unchanged
    /// from its stored form.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount < Decimal::ZERO {
            return Err(PriceError::Negative(amount));
        }
        if !survives_float(amount) {
            return Err(PriceError::Unrepresentable(amount));
        }
        Ok(Self(amount))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Price of `quantity` units.
    #[must_use]
    pub fn times(self, quantity: NonZeroU32) -> Self {
        Self(
            self.0
                .checked_mul(Decimal::from(quantity.get()))
                .unwrap_or(Decimal::MAX),
        )
    }

    /// Whether the price is exactly zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Format with a currency symbol, e.g. `"₹ 1299"`.
    #[must_use]
    pub fn display_with(&self, symbol: &str) -> String {
        format!("{symbol} {self}")
    }
}

/// Mirrors the `rust_decimal::serde::float` path: written via `to_f64`, read
/// back by parsing the float's shortest decimal form.
fn survives_float(amount: Decimal) -> bool {
    amount
        .to_f64()
        .and_then(|float| Decimal::from_str(&float.to_string()).ok())
        == Some(amount)
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.checked_add(rhs.0).unwrap_or(Decimal::MAX))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl From<u32> for Price {
    fn from(amount: u32) -> Self {
        Self(Decimal::from(amount))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount =
            Decimal::from_str(s.trim()).map_err(|_| PriceError::Invalid(s.to_string()))?;
        Self::new(amount)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = rust_decimal::serde::float::deserialize(deserializer)?;
        Self::new(amount).map_err(serde::de::Error::custom)
    }
}
