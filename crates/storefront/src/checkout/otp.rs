//! One-time code generation.

use std::fmt;

use rand::Rng;
use secrecy::{ExposeSecret, SecretString};

/// Number of digits in an issued code.
pub const CODE_DIGITS: usize = 6;

const CODE_SPACE: u32 = 1_000_000;

/// A fixed-width numeric one-time code.
///
/// Leading zeros are significant: `"004211"` is a valid code and does not
/// match `"4211"`.
pub struct OtpCode(SecretString);

impl OtpCode {
    /// Draw a code uniformly from `000000..=999999`.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let value: u32 = rng.random_range(0..CODE_SPACE);
        Self(SecretString::from(format!("{value:0width$}", width = CODE_DIGITS)))
    }

    /// Exact string comparison against user input.
    #[must_use]
    pub fn matches(&self, entered: &str) -> bool {
        self.0.expose_secret() == entered
    }

    /// The code text, for the display channel.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl fmt::Debug for OtpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OtpCode([REDACTED])")
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn test_generate_format() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let code = OtpCode::generate(&mut rng);
            assert_eq!(code.expose().len(), CODE_DIGITS);
            assert!(code.expose().chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_leading_zeros_can_occur() {
        let mut rng = StdRng::seed_from_u64(11);
        let saw_leading_zero =
            (0..5_000).any(|_| OtpCode::generate(&mut rng).expose().starts_with('0'));
        assert!(saw_leading_zero);
    }

    #[test]
    fn test_matches_is_exact() {
        let mut rng = StdRng::seed_from_u64(3);
        let code = OtpCode::generate(&mut rng);
        let text = code.expose().to_string();
        assert!(code.matches(&text));
        assert!(!code.matches(&format!(" {text}")));
        assert!(!code.matches(""));
    }

    #[test]
    fn test_debug_redacts() {
        let mut rng = StdRng::seed_from_u64(3);
        let code = OtpCode::generate(&mut rng);
        let debug = format!("{code:?}");
        assert!(!debug.contains(code.expose()));
        assert!(debug.contains("REDACTED"));
    }
}
