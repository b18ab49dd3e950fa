//! `shopeasy account ...`

use std::io::Write;

use shopeasy_storefront::services::AccountService;
use shopeasy_storefront::store::StorageBackend;

use crate::error::AppError;

pub fn sign_in<B: StorageBackend>(
    accounts: &AccountService<B>,
    address: &str,
    out: &mut impl Write,
) -> Result<(), AppError> {
    let profile = accounts.sign_in(address)?;
    writeln!(out, "Signed in as {}", profile.address)?;
    writeln!(out, "{}", accounts.greeting())?;
    Ok(())
}

pub fn sign_out<B: StorageBackend>(
    accounts: &AccountService<B>,
    out: &mut impl Write,
) -> Result<(), AppError> {
    accounts.sign_out();
    writeln!(out, "Signed out")?;
    Ok(())
}

pub fn whoami<B: StorageBackend>(
    accounts: &AccountService<B>,
    out: &mut impl Write,
) -> Result<(), AppError> {
    writeln!(out, "{}", accounts.greeting())?;
    if let Some(user) = accounts.current_user() {
        writeln!(out, "{}", user.address)?;
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use shopeasy_storefront::store::{DurableStore, MemoryBackend};

    use super::*;

    #[test]
    fn test_sign_in_whoami_sign_out() {
        let accounts = AccountService::new(DurableStore::new(MemoryBackend::new()));
        let mut out = Vec::new();
        sign_in(&accounts, "asha@gmail.com", &mut out).unwrap();
        whoami(&accounts, &mut out).unwrap();
        sign_out(&accounts, &mut out).unwrap();
        whoami(&accounts, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Hello, asha\nasha@gmail.com\n"));
        assert!(text.ends_with("Signed out\nHello, Guest\n"));
    }

    #[test]
    fn test_sign_in_invalid() {
        let accounts = AccountService::new(DurableStore::new(MemoryBackend::new()));
        let mut out = Vec::new();
        assert!(matches!(
            sign_in(&accounts, "asha", &mut out),
            Err(AppError::Account(_))
        ));
    }
}
