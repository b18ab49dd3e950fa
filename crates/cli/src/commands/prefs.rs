//! `shopeasy prefs ...`

use std::io::Write;

use shopeasy_storefront::services::Preferences;
use shopeasy_storefront::store::StorageBackend;

use crate::error::AppError;

pub fn set_pin<B: StorageBackend>(
    prefs: &Preferences<B>,
    pin: &str,
    out: &mut impl Write,
) -> Result<(), AppError> {
    if !prefs.set_location(pin) {
        writeln!(out, "PIN unchanged")?;
    }
    show(prefs, out)
}

pub fn set_lang<B: StorageBackend>(
    prefs: &Preferences<B>,
    code: &str,
    out: &mut impl Write,
) -> Result<(), AppError> {
    prefs.set_language(code);
    show(prefs, out)
}

pub fn show<B: StorageBackend>(prefs: &Preferences<B>, out: &mut impl Write) -> Result<(), AppError> {
    let location = prefs
        .location_label()
        .unwrap_or_else(|| "PIN not set".to_string());
    writeln!(out, "{location} | {}", prefs.language())?;
    Ok(())
}
