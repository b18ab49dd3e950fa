//! Visitor preferences: delivery PIN and display language.

use crate::store::{DurableStore, StorageBackend, keys};

/// Language shown when none was chosen.
pub const DEFAULT_LANGUAGE: &str = "EN";

/// Reads and writes the `pin` and `lang` slots.
#[derive(Debug, Clone)]
pub struct Preferences<B> {
    store: DurableStore<B>,
}

impl<B: StorageBackend> Preferences<B> {
    #[must_use]
    pub const fn new(store: DurableStore<B>) -> Self {
        Self { store }
    }

    /// Store a delivery PIN. Blank input leaves the current value alone.
    ///
    /// Returns whether anything was stored.
    pub fn set_location(&self, pin: &str) -> bool {
        let pin = pin.trim();
        if pin.is_empty() {
            return false;
        }
        self.store.set(keys::PIN, pin);
        true
    }

    #[must_use]
    pub fn location(&self) -> Option<String> {
        self.store.get(keys::PIN, None)
    }

    /// Header label, e.g. `PIN 560001`.
    #[must_use]
    pub fn location_label(&self) -> Option<String> {
        self.location().map(|pin| format!("PIN {pin}"))
    }

    /// Store the display language. Blank input resets to [`DEFAULT_LANGUAGE`].
    pub fn set_language(&self, code: &str) {
        let code = code.trim();
        if code.is_empty() {
            self.store.set(keys::LANG, DEFAULT_LANGUAGE);
        } else {
            self.store.set(keys::LANG, code);
        }
    }

    #[must_use]
    pub fn language(&self) -> String {
        self.store
            .get::<Option<String>>(keys::LANG, None)
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string())
    }
}
