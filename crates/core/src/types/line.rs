//! Cart line items and wishlist entries.
//!
//! The serialized field names (`price`, `qty`) are the storage layout of the
//! `cart` and `wishlist` slots and must not change.

use core::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;

/// A cart entry with a quantity of at least one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: ProductId,
    pub name: String,
    #[serde(rename = "price")]
    pub unit_price: Price,
    #[serde(rename = "qty")]
    pub quantity: NonZeroU32,
}

impl LineItem {
    /// Create a line item with quantity one.
    #[must_use]
    pub fn new(id: ProductId, name: impl Into<String>, unit_price: Price) -> Self {
        Self {
            id,
            name: name.into(),
            unit_price,
            quantity: NonZeroU32::MIN,
        }
    }

    /// `unit_price * quantity`.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price.times(self.quantity)
    }

    /// Add one unit, saturating at `u32::MAX`.
    pub fn increment(&mut self) {
        self.quantity = self.quantity.saturating_add(1);
    }

    /// Shift the quantity by `delta`, clamped to `1..=u32::MAX`.
    pub fn adjust(&mut self, delta: i64) {
        let next = i64::from(self.quantity.get()).saturating_add(delta);
        let clamped = u32::try_from(next.max(1)).unwrap_or(u32::MAX);
        self.quantity = NonZeroU32::new(clamped).unwrap_or(NonZeroU32::MIN);
    }
}

/// A wishlist entry. Wishlists carry no quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishEntry {
    pub id: ProductId,
    pub name: String,
    #[serde(rename = "price")]
    pub unit_price: Price,
}

impl WishEntry {
    #[must_use]
    pub fn new(id: ProductId, name: impl Into<String>, unit_price: Price) -> Self {
        Self {
            id,
            name: name.into(),
            unit_price,
        }
    }
}

impl From<WishEntry> for LineItem {
    fn from(entry: WishEntry) -> Self {
        Self::new(entry.id, entry.name, entry.unit_price)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn item() -> LineItem {
        LineItem::new(ProductId::new("p-1"), "Sneakers", Price::from(1299))
    }

    #[test]
    fn test_new_starts_at_one() {
        assert_eq!(item().quantity.get(), 1);
        assert_eq!(item().line_total(), Price::from(1299));
    }

    #[test]
    fn test_adjust_clamps_to_one() {
        let mut line = item();
        line.adjust(4);
        assert_eq!(line.quantity.get(), 5);
        line.adjust(-3);
        assert_eq!(line.quantity.get(), 2);
        line.adjust(i64::MIN);
        assert_eq!(line.quantity.get(), 1);
    }

    #[test]
    fn test_adjust_saturates_high() {
        let mut line = item();
        line.adjust(i64::MAX);
        assert_eq!(line.quantity, NonZeroU32::MAX);
        line.increment();
        assert_eq!(line.quantity, NonZeroU32::MAX);
    }

    #[test]
    fn test_storage_layout() {
        let json = serde_json::to_value(item()).unwrap();
        assert_eq!(json["id"], "p-1");
        assert_eq!(json["name"], "Sneakers");
        assert_eq!(json["qty"], 1);
        assert!(json["price"].is_number());
    }

    #[test]
    fn test_zero_quantity_is_rejected() {
        let raw = r#"{"id":"p-1","name":"Sneakers","price":10,"qty":0}"#;
        assert!(serde_json::from_str::<LineItem>(raw).is_err());
    }

    #[test]
    fn test_wish_entry_into_line_item() {
        let entry = WishEntry::new(ProductId::new("w-1"), "Watch", Price::from(2499));
        let line = LineItem::from(entry);
        assert_eq!(line.id.as_str(), "w-1");
        assert_eq!(line.quantity.get(), 1);
    }
}
