//! Render/sync facade.
//!
//! Projects [`CartEngine`] state into display data for whatever UI is
//! attached, and keeps the navigation badge counters current. Snapshots are
//! pure reads; [`RenderFacade::sync_badges`] must be called after every
//! mutating engine operation.

use serde::Serialize;

use shopeasy_core::{Price, ProductId};

use crate::cart::CartEngine;
use crate::store::StorageBackend;

/// Shown in place of the cart list when it has no lines.
pub const EMPTY_CART_MESSAGE: &str = "Your cart is empty.";

/// Shown in place of the wishlist when it has no entries.
pub const EMPTY_WISHLIST_MESSAGE: &str = "Your wishlist is empty.";

/// Cart line display data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartItemView {
    pub id: ProductId,
    pub name: String,
    pub unit_price: Price,
    pub quantity: u32,
    pub line_total: Price,
    /// Formatted unit price, e.g. `"₹ 250"`.
    pub price: String,
    /// Formatted line total.
    pub line_price: String,
}

/// Cart display data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: Price,
    /// Formatted total.
    pub subtotal: String,
    pub item_count: u64,
}

impl CartView {
    /// Create an empty cart.
    #[must_use]
    pub fn empty(currency_symbol: &str) -> Self {
        Self {
            items: Vec::new(),
            total: Price::ZERO,
            subtotal: Price::ZERO.display_with(currency_symbol),
            item_count: 0,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Wishlist entry display data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WishItemView {
    pub id: ProductId,
    pub name: String,
    pub unit_price: Price,
    /// Formatted unit price.
    pub price: String,
}

/// Wishlist display data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct WishlistView {
    pub items: Vec<WishItemView>,
}

impl WishlistView {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Navigation badge counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Badges {
    /// Sum of cart line quantities.
    pub cart_count: u64,
    /// Number of wishlist entries.
    pub wish_count: usize,
}

/// Snapshot renderer and badge holder.
#[derive(Debug, Clone)]
pub struct RenderFacade {
    currency_symbol: String,
    badges: Badges,
}

impl RenderFacade {
    #[must_use]
    pub fn new(currency_symbol: impl Into<String>) -> Self {
        Self {
            currency_symbol: currency_symbol.into(),
            badges: Badges::default(),
        }
    }

    /// Format a price with the configured currency symbol.
    #[must_use]
    pub fn format_price(&self, price: Price) -> String {
        price.display_with(&self.currency_symbol)
    }

    /// Project the cart into display rows, in cart order.
    #[must_use]
    pub fn render_cart_snapshot<B: StorageBackend>(&self, engine: &CartEngine<B>) -> CartView {
        if engine.cart().is_empty() {
            return CartView::empty(&self.currency_symbol);
        }

        let items = engine
            .cart()
            .iter()
            .map(|line| {
                let line_total = line.line_total();
                CartItemView {
                    id: line.id.clone(),
                    name: line.name.clone(),
                    unit_price: line.unit_price,
                    quantity: line.quantity.get(),
                    line_total,
                    price: self.format_price(line.unit_price),
                    line_price: self.format_price(line_total),
                }
            })
            .collect();

        let total = engine.cart_total();
        CartView {
            items,
            total,
            subtotal: self.format_price(total),
            item_count: engine.cart_count(),
        }
    }

    /// Project the wishlist into display rows, in wishlist order.
    #[must_use]
    pub fn render_wish_snapshot<B: StorageBackend>(
        &self,
        engine: &CartEngine<B>,
    ) -> WishlistView {
        WishlistView {
            items: engine
                .wishlist()
                .iter()
                .map(|entry| WishItemView {
                    id: entry.id.clone(),
                    name: entry.name.clone(),
                    unit_price: entry.unit_price,
                    price: self.format_price(entry.unit_price),
                })
                .collect(),
        }
    }

    /// Recompute the badge counters from the engine.
    pub fn sync_badges<B: StorageBackend>(&mut self, engine: &CartEngine<B>) -> Badges {
        self.badges = Badges {
            cart_count: engine.cart_count(),
            wish_count: engine.wish_count(),
        };
        tracing::trace!(
            cart_count = self.badges.cart_count,
            wish_count = self.badges.wish_count,
            "Badges synced"
        );
        self.badges
    }

    /// Badges as of the last [`sync_badges`](Self::sync_badges).
    #[must_use]
    pub const fn badges(&self) -> Badges {
        self.badges
    }
}
