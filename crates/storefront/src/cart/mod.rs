//! Cart and wishlist state engine.
//!
//! [`CartEngine`] owns both lists for the lifetime of the process. Every
//! mutating operation updates memory and then writes the affected slot(s)
//! through the [`DurableStore`] before returning, so storage and memory agree
//! whenever control is back with the caller.
//!
//! Mutations report whether anything changed. Badge recomputation is *not*
//! triggered from here; callers must invoke
//! [`RenderFacade::sync_badges`](crate::render::RenderFacade::sync_badges)
//! after each mutation (the [`Storefront`](crate::state::Storefront)
//! dispatcher does).

use std::num::NonZeroU32;

use tracing::instrument;

use shopeasy_core::{LineItem, Price, ProductId, WishEntry};

use crate::store::{DurableStore, StorageBackend, keys};

/// Result of [`CartEngine::add_to_wishlist`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WishlistAdd {
    /// The entry was appended and persisted.
    Added,
    /// An entry with the same id already existed; nothing changed.
    AlreadyPresent,
}

/// Owner of the in-memory cart and wishlist.
#[derive(Debug)]
pub struct CartEngine<B> {
    store: DurableStore<B>,
    cart: Vec<LineItem>,
    wishlist: Vec<WishEntry>,
}

impl<B: StorageBackend> CartEngine<B> {
    /// Load both lists from storage.
    ///
    /// Absent or corrupt slots load as empty lists. Duplicate ids in a
    /// persisted list are folded together (cart quantities are summed into
    /// the first occurrence, later wishlist duplicates are dropped) and the
    /// repaired list is written back.
    pub fn load(store: DurableStore<B>) -> Self {
        let (cart, cart_repaired) = fold_duplicate_lines(store.get_or_default(keys::CART));
        let (wishlist, wish_repaired) =
            drop_duplicate_entries(store.get_or_default(keys::WISHLIST));

        let engine = Self {
            store,
            cart,
            wishlist,
        };

        if cart_repaired {
            tracing::warn!("Persisted cart contained duplicate ids, repaired");
            engine.persist_cart();
        }
        if wish_repaired {
            tracing::warn!("Persisted wishlist contained duplicate ids, repaired");
            engine.persist_wishlist();
        }

        tracing::debug!(
            cart_lines = engine.cart.len(),
            wishlist_entries = engine.wishlist.len(),
            "Cart state loaded"
        );
        engine
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Add one unit of a product to the cart.
    ///
    /// Increments the existing line or appends a new one with quantity 1.
    /// Returns the line's resulting quantity.
    #[instrument(skip(self, name))]
    pub fn add_to_cart(
        &mut self,
        id: ProductId,
        name: impl Into<String>,
        unit_price: Price,
    ) -> NonZeroU32 {
        let quantity = self.insert_or_increment(LineItem::new(id, name, unit_price));
        self.persist_cart();
        quantity
    }

    /// Shift a line's quantity by `delta`, never below 1.
    ///
    /// Returns the new quantity, or `None` (and no write) if the line is
    /// absent.
    #[instrument(skip(self))]
    pub fn change_quantity(&mut self, id: &ProductId, delta: i64) -> Option<NonZeroU32> {
        let line = self.cart.iter_mut().find(|line| &line.id == id)?;
        line.adjust(delta);
        let quantity = line.quantity;
        self.persist_cart();
        Some(quantity)
    }

    /// Remove a line. Returns `false` (and does not write) if absent.
    #[instrument(skip(self))]
    pub fn remove_from_cart(&mut self, id: &ProductId) -> bool {
        let before = self.cart.len();
        self.cart.retain(|line| &line.id != id);
        if self.cart.len() == before {
            return false;
        }
        self.persist_cart();
        true
    }

    /// Empty the cart.
    #[instrument(skip(self))]
    pub fn clear_cart(&mut self) {
        self.cart.clear();
        self.persist_cart();
    }

    /// Sum of `unit_price * quantity` over all lines.
    #[must_use]
    pub fn cart_total(&self) -> Price {
        self.cart.iter().map(LineItem::line_total).sum()
    }

    /// Sum of line quantities.
    #[must_use]
    pub fn cart_count(&self) -> u64 {
        self.cart
            .iter()
            .map(|line| u64::from(line.quantity.get()))
            .sum()
    }

    /// Cart lines in display order.
    #[must_use]
    pub fn cart(&self) -> &[LineItem] {
        &self.cart
    }

    /// Look up a cart line.
    #[must_use]
    pub fn cart_line(&self, id: &ProductId) -> Option<&LineItem> {
        self.cart.iter().find(|line| &line.id == id)
    }

    // =========================================================================
    // Wishlist
    // =========================================================================

    /// Append a product to the wishlist unless it is already there.
    #[instrument(skip(self, name))]
    pub fn add_to_wishlist(
        &mut self,
        id: ProductId,
        name: impl Into<String>,
        unit_price: Price,
    ) -> WishlistAdd {
        if self.wishlist.iter().any(|entry| entry.id == id) {
            return WishlistAdd::AlreadyPresent;
        }
        self.wishlist.push(WishEntry::new(id, name, unit_price));
        self.persist_wishlist();
        WishlistAdd::Added
    }

    /// Remove a wishlist entry. Returns `false` (and does not write) if absent.
    #[instrument(skip(self))]
    pub fn remove_from_wishlist(&mut self, id: &ProductId) -> bool {
        let before = self.wishlist.len();
        self.wishlist.retain(|entry| &entry.id != id);
        if self.wishlist.len() == before {
            return false;
        }
        self.persist_wishlist();
        true
    }

    /// Move a wishlist entry into the cart.
    ///
    /// The cart line is incremented if present, otherwise inserted with
    /// quantity 1; the wishlist entry is always removed. Both slots are
    /// written. Returns the cart line's quantity, or `None` if the entry was
    /// not on the wishlist.
    #[instrument(skip(self))]
    pub fn move_wish_to_cart(&mut self, id: &ProductId) -> Option<NonZeroU32> {
        let index = self.wishlist.iter().position(|entry| &entry.id == id)?;
        let entry = self.wishlist.remove(index);
        let quantity = self.insert_or_increment(LineItem::from(entry));
        self.persist_cart();
        self.persist_wishlist();
        Some(quantity)
    }

    /// Number of wishlist entries.
    #[must_use]
    pub fn wish_count(&self) -> usize {
        self.wishlist.len()
    }

    /// Wishlist entries in display order.
    #[must_use]
    pub fn wishlist(&self) -> &[WishEntry] {
        &self.wishlist
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn insert_or_increment(&mut self, item: LineItem) -> NonZeroU32 {
        if let Some(line) = self.cart.iter_mut().find(|line| line.id == item.id) {
            line.increment();
            return line.quantity;
        }
        let quantity = item.quantity;
        self.cart.push(item);
        quantity
    }

    fn persist_cart(&self) {
        self.store.set(keys::CART, &self.cart);
    }

    fn persist_wishlist(&self) {
        self.store.set(keys::WISHLIST, &self.wishlist);
    }
}

/// Merge lines sharing an id into the first occurrence.
fn fold_duplicate_lines(lines: Vec<LineItem>) -> (Vec<LineItem>, bool) {
    let mut folded: Vec<LineItem> = Vec::with_capacity(lines.len());
    let mut repaired = false;
    for line in lines {
        if let Some(existing) = folded.iter_mut().find(|l| l.id == line.id) {
            existing.quantity = existing.quantity.saturating_add(line.quantity.get());
            repaired = true;
        } else {
            folded.push(line);
        }
    }
    (folded, repaired)
}

/// Keep only the first entry for each id.
fn drop_duplicate_entries(entries: Vec<WishEntry>) -> (Vec<WishEntry>, bool) {
    let mut kept: Vec<WishEntry> = Vec::with_capacity(entries.len());
    let mut repaired = false;
    for entry in entries {
        if kept.iter().any(|e| e.id == entry.id) {
            repaired = true;
        } else {
            kept.push(entry);
        }
    }
    (kept, repaired)
}
