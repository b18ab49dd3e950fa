//! `shopeasy cart ...`

use std::io::Write;

use shopeasy_core::{Price, ProductId};
use shopeasy_storefront::notify::Notifier;
use shopeasy_storefront::render::{Badges, CartView, EMPTY_CART_MESSAGE};
use shopeasy_storefront::store::StorageBackend;
use shopeasy_storefront::{Intent, ListKind, Storefront};

use crate::error::AppError;

pub fn add<B: StorageBackend, N: Notifier>(
    storefront: &mut Storefront<B, N>,
    (id, name, price): (ProductId, String, Price),
    out: &mut impl Write,
) -> Result<(), AppError> {
    let outcome = storefront.dispatch(Intent::AddToCart {
        id: id.clone(),
        name,
        price,
    })?;
    let quantity = storefront
        .engine()
        .cart_line(&id)
        .map_or(0, |line| line.quantity.get());
    writeln!(out, "Added {id} (qty {quantity})")?;
    write_badges(outcome.badges, out)
}

pub fn list<B: StorageBackend, N: Notifier>(
    storefront: &Storefront<B, N>,
    out: &mut impl Write,
) -> Result<(), AppError> {
    write_cart(&storefront.cart_snapshot(), out)
}

/// Change a line's quantity by `delta`; absent ids are ignored.
pub fn change<B: StorageBackend, N: Notifier>(
    storefront: &mut Storefront<B, N>,
    id: ProductId,
    delta: i64,
    out: &mut impl Write,
) -> Result<(), AppError> {
    let outcome = storefront.dispatch(Intent::ChangeQuantity { id: id.clone(), delta })?;
    match storefront.engine().cart_line(&id) {
        Some(line) if outcome.changed => writeln!(out, "{id}: qty {}", line.quantity)?,
        _ => writeln!(out, "{id} is not in the cart")?,
    }
    write_badges(outcome.badges, out)
}

pub fn remove<B: StorageBackend, N: Notifier>(
    storefront: &mut Storefront<B, N>,
    id: ProductId,
    out: &mut impl Write,
) -> Result<(), AppError> {
    let outcome = storefront.dispatch(Intent::Remove {
        list: ListKind::Cart,
        id: id.clone(),
    })?;
    if outcome.changed {
        writeln!(out, "Removed {id}")?;
    } else {
        writeln!(out, "{id} is not in the cart")?;
    }
    write_badges(outcome.badges, out)
}

pub fn clear<B: StorageBackend, N: Notifier>(
    storefront: &mut Storefront<B, N>,
    out: &mut impl Write,
) -> Result<(), AppError> {
    let outcome = storefront.dispatch(Intent::ClearCart)?;
    writeln!(out, "Cart cleared")?;
    write_badges(outcome.badges, out)
}

pub fn write_cart(view: &CartView, out: &mut impl Write) -> Result<(), AppError> {
    if view.is_empty() {
        writeln!(out, "{EMPTY_CART_MESSAGE}")?;
        return Ok(());
    }
    for item in &view.items {
        writeln!(
            out,
            "{:<16} {:<28} {} x {} = {}",
            item.id, item.name, item.price, item.quantity, item.line_price
        )?;
    }
    writeln!(out, "Items: {}  Total: {}", view.item_count, view.subtotal)?;
    Ok(())
}

pub fn write_badges(badges: Badges, out: &mut impl Write) -> Result<(), AppError> {
    writeln!(out, "[cart {}] [wishlist {}]", badges.cart_count, badges.wish_count)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use shopeasy_storefront::StorefrontConfig;
    use shopeasy_storefront::notify::RecordingNotifier;
    use shopeasy_storefront::store::{DurableStore, MemoryBackend};

    use super::*;

    fn storefront() -> Storefront<MemoryBackend, RecordingNotifier> {
        Storefront::open(
            DurableStore::new(MemoryBackend::new()),
            &StorefrontConfig::default(),
            RecordingNotifier::new(),
        )
    }

    fn product(id: &str, price: u32) -> (ProductId, String, Price) {
        (ProductId::new(id), format!("Item {id}"), Price::from(price))
    }

    #[test]
    fn test_add_and_list() {
        let mut sf = storefront();
        let mut out = Vec::new();
        add(&mut sf, product("p-1", 250), &mut out).unwrap();
        add(&mut sf, product("p-1", 250), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Added p-1 (qty 2)"));
        assert!(text.contains("[cart 2] [wishlist 0]"));

        let mut out = Vec::new();
        list(&sf, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Item p-1"));
        assert!(text.contains("Total: ₹ 500"));
    }

    #[test]
    fn test_list_empty() {
        let sf = storefront();
        let mut out = Vec::new();
        list(&sf, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap().trim(), EMPTY_CART_MESSAGE);
    }

    #[test]
    fn test_change_and_remove_absent() {
        let mut sf = storefront();
        let mut out = Vec::new();
        change(&mut sf, ProductId::new("ghost"), 1, &mut out).unwrap();
        remove(&mut sf, ProductId::new("ghost"), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("ghost is not in the cart").count(), 2);
    }

    #[test]
    fn test_dec_stops_at_one() {
        let mut sf = storefront();
        let mut out = Vec::new();
        add(&mut sf, product("p-1", 100), &mut out).unwrap();
        change(&mut sf, ProductId::new("p-1"), -1, &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("p-1: qty 1"));
    }
}
