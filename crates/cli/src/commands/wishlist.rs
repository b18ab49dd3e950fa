//! `shopeasy wishlist ...`

use std::io::Write;

use shopeasy_core::{Price, ProductId};
use shopeasy_storefront::notify::Notifier;
use shopeasy_storefront::render::EMPTY_WISHLIST_MESSAGE;
use shopeasy_storefront::store::StorageBackend;
use shopeasy_storefront::{Intent, ListKind, Storefront};

use super::cart::write_badges;
use crate::error::AppError;

/// Add to the wishlist. The notifier reports whether it was already there.
pub fn add<B: StorageBackend, N: Notifier>(
    storefront: &mut Storefront<B, N>,
    (id, name, price): (ProductId, String, Price),
    out: &mut impl Write,
) -> Result<(), AppError> {
    let outcome = storefront.dispatch(Intent::AddToWishlist { id, name, price })?;
    write_badges(outcome.badges, out)
}

pub fn list<B: StorageBackend, N: Notifier>(
    storefront: &Storefront<B, N>,
    out: &mut impl Write,
) -> Result<(), AppError> {
    let view = storefront.wish_snapshot();
    if view.is_empty() {
        writeln!(out, "{EMPTY_WISHLIST_MESSAGE}")?;
        return Ok(());
    }
    for item in &view.items {
        writeln!(out, "{:<16} {:<28} {}", item.id, item.name, item.price)?;
    }
    Ok(())
}

pub fn remove<B: StorageBackend, N: Notifier>(
    storefront: &mut Storefront<B, N>,
    id: ProductId,
    out: &mut impl Write,
) -> Result<(), AppError> {
    let outcome = storefront.dispatch(Intent::Remove {
        list: ListKind::Wishlist,
        id: id.clone(),
    })?;
    if outcome.changed {
        writeln!(out, "Removed {id} from wishlist")?;
    } else {
        writeln!(out, "{id} is not on the wishlist")?;
    }
    write_badges(outcome.badges, out)
}

/// Move an entry into the cart.
pub fn move_to_cart<B: StorageBackend, N: Notifier>(
    storefront: &mut Storefront<B, N>,
    id: ProductId,
    out: &mut impl Write,
) -> Result<(), AppError> {
    let outcome = storefront.dispatch(Intent::Move { id: id.clone() })?;
    if outcome.changed {
        writeln!(out, "Moved {id} to cart")?;
    } else {
        writeln!(out, "{id} is not on the wishlist")?;
    }
    write_badges(outcome.badges, out)
}
