//! Cart and wishlist behavior through the storefront dispatcher.

#![allow(clippy::unwrap_used)]

use shopeasy_core::{Price, ProductId};
use shopeasy_storefront::cart::WishlistAdd;
use shopeasy_storefront::notify::{Notice, RecordingNotifier};
use shopeasy_storefront::render::Badges;
use shopeasy_storefront::store::{DurableStore, MemoryBackend};
use shopeasy_storefront::{Intent, ListKind, Storefront, StorefrontConfig};

fn storefront() -> (Storefront<MemoryBackend, RecordingNotifier>, MemoryBackend) {
    let backend = MemoryBackend::new();
    let sf = Storefront::open(
        DurableStore::new(backend.clone()),
        &StorefrontConfig::default(),
        RecordingNotifier::new(),
    );
    (sf, backend)
}

fn add_to_cart(id: &str, price: u32) -> Intent {
    Intent::AddToCart {
        id: ProductId::new(id),
        name: format!("Product {id}"),
        price: Price::from(price),
    }
}

fn add_to_wishlist(id: &str, price: u32) -> Intent {
    Intent::AddToWishlist {
        id: ProductId::new(id),
        name: format!("Product {id}"),
        price: Price::from(price),
    }
}

#[test]
fn test_repeated_adds_merge_into_one_line() {
    let (mut sf, _) = storefront();
    for _ in 0..5 {
        sf.dispatch(add_to_cart("p-1", 250)).unwrap();
    }
    let view = sf.cart_snapshot();
    assert_eq!(view.items.len(), 1);
    assert_eq!(view.items[0].quantity, 5);
    assert_eq!(sf.badges().cart_count, 5);
}

#[test]
fn test_total_is_price_times_quantity() {
    let (mut sf, _) = storefront();
    for _ in 0..3 {
        sf.dispatch(add_to_cart("p-1", 250)).unwrap();
    }
    assert_eq!(sf.cart_total(), Price::from(750));

    sf.dispatch(add_to_cart("p-2", 99)).unwrap();
    assert_eq!(sf.cart_total(), Price::from(849));
    assert_eq!(sf.cart_snapshot().subtotal, "₹ 849");
}

#[test]
fn test_quantity_never_drops_below_one() {
    let (mut sf, _) = storefront();
    sf.dispatch(add_to_cart("p-1", 10)).unwrap();
    for delta in [-1, -5, i64::MIN, 3, -2, -100] {
        sf.dispatch(Intent::ChangeQuantity {
            id: ProductId::new("p-1"),
            delta,
        })
        .unwrap();
        let line = sf.engine().cart_line(&ProductId::new("p-1")).unwrap();
        assert!(line.quantity.get() >= 1, "delta {delta}");
    }
    assert_eq!(sf.cart_count(), 1);
}

#[test]
fn test_cart_keeps_insertion_order() {
    let (mut sf, _) = storefront();
    for id in ["c", "a", "b", "a"] {
        sf.dispatch(add_to_cart(id, 1)).unwrap();
    }
    let ids: Vec<_> = sf
        .cart_snapshot()
        .items
        .iter()
        .map(|item| item.id.to_string())
        .collect();
    assert_eq!(ids, ["c", "a", "b"]);
}

#[test]
fn test_wishlist_is_unique() {
    let (mut sf, _) = storefront();
    let first = sf.dispatch(add_to_wishlist("w-1", 500)).unwrap();
    let again = sf.dispatch(add_to_wishlist("w-1", 500)).unwrap();
    assert_eq!(first.wishlist, Some(WishlistAdd::Added));
    assert_eq!(again.wishlist, Some(WishlistAdd::AlreadyPresent));
    assert_eq!(sf.wish_count(), 1);

    let messages: Vec<_> = sf
        .notifier()
        .notices()
        .iter()
        .map(Notice::message)
        .collect();
    assert_eq!(messages, ["Wishlisted ✓", "Already in ♥"]);
}

#[test]
fn test_move_into_empty_cart() {
    let (mut sf, _) = storefront();
    sf.dispatch(add_to_wishlist("w-1", 120)).unwrap();
    sf.dispatch(Intent::Move {
        id: ProductId::new("w-1"),
    })
    .unwrap();

    assert!(sf.wish_snapshot().is_empty());
    let line = sf.engine().cart_line(&ProductId::new("w-1")).unwrap();
    assert_eq!(line.quantity.get(), 1);
    assert_eq!(line.unit_price, Price::from(120));
}

#[test]
fn test_move_increments_existing_line() {
    let (mut sf, _) = storefront();
    sf.dispatch(add_to_cart("p-1", 120)).unwrap();
    sf.dispatch(add_to_cart("p-1", 120)).unwrap();
    sf.dispatch(add_to_wishlist("p-1", 120)).unwrap();

    let outcome = sf
        .dispatch(Intent::Move {
            id: ProductId::new("p-1"),
        })
        .unwrap();
    assert_eq!(
        outcome.badges,
        Badges {
            cart_count: 3,
            wish_count: 0
        }
    );
    assert_eq!(sf.cart_snapshot().items.len(), 1);
}

#[test]
fn test_absent_ids_do_not_write() {
    let (mut sf, backend) = storefront();
    sf.dispatch(add_to_cart("p-1", 10)).unwrap();
    sf.dispatch(add_to_wishlist("w-1", 10)).unwrap();
    let writes = backend.write_count();

    let ghost = ProductId::new("ghost");
    for intent in [
        Intent::Remove {
            list: ListKind::Cart,
            id: ghost.clone(),
        },
        Intent::Remove {
            list: ListKind::Wishlist,
            id: ghost.clone(),
        },
        Intent::Move { id: ghost.clone() },
        Intent::ChangeQuantity {
            id: ghost,
            delta: 1,
        },
    ] {
        let outcome = sf.dispatch(intent).unwrap();
        assert!(!outcome.changed);
    }
    assert_eq!(backend.write_count(), writes);
}

#[test]
fn test_clear_cart_leaves_wishlist() {
    let (mut sf, _) = storefront();
    sf.dispatch(add_to_cart("p-1", 10)).unwrap();
    sf.dispatch(add_to_wishlist("w-1", 10)).unwrap();
    let outcome = sf.dispatch(Intent::ClearCart).unwrap();
    assert_eq!(
        outcome.badges,
        Badges {
            cart_count: 0,
            wish_count: 1
        }
    );
    assert!(sf.cart_snapshot().is_empty());
}

#[test]
fn test_badges_track_every_mutation() {
    let (mut sf, _) = storefront();
    let intents = [
        add_to_cart("a", 1),
        add_to_cart("b", 1),
        Intent::ChangeQuantity {
            id: ProductId::new("a"),
            delta: 4,
        },
        add_to_wishlist("c", 1),
        Intent::Move {
            id: ProductId::new("c"),
        },
        Intent::Remove {
            list: ListKind::Cart,
            id: ProductId::new("b"),
        },
    ];
    for intent in intents {
        let outcome = sf.dispatch(intent).unwrap();
        assert_eq!(outcome.badges.cart_count, sf.cart_count());
        assert_eq!(outcome.badges.wish_count, sf.wish_count());
    }
    assert_eq!(sf.cart_count(), 6);
}
