//! Storefront state shared with the attached UI.
//!
//! [`Storefront`] is the single owner of the cart engine, the render facade
//! and the checkout machine. Every [`Intent`] goes through
//! [`Storefront::dispatch`], which runs the operation to completion and
//! re-syncs the badges whenever state changed.

use rand::Rng;
use tracing::instrument;

use shopeasy_core::Price;

use crate::cart::{CartEngine, WishlistAdd};
use crate::checkout::{Checkout, CheckoutError, CheckoutPhase};
use crate::config::StorefrontConfig;
use crate::intent::{Intent, ListKind, Outcome};
use crate::notify::{Notice, Notifier};
use crate::render::{Badges, CartView, RenderFacade, WishlistView};
use crate::store::{DurableStore, StorageBackend};

/// The storefront core.
#[derive(Debug)]
pub struct Storefront<B, N> {
    engine: CartEngine<B>,
    render: RenderFacade,
    checkout: Checkout,
    notifier: N,
}

impl<B: StorageBackend, N: Notifier> Storefront<B, N> {
    /// Load persisted state and sync the badges once.
    pub fn open(store: DurableStore<B>, config: &StorefrontConfig, notifier: N) -> Self {
        let engine = CartEngine::load(store);
        let mut render = RenderFacade::new(config.currency_symbol.clone());
        render.sync_badges(&engine);

        Self {
            engine,
            render,
            checkout: Checkout::new(config.contact_policy.clone()),
            notifier,
        }
    }

    /// Dispatch an intent using the thread-local RNG for code issuance.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError` if a checkout intent arrives in a phase that
    /// does not accept it.
    pub fn dispatch(&mut self, intent: Intent) -> Result<Outcome, CheckoutError> {
        self.dispatch_with_rng(intent, &mut rand::rng())
    }

    /// Dispatch an intent.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError` if a checkout intent arrives in a phase that
    /// does not accept it.
    #[instrument(skip_all, fields(intent = intent.kind()))]
    pub fn dispatch_with_rng<R: Rng + ?Sized>(
        &mut self,
        intent: Intent,
        rng: &mut R,
    ) -> Result<Outcome, CheckoutError> {
        let mut wishlist = None;
        let mut checkout = None;

        let changed = match intent {
            Intent::AddToCart { id, name, price } => {
                self.engine.add_to_cart(id, name, price);
                true
            }
            Intent::AddToWishlist { id, name, price } => {
                let added = self.engine.add_to_wishlist(id.clone(), name, price);
                wishlist = Some(added);
                match added {
                    WishlistAdd::Added => {
                        self.notifier.notify(Notice::Wishlisted(id));
                        true
                    }
                    WishlistAdd::AlreadyPresent => {
                        self.notifier.notify(Notice::AlreadyWishlisted(id));
                        false
                    }
                }
            }
            Intent::ChangeQuantity { id, delta } => {
                self.engine.change_quantity(&id, delta).is_some()
            }
            Intent::Remove {
                list: ListKind::Cart,
                id,
            } => self.engine.remove_from_cart(&id),
            Intent::Remove {
                list: ListKind::Wishlist,
                id,
            } => self.engine.remove_from_wishlist(&id),
            Intent::Move { id } => self.engine.move_wish_to_cart(&id).is_some(),
            Intent::ClearCart => {
                self.engine.clear_cart();
                true
            }
            Intent::Checkout => {
                checkout = Some(self.checkout.request(&self.engine, &mut self.notifier));
                false
            }
            Intent::SubmitContact { address } => {
                checkout = Some(
                    self.checkout
                        .submit_contact(&address, rng, &mut self.notifier)?,
                );
                false
            }
            Intent::SubmitCode { code } => {
                let phase =
                    self.checkout
                        .submit_code(&code, &mut self.engine, &mut self.notifier)?;
                checkout = Some(phase);
                phase == CheckoutPhase::Committed
            }
            Intent::CancelCheckout => {
                checkout = Some(self.checkout.cancel(&mut self.notifier)?);
                false
            }
        };

        let badges = if changed {
            self.render.sync_badges(&self.engine)
        } else {
            self.render.badges()
        };

        Ok(Outcome {
            changed,
            badges,
            wishlist,
            checkout,
        })
    }

    /// Renderable cart.
    #[must_use]
    pub fn cart_snapshot(&self) -> CartView {
        self.render.render_cart_snapshot(&self.engine)
    }

    /// Renderable wishlist.
    #[must_use]
    pub fn wish_snapshot(&self) -> WishlistView {
        self.render.render_wish_snapshot(&self.engine)
    }

    /// Badge counters as last synced.
    #[must_use]
    pub const fn badges(&self) -> Badges {
        self.render.badges()
    }

    #[must_use]
    pub fn cart_total(&self) -> Price {
        self.engine.cart_total()
    }

    #[must_use]
    pub fn cart_count(&self) -> u64 {
        self.engine.cart_count()
    }

    #[must_use]
    pub fn wish_count(&self) -> usize {
        self.engine.wish_count()
    }

    #[must_use]
    pub const fn checkout_phase(&self) -> CheckoutPhase {
        self.checkout.phase()
    }

    /// Read-only access to the engine.
    #[must_use]
    pub const fn engine(&self) -> &CartEngine<B> {
        &self.engine
    }

    /// Format a price the way snapshots do.
    #[must_use]
    pub fn format_price(&self, price: Price) -> String {
        self.render.format_price(price)
    }

    #[must_use]
    pub const fn notifier(&self) -> &N {
        &self.notifier
    }

    pub const fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use shopeasy_core::ProductId;

    use super::*;
    use crate::checkout::AbortReason;
    use crate::notify::RecordingNotifier;
    use crate::store::{MemoryBackend, keys};

    fn storefront() -> (Storefront<MemoryBackend, RecordingNotifier>, MemoryBackend) {
        let backend = MemoryBackend::new();
        let storefront = Storefront::open(
            DurableStore::new(backend.clone()),
            &StorefrontConfig::default(),
            RecordingNotifier::new(),
        );
        (storefront, backend)
    }

    fn add(id: &str, price: u32) -> Intent {
        Intent::AddToCart {
            id: ProductId::new(id),
            name: format!("Item {id}"),
            price: Price::from(price),
        }
    }

    fn wish(id: &str, price: u32) -> Intent {
        Intent::AddToWishlist {
            id: ProductId::new(id),
            name: format!("Item {id}"),
            price: Price::from(price),
        }
    }

    #[test]
    fn test_add_syncs_badges() {
        let (mut sf, _) = storefront();
        let outcome = sf.dispatch(add("p-1", 250)).unwrap();
        assert!(outcome.changed);
        assert_eq!(outcome.badges.cart_count, 1);
        assert_eq!(sf.badges(), outcome.badges);
    }

    #[test]
    fn test_wishlist_feedback() {
        let (mut sf, _) = storefront();
        let first = sf.dispatch(wish("w-1", 99)).unwrap();
        let second = sf.dispatch(wish("w-1", 99)).unwrap();
        assert_eq!(first.wishlist, Some(WishlistAdd::Added));
        assert_eq!(second.wishlist, Some(WishlistAdd::AlreadyPresent));
        assert!(!second.changed);
        assert_eq!(sf.badges().wish_count, 1);
        assert_eq!(
            sf.notifier().notices(),
            [
                Notice::Wishlisted(ProductId::new("w-1")),
                Notice::AlreadyWishlisted(ProductId::new("w-1"))
            ]
        );
    }

    #[test]
    fn test_quantity_and_remove() {
        let (mut sf, backend) = storefront();
        sf.dispatch(add("p-1", 100)).unwrap();
        let outcome = sf
            .dispatch(Intent::ChangeQuantity {
                id: ProductId::new("p-1"),
                delta: 2,
            })
            .unwrap();
        assert_eq!(outcome.badges.cart_count, 3);

        let writes = backend.write_count();
        let outcome = sf
            .dispatch(Intent::Remove {
                list: ListKind::Cart,
                id: ProductId::new("ghost"),
            })
            .unwrap();
        assert!(!outcome.changed);
        assert_eq!(backend.write_count(), writes);

        let outcome = sf
            .dispatch(Intent::Remove {
                list: ListKind::Cart,
                id: ProductId::new("p-1"),
            })
            .unwrap();
        assert!(outcome.changed);
        assert_eq!(outcome.badges, Badges::default());
    }

    #[test]
    fn test_move_updates_both_badges() {
        let (mut sf, _) = storefront();
        sf.dispatch(wish("w-1", 300)).unwrap();
        let outcome = sf
            .dispatch(Intent::Move {
                id: ProductId::new("w-1"),
            })
            .unwrap();
        assert_eq!(
            outcome.badges,
            Badges {
                cart_count: 1,
                wish_count: 0
            }
        );
        assert_eq!(sf.cart_snapshot().items[0].id.as_str(), "w-1");
        assert!(sf.wish_snapshot().is_empty());
    }

    #[test]
    fn test_checkout_flow_through_dispatch() {
        let (mut sf, backend) = storefront();
        let mut rng = StdRng::seed_from_u64(99);
        sf.dispatch(add("p-1", 500)).unwrap();
        assert_eq!(sf.cart_total(), Price::from(500));

        let outcome = sf.dispatch(Intent::Checkout).unwrap();
        assert_eq!(outcome.checkout, Some(CheckoutPhase::AwaitingContact));

        sf.dispatch_with_rng(
            Intent::SubmitContact {
                address: "dev@gmail.com".to_string(),
            },
            &mut rng,
        )
        .unwrap();
        let code = sf
            .notifier()
            .notices()
            .iter()
            .find_map(|n| match n {
                Notice::CodeIssued { code, .. } => Some(code.clone()),
                _ => None,
            })
            .unwrap();

        let outcome = sf.dispatch(Intent::SubmitCode { code }).unwrap();
        assert_eq!(outcome.checkout, Some(CheckoutPhase::Committed));
        assert!(outcome.changed);
        assert_eq!(outcome.badges, Badges::default());
        assert_eq!(sf.cart_total(), Price::ZERO);
        assert_eq!(backend.get_item(keys::CART).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_checkout_empty_cart() {
        let (mut sf, _) = storefront();
        let outcome = sf.dispatch(Intent::Checkout).unwrap();
        assert_eq!(
            outcome.checkout,
            Some(CheckoutPhase::Aborted(AbortReason::EmptyCart))
        );
        assert_eq!(sf.checkout_phase(), CheckoutPhase::Aborted(AbortReason::EmptyCart));
    }

    #[test]
    fn test_out_of_order_checkout_is_error() {
        let (mut sf, _) = storefront();
        assert!(
            sf.dispatch(Intent::SubmitCode {
                code: "123456".to_string()
            })
            .is_err()
        );
        assert!(sf.dispatch(Intent::CancelCheckout).is_err());
    }

    #[test]
    fn test_open_restores_badges() {
        let backend = MemoryBackend::new();
        {
            let mut sf = Storefront::open(
                DurableStore::new(backend.clone()),
                &StorefrontConfig::default(),
                RecordingNotifier::new(),
            );
            sf.dispatch(add("p-1", 10)).unwrap();
            sf.dispatch(add("p-1", 10)).unwrap();
            sf.dispatch(wish("w-1", 10)).unwrap();
        }
        let sf = Storefront::open(
            DurableStore::new(backend),
            &StorefrontConfig::default(),
            RecordingNotifier::new(),
        );
        assert_eq!(
            sf.badges(),
            Badges {
                cart_count: 2,
                wish_count: 1
            }
        );
    }
}
