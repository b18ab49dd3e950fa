//! User intents accepted by the [`Storefront`](crate::state::Storefront).

use std::fmt;
use std::str::FromStr;

use shopeasy_core::{Price, ProductId};

use crate::cart::WishlistAdd;
use crate::checkout::CheckoutPhase;
use crate::render::Badges;

/// Which list a removal targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    Cart,
    Wishlist,
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Cart => "cart",
            Self::Wishlist => "wishlist",
        })
    }
}

impl FromStr for ListKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cart" => Ok(Self::Cart),
            "wishlist" | "wish" => Ok(Self::Wishlist),
            other => Err(format!("unknown list: {other}")),
        }
    }
}

/// A user action routed to the cart engine or the checkout machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    AddToCart {
        id: ProductId,
        name: String,
        price: Price,
    },
    AddToWishlist {
        id: ProductId,
        name: String,
        price: Price,
    },
    ChangeQuantity {
        id: ProductId,
        delta: i64,
    },
    Remove {
        list: ListKind,
        id: ProductId,
    },
    /// Move a wishlist entry into the cart.
    Move {
        id: ProductId,
    },
    ClearCart,
    Checkout,
    SubmitContact {
        address: String,
    },
    SubmitCode {
        code: String,
    },
    CancelCheckout,
}

impl Intent {
    /// Short name for logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::AddToCart { .. } => "add_to_cart",
            Self::AddToWishlist { .. } => "add_to_wishlist",
            Self::ChangeQuantity { .. } => "change_quantity",
            Self::Remove { .. } => "remove",
            Self::Move { .. } => "move",
            Self::ClearCart => "clear_cart",
            Self::Checkout => "checkout",
            Self::SubmitContact { .. } => "submit_contact",
            Self::SubmitCode { .. } => "submit_code",
            Self::CancelCheckout => "cancel_checkout",
        }
    }
}

/// What a dispatched intent did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    /// Whether cart or wishlist state changed.
    pub changed: bool,
    /// Badges after the intent (re-synced when `changed`).
    pub badges: Badges,
    /// Set for [`Intent::AddToWishlist`].
    pub wishlist: Option<WishlistAdd>,
    /// Set for checkout intents.
    pub checkout: Option<CheckoutPhase>,
}
