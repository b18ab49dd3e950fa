//! ShopEasy CLI - cart, wishlist, and demo checkout from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Add a catalog product to the cart
//! shopeasy cart add tws-earbuds
//!
//! # Add something that is not in the catalog
//! shopeasy cart add gift-card --name "Gift Card" --price 250
//!
//! # Bump a quantity, then show the cart
//! shopeasy cart inc tws-earbuds
//! shopeasy cart list
//!
//! # Pay (prompts for an address and the displayed code)
//! shopeasy checkout
//!
//! # Search the catalog
//! shopeasy search watch --category electronics
//! ```
//!
//! # Commands
//!
//! - `cart` - add, list, inc, dec, remove, clear
//! - `wishlist` - add, list, remove, move
//! - `checkout` - simulated one-time-code checkout
//! - `search` - filter the catalog by name and category
//! - `account` - sign-in, sign-out, whoami
//! - `prefs` - pin, lang, show
//!
//! State lives in `SHOPEASY_DATA_DIR` (default `.shopeasy`). Logs go to
//! stderr, filtered with `RUST_LOG`; set `SHOPEASY_LOG_JSON` for JSON lines.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shopeasy_core::ProductId;
use shopeasy_storefront::StorefrontConfig;
use shopeasy_storefront::search::CategoryFilter;
use shopeasy_storefront::services::{AccountService, Preferences};

mod commands;
mod error;

use commands::{ConsoleNotifier, ProductArgs, Session};
use error::AppError;

#[derive(Parser)]
#[command(name = "shopeasy")]
#[command(author, version, about = "ShopEasy storefront from the command line")]
struct Cli {
    /// Data directory (overrides `SHOPEASY_DATA_DIR`)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Manage the wishlist
    Wishlist {
        #[command(subcommand)]
        action: WishlistAction,
    },
    /// Pay for the cart with a demo one-time code
    Checkout,
    /// Search the catalog
    Search {
        /// Text to look for in product names (empty lists everything)
        #[arg(default_value = "")]
        query: String,

        /// Category to restrict to
        #[arg(short, long, default_value = "all")]
        category: String,
    },
    /// Sign in or out
    Account {
        #[command(subcommand)]
        action: AccountAction,
    },
    /// Delivery PIN and language
    Prefs {
        #[command(subcommand)]
        action: PrefsAction,
    },
}

#[derive(clap::Args)]
struct ProductOpts {
    /// Product ID
    id: String,

    /// Display name (defaults to the catalog entry)
    #[arg(short, long)]
    name: Option<String>,

    /// Unit price (defaults to the catalog entry)
    #[arg(short, long)]
    price: Option<String>,
}

impl From<ProductOpts> for ProductArgs {
    fn from(opts: ProductOpts) -> Self {
        Self {
            id: opts.id,
            name: opts.name,
            price: opts.price,
        }
    }
}

#[derive(Subcommand)]
enum CartAction {
    /// Add one unit of a product
    Add(ProductOpts),
    /// Show cart lines and total
    List,
    /// Increase a line's quantity
    Inc {
        id: String,
        #[arg(short, long, default_value_t = 1)]
        by: u32,
    },
    /// Decrease a line's quantity (never below 1)
    Dec {
        id: String,
        #[arg(short, long, default_value_t = 1)]
        by: u32,
    },
    /// Remove a line
    Remove { id: String },
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum WishlistAction {
    /// Add a product
    Add(ProductOpts),
    /// Show the wishlist
    List,
    /// Remove an entry
    Remove { id: String },
    /// Move an entry into the cart
    Move { id: String },
}

#[derive(Subcommand)]
enum AccountAction {
    /// Sign in with an email address
    SignIn { email: String },
    /// Sign out
    SignOut,
    /// Show the current user
    Whoami,
}

#[derive(Subcommand)]
enum PrefsAction {
    /// Set the delivery PIN
    Pin { pin: String },
    /// Set the display language
    Lang { code: String },
    /// Show current preferences
    Show,
}

fn main() {
    // Defaults to info level for the storefront crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "shopeasy_storefront=info".into());

    // JSON lines when SHOPEASY_LOG_JSON is set, text otherwise; stdout is for command output
    let json = std::env::var_os("SHOPEASY_LOG_JSON").is_some();
    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(io::stderr)
    });
    let text_layer = (!json).then(|| tracing_subscriber::fmt::layer().with_writer(io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let mut config = StorefrontConfig::from_env()?;
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }
    let session = Session::open(config)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Cart { action } => {
            let mut storefront = session.storefront();
            match action {
                CartAction::Add(opts) => {
                    let product = ProductArgs::from(opts).resolve(&session.catalog()?)?;
                    commands::cart::add(&mut storefront, product, &mut out)?;
                }
                CartAction::List => commands::cart::list(&storefront, &mut out)?,
                CartAction::Inc { id, by } => {
                    let id = ProductId::new(id);
                    commands::cart::change(&mut storefront, id, i64::from(by), &mut out)?;
                }
                CartAction::Dec { id, by } => {
                    let id = ProductId::new(id);
                    commands::cart::change(&mut storefront, id, -i64::from(by), &mut out)?;
                }
                CartAction::Remove { id } => {
                    commands::cart::remove(&mut storefront, ProductId::new(id), &mut out)?;
                }
                CartAction::Clear => commands::cart::clear(&mut storefront, &mut out)?,
            }
        }
        Commands::Wishlist { action } => {
            let mut storefront = session.storefront();
            match action {
                WishlistAction::Add(opts) => {
                    let product = ProductArgs::from(opts).resolve(&session.catalog()?)?;
                    commands::wishlist::add(&mut storefront, product, &mut out)?;
                }
                WishlistAction::List => commands::wishlist::list(&storefront, &mut out)?,
                WishlistAction::Remove { id } => {
                    commands::wishlist::remove(&mut storefront, ProductId::new(id), &mut out)?;
                }
                WishlistAction::Move { id } => {
                    let id = ProductId::new(id);
                    commands::wishlist::move_to_cart(&mut storefront, id, &mut out)?;
                }
            }
        }
        Commands::Checkout => {
            let mut storefront = session.storefront();
            let domain = session.config.contact_policy.domain().to_string();
            let phase = commands::checkout::run(
                &mut storefront,
                &domain,
                &mut rand::rng(),
                &mut io::stdin().lock(),
                &mut out,
            )?;
            tracing::debug!(%phase, "Checkout finished");
        }
        Commands::Search { query, category } => {
            let Ok(filter) = category.parse::<CategoryFilter>();
            commands::search::run(
                &session.catalog()?,
                &query,
                &filter,
                &session.config.currency_symbol,
                &mut ConsoleNotifier,
                &mut out,
            )?;
        }
        Commands::Account { action } => {
            let accounts = AccountService::new(session.store.clone());
            match action {
                AccountAction::SignIn { email } => {
                    commands::account::sign_in(&accounts, &email, &mut out)?;
                }
                AccountAction::SignOut => commands::account::sign_out(&accounts, &mut out)?,
                AccountAction::Whoami => commands::account::whoami(&accounts, &mut out)?,
            }
        }
        Commands::Prefs { action } => {
            let prefs = Preferences::new(session.store.clone());
            match action {
                PrefsAction::Pin { pin } => commands::prefs::set_pin(&prefs, &pin, &mut out)?,
                PrefsAction::Lang { code } => commands::prefs::set_lang(&prefs, &code, &mut out)?,
                PrefsAction::Show => commands::prefs::show(&prefs, &mut out)?,
            }
        }
    }

    out.flush()?;
    Ok(())
}
