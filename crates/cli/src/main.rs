//! Driftwear CLI - Inspect and edit persisted carts and wishlists.
//!
//! # Usage
//!
//! ```bash
//! # Show the cart with totals
//! dw-cli cart show
//!
//! # Add two hoodies in size L
//! dw-cli cart add H1 --name "Box Logo Hoodie" --price 89.50 --stock 4 --qty 2 --size L
//!
//! # Change or remove a line
//! dw-cli cart set H1 3 --size L
//! dw-cli cart remove H1 --size L
//!
//! # Save a product to the wishlist
//! dw-cli wishlist add P9 --name "Cargo Pants" --price 64 --category bottoms
//!
//! # Use a different storage directory and machine-readable output
//! dw-cli --dir /tmp/session --json cart show
//! ```
//!
//! # Commands
//!
//! - `cart` - `show`, `add`, `set`, `remove`, `clear`
//! - `wishlist` - `show`, `add`, `remove`, `contains`, `clear`

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use driftwear_storefront::storage::FileStorage;
use driftwear_storefront::telemetry::{LogFormat, init_tracing};
use driftwear_storefront::{StoreConfig, StorefrontSession};

mod commands;

use commands::cart::AddItemArgs;
use commands::wishlist::SaveEntryArgs;
use commands::{CommandError, OutputMode};

#[derive(Parser)]
#[command(name = "dw-cli")]
#[command(author, version, about = "Driftwear cart and wishlist tools")]
struct Cli {
    /// Storage directory (overrides `DRIFTWEAR_STORAGE_DIR`)
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Print JSON instead of a table
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect or edit the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Inspect or edit the wishlist
    Wishlist {
        #[command(subcommand)]
        action: WishlistAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show lines and totals
    Show,
    /// Add a product variant
    Add(AddItemArgs),
    /// Set the quantity of a line (0 or less removes it)
    Set {
        product_id: String,

        #[arg(allow_negative_numbers = true)]
        qty: i64,

        #[arg(long)]
        size: Option<String>,

        #[arg(long)]
        color: Option<String>,
    },
    /// Remove a line
    Remove {
        product_id: String,

        #[arg(long)]
        size: Option<String>,

        #[arg(long)]
        color: Option<String>,
    },
    /// Remove every line
    Clear,
}

#[derive(Subcommand)]
enum WishlistAction {
    /// List saved products
    Show,
    /// Save a product
    Add(SaveEntryArgs),
    /// Remove a saved product
    Remove { id: String },
    /// Check whether a product is saved
    Contains { id: String },
    /// Remove every saved product
    Clear,
}

fn main() {
    let cli = Cli::parse();

    let config = match StoreConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing(LogFormat::default());
            tracing::error!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };
    init_tracing(config.log_format);

    match run(cli, config) {
        Ok(output) => emit(&output),
        Err(e) => {
            tracing::error!("Command failed: {e}");
            std::process::exit(1);
        }
    }
}

#[allow(clippy::print_stdout)]
fn emit(output: &str) {
    println!("{output}");
}

fn run(cli: Cli, mut config: StoreConfig) -> Result<String, CommandError> {
    if let Some(dir) = cli.dir {
        config.storage_dir = dir;
    }
    let mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Table
    };

    let storage = Arc::new(FileStorage::new(config.storage_dir.clone()));
    tracing::debug!(dir = %storage.base_dir().display(), "Using file storage");
    let mut session = StorefrontSession::open(storage, &config);

    match cli.command {
        Commands::Cart { action } => {
            let cart = session.cart_mut();
            match action {
                CartAction::Show => commands::cart::show(cart, config.currency, mode),
                CartAction::Add(args) => {
                    let qty = args.qty;
                    Ok(commands::cart::add(cart, args.into(), qty))
                }
                CartAction::Set {
                    product_id,
                    qty,
                    size,
                    color,
                } => Ok(commands::cart::set(
                    cart,
                    &product_id.into(),
                    qty,
                    size.as_deref(),
                    color.as_deref(),
                )),
                CartAction::Remove {
                    product_id,
                    size,
                    color,
                } => Ok(commands::cart::remove(
                    cart,
                    &product_id.into(),
                    size.as_deref(),
                    color.as_deref(),
                )),
                CartAction::Clear => Ok(commands::cart::clear(cart)),
            }
        }
        Commands::Wishlist { action } => {
            let wishlist = session.wishlist_mut();
            match action {
                WishlistAction::Show => commands::wishlist::show(wishlist, config.currency, mode),
                WishlistAction::Add(args) => Ok(commands::wishlist::add(wishlist, args.into())),
                WishlistAction::Remove { id } => {
                    Ok(commands::wishlist::remove(wishlist, &id.into()))
                }
                WishlistAction::Contains { id } => {
                    Ok(commands::wishlist::contains(wishlist, &id.into()))
                }
                WishlistAction::Clear => Ok(commands::wishlist::clear(wishlist)),
            }
        }
    }
}
