//! My Shop CLI - Cart and wishlist management from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Add two units of a product
//! shop-cli cart add --id 1 --name "Smart Watch" --price 1990 --qty 2
//!
//! # Change a quantity (0 or less removes the line)
//! shop-cli cart update --id 1 --qty 3
//!
//! # Show the cart with totals
//! shop-cli cart show
//!
//! # Save or unsave a product (IDs may be integers or strings; quote to force a string)
//! shop-cli wishlist toggle --id 4 --name Sneakers --price 1290 --attr category=Fashion
//! shop-cli wishlist toggle --id sku-77 --name Mug --price 9.50
//! ```
//!
//! # Commands
//!
//! - `cart` - Show, add, remove, update, clear, or export the cart
//! - `wishlist` - Show, toggle, check, or remove wishlist entries

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use my_shop_cart::{CartEvent, CartStore, FileStore};
use my_shop_core::{Price, ProductId};

mod commands;
mod config;

use config::CliConfig;

#[derive(Parser)]
#[command(name = "shop-cli")]
#[command(author, version, about = "My Shop cart and wishlist tools")]
struct Cli {
    /// Storage file (overrides `MY_SHOP_STORE_PATH`)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

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
}

#[derive(Subcommand)]
enum CartAction {
    /// Show line items and totals
    Show,
    /// Add units of a product
    Add {
        #[command(flatten)]
        product: ProductArgs,

        /// Units to add
        #[arg(short, long, default_value_t = 1)]
        qty: u32,
    },
    /// Remove a product's line
    Remove {
        /// Product ID
        #[arg(long)]
        id: ProductId,
    },
    /// Set a line's quantity (0 or less removes it)
    Update {
        /// Product ID
        #[arg(long)]
        id: ProductId,

        /// New quantity
        #[arg(short, long, allow_negative_numbers = true)]
        qty: i64,
    },
    /// Remove every line
    Clear,
    /// Print the cart as JSON
    Export,
}

#[derive(Subcommand)]
enum WishlistAction {
    /// Show saved products
    Show,
    /// Save a product, or unsave it if already saved
    Toggle {
        #[command(flatten)]
        product: ProductArgs,
    },
    /// Check whether a product is saved
    Check {
        /// Product ID
        #[arg(long)]
        id: ProductId,
    },
    /// Unsave a product
    Remove {
        /// Product ID
        #[arg(long)]
        id: ProductId,
    },
}

/// Product fields shared by commands that take a whole product.
#[derive(Args)]
struct ProductArgs {
    /// Product ID
    #[arg(long)]
    id: ProductId,

    /// Display name
    #[arg(short, long)]
    name: String,

    /// Unit price
    #[arg(short, long)]
    price: Price,

    /// Extra display attribute as `key=value` (repeatable)
    #[arg(long = "attr", value_parser = commands::parse_attribute)]
    attributes: Vec<(String, serde_json::Value)>,
}

fn main() {
    // Initialize tracing on stderr so command output stays clean
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "my_shop=info,shop_cli=info".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::from_env()?.with_store_path(cli.store);
    tracing::debug!(path = %config.store_path.display(), "Using storage file");

    let mut store = CartStore::with_keys(FileStore::new(&config.store_path), config.keys);
    store.subscribe(|event: &CartEvent| {
        if let CartEvent::TotalQtyChanged { total_qty } = event {
            tracing::info!(total_qty, "Cart badge updated");
        }
    });
    store.init()?;

    match cli.command {
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&store)?,
            CartAction::Add { product, qty } => {
                commands::cart::add(&mut store, product.into_product(), qty)?;
            }
            CartAction::Remove { id } => commands::cart::remove(&mut store, id)?,
            CartAction::Update { id, qty } => commands::cart::update(&mut store, id, qty)?,
            CartAction::Clear => commands::cart::clear(&mut store)?,
            CartAction::Export => commands::cart::export(&store)?,
        },
        Commands::Wishlist { action } => match action {
            WishlistAction::Show => commands::wishlist::show(&store)?,
            WishlistAction::Toggle { product } => {
                commands::wishlist::toggle(&mut store, product.into_product())?;
            }
            WishlistAction::Check { id } => commands::wishlist::check(&store, id)?,
            WishlistAction::Remove { id } => commands::wishlist::remove(&mut store, id)?,
        },
    }
    Ok(())
}

impl ProductArgs {
    fn into_product(self) -> my_shop_core::Product {
        self.attributes.into_iter().fold(
            my_shop_core::Product::new(self.id, self.name, self.price),
            |product, (key, value)| product.with_attribute(key, value),
        )
    }
}
