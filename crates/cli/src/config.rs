//! CLI configuration module

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use storefront::catalog::{ALL_CATEGORIES, DEFAULT_PAGE_SIZE, SortKey};

use crate::request::CartRequest;

/// Storefront command-line configuration
#[derive(Debug, Parser)]
#[command(name = "storefront", about = "Browse the catalog, fill a cart and place orders", long_about = None)]
pub struct Config {
    /// Fixture base directory
    #[arg(long, env = "STOREFRONT_FIXTURES", default_value = "./fixtures", global = true)]
    pub fixtures: PathBuf,

    /// Product fixture set to load as the static catalog
    #[arg(long, env = "STOREFRONT_CATALOG", default_value = "supplements", global = true)]
    pub catalog: String,

    /// Products per catalog page
    #[arg(long, env = "STOREFRONT_PAGE_SIZE", default_value_t = DEFAULT_PAGE_SIZE, global = true)]
    pub page_size: usize,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "info", global = true)]
    pub log_level: String,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print one page of the catalog
    Browse {
        /// Case-insensitive search over name and description
        #[arg(short, long, default_value = "")]
        search: String,

        /// Category to show, or "all"
        #[arg(short, long, default_value = ALL_CATEGORIES)]
        category: String,

        /// Sort order (featured, price-low, price-high, rating)
        #[arg(long, default_value = "featured")]
        sort: SortKey,

        /// Page number, starting at 1
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },

    /// List the category filter choices
    Categories,

    /// Build a cart and print it
    Cart {
        /// Cart contents
        #[command(flatten)]
        cart: CartArgs,

        /// Write the resulting cart to this YAML file
        #[arg(long)]
        save: Option<PathBuf>,
    },

    /// Build a cart and place an order for it
    Checkout {
        /// Cart contents
        #[command(flatten)]
        cart: CartArgs,

        /// Recipient's full name
        #[arg(long)]
        name: String,

        /// Contact phone number
        #[arg(long)]
        phone: String,

        /// Delivery address
        #[arg(long)]
        address: String,

        /// Signed-in account id; omit to order as a guest
        #[arg(long)]
        uid: Option<String>,

        /// Signed-in account email
        #[arg(long, requires = "uid")]
        email: Option<String>,
    },
}

/// Arguments shared by the cart-building subcommands
#[derive(Debug, Args)]
pub struct CartArgs {
    /// Item to add, as `ID[:FLAVOR[:SIZE]][*QTY]`; repeatable
    #[arg(short, long = "add", value_name = "ITEM")]
    pub add: Vec<CartRequest>,

    /// Start from a cart previously written with `--save`
    #[arg(long)]
    pub load: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}
