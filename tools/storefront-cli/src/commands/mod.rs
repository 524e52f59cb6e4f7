//! CLI command implementations.

pub mod checkout;
pub mod config;
pub mod products;

use std::str::FromStr;

use anyhow::{anyhow, Context as _};
use clap::{Args, Subcommand};
use storefront_commerce::ProductId;

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    /// Only list products with stock left.
    #[arg(long)]
    pub in_stock: bool,
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// Item to add, as `<product-id>[:<quantity>]`. Repeatable.
    #[arg(short, long = "item", required = true)]
    pub items: Vec<ItemSpec>,

    /// Customer name.
    #[arg(long)]
    pub name: Option<String>,

    /// Street address.
    #[arg(long)]
    pub address: Option<String>,

    /// City.
    #[arg(long)]
    pub city: Option<String>,

    /// Postal/ZIP code.
    #[arg(long)]
    pub zip: Option<String>,

    /// Country.
    #[arg(long)]
    pub country: Option<String>,

    /// Show the cart without placing the order.
    #[arg(long)]
    pub dry_run: bool,
}

/// A product ID and quantity given on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemSpec {
    pub product_id: ProductId,
    pub quantity: i64,
}

impl FromStr for ItemSpec {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (id, quantity) = match s.split_once(':') {
            Some((id, quantity)) => (id, Some(quantity)),
            None => (s, None),
        };

        let product_id = id
            .parse::<ProductId>()
            .with_context(|| format!("invalid product id '{}'", id))?;
        let quantity = match quantity {
            Some(q) => q
                .trim()
                .parse::<i64>()
                .map_err(|_| anyhow!("invalid quantity '{}'", q))?,
            None => 1,
        };

        Ok(Self {
            product_id,
            quantity,
        })
    }
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Get a config value.
    Get {
        /// Config key (dot-separated).
        key: String,
    },
    /// Set a config value.
    Set {
        /// Config key (dot-separated).
        key: String,
        /// Value to set.
        value: String,
    },
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}
