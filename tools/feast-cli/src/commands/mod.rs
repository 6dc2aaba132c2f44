//! CLI command implementations.

pub mod config;
pub mod menu;
pub mod order;
pub mod quote;
pub mod reserve;
pub mod restaurants;
pub mod search;

use anyhow::{bail, Context as _, Result};
use clap::{Args, Subcommand};
use feast_commerce::cart::FulfillmentMode;
use feast_commerce::search::SortOption;

/// Arguments for the restaurants command.
#[derive(Args, Debug)]
pub struct RestaurantsArgs {
    /// Sort order (rating, delivery-time, delivery-fee, name).
    #[arg(short, long, default_value = "rating")]
    pub sort: SortOption,
}

/// Arguments for the menu command.
#[derive(Args, Debug)]
pub struct MenuArgs {
    /// Restaurant id.
    pub restaurant: String,

    /// Show only popular items.
    #[arg(long)]
    pub popular: bool,
}

/// Arguments for the search command.
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Free-text query over name and cuisine.
    #[arg(short, long)]
    pub query: Option<String>,

    /// Cuisine to include (repeatable).
    #[arg(long = "cuisine")]
    pub cuisines: Vec<String>,

    /// Lowest price level (1-4).
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=4))]
    pub min_price: Option<u8>,

    /// Highest price level (1-4).
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=4))]
    pub max_price: Option<u8>,

    /// Minimum rating.
    #[arg(long)]
    pub min_rating: Option<f64>,

    /// Sort order (rating, delivery-time, delivery-fee, name).
    #[arg(short, long, default_value = "rating")]
    pub sort: SortOption,

    /// Show at most N results.
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Arguments shared by quote and order.
#[derive(Args, Debug)]
pub struct QuoteArgs {
    /// Restaurant id.
    #[arg(short, long)]
    pub restaurant: String,

    /// Menu item, optionally with quantity (`pizza-margherita=2`).
    #[arg(short, long = "item", required = true)]
    pub items: Vec<String>,

    /// Delivery or pickup.
    #[arg(short, long, default_value = "delivery")]
    pub mode: FulfillmentMode,

    /// Promo code to apply.
    #[arg(short, long)]
    pub promo: Option<String>,
}

/// Arguments for the order command.
#[derive(Args, Debug)]
pub struct OrderArgs {
    #[command(flatten)]
    pub quote: QuoteArgs,

    #[arg(long)]
    pub first_name: String,

    #[arg(long)]
    pub last_name: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub phone: String,

    /// Street address (delivery only).
    #[arg(long)]
    pub address: Option<String>,

    /// Postal code (delivery only).
    #[arg(long)]
    pub zip: Option<String>,

    /// City (delivery only).
    #[arg(long)]
    pub city: Option<String>,

    /// Notes for the kitchen or driver.
    #[arg(long)]
    pub notes: Option<String>,

    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the reserve command.
#[derive(Args, Debug)]
pub struct ReserveArgs {
    /// Restaurant id.
    #[arg(short, long)]
    pub restaurant: String,

    /// Date (YYYY-MM-DD).
    #[arg(short, long)]
    pub date: String,

    /// Time slot (HH:MM, 17:00-22:00 every 30 minutes).
    #[arg(short, long)]
    pub time: String,

    /// Number of guests.
    #[arg(short, long, default_value = "2")]
    pub guests: u8,

    /// Name for the booking.
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub phone: String,

    /// Special requests.
    #[arg(long)]
    pub notes: Option<String>,
}

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Catalog file the config should point to.
        #[arg(long, default_value = "catalog.toml")]
        catalog: String,

        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file and catalog.
    Validate,
}

/// Parse `product-id` or `product-id=quantity`. Ids are matched as written.
pub fn parse_item_spec(spec: &str) -> Result<(String, i64)> {
    let (id, quantity) = match spec.split_once('=') {
        Some((id, quantity)) => {
            let quantity: i64 = quantity
                .trim()
                .parse()
                .with_context(|| format!("Invalid quantity in item '{}'", spec))?;
            (id.trim(), quantity)
        }
        None => (spec.trim(), 1),
    };

    if id.is_empty() {
        bail!("Missing product id in item '{}'", spec);
    }
    if quantity < 1 {
        bail!("Quantity must be at least 1 in item '{}'", spec);
    }
    Ok((id.to_string(), quantity))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_item_spec() {
        assert_eq!(
            parse_item_spec("pizza-margherita").unwrap(),
            ("pizza-margherita".to_string(), 1)
        );
        assert_eq!(
            parse_item_spec(" Pizza-1 = 3").unwrap(),
            ("Pizza-1".to_string(), 3)
        );
        assert!(parse_item_spec("=2").is_err());
        assert!(parse_item_spec("tiramisu=0").is_err());
        assert!(parse_item_spec("tiramisu=lots").is_err());
    }
}
