//! Feast CLI - Browse restaurants, order food, and book tables.
//!
//! Commands:
//! - `feast restaurants` - List the catalog
//! - `feast menu` - Show a restaurant's menu
//! - `feast search` - Filter and sort restaurants
//! - `feast quote` - Price a cart
//! - `feast order` - Place an order
//! - `feast reserve` - Book a table
//! - `feast config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{
    ConfigArgs, MenuArgs, OrderArgs, QuoteArgs, ReserveArgs, RestaurantsArgs, SearchArgs,
};

/// Feast CLI - Order food and book tables
#[derive(Parser, Debug)]
#[command(name = "feast")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List restaurants
    Restaurants(RestaurantsArgs),

    /// Show a restaurant's menu
    Menu(MenuArgs),

    /// Search restaurants
    Search(SearchArgs),

    /// Price a cart without ordering
    Quote(QuoteArgs),

    /// Place an order
    Order(OrderArgs),

    /// Book a table
    Reserve(ReserveArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = match context::Context::load(config_path, output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    let log_config = if cli.verbose {
        ctx.config.logging.clone().verbose()
    } else {
        ctx.config.logging.clone()
    };
    if let Err(e) = feast_observability::init_logging(&log_config) {
        ctx.output.warn(&e.to_string());
    }
    tracing::debug!(command = ?cli.command, "starting");

    // Execute command
    let result = match cli.command {
        Commands::Restaurants(args) => commands::restaurants::run(args, &ctx).await,
        Commands::Menu(args) => commands::menu::run(args, &ctx).await,
        Commands::Search(args) => commands::search::run(args, &ctx).await,
        Commands::Quote(args) => commands::quote::run(args, &ctx).await,
        Commands::Order(args) => commands::order::run(args, &ctx).await,
        Commands::Reserve(args) => commands::reserve::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use feast_commerce::cart::FulfillmentMode;
    use feast_commerce::search::SortOption;

    #[test]
    fn test_quote_args() {
        let cli = Cli::try_parse_from([
            "feast",
            "quote",
            "--restaurant",
            "bella-vista",
            "--item",
            "pizza-margherita=2",
            "-i",
            "spaghetti-carbonara",
            "--promo",
            "welcome10",
        ])
        .unwrap();

        let Commands::Quote(args) = cli.command else {
            panic!("expected quote command");
        };
        assert_eq!(args.restaurant, "bella-vista");
        assert_eq!(args.items, vec!["pizza-margherita=2", "spaghetti-carbonara"]);
        assert_eq!(args.mode, FulfillmentMode::Delivery);
        assert_eq!(args.promo.as_deref(), Some("welcome10"));
    }

    #[test]
    fn test_quote_requires_items() {
        assert!(Cli::try_parse_from(["feast", "quote", "-r", "bella-vista"]).is_err());
    }

    #[test]
    fn test_order_args_with_global_flags() {
        let cli = Cli::try_parse_from([
            "feast",
            "order",
            "-r",
            "bella-vista",
            "-i",
            "tiramisu",
            "--mode",
            "pickup",
            "--first-name",
            "Anna",
            "--last-name",
            "Schmidt",
            "--email",
            "anna@example.com",
            "--phone",
            "0176",
            "--yes",
            "--json",
        ])
        .unwrap();

        assert!(cli.json);
        let Commands::Order(args) = cli.command else {
            panic!("expected order command");
        };
        assert_eq!(args.quote.mode, FulfillmentMode::Pickup);
        assert!(args.yes);
        assert!(args.address.is_none());
    }

    #[test]
    fn test_search_args() {
        let cli = Cli::try_parse_from([
            "feast",
            "search",
            "--cuisine",
            "Italienisch",
            "--cuisine",
            "Japanisch",
            "--max-price",
            "3",
            "--sort",
            "delivery-time",
        ])
        .unwrap();

        let Commands::Search(args) = cli.command else {
            panic!("expected search command");
        };
        assert_eq!(args.cuisines.len(), 2);
        assert_eq!(args.sort, SortOption::DeliveryTime);

        let query = commands::search::build_query(&args);
        assert_eq!(query.filters.len(), 2);
    }

    #[test]
    fn test_search_rejects_price_out_of_range() {
        assert!(Cli::try_parse_from(["feast", "search", "--min-price", "5"]).is_err());
    }

    #[test]
    fn test_reserve_args() {
        let cli = Cli::try_parse_from([
            "feast",
            "reserve",
            "-r",
            "bella-vista",
            "-d",
            "2024-06-14",
            "-t",
            "19:30",
            "--name",
            "Lena Huber",
            "--email",
            "lena@example.com",
            "--phone",
            "0151",
        ])
        .unwrap();

        let Commands::Reserve(args) = cli.command else {
            panic!("expected reserve command");
        };
        assert_eq!(args.guests, 2);
    }
}
