//! Boutique CLI - Product dataset tools.
//!
//! # Usage
//!
//! ```bash
//! # Check the product and tracking datasets
//! boutique validate
//!
//! # Run a catalog query
//! boutique catalog list --search silk --categories kaftans,party --sort price-low
//!
//! # Show one product
//! boutique catalog show 3
//!
//! # Price a cart: id[:size:color[:quantity]]
//! boutique quote --item "1:M:Navy Blue" --item "2:L:Black:2"
//!
//! # Look up a tracking record
//! boutique track ord-2024-001
//! ```
//!
//! # Environment Variables
//!
//! - `BOUTIQUE_CATALOG_PATH` - Product dataset (overridden by `--file`)
//! - `BOUTIQUE_TRACKING_PATH` - Tracking dataset (overridden by `--tracking-file`)
//! - `STOREFRONT_*` pricing variables are honoured by `quote`

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

use commands::CliError;
use commands::quote::QuoteItem;

const DEFAULT_CATALOG_PATH: &str = "crates/storefront/data/products.json";
const DEFAULT_TRACKING_PATH: &str = "crates/storefront/data/tracking.json";

#[derive(Parser)]
#[command(name = "boutique")]
#[command(author, version, about = "Boutique storefront CLI tools")]
struct Cli {
    /// Product dataset file
    #[arg(long, global = true, env = "BOUTIQUE_CATALOG_PATH", default_value = DEFAULT_CATALOG_PATH)]
    file: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the product and tracking datasets
    Validate {
        /// Tracking dataset file
        #[arg(long, env = "BOUTIQUE_TRACKING_PATH", default_value = DEFAULT_TRACKING_PATH)]
        tracking_file: PathBuf,
    },
    /// Query the product catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Price a cart with the storefront's shipping and tax rules
    Quote {
        /// Cart line as `id[:size:color[:quantity]]`; repeatable
        #[arg(short, long = "item", required = true)]
        items: Vec<QuoteItem>,
    },
    /// Look up an order in the tracking dataset
    Track {
        /// Order id (case-insensitive)
        order_id: String,

        /// Tracking dataset file
        #[arg(long, env = "BOUTIQUE_TRACKING_PATH", default_value = DEFAULT_TRACKING_PATH)]
        tracking_file: PathBuf,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List products matching a query
    List {
        /// Case-insensitive search over name and description
        #[arg(short, long, default_value = "")]
        search: String,

        /// Single category filter
        #[arg(short, long)]
        category: Option<String>,

        /// Comma-separated multi-select categories
        #[arg(long, value_delimiter = ',')]
        categories: Vec<String>,

        /// Sort order (`name`, `price-low`, `price-high`)
        #[arg(long, default_value = "name")]
        sort: String,
    },
    /// Show one product
    Show {
        /// Product id
        id: i32,
    },
}

fn main() {
    // Load .env file if present (ignore errors if not found)
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Validate { tracking_file } => commands::validate::run(&cli.file, &tracking_file),
        Commands::Catalog { action } => match action {
            CatalogAction::List {
                search,
                category,
                categories,
                sort,
            } => commands::catalog::list(&cli.file, search, category, categories, &sort),
            CatalogAction::Show { id } => commands::catalog::show(&cli.file, id),
        },
        Commands::Quote { items } => commands::quote::run(&cli.file, &items),
        Commands::Track {
            order_id,
            tracking_file,
        } => commands::track::run(&tracking_file, &order_id),
    }
}
