//! CLI command implementations.

pub mod config;
pub mod detail;
pub mod products;

use clap::{Args, Subcommand};

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    /// Main-category tab ("All Items" for everything).
    #[arg(short, long)]
    pub tab: Option<String>,

    /// Category to include (repeatable).
    #[arg(short = 'C', long = "category")]
    pub categories: Vec<String>,

    /// Subcategory to include (repeatable).
    #[arg(short, long = "subcategory")]
    pub subcategories: Vec<String>,

    /// Entry parameter, as in `/products?category=...`.
    #[arg(long)]
    pub param: Option<String>,

    /// "Load more" page (1-based).
    #[arg(short, long, default_value = "1")]
    pub page: usize,

    /// Show the tabs and the facets offered under the active tab.
    #[arg(long)]
    pub facets: bool,
}

/// Arguments for the detail command.
#[derive(Args)]
pub struct DetailArgs {
    /// Detail key (`<product_id>--<category_id>`, legacy keys accepted).
    pub key: Option<String>,
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
