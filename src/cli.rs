use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::refine::SortKey;

#[derive(Parser, Debug)]
#[command(name = "dealerlot")]
#[command(about = "Used-car inventory browser and payment estimator", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v: debug, -vv: trace). RUST_LOG overrides.
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Filter, sort and page through an inventory snapshot
    Browse {
        /// JSON snapshot of vehicle rows
        snapshot: PathBuf,

        /// Free-text search over year, make, model and features
        #[arg(short, long)]
        query: Option<String>,

        /// Exact make
        #[arg(long)]
        make: Option<String>,

        /// Exact body type
        #[arg(long = "body-type")]
        body_type: Option<String>,

        /// Lowest price in dollars
        #[arg(long = "price-min")]
        price_min: Option<u64>,

        /// Highest price in dollars
        #[arg(long = "price-max")]
        price_max: Option<u64>,

        /// Lowest odometer reading
        #[arg(long = "miles-min")]
        miles_min: Option<u64>,

        /// Highest odometer reading
        #[arg(long = "miles-max")]
        miles_max: Option<u64>,

        /// Mileage bucket label ("< 60k", "60-90k", "90-120k", "> 120k")
        #[arg(long = "mileage-step", conflicts_with_all = ["miles_min", "miles_max"])]
        mileage_step: Option<String>,

        /// Sort order
        #[arg(short, long, default_value = "featured")]
        sort: SortKey,

        /// Pages to reveal (as if "load more" was pressed pages-1 times)
        #[arg(long, default_value = "1")]
        pages: usize,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Configuration file (defaults to the nearest .dealerlot.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Plain output without colors or emoji
        #[arg(long)]
        plain: bool,
    },

    /// Estimate a monthly loan payment
    Estimate {
        /// Vehicle price in dollars
        #[arg(long)]
        price: Option<String>,

        /// Down payment in dollars
        #[arg(long)]
        down: Option<String>,

        /// Annual percentage rate
        #[arg(long)]
        apr: Option<String>,

        /// Loan term in months
        #[arg(long)]
        term: Option<u32>,

        /// Credit tier id (overrides the APR default, not --apr)
        #[arg(long)]
        tier: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Configuration file (defaults to the nearest .dealerlot.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print the detail-page slug of every vehicle in a snapshot
    Slug {
        /// JSON snapshot of vehicle rows
        snapshot: PathBuf,
    },

    /// Render sitemap.xml for the homepage and every unsold listing
    Sitemap {
        /// JSON snapshot of vehicle rows
        snapshot: PathBuf,

        /// Site root the listing URLs hang off
        #[arg(long = "base-url")]
        base_url: String,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Initialize configuration file
    Init {
        /// Overwrite existing config file
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Terminal,
}
