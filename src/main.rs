use anyhow::Result;
use clap::Parser;
use dealerlot::cli::{Cli, Commands};
use dealerlot::commands::{BrowseConfig, EstimateConfig, SitemapConfig};
use dealerlot::formatting::{ColoredFormatter, FormattingConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbosity);

    match cli.command {
        Commands::Browse {
            snapshot,
            query,
            make,
            body_type,
            price_min,
            price_max,
            miles_min,
            miles_max,
            mileage_step,
            sort,
            pages,
            format,
            config,
            plain,
        } => dealerlot::commands::handle_browse(BrowseConfig {
            snapshot,
            query,
            make,
            body_type,
            price: (price_min, price_max),
            miles: (miles_min, miles_max),
            mileage_step,
            sort,
            pages,
            format,
            config,
            formatting: create_formatting_config(plain),
        }),
        Commands::Estimate {
            price,
            down,
            apr,
            term,
            tier,
            format,
            config,
        } => {
            let formatter = ColoredFormatter::new(FormattingConfig::from_env());
            dealerlot::commands::handle_estimate(
                EstimateConfig {
                    price,
                    down,
                    apr,
                    term,
                    tier,
                    format: Some(format),
                    config,
                },
                &formatter,
            )
        }
        Commands::Slug { snapshot } => dealerlot::commands::print_slugs(&snapshot),
        Commands::Sitemap {
            snapshot,
            base_url,
            output,
        } => dealerlot::commands::handle_sitemap(SitemapConfig {
            snapshot,
            base_url,
            output,
        }),
        Commands::Init { force } => dealerlot::commands::init_config(force),
    }
}

// RUST_LOG wins; otherwise -v/-vv raise the crate's level. Logs go to stderr
// so JSON output stays clean.
fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("dealerlot={level}")));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

fn create_formatting_config(plain: bool) -> FormattingConfig {
    if plain {
        FormattingConfig::plain()
    } else {
        FormattingConfig::from_env()
    }
}
