//! `.dealerlot.toml` configuration.

mod core;
mod loader;
pub mod validation;

pub use core::{DealerlotConfig, RangeConfig, StorefrontConfig};

pub use loader::{
    directory_ancestors, discover_config, load_config, load_config_from,
    parse_and_validate_config, resolve_config, CONFIG_FILE_NAME,
};

pub use validation::validate_config;
