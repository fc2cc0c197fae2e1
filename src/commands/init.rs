use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::CONFIG_FILE_NAME;

/// Commented copy of the built-in defaults.
pub const DEFAULT_CONFIG: &str = r#"# Dealerlot Configuration

[storefront]
# Cars revealed per "load more"
page_size = 8
# Days a car keeps the new-arrival badge
new_arrival_days = 7

[price]
min = 0
max = 30000
step = 500
presets = [
    { label = "Under $10k", min = 0, max = 10000 },
    { label = "10–15k", min = 10000, max = 15000 },
    { label = "15–20k", min = 15000, max = 20000 },
    { label = "Under $20k", min = 0, max = 20000 },
]

[mileage]
min = 0
max = 250000
step = 5000
presets = [
    { label = "Under 60k", min = 0, max = 60000 },
    { label = "60–90k", min = 60000, max = 90000 },
    { label = "90–120k", min = 90000, max = 120000 },
    { label = "Over 120k", min = 120000 },
]

[financing]
default_price = 20000.0
default_down = 2000.0
default_apr = 8.49
default_term = 60
default_tier = "good"
terms = [36, 48, 60, 72]
# Share of a vehicle's price prefilled as the down payment
down_payment_ratio = 0.1

[[financing.tiers]]
id = "rebuild"
label = "Rebuilding"
score_max = 639
apr = 12.99

[[financing.tiers]]
id = "fair"
label = "Fair"
score_min = 641
score_max = 699
apr = 10.49

[[financing.tiers]]
id = "good"
label = "Good"
score_min = 700
score_max = 749
apr = 8.49

[[financing.tiers]]
id = "excel"
label = "Excellent"
score_min = 750
score_max = 850
apr = 7.49
"#;

/// Write the default config into `dir`.
pub fn write_default_config(dir: &Path, force: bool) -> Result<PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    Ok(config_path)
}

pub fn init_config(force: bool) -> Result<()> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    write_default_config(&cwd, force)?;
    println!("Created {} configuration file", CONFIG_FILE_NAME);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{load_config_from, DealerlotConfig};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_matches_builtin_defaults() {
        let config: DealerlotConfig = toml::from_str(DEFAULT_CONFIG).unwrap();
        let defaults = DealerlotConfig::default();
        assert_eq!(config.storefront, defaults.storefront);
        assert_eq!(config.financing, defaults.financing);
        assert_eq!(config.price_domain(), defaults.price_domain());
        assert_eq!(config.price_presets(), defaults.price_presets());
        assert_eq!(config.mileage_domain(), defaults.mileage_domain());
        assert_eq!(config.mileage_presets(), defaults.mileage_presets());
    }

    #[test]
    fn test_write_default_config_refuses_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = write_default_config(dir.path(), false).unwrap();
        assert!(load_config_from(&path).is_ok());

        let err = write_default_config(dir.path(), false).unwrap_err();
        assert!(err.to_string().contains("--force"));
        assert!(write_default_config(dir.path(), true).is_ok());
    }
}
