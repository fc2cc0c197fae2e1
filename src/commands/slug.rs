use anyhow::{Context, Result};
use chrono::Utc;
use std::path::Path;

use crate::config::load_config;
use crate::inventory::{load_inventory, slugify, Vehicle};

/// `slug<TAB>title`, one line per vehicle in storefront order.
pub fn slug_lines(vehicles: &[Vehicle]) -> Vec<String> {
    vehicles
        .iter()
        .map(|v| format!("{}\t{}", slugify(v), v.title()))
        .collect()
}

pub fn print_slugs(snapshot: &Path) -> Result<()> {
    let settings = load_config();
    let vehicles = load_inventory(snapshot, Utc::now(), settings.new_arrival_days())
        .with_context(|| format!("Failed to load {}", snapshot.display()))?;
    for line in slug_lines(&vehicles) {
        println!("{line}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_lines() {
        let vehicles = vec![
            Vehicle::new(7, 2014, "Mazda", "CX-5 Touring"),
            Vehicle::new(8, 2019, "Ram", "1500"),
        ];
        assert_eq!(
            slug_lines(&vehicles),
            vec![
                "2014-mazda-cx-5-touring-7\t2014 Mazda CX-5 Touring".to_string(),
                "2019-ram-1500-8\t2019 Ram 1500".to_string(),
            ]
        );
    }
}
