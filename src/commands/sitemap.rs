//! `dealerlot sitemap`: sitemap.xml for the homepage and every listing.

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::load_config;
use crate::inventory::{load_inventory, slugify, Vehicle, VehicleStatus};

const HOMEPAGE_PRIORITY: &str = "1.0";
const LISTING_PRIORITY: &str = "0.8";

#[derive(Debug, Clone)]
pub struct SitemapConfig {
    pub snapshot: PathBuf,
    /// Site root, e.g. `https://example.com`. A trailing slash is optional.
    pub base_url: String,
    /// Write here instead of stdout.
    pub output: Option<PathBuf>,
}

pub fn handle_sitemap(config: SitemapConfig) -> Result<()> {
    let settings = load_config();
    let now = Utc::now();
    let vehicles = load_inventory(&config.snapshot, now, settings.new_arrival_days())
        .with_context(|| format!("Failed to load {}", config.snapshot.display()))?;

    let xml = render_sitemap(&config.base_url, &vehicles, now.date_naive());
    match &config.output {
        Some(path) => write_sitemap(path, &xml),
        None => {
            print!("{xml}");
            Ok(())
        }
    }
}

fn write_sitemap(path: &Path, xml: &str) -> Result<()> {
    fs::write(path, xml).with_context(|| format!("Failed to write {}", path.display()))?;
    let count = xml.matches("<url>").count();
    eprintln!("Sitemap written with {} URLs.", count);
    Ok(())
}

/// Homepage first, then one `/inventory/<slug>` entry per vehicle that is
/// still for sale. Sold listings are left out.
pub fn render_sitemap(base_url: &str, vehicles: &[Vehicle], lastmod: NaiveDate) -> String {
    let root = base_url.trim_end_matches('/');
    let lastmod = lastmod.format("%Y-%m-%d").to_string();

    let mut entries = vec![url_entry(&format!("{root}/"), &lastmod, HOMEPAGE_PRIORITY)];
    entries.extend(
        vehicles
            .iter()
            .filter(|v| v.status != VehicleStatus::Sold)
            .map(|v| {
                let loc = format!("{root}/inventory/{}", slugify(v));
                url_entry(&loc, &lastmod, LISTING_PRIORITY)
            }),
    );

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n\
         {}\n\
         </urlset>\n",
        entries.join("\n")
    )
}

fn url_entry(loc: &str, lastmod: &str, priority: &str) -> String {
    format!(
        "  <url>\n    <loc>{}</loc>\n    <lastmod>{}</lastmod>\n    <changefreq>daily</changefreq>\n    <priority>{}</priority>\n  </url>",
        escape_xml(loc),
        lastmod,
        priority
    )
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, 10).unwrap()
    }

    #[test]
    fn test_sold_listings_are_skipped() {
        let vehicles = vec![
            Vehicle::new(1, 2016, "Toyota", "Camry SE"),
            Vehicle::new(2, 2012, "Ford", "Escape").with_status(VehicleStatus::Sold),
            Vehicle::new(3, 2015, "Honda", "Accord").with_status(VehicleStatus::Pending),
        ];
        let xml = render_sitemap("https://lot.example/", &vehicles, day());

        assert!(xml.contains("<loc>https://lot.example/</loc>"));
        assert!(xml.contains("<loc>https://lot.example/inventory/2016-toyota-camry-se-1</loc>"));
        assert!(xml.contains("<loc>https://lot.example/inventory/2015-honda-accord-3</loc>"));
        assert!(!xml.contains("escape"));
        assert_eq!(xml.matches("<url>").count(), 3);
    }

    #[test]
    fn test_entry_layout() {
        let xml = render_sitemap("https://lot.example", &[], day());
        assert_eq!(
            xml,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n  \
             <url>\n    \
             <loc>https://lot.example/</loc>\n    \
             <lastmod>2025-09-10</lastmod>\n    \
             <changefreq>daily</changefreq>\n    \
             <priority>1.0</priority>\n  \
             </url>\n\
             </urlset>\n"
        );
    }

    #[test]
    fn test_listing_priority_and_escaping() {
        let vehicles = vec![Vehicle::new(5, 2018, "Jeep", "Wrangler")];
        let xml = render_sitemap("https://lot.example/?a=1&b=2", &vehicles, day());
        assert!(xml.contains("https://lot.example/?a=1&amp;b=2/"));
        assert!(xml.contains("<priority>0.8</priority>"));
    }
}
