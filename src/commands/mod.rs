//! CLI command implementations.
//!
//! Available commands:
//! - **browse**: filter, sort and page through an inventory snapshot
//! - **estimate**: monthly payment for a price, down payment, rate and term
//! - **slug**: detail-page slugs for every vehicle in a snapshot
//! - **sitemap**: sitemap.xml for the homepage and unsold listings
//! - **init**: write a default `.dealerlot.toml`

pub mod browse;
pub mod estimate;
pub mod init;
pub mod sitemap;
pub mod slug;

pub use browse::{handle_browse, BrowseConfig};
pub use estimate::{handle_estimate, EstimateConfig};
pub use init::init_config;
pub use sitemap::{handle_sitemap, SitemapConfig};
pub use slug::print_slugs;
