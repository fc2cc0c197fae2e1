//! Vehicle records as the storefront sees them.
//!
//! Records are read-only here: the managed backend owns their lifetime and
//! the crate only holds a snapshot fetched once per page view. Loading and
//! mapping of stored rows lives in [`loader`], URL slugs in [`slug`].

pub mod loader;
pub mod slug;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

pub use loader::{load_inventory, parse_snapshot, storefront_order, RawPhoto, RawVehicle};
pub use slug::{id_from_slug, slugify};

/// Opaque, stable vehicle identifier.
///
/// The store hands out integers for legacy rows and UUID strings for newer
/// ones. Ordering puts all integers (numerically) before all strings
/// (lexicographically), which is what the `newest` sort relies on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VehicleId {
    Int(i64),
    Text(String),
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VehicleId::Int(n) => write!(f, "{}", n),
            VehicleId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for VehicleId {
    fn from(value: i64) -> Self {
        VehicleId::Int(value)
    }
}

impl From<i32> for VehicleId {
    fn from(value: i32) -> Self {
        VehicleId::Int(i64::from(value))
    }
}

impl From<&str> for VehicleId {
    fn from(value: &str) -> Self {
        match value.parse::<i64>() {
            Ok(n) => VehicleId::Int(n),
            Err(_) => VehicleId::Text(value.to_string()),
        }
    }
}

/// Sale status of a vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleStatus {
    #[default]
    Available,
    Pending,
    Sold,
}

impl VehicleStatus {
    /// Parse a stored status label.
    ///
    /// Matching is case-insensitive. Missing or blank labels mean
    /// `Available`; any other unrecognized label ranks with `Sold`.
    pub fn from_label(label: Option<&str>) -> Self {
        let Some(label) = label.map(str::trim).filter(|s| !s.is_empty()) else {
            return VehicleStatus::Available;
        };
        match label.to_ascii_lowercase().as_str() {
            "available" => VehicleStatus::Available,
            "pending" => VehicleStatus::Pending,
            _ => VehicleStatus::Sold,
        }
    }

    /// Display priority: lower ranks are listed first.
    pub fn priority(&self) -> u8 {
        match self {
            VehicleStatus::Available => 0,
            VehicleStatus::Pending => 1,
            VehicleStatus::Sold => 2,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            VehicleStatus::Available => "Available",
            VehicleStatus::Pending => "Pending",
            VehicleStatus::Sold => "Sold",
        }
    }
}

impl<'de> Deserialize<'de> for VehicleStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let label = Option::<String>::deserialize(deserializer)?;
        Ok(VehicleStatus::from_label(label.as_deref()))
    }
}

/// A vehicle listing, already mapped from its stored row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: VehicleId,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub make: String,
    /// Model with trim appended, e.g. "Camry SE".
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub miles: Option<f64>,
    #[serde(default)]
    pub body_type: Option<String>,
    #[serde(default)]
    pub status: VehicleStatus,
    #[serde(default)]
    pub features: Vec<String>,
    /// Photo URLs, primary first.
    #[serde(default)]
    pub photos: Vec<String>,
    /// Listed within the new-arrival window.
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Vehicle {
    pub fn new(id: impl Into<VehicleId>, year: i32, make: &str, model: &str) -> Self {
        Self {
            id: id.into(),
            year: Some(year),
            make: make.to_string(),
            model: model.to_string(),
            price: None,
            miles: None,
            body_type: None,
            status: VehicleStatus::Available,
            features: Vec::new(),
            photos: Vec::new(),
            is_new: false,
            created_at: None,
        }
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_miles(mut self, miles: f64) -> Self {
        self.miles = Some(miles);
        self
    }

    pub fn with_status(mut self, status: VehicleStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_body_type(mut self, body_type: &str) -> Self {
        self.body_type = Some(body_type.to_string());
        self
    }

    pub fn with_features(mut self, features: &[&str]) -> Self {
        self.features = features.iter().map(|f| f.to_string()).collect();
        self
    }

    /// "2016 Toyota Camry SE", skipping absent parts.
    pub fn title(&self) -> String {
        let year = self.year.map(|y| y.to_string());
        [year.as_deref(), Some(self.make.as_str()), Some(self.model.as_str())]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Lower-cased haystack for the free-text query: year, make, model and
    /// features, space-joined.
    pub fn search_text(&self) -> String {
        let year = self.year.map(|y| y.to_string()).unwrap_or_default();
        let mut parts = vec![year, self.make.clone(), self.model.clone()];
        parts.push(self.features.join(" "));
        parts.join(" ").to_lowercase()
    }

    /// Price used for range comparison; absent prices compare as zero.
    pub fn price_or_zero(&self) -> f64 {
        self.price.unwrap_or(0.0)
    }

    /// Odometer used for range comparison; absent readings compare as zero.
    pub fn miles_or_zero(&self) -> f64 {
        self.miles.unwrap_or(0.0)
    }

    pub fn primary_photo(&self) -> Option<&str> {
        self.photos.first().map(String::as_str)
    }
}
