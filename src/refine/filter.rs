//! Filter state and the per-vehicle match predicate.

use serde::{Deserialize, Serialize};

use super::range::RangeBounds;
use super::sort::SortKey;
use crate::inventory::Vehicle;

/// Everything the storefront's "Refine Results" panel controls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    /// Free-text query, matched case-insensitively.
    pub query: String,
    /// Selected make; `None` (or empty) matches every make.
    pub make: Option<String>,
    /// Selected body type; `None` (or empty) matches every body type.
    pub body_type: Option<String>,
    pub price: RangeBounds,
    pub miles: RangeBounds,
    pub sort: SortKey,
    /// Number of page-sizes revealed, at least 1.
    pub page: usize,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            query: String::new(),
            make: None,
            body_type: None,
            price: RangeBounds::ANY,
            miles: RangeBounds::ANY,
            sort: SortKey::Featured,
            page: 1,
        }
    }
}

impl FilterState {
    /// Number of active narrowing criteria (sort and page excluded).
    pub fn active_count(&self) -> usize {
        [
            !self.query.trim().is_empty(),
            selected(&self.make).is_some(),
            selected(&self.body_type).is_some(),
            !self.price.is_any(),
            !self.miles.is_any(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }
}

/// Does `vehicle` satisfy every active criterion in `state`?
///
/// Inactive criteria are skipped. Missing price or mileage compares as 0,
/// so such vehicles fail any positive minimum but stay visible otherwise.
pub fn matches(vehicle: &Vehicle, state: &FilterState) -> bool {
    matches_query(vehicle, &state.query)
        && matches_exact(Some(vehicle.make.as_str()), &state.make)
        && matches_exact(vehicle.body_type.as_deref(), &state.body_type)
        && state.price.contains(vehicle.price_or_zero())
        && state.miles.contains(vehicle.miles_or_zero())
}

/// Case-insensitive substring test against year, make, model and features.
pub fn matches_query(vehicle: &Vehicle, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    needle.is_empty() || vehicle.search_text().contains(&needle)
}

fn matches_exact(value: Option<&str>, wanted: &Option<String>) -> bool {
    match selected(wanted) {
        Some(wanted) => value == Some(wanted),
        None => true,
    }
}

/// Treat an empty selection like "no filter".
fn selected(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Mileage buckets from the older step dropdown.
///
/// Each bucket converts to inclusive [`RangeBounds`], so legacy selections
/// go through the same predicate as the range control. Adjacent buckets
/// share their boundary value, as the range presets do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MileageStep {
    Any,
    Under60k,
    From60kTo90k,
    From90kTo120k,
    Over120k,
}

impl MileageStep {
    pub fn all() -> &'static [MileageStep] {
        &[
            MileageStep::Any,
            MileageStep::Under60k,
            MileageStep::From60kTo90k,
            MileageStep::From90kTo120k,
            MileageStep::Over120k,
        ]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            MileageStep::Any => "Any",
            MileageStep::Under60k => "< 60k",
            MileageStep::From60kTo90k => "60–90k",
            MileageStep::From90kTo120k => "90–120k",
            MileageStep::Over120k => "> 120k",
        }
    }

    /// Parse a dropdown label; en dash and ASCII hyphen are both accepted.
    pub fn from_label(label: &str) -> Option<Self> {
        let normalized: String = label
            .trim()
            .replace('–', "-")
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "any" | "" => Some(MileageStep::Any),
            "<60k" => Some(MileageStep::Under60k),
            "60-90k" => Some(MileageStep::From60kTo90k),
            "90-120k" => Some(MileageStep::From90kTo120k),
            ">120k" => Some(MileageStep::Over120k),
            _ => None,
        }
    }

    pub fn to_bounds(&self) -> RangeBounds {
        match self {
            MileageStep::Any => RangeBounds::ANY,
            MileageStep::Under60k => RangeBounds::new(None, Some(60_000)),
            MileageStep::From60kTo90k => RangeBounds::new(Some(60_000), Some(90_000)),
            MileageStep::From90kTo120k => RangeBounds::new(Some(90_000), Some(120_000)),
            MileageStep::Over120k => RangeBounds::new(Some(120_000), None),
        }
    }
}
