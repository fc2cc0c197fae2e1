//! Vehicle detail-page slugs: `2016-toyota-camry-se-42`.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{Vehicle, VehicleId};

static NON_ALNUM: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9]+").unwrap());
static TRAILING_ID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)-(\d+|[a-f0-9]{8}(?:-[a-f0-9]{4}){3}-[a-f0-9]{12})$").unwrap()
});

/// Build the slug for a vehicle's detail page.
pub fn slugify(vehicle: &Vehicle) -> String {
    let base = vehicle.title().to_lowercase();
    let slug = NON_ALNUM.replace_all(&base, "-");
    let slug = slug.trim_matches('-');
    format!("{}-{}", slug, vehicle.id)
}

/// Recover the vehicle id from a slug.
///
/// Accepts a trailing run of digits or a hyphenated UUID. A looser hex
/// pattern would swallow model names such as `f-150` into the id. UUIDs are
/// stored lowercase, so the captured id is lowercased to match.
pub fn id_from_slug(slug: &str) -> Option<VehicleId> {
    TRAILING_ID
        .captures(slug)
        .and_then(|caps| caps.get(1))
        .map(|m| VehicleId::from(m.as_str().to_ascii_lowercase().as_str()))
}
