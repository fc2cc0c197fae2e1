//! Snapshot loading: stored rows in, storefront vehicles out.

use std::cmp::Ordering;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Vehicle, VehicleId, VehicleStatus};
use crate::errors::{Error, Result};

/// Photo row attached to a vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPhoto {
    #[serde(default)]
    pub id: Option<VehicleId>,
    pub url: String,
    #[serde(default)]
    pub sort: Option<i64>,
}

/// A vehicle row as the backend stores it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawVehicle {
    pub id: VehicleId,
    #[serde(default)]
    pub vin: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub make: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub trim: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub miles: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub featured: Option<bool>,
    #[serde(default)]
    pub featured_rank: Option<i64>,
    #[serde(default)]
    pub body_type: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub photos: Vec<RawPhoto>,
}

impl RawVehicle {
    /// Map the stored row into a storefront vehicle.
    ///
    /// `now` and `new_arrival_days` decide the new-arrival badge.
    pub fn into_vehicle(self, now: DateTime<Utc>, new_arrival_days: i64) -> Vehicle {
        let model = [self.model.as_deref(), self.trim.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        let mut photos = self.photos;
        photos.sort_by_key(|p| p.sort.unwrap_or(0));

        let is_new = self
            .created_at
            .is_some_and(|created| is_new_arrival(created, now, new_arrival_days));

        Vehicle {
            id: self.id,
            year: self.year,
            make: self.make.unwrap_or_default(),
            model,
            price: self.price.filter(|p| p.is_finite()),
            miles: self.miles.filter(|m| m.is_finite()),
            body_type: self.body_type.filter(|b| !b.trim().is_empty()),
            status: VehicleStatus::from_label(self.status.as_deref()),
            features: self.features,
            photos: photos.into_iter().map(|p| p.url).collect(),
            is_new,
            created_at: self.created_at,
        }
    }
}

/// Listed less than `days` days before `now`. A window too large to
/// represent covers every listing.
pub fn is_new_arrival(created: DateTime<Utc>, now: DateTime<Utc>, days: i64) -> bool {
    match Duration::try_days(days) {
        Some(window) => now - created < window,
        None => true,
    }
}

/// Parse a JSON array of stored rows.
pub fn parse_snapshot(contents: &str) -> serde_json::Result<Vec<RawVehicle>> {
    serde_json::from_str(contents)
}

/// Order rows the way the backend query delivers them: featured first,
/// then by featured rank, then most recently created.
///
/// Null ranks sort after ranked rows and null timestamps before dated ones,
/// matching the store's default null placement for ascending/descending
/// order. The sort is stable.
pub fn storefront_order(rows: &mut [RawVehicle]) {
    rows.sort_by(|a, b| {
        let featured = b
            .featured
            .unwrap_or(false)
            .cmp(&a.featured.unwrap_or(false));
        let rank = match (a.featured_rank, b.featured_rank) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        let created = match (a.created_at, b.created_at) {
            (Some(x), Some(y)) => y.cmp(&x),
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        featured.then(rank).then(created)
    });
}

/// Read a snapshot file, order it like the backend does and map every row.
pub fn load_inventory(
    path: &Path,
    now: DateTime<Utc>,
    new_arrival_days: i64,
) -> Result<Vec<Vehicle>> {
    let contents = fs::read_to_string(path)
        .map_err(|e| Error::file_system("Cannot read inventory snapshot", path, e))?;
    let mut rows = parse_snapshot(&contents).map_err(|source| Error::Snapshot {
        path: path.to_path_buf(),
        source,
    })?;
    storefront_order(&mut rows);
    debug!(count = rows.len(), path = %path.display(), "loaded inventory snapshot");
    Ok(rows
        .into_iter()
        .map(|row| row.into_vehicle(now, new_arrival_days))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use indoc::indoc;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 9, 10, 12, 0, 0).unwrap()
    }

    fn row(id: i64) -> RawVehicle {
        RawVehicle {
            id: VehicleId::Int(id),
            vin: None,
            year: Some(2015),
            make: Some("Honda".into()),
            model: Some("Civic".into()),
            trim: None,
            price: None,
            miles: None,
            description: None,
            status: None,
            featured: None,
            featured_rank: None,
            body_type: None,
            created_at: None,
            features: vec![],
            photos: vec![],
        }
    }

    #[test]
    fn test_parse_and_map_row() {
        let json = indoc! {r#"
            [{
                "id": 12,
                "year": 2016,
                "make": "Toyota",
                "model": "Camry",
                "trim": "SE",
                "price": 11900,
                "miles": 84000,
                "status": "Pending",
                "body_type": "Sedan",
                "created_at": "2025-09-08T09:30:00+00:00",
                "photos": [
                    {"url": "b.jpg", "sort": 2},
                    {"url": "a.jpg", "sort": 0}
                ]
            }]
        "#};
        let rows = parse_snapshot(json).unwrap();
        let car = rows.into_iter().next().unwrap().into_vehicle(now(), 7);
        assert_eq!(car.model, "Camry SE");
        assert_eq!(car.status, VehicleStatus::Pending);
        assert_eq!(car.photos, vec!["a.jpg".to_string(), "b.jpg".to_string()]);
        assert_eq!(car.body_type.as_deref(), Some("Sedan"));
        assert!(car.is_new);
    }

    #[test]
    fn test_old_listing_is_not_new() {
        let mut r = row(1);
        r.created_at = Some(now() - Duration::days(8));
        assert!(!r.into_vehicle(now(), 7).is_new);
    }

    #[test]
    fn test_unrepresentable_window_marks_everything_new() {
        let mut r = row(1);
        r.created_at = Some(now() - Duration::days(3650));
        assert!(r.into_vehicle(now(), 200_000_000_000_000).is_new);
        assert!(is_new_arrival(now(), now(), i64::MAX));
        assert!(!is_new_arrival(now() - Duration::days(2), now(), 1));
    }

    #[test]
    fn test_huge_configured_window_loads() {
        let config = crate::config::parse_and_validate_config(
            "[storefront]\nnew_arrival_days = 200000000000000\n",
            Path::new(".dealerlot.toml"),
        )
        .unwrap();
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("cars.json");
        std::fs::write(
            &path,
            r#"[{"id": 1, "created_at": "2001-01-01T00:00:00Z"}]"#,
        )
        .unwrap();
        let cars = load_inventory(&path, now(), config.new_arrival_days()).unwrap();
        assert!(cars[0].is_new);
    }

    #[test]
    fn test_undated_rows_lead_unfeatured_rows() {
        let mut dated = row(1);
        dated.created_at = Some(now());
        let undated = row(2);
        let mut featured = row(3);
        featured.featured = Some(true);

        let mut rows = vec![dated, undated, featured];
        storefront_order(&mut rows);
        let ids: Vec<_> = rows.iter().map(|r| r.id.clone()).collect();
        assert_eq!(
            ids,
            vec![VehicleId::Int(3), VehicleId::Int(2), VehicleId::Int(1)]
        );
    }

    #[test]
    fn test_blank_body_type_is_absent() {
        let mut r = row(1);
        r.body_type = Some("  ".into());
        assert_eq!(r.into_vehicle(now(), 7).body_type, None);
    }

    #[test]
    fn test_storefront_order() {
        let mut a = row(1);
        a.created_at = Some(now() - Duration::days(1));
        let mut b = row(2);
        b.featured = Some(true);
        b.featured_rank = Some(1);
        let mut c = row(3);
        c.featured = Some(true);
        c.featured_rank = Some(0);
        let mut d = row(4);
        d.created_at = Some(now());

        let mut rows = vec![a, b, c, d];
        storefront_order(&mut rows);
        let ids: Vec<_> = rows.iter().map(|r| r.id.clone()).collect();
        assert_eq!(
            ids,
            vec![
                VehicleId::Int(3),
                VehicleId::Int(2),
                VehicleId::Int(4),
                VehicleId::Int(1)
            ]
        );
    }

    #[test]
    fn test_load_inventory_reports_bad_json() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("cars.json");
        std::fs::write(&path, "{not json").unwrap();
        let err = load_inventory(&path, now(), 7).unwrap_err();
        assert!(matches!(err, Error::Snapshot { .. }));
    }

    #[test]
    fn test_load_inventory_missing_file() {
        let err = load_inventory(Path::new("/nonexistent/cars.json"), now(), 7).unwrap_err();
        assert!(matches!(err, Error::FileSystem { .. }));
    }
}
