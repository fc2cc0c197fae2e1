//! Sort functionality for results.
//!
//! Ordering is a fixed two-stage pipeline:
//!
//! ```text
//! compare = status_priority(a, b).then(criterion[key](a, b))
//! ```
//!
//! Status priority always comes first (available, pending, then sold), the
//! selected criterion only breaks ties within a status. Both stages run in
//! one stable sort, so vehicles equal on both keep their input order.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::inventory::Vehicle;

/// Sort criteria
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Keep the data source's order (featured rank, then recency)
    #[default]
    Featured,
    /// Highest id first
    Newest,
    /// Cheapest first, unpriced last
    PriceAsc,
    /// Most expensive first, unpriced last
    PriceDesc,
    /// Lowest mileage first, unknown mileage last
    MilesAsc,
    /// Newest model year first
    YearDesc,
    /// Oldest model year first
    YearAsc,
}

impl SortKey {
    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            SortKey::Featured => "Featured",
            SortKey::Newest => "Newest",
            SortKey::PriceAsc => "Price: Low → High",
            SortKey::PriceDesc => "Price: High → Low",
            SortKey::MilesAsc => "Mileage: Low → High",
            SortKey::YearDesc => "Year: Newest",
            SortKey::YearAsc => "Year: Oldest",
        }
    }

    /// Wire value, as used in URLs and the CLI.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Featured => "featured",
            SortKey::Newest => "newest",
            SortKey::PriceAsc => "price_asc",
            SortKey::PriceDesc => "price_desc",
            SortKey::MilesAsc => "miles_asc",
            SortKey::YearDesc => "year_desc",
            SortKey::YearAsc => "year_asc",
        }
    }

    /// Get all sort keys, in dropdown order
    pub fn all() -> &'static [SortKey] {
        &[
            SortKey::Featured,
            SortKey::Newest,
            SortKey::PriceAsc,
            SortKey::PriceDesc,
            SortKey::MilesAsc,
            SortKey::YearDesc,
            SortKey::YearAsc,
        ]
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::all()
            .iter()
            .copied()
            .find(|key| key.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                let names: Vec<_> = SortKey::all().iter().map(SortKey::as_str).collect();
                format!("unknown sort '{}', expected one of: {}", s, names.join(", "))
            })
    }
}

/// First stage: available < pending < sold.
pub fn compare_status(a: &Vehicle, b: &Vehicle) -> Ordering {
    a.status.priority().cmp(&b.status.priority())
}

/// Second stage: the user-selected criterion.
pub fn compare_criterion(a: &Vehicle, b: &Vehicle, key: SortKey) -> Ordering {
    match key {
        SortKey::Featured => Ordering::Equal,
        SortKey::Newest => b.id.cmp(&a.id),
        SortKey::PriceAsc => {
            let pa = a.price.unwrap_or(f64::INFINITY);
            let pb = b.price.unwrap_or(f64::INFINITY);
            pa.total_cmp(&pb)
        }
        SortKey::PriceDesc => {
            let pa = a.price.unwrap_or(f64::NEG_INFINITY);
            let pb = b.price.unwrap_or(f64::NEG_INFINITY);
            pb.total_cmp(&pa)
        }
        SortKey::MilesAsc => {
            let ma = a.miles.unwrap_or(f64::INFINITY);
            let mb = b.miles.unwrap_or(f64::INFINITY);
            ma.total_cmp(&mb)
        }
        SortKey::YearDesc => b.year.unwrap_or(0).cmp(&a.year.unwrap_or(0)),
        SortKey::YearAsc => a.year.unwrap_or(0).cmp(&b.year.unwrap_or(0)),
    }
}

/// Composite comparator used for display.
pub fn compare(a: &Vehicle, b: &Vehicle, key: SortKey) -> Ordering {
    compare_status(a, b).then_with(|| compare_criterion(a, b, key))
}

/// Sort indices into `vehicles`. `sort_by` is stable, which the featured
/// order depends on.
pub fn sort_indices(indices: &mut [usize], vehicles: &[Vehicle], key: SortKey) {
    indices.sort_by(|&a, &b| match (vehicles.get(a), vehicles.get(b)) {
        (Some(va), Some(vb)) => compare(va, vb, key),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use crate::inventory::VehicleStatus;
    use proptest::prelude::*;

    fn status() -> impl Strategy<Value = VehicleStatus> {
        prop::sample::select(vec![
            VehicleStatus::Available,
            VehicleStatus::Pending,
            VehicleStatus::Sold,
        ])
    }

    fn fleet() -> impl Strategy<Value = Vec<Vehicle>> {
        prop::collection::vec(
            (
                status(),
                prop::option::of(prop::sample::select(vec![5_000.0, 9_000.0, 12_000.0])),
                prop::option::of(prop::sample::select(vec![30_000.0, 90_000.0])),
                prop::option::of(prop::sample::select(vec![2012, 2018])),
                0i64..4,
            ),
            0..30,
        )
        .prop_map(|rows| {
            rows.into_iter()
                .map(|(status, price, miles, year, id)| {
                    let mut v = Vehicle::new(id, 2000, "Make", "Model").with_status(status);
                    v.price = price;
                    v.miles = miles;
                    v.year = year;
                    v
                })
                .collect()
        })
    }

    fn key() -> impl Strategy<Value = SortKey> {
        prop::sample::select(SortKey::all().to_vec())
    }

    proptest! {
        /// Property: equal-ranked vehicles keep their relative input order.
        #[test]
        fn sort_is_stable(vehicles in fleet(), key in key()) {
            let mut order: Vec<usize> = (0..vehicles.len()).collect();
            sort_indices(&mut order, &vehicles, key);
            for pair in order.windows(2) {
                let (a, b) = (&vehicles[pair[0]], &vehicles[pair[1]]);
                if compare(a, b, key) == Ordering::Equal {
                    prop_assert!(pair[0] < pair[1]);
                }
            }
        }

        /// Property: status priority never decreases along the sorted list.
        #[test]
        fn status_priority_is_monotonic(vehicles in fleet(), key in key()) {
            let mut order: Vec<usize> = (0..vehicles.len()).collect();
            sort_indices(&mut order, &vehicles, key);
            for pair in order.windows(2) {
                prop_assert!(
                    vehicles[pair[0]].status.priority() <= vehicles[pair[1]].status.priority()
                );
            }
        }

        /// Property: the result is a permutation of the input.
        #[test]
        fn sort_is_permutation(vehicles in fleet(), key in key()) {
            let mut order: Vec<usize> = (0..vehicles.len()).collect();
            sort_indices(&mut order, &vehicles, key);
            let mut seen = order.clone();
            seen.sort_unstable();
            prop_assert_eq!(seen, (0..vehicles.len()).collect::<Vec<_>>());
        }
    }
}
