//! Back-office editing: the vehicle editor, the homepage featured lineup
//! and photo order.
//!
//! Orders are stored as positional integers, so every reorder produces a
//! full set of `(id, position)` updates for the caller to persist.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::input::{parse_decimal, parse_integer};
use crate::inventory::{RawPhoto, RawVehicle, VehicleId, VehicleStatus};

/// Homepage featured slots.
pub const MAX_FEATURED: usize = 8;

/// Remove the item at `from` and reinsert it at `to`.
///
/// Out-of-range indices leave the list untouched and return false.
pub fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from >= items.len() || to >= items.len() {
        trace!(from, to, len = items.len(), "move out of range");
        return false;
    }
    if from != to {
        let item = items.remove(from);
        items.insert(to, item);
    }
    true
}

/// "Make main photo": move `index` to the front.
pub fn move_to_front<T>(items: &mut Vec<T>, index: usize) -> bool {
    move_item(items, index, 0)
}

/// Featured flag and rank to write back for one vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankUpdate {
    pub id: VehicleId,
    pub featured: bool,
    pub featured_rank: Option<usize>,
}

/// Ordered, duplicate-free list of featured vehicle ids.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeaturedLineup {
    ids: Vec<VehicleId>,
}

impl FeaturedLineup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the lineup from stored rows: featured rows ordered by rank,
    /// unranked ones last, truncated to [`MAX_FEATURED`].
    pub fn from_rows(rows: &[RawVehicle]) -> Self {
        let mut featured: Vec<&RawVehicle> =
            rows.iter().filter(|r| r.featured.unwrap_or(false)).collect();
        featured.sort_by_key(|r| r.featured_rank.unwrap_or(i64::MAX));
        let mut lineup = Self::new();
        for row in featured {
            lineup.add(row.id.clone());
        }
        lineup
    }

    pub fn ids(&self) -> &[VehicleId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.ids.len() >= MAX_FEATURED
    }

    pub fn contains(&self, id: &VehicleId) -> bool {
        self.ids.contains(id)
    }

    /// Append to the end of the lineup. Fails when full or already present.
    pub fn add(&mut self, id: VehicleId) -> bool {
        if self.is_full() || self.contains(&id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    pub fn remove(&mut self, id: &VehicleId) -> bool {
        let before = self.ids.len();
        self.ids.retain(|existing| existing != id);
        self.ids.len() != before
    }

    pub fn move_item(&mut self, from: usize, to: usize) -> bool {
        move_item(&mut self.ids, from, to)
    }

    /// One update per id in `all_ids`: lineup members get `featured` and
    /// their 0-based position, everyone else is cleared.
    pub fn rank_updates(&self, all_ids: &[VehicleId]) -> Vec<RankUpdate> {
        all_ids
            .iter()
            .map(|id| {
                let rank = self.ids.iter().position(|f| f == id);
                RankUpdate {
                    id: id.clone(),
                    featured: rank.is_some(),
                    featured_rank: rank,
                }
            })
            .collect()
    }
}

/// Vehicle editor contents, kept as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleDraft {
    /// `None` until the row has been inserted.
    pub id: Option<VehicleId>,
    pub vin: String,
    pub year: String,
    pub make: String,
    pub model: String,
    pub trim: String,
    pub price: String,
    pub miles: String,
    pub description: String,
    pub status: String,
    pub featured: bool,
    pub body_type: String,
}

impl Default for VehicleDraft {
    fn default() -> Self {
        Self {
            id: None,
            vin: String::new(),
            year: String::new(),
            make: String::new(),
            model: String::new(),
            trim: String::new(),
            price: String::new(),
            miles: String::new(),
            description: String::new(),
            status: "available".to_string(),
            featured: false,
            body_type: String::new(),
        }
    }
}

/// Row body written on save. Field names match the stored columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehiclePayload {
    pub vin: Option<String>,
    pub year: Option<i32>,
    pub make: String,
    pub model: String,
    pub trim: Option<String>,
    pub price: Option<f64>,
    pub miles: Option<f64>,
    pub description: Option<String>,
    pub status: VehicleStatus,
    pub featured: bool,
    pub body_type: Option<String>,
}

impl VehicleDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a stored row into the editor. Missing values become empty text.
    pub fn from_row(row: &RawVehicle) -> Self {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();
        let number = |value: Option<f64>| value.map(format_number).unwrap_or_default();
        Self {
            id: Some(row.id.clone()),
            vin: text(&row.vin),
            year: row.year.map(|y| y.to_string()).unwrap_or_default(),
            make: text(&row.make),
            model: text(&row.model),
            trim: text(&row.trim),
            price: number(row.price),
            miles: number(row.miles),
            description: text(&row.description),
            status: row
                .status
                .clone()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| "available".to_string()),
            featured: row.featured.unwrap_or(false),
            body_type: text(&row.body_type),
        }
    }

    /// Saving updates the existing row rather than inserting.
    pub fn is_update(&self) -> bool {
        self.id.is_some()
    }

    /// Coerce the editor's text into a storable row.
    ///
    /// Blank optional text becomes null. Year, price and miles are read
    /// through the numeric input sanitizer; no digits at all means null.
    /// A blank status saves as available.
    pub fn payload(&self) -> VehiclePayload {
        VehiclePayload {
            vin: blank_to_none(&self.vin),
            year: parse_integer(&self.year).and_then(|y| i32::try_from(y).ok()),
            make: self.make.trim().to_string(),
            model: self.model.trim().to_string(),
            trim: blank_to_none(&self.trim),
            price: parse_decimal(&self.price),
            miles: parse_decimal(&self.miles),
            description: blank_to_none(&self.description),
            status: VehicleStatus::from_label(Some(self.status.as_str())),
            featured: self.featured,
            body_type: blank_to_none(&self.body_type),
        }
    }
}

fn blank_to_none(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// Photo sort value to write back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SortUpdate<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<&'a VehicleId>,
    pub url: &'a str,
    pub sort: usize,
}

/// Photos of one vehicle in display order. The first is the main photo.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhotoOrder {
    photos: Vec<RawPhoto>,
}

impl PhotoOrder {
    /// Order stored photos by their current sort value.
    pub fn new(mut photos: Vec<RawPhoto>) -> Self {
        photos.sort_by_key(|p| p.sort.unwrap_or(0));
        Self { photos }
    }

    pub fn photos(&self) -> &[RawPhoto] {
        &self.photos
    }

    pub fn main_photo(&self) -> Option<&RawPhoto> {
        self.photos.first()
    }

    pub fn move_item(&mut self, from: usize, to: usize) -> bool {
        move_item(&mut self.photos, from, to)
    }

    pub fn make_main(&mut self, index: usize) -> bool {
        move_to_front(&mut self.photos, index)
    }

    pub fn remove(&mut self, index: usize) -> Option<RawPhoto> {
        (index < self.photos.len()).then(|| self.photos.remove(index))
    }

    /// Positional sort values for every photo, 0-based.
    pub fn sort_updates(&self) -> Vec<SortUpdate<'_>> {
        self.photos
            .iter()
            .enumerate()
            .map(|(sort, photo)| SortUpdate {
                id: photo.id.as_ref(),
                url: &photo.url,
                sort,
            })
            .collect()
    }
}
