//! Result set controller: owns filter/sort/page state and derives the list.
//!
//! Every filter or sort change recomputes the filtered, sorted index list
//! from scratch. Inventories run to a few hundred records, so there is no
//! incremental bookkeeping. Paging only slices that list.

use tracing::debug;

use super::filter::{matches, FilterState};
use super::range::RangeBounds;
use super::sort::{sort_indices, SortKey};
use crate::inventory::{Vehicle, VehicleId};

/// Cars revealed per "page".
pub const DEFAULT_PAGE_SIZE: usize = 8;

/// One field update from the refine panel.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterChange {
    Query(String),
    Make(Option<String>),
    BodyType(Option<String>),
    Price(RangeBounds),
    Miles(RangeBounds),
    Sort(SortKey),
    Page(usize),
}

#[derive(Debug, Clone)]
pub struct ResultSet {
    inventory: Vec<Vehicle>,
    state: FilterState,
    page_size: usize,
    /// Indices into `inventory` that pass the filter, in display order.
    sorted_filtered: Vec<usize>,
    loading: bool,
}

impl ResultSet {
    pub fn new(inventory: Vec<Vehicle>, page_size: usize) -> Self {
        let mut results = Self {
            inventory,
            state: FilterState::default(),
            page_size: page_size.max(1),
            sorted_filtered: Vec::new(),
            loading: false,
        };
        results.recompute();
        results
    }

    /// Empty result set waiting on the first fetch.
    pub fn pending(page_size: usize) -> Self {
        let mut results = Self::new(Vec::new(), page_size);
        results.loading = true;
        results
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn inventory(&self) -> &[Vehicle] {
        &self.inventory
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// Swap in a freshly fetched snapshot. Filters survive, the page resets.
    pub fn replace_inventory(&mut self, inventory: Vec<Vehicle>) {
        self.inventory = inventory;
        self.loading = false;
        self.state.page = 1;
        self.recompute();
    }

    /// Apply one field change.
    ///
    /// Any change other than `Page` resets the page to 1, except selecting
    /// the sort that is already active.
    pub fn set_filter(&mut self, change: FilterChange) {
        match change {
            FilterChange::Page(page) => {
                self.state.page = page.max(1);
                return;
            }
            FilterChange::Sort(key) if key == self.state.sort => return,
            FilterChange::Sort(key) => self.state.sort = key,
            FilterChange::Query(query) => self.state.query = query,
            FilterChange::Make(make) => self.state.make = make,
            FilterChange::BodyType(body_type) => self.state.body_type = body_type,
            FilterChange::Price(bounds) => self.state.price = bounds,
            FilterChange::Miles(bounds) => self.state.miles = bounds,
        }
        self.state.page = 1;
        self.recompute();
    }

    /// Reset every filter to unbounded, sort to featured, page to 1.
    pub fn clear_all(&mut self) {
        self.state = FilterState::default();
        self.recompute();
    }

    /// The revealed prefix of the sorted, filtered list.
    pub fn visible(&self) -> Vec<&Vehicle> {
        self.sorted_filtered
            .iter()
            .take(self.visible_len())
            .filter_map(|&idx| self.inventory.get(idx))
            .collect()
    }

    /// Every match in display order, ignoring paging.
    pub fn filtered(&self) -> impl Iterator<Item = &Vehicle> {
        self.sorted_filtered
            .iter()
            .filter_map(|&idx| self.inventory.get(idx))
    }

    /// Un-paginated match count, the number shown to shoppers.
    pub fn total_count(&self) -> usize {
        self.sorted_filtered.len()
    }

    pub fn visible_len(&self) -> usize {
        self.state
            .page
            .saturating_mul(self.page_size)
            .min(self.sorted_filtered.len())
    }

    pub fn has_more(&self) -> bool {
        self.visible_len() < self.total_count()
    }

    /// Reveal one more page. Returns false (and changes nothing) once every
    /// match is visible.
    pub fn load_more(&mut self) -> bool {
        if !self.has_more() {
            return false;
        }
        self.state.page += 1;
        true
    }

    pub fn find(&self, id: &VehicleId) -> Option<&Vehicle> {
        self.inventory.iter().find(|v| &v.id == id)
    }

    /// Distinct makes in first-seen order, for the make dropdown.
    pub fn makes(&self) -> Vec<&str> {
        distinct(self.inventory.iter().map(|v| v.make.as_str()))
    }

    /// Distinct body types in first-seen order; absent values skipped.
    pub fn body_types(&self) -> Vec<&str> {
        distinct(self.inventory.iter().filter_map(|v| v.body_type.as_deref()))
    }

    fn recompute(&mut self) {
        let mut indices: Vec<usize> = self
            .inventory
            .iter()
            .enumerate()
            .filter(|(_, v)| matches(v, &self.state))
            .map(|(idx, _)| idx)
            .collect();
        sort_indices(&mut indices, &self.inventory, self.state.sort);
        debug!(
            total = self.inventory.len(),
            matched = indices.len(),
            sort = %self.state.sort,
            "recomputed result set"
        );
        self.sorted_filtered = indices;
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut out: Vec<&str> = Vec::new();
    for value in values.filter(|v| !v.is_empty()) {
        if !out.contains(&value) {
            out.push(value);
        }
    }
    out
}
