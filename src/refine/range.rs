//! Dual-handle range control with draft/commit semantics.
//!
//! A [`RangeControl`] holds two values: the committed [`RangeBounds`] the
//! result set filters on, and a transient [`RangeDraft`] that only exists
//! while the popup is open. Handles, text fields and presets edit the draft;
//! nothing reaches the committed value until [`RangeControl::apply`] or
//! [`RangeControl::clear`].
//!
//! The two draft handles may touch but never cross, so every committed
//! value satisfies `min <= max`. Draft values sitting on a domain edge
//! commit as `None`, keeping "no limit" canonical.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::trace;

use crate::formatting::{format_thousands, format_usd};
use crate::input::parse_integer;

/// Committed interval. `None` on a side means unbounded on that side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RangeBounds {
    #[serde(default)]
    pub min: Option<u64>,
    #[serde(default)]
    pub max: Option<u64>,
}

impl RangeBounds {
    /// No limit on either side.
    pub const ANY: RangeBounds = RangeBounds {
        min: None,
        max: None,
    };

    pub fn new(min: Option<u64>, max: Option<u64>) -> Self {
        Self { min, max }
    }

    pub fn is_any(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    /// Inclusive membership test: `min <= value <= max` for the set sides.
    pub fn contains(&self, value: f64) -> bool {
        if let Some(min) = self.min {
            if value < min as f64 {
                return false;
            }
        }
        if let Some(max) = self.max {
            if value > max as f64 {
                return false;
            }
        }
        true
    }
}

/// How bound values are rendered in labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundFormat {
    /// `$12,500`
    Currency,
    /// `60k`
    Thousands,
}

impl BoundFormat {
    pub fn format(&self, value: u64) -> String {
        match self {
            BoundFormat::Currency => format_usd(value as f64),
            BoundFormat::Thousands => {
                let thousands = (value as f64 / 1000.0).round() as u64;
                format!("{}k", format_thousands(thousands))
            }
        }
    }
}

/// Fixed domain a control operates in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeDomain {
    pub min: u64,
    pub max: u64,
    pub step: u64,
    pub format: BoundFormat,
}

impl RangeDomain {
    /// Price slider: $0 – $30,000 in $500 steps.
    pub const PRICE: RangeDomain = RangeDomain {
        min: 0,
        max: 30_000,
        step: 500,
        format: BoundFormat::Currency,
    };

    /// Odometer slider: 0 – 250,000 miles in 5,000 mile steps.
    pub const MILEAGE: RangeDomain = RangeDomain {
        min: 0,
        max: 250_000,
        step: 5_000,
        format: BoundFormat::Thousands,
    };

    pub fn clamp(&self, value: u64) -> u64 {
        value.clamp(self.min, self.max)
    }

    /// Snap a handle position to the nearest step, staying in the domain.
    pub fn snap(&self, value: u64) -> u64 {
        let step = self.step.max(1);
        let offset = self.clamp(value) - self.min;
        let steps = offset.saturating_add(step / 2) / step;
        self.clamp(self.min.saturating_add(steps.saturating_mul(step)))
    }
}

/// Named shortcut. A `None` side maps to the domain edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangePreset {
    pub label: String,
    #[serde(default)]
    pub min: Option<u64>,
    #[serde(default)]
    pub max: Option<u64>,
}

impl RangePreset {
    pub fn new(label: &str, min: Option<u64>, max: Option<u64>) -> Self {
        Self {
            label: label.to_string(),
            min,
            max,
        }
    }

    pub fn price_defaults() -> Vec<RangePreset> {
        vec![
            RangePreset::new("Under $10k", Some(0), Some(10_000)),
            RangePreset::new("10–15k", Some(10_000), Some(15_000)),
            RangePreset::new("15–20k", Some(15_000), Some(20_000)),
            RangePreset::new("Under $20k", Some(0), Some(20_000)),
        ]
    }

    pub fn mileage_defaults() -> Vec<RangePreset> {
        vec![
            RangePreset::new("Under 60k", Some(0), Some(60_000)),
            RangePreset::new("60–90k", Some(60_000), Some(90_000)),
            RangePreset::new("90–120k", Some(90_000), Some(120_000)),
            RangePreset::new("Over 120k", Some(120_000), None),
        ]
    }
}

/// Handle positions while the popup is open. Always `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeDraft {
    min: u64,
    max: u64,
}

impl RangeDraft {
    pub fn min(&self) -> u64 {
        self.min
    }

    pub fn max(&self) -> u64 {
        self.max
    }
}

/// Receives every committed value.
pub type CommitCallback = Box<dyn FnMut(RangeBounds)>;

pub struct RangeControl {
    domain: RangeDomain,
    presets: Vec<RangePreset>,
    committed: RangeBounds,
    draft: Option<RangeDraft>,
    on_commit: Option<CommitCallback>,
}

impl fmt::Debug for RangeControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RangeControl")
            .field("domain", &self.domain)
            .field("presets", &self.presets)
            .field("committed", &self.committed)
            .field("draft", &self.draft)
            .field("on_commit", &self.on_commit.is_some())
            .finish()
    }
}

impl RangeControl {
    pub fn new(domain: RangeDomain, presets: Vec<RangePreset>) -> Self {
        Self {
            domain,
            presets,
            committed: RangeBounds::ANY,
            draft: None,
            on_commit: None,
        }
    }

    pub fn price() -> Self {
        Self::new(RangeDomain::PRICE, RangePreset::price_defaults())
    }

    pub fn mileage() -> Self {
        Self::new(RangeDomain::MILEAGE, RangePreset::mileage_defaults())
    }

    /// Register the consumer of committed values.
    pub fn with_callback(mut self, callback: impl FnMut(RangeBounds) + 'static) -> Self {
        self.on_commit = Some(Box::new(callback));
        self
    }

    pub fn domain(&self) -> &RangeDomain {
        &self.domain
    }

    pub fn presets(&self) -> &[RangePreset] {
        &self.presets
    }

    pub fn value(&self) -> RangeBounds {
        self.committed
    }

    pub fn draft(&self) -> Option<RangeDraft> {
        self.draft
    }

    pub fn is_open(&self) -> bool {
        self.draft.is_some()
    }

    /// Replace the committed value from outside (e.g. "clear all").
    ///
    /// Does not fire the callback. An open draft is reset to mirror it.
    pub fn sync(&mut self, value: RangeBounds) {
        self.committed = value;
        if self.draft.is_some() {
            self.draft = Some(self.resolve(value.min, value.max));
        }
    }

    /// Open the popup with a draft mirroring the committed value.
    pub fn open(&mut self) {
        if self.draft.is_none() {
            self.draft = Some(self.resolve(self.committed.min, self.committed.max));
        }
    }

    /// Open when closed, discard the draft when open.
    pub fn toggle(&mut self) {
        if self.is_open() {
            self.cancel();
        } else {
            self.open();
        }
    }

    /// Move the lower handle; snapped to the step grid.
    pub fn drag_min(&mut self, value: u64) {
        let snapped = self.domain.snap(value);
        self.set_draft_min(snapped);
    }

    /// Move the upper handle; snapped to the step grid.
    pub fn drag_max(&mut self, value: u64) {
        let snapped = self.domain.snap(value);
        self.set_draft_max(snapped);
    }

    /// Text entry for the lower bound. Empty or non-numeric text reads as 0.
    pub fn type_min(&mut self, raw: &str) {
        self.set_draft_min(parse_integer(raw).unwrap_or(0));
    }

    /// Text entry for the upper bound. Empty or non-numeric text reads as 0.
    pub fn type_max(&mut self, raw: &str) {
        self.set_draft_max(parse_integer(raw).unwrap_or(0));
    }

    /// Overwrite both draft bounds from the preset at `index`.
    pub fn select_preset(&mut self, index: usize) -> bool {
        match self.presets.get(index).cloned() {
            Some(preset) if self.is_open() => {
                self.apply_preset(&preset);
                true
            }
            _ => false,
        }
    }

    /// Overwrite both draft bounds from an arbitrary preset.
    pub fn apply_preset(&mut self, preset: &RangePreset) {
        if self.draft.is_none() {
            trace!(preset = %preset.label, "ignoring preset on closed range control");
            return;
        }
        self.draft = Some(self.resolve(preset.min, preset.max));
    }

    /// Commit the draft and close. Returns the committed value, or `None`
    /// when the control was not open.
    pub fn apply(&mut self) -> Option<RangeBounds> {
        let draft = self.draft.take()?;
        let value = RangeBounds {
            min: (draft.min != self.domain.min).then_some(draft.min),
            max: (draft.max != self.domain.max).then_some(draft.max),
        };
        self.commit(value);
        Some(value)
    }

    /// Discard the draft and close (Cancel, Escape, outside click).
    pub fn cancel(&mut self) {
        self.draft = None;
    }

    /// Commit "no limit" immediately and close.
    pub fn clear(&mut self) -> RangeBounds {
        self.draft = None;
        self.commit(RangeBounds::ANY);
        RangeBounds::ANY
    }

    /// Button text for the committed value: `Any`, `$10,000 – Max`, ...
    pub fn label(&self) -> String {
        range_label(&self.committed, self.domain.format)
    }

    fn commit(&mut self, value: RangeBounds) {
        self.committed = value;
        if let Some(callback) = self.on_commit.as_mut() {
            callback(value);
        }
    }

    fn set_draft_min(&mut self, value: u64) {
        let domain_min = self.domain.min;
        match self.draft.as_mut() {
            Some(draft) => draft.min = value.clamp(domain_min, draft.max),
            None => trace!(value, "ignoring min edit on closed range control"),
        }
    }

    fn set_draft_max(&mut self, value: u64) {
        let domain_max = self.domain.max;
        match self.draft.as_mut() {
            Some(draft) => draft.max = value.clamp(draft.min, domain_max),
            None => trace!(value, "ignoring max edit on closed range control"),
        }
    }

    /// Map possibly-unbounded sides onto handle positions inside the domain.
    fn resolve(&self, min: Option<u64>, max: Option<u64>) -> RangeDraft {
        let min = self.domain.clamp(min.unwrap_or(self.domain.min));
        let max = max.unwrap_or(self.domain.max).clamp(min, self.domain.max);
        RangeDraft { min, max }
    }
}

/// Render committed bounds: `Any` when unbounded, otherwise each side as a
/// formatted value or `Min`/`Max`.
pub fn range_label(bounds: &RangeBounds, format: BoundFormat) -> String {
    if bounds.is_any() {
        return "Any".to_string();
    }
    let min = bounds
        .min
        .map(|v| format.format(v))
        .unwrap_or_else(|| "Min".to_string());
    let max = bounds
        .max
        .map(|v| format.format(v))
        .unwrap_or_else(|| "Max".to_string());
    format!("{} – {}", min, max)
}
