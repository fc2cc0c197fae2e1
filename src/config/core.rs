use serde::{Deserialize, Serialize};

use crate::finance::FinancingSettings;
use crate::refine::{RangeControl, RangeDomain, RangePreset, DEFAULT_PAGE_SIZE};

/// Root configuration structure for dealerlot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DealerlotConfig {
    /// Listing behaviour
    #[serde(default)]
    pub storefront: StorefrontConfig,

    /// Price range control overrides
    #[serde(default)]
    pub price: RangeConfig,

    /// Mileage range control overrides
    #[serde(default)]
    pub mileage: RangeConfig,

    /// Estimator defaults and credit tiers
    #[serde(default)]
    pub financing: FinancingSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorefrontConfig {
    /// Cars revealed per "load more"
    pub page_size: usize,
    /// Age in days under which a car carries the new-arrival badge
    pub new_arrival_days: i64,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            new_arrival_days: 7,
        }
    }
}

/// Partial override of a range control. Unset fields keep the built-in
/// domain and presets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RangeConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presets: Option<Vec<RangePreset>>,
}

impl RangeConfig {
    pub fn domain(&self, base: RangeDomain) -> RangeDomain {
        RangeDomain {
            min: self.min.unwrap_or(base.min),
            max: self.max.unwrap_or(base.max),
            step: self.step.unwrap_or(base.step),
            format: base.format,
        }
    }

    pub fn presets_or(&self, defaults: Vec<RangePreset>) -> Vec<RangePreset> {
        self.presets.clone().unwrap_or(defaults)
    }
}

impl DealerlotConfig {
    pub fn page_size(&self) -> usize {
        self.storefront.page_size.max(1)
    }

    pub fn new_arrival_days(&self) -> i64 {
        self.storefront.new_arrival_days
    }

    pub fn price_domain(&self) -> RangeDomain {
        self.price.domain(RangeDomain::PRICE)
    }

    pub fn mileage_domain(&self) -> RangeDomain {
        self.mileage.domain(RangeDomain::MILEAGE)
    }

    pub fn price_presets(&self) -> Vec<RangePreset> {
        self.price.presets_or(RangePreset::price_defaults())
    }

    pub fn mileage_presets(&self) -> Vec<RangePreset> {
        self.mileage.presets_or(RangePreset::mileage_defaults())
    }

    pub fn price_control(&self) -> RangeControl {
        RangeControl::new(self.price_domain(), self.price_presets())
    }

    pub fn mileage_control(&self) -> RangeControl {
        RangeControl::new(self.mileage_domain(), self.mileage_presets())
    }
}
