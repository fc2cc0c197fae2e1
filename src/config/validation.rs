//! Validation with error accumulation for configuration.
//!
//! Every rule runs, so a broken file reports all of its problems at once.
//! Messages carry the dotted field path, e.g. `price.presets[2]`.

use crate::finance::FinancingSettings;
use crate::refine::{RangeDomain, RangePreset};

use super::DealerlotConfig;

/// Validate the whole config. `Err` holds one message per problem.
pub fn validate_config(config: &DealerlotConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if config.storefront.page_size == 0 {
        errors.push("storefront.page_size: must be at least 1".to_string());
    }
    if config.storefront.new_arrival_days < 0 {
        errors.push("storefront.new_arrival_days: must not be negative".to_string());
    }
    errors.extend(validate_range("price", &config.price_domain(), &config.price_presets()));
    errors.extend(validate_range(
        "mileage",
        &config.mileage_domain(),
        &config.mileage_presets(),
    ));
    errors.extend(validate_financing(&config.financing));

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_range(section: &str, domain: &RangeDomain, presets: &[RangePreset]) -> Vec<String> {
    let mut errors = Vec::new();
    if domain.min >= domain.max {
        errors.push(format!(
            "{section}: min ({}) must be below max ({})",
            domain.min, domain.max
        ));
    }
    if domain.step == 0 {
        errors.push(format!("{section}.step: must be at least 1"));
    }
    for (idx, preset) in presets.iter().enumerate() {
        let min = preset.min.unwrap_or(domain.min);
        let max = preset.max.unwrap_or(domain.max);
        if min > max {
            errors.push(format!(
                "{section}.presets[{idx}] '{}': min ({min}) above max ({max})",
                preset.label
            ));
        }
        if min < domain.min || max > domain.max {
            errors.push(format!(
                "{section}.presets[{idx}] '{}': outside {}..={}",
                preset.label, domain.min, domain.max
            ));
        }
    }
    errors
}

fn validate_financing(financing: &FinancingSettings) -> Vec<String> {
    let mut errors = Vec::new();
    if financing.terms.is_empty() {
        errors.push("financing.terms: at least one term is required".to_string());
    }
    if financing.terms.contains(&0) {
        errors.push("financing.terms: terms must be at least one month".to_string());
    }
    if !financing.terms.contains(&financing.default_term) {
        errors.push(format!(
            "financing.default_term: {} is not one of the offered terms",
            financing.default_term
        ));
    }
    if !(0.0..=1.0).contains(&financing.down_payment_ratio) {
        errors.push(format!(
            "financing.down_payment_ratio: expected 0.0-1.0, got {}",
            financing.down_payment_ratio
        ));
    }
    for (name, value) in [
        ("default_price", financing.default_price),
        ("default_down", financing.default_down),
        ("default_apr", financing.default_apr),
    ] {
        if !value.is_finite() || value < 0.0 {
            errors.push(format!("financing.{name}: must be a non-negative number"));
        }
    }
    for (idx, tier) in financing.tiers.iter().enumerate() {
        if !tier.apr.is_finite() || tier.apr < 0.0 {
            errors.push(format!(
                "financing.tiers[{idx}] '{}': apr must be a non-negative number",
                tier.id
            ));
        }
    }
    errors
}
