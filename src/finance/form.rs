//! Estimator card state: text fields, tier selection and price prefill.

use tracing::{debug, trace};

use super::estimator::LoanEstimate;
use super::tiers::{find_tier, CreditTier};
use super::FinancingSettings;
use crate::input::{parse_decimal, parse_integer, sanitize_decimal, sanitize_integer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinanceField {
    Price,
    Down,
    Apr,
}

#[derive(Debug, Clone)]
pub struct FinancingForm {
    price: String,
    down: String,
    apr: String,
    term: u32,
    tier: Option<String>,
    focused: Option<FinanceField>,
    settings: FinancingSettings,
}

impl FinancingForm {
    pub fn new(settings: FinancingSettings) -> Self {
        let tier = find_tier(&settings.tiers, &settings.default_tier).map(|t| t.id.clone());
        Self {
            price: format_whole(settings.default_price),
            down: format_whole(settings.default_down),
            apr: format_rate(settings.default_apr),
            term: settings.default_term,
            tier,
            focused: None,
            settings,
        }
    }

    pub fn price_text(&self) -> &str {
        &self.price
    }

    pub fn down_text(&self) -> &str {
        &self.down
    }

    pub fn apr_text(&self) -> &str {
        &self.apr
    }

    /// Empty fields count as 0.
    pub fn price(&self) -> f64 {
        parse_integer(&self.price).unwrap_or(0) as f64
    }

    pub fn down(&self) -> f64 {
        parse_integer(&self.down).unwrap_or(0) as f64
    }

    pub fn apr(&self) -> f64 {
        parse_decimal(&self.apr).unwrap_or(0.0)
    }

    pub fn term(&self) -> u32 {
        self.term
    }

    pub fn terms(&self) -> &[u32] {
        &self.settings.terms
    }

    pub fn tiers(&self) -> &[CreditTier] {
        &self.settings.tiers
    }

    pub fn selected_tier(&self) -> Option<&CreditTier> {
        self.tier
            .as_deref()
            .and_then(|id| find_tier(&self.settings.tiers, id))
    }

    pub fn focused(&self) -> Option<FinanceField> {
        self.focused
    }

    pub fn focus(&mut self, field: FinanceField) {
        self.focused = Some(field);
    }

    pub fn blur(&mut self) {
        self.focused = None;
    }

    /// Keystroke into a text field. Price and down take whole dollars, APR
    /// takes one decimal point.
    pub fn input(&mut self, field: FinanceField, raw: &str) {
        match field {
            FinanceField::Price => self.price = sanitize_integer(raw),
            FinanceField::Down => self.down = sanitize_integer(raw),
            FinanceField::Apr => self.apr = sanitize_decimal(raw),
        }
    }

    /// Pick a term from the offered list; anything else is ignored.
    pub fn select_term(&mut self, months: u32) -> bool {
        if !self.settings.terms.contains(&months) {
            trace!(months, "term not offered");
            return false;
        }
        self.term = months;
        true
    }

    /// Selecting a tier overwrites the APR field and nothing else.
    pub fn select_tier(&mut self, id: &str) -> bool {
        let Some(tier) = find_tier(&self.settings.tiers, id) else {
            trace!(id, "unknown credit tier");
            return false;
        };
        self.apr = format_rate(tier.apr);
        self.tier = Some(tier.id.clone());
        true
    }

    /// React to a vehicle price broadcast from the catalog.
    ///
    /// Skipped while the shopper is typing in any text field, and for
    /// non-positive prices. Otherwise sets the price and a default down
    /// payment.
    pub fn on_set_price(&mut self, price: f64) -> bool {
        if self.focused.is_some() {
            debug!(price, "ignoring price broadcast while a field is focused");
            return false;
        }
        if !price.is_finite() || price <= 0.0 {
            return false;
        }
        let down = (price * self.settings.down_payment_ratio).round();
        self.price = format_whole(price);
        self.down = format_whole(down);
        true
    }

    pub fn estimate(&self) -> LoanEstimate {
        LoanEstimate::compute(self.price(), self.apr(), self.term, self.down())
    }
}

impl Default for FinancingForm {
    fn default() -> Self {
        Self::new(FinancingSettings::default())
    }
}

fn format_whole(value: f64) -> String {
    if value.is_finite() && value > 0.0 {
        (value.round() as u64).to_string()
    } else {
        "0".to_string()
    }
}

fn format_rate(apr: f64) -> String {
    let text = format!("{apr:.2}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let form = FinancingForm::default();
        assert_eq!(form.price(), 20_000.0);
        assert_eq!(form.down(), 2_000.0);
        assert_eq!(form.apr_text(), "8.49");
        assert_eq!(form.term(), 60);
        assert_eq!(form.selected_tier().map(|t| t.id.as_str()), Some("good"));
    }

    #[test]
    fn test_select_tier_only_touches_apr() {
        let mut form = FinancingForm::default();
        form.input(FinanceField::Price, "15000");
        assert!(form.select_term(72));
        assert!(form.select_tier("rebuild"));
        assert_eq!(form.apr(), 12.99);
        assert_eq!(form.price(), 15_000.0);
        assert_eq!(form.down(), 2_000.0);
        assert_eq!(form.term(), 72);
    }

    #[test]
    fn test_unknown_tier_and_term_are_ignored() {
        let mut form = FinancingForm::default();
        assert!(!form.select_tier("platinum"));
        assert!(!form.select_term(84));
        assert_eq!(form.apr_text(), "8.49");
        assert_eq!(form.term(), 60);
    }

    #[test]
    fn test_set_price_prefills_ten_percent_down() {
        let mut form = FinancingForm::default();
        assert!(form.on_set_price(12_345.0));
        assert_eq!(form.price_text(), "12345");
        assert_eq!(form.down_text(), "1235");
    }

    #[test]
    fn test_set_price_skipped_while_typing() {
        let mut form = FinancingForm::default();
        form.focus(FinanceField::Apr);
        assert!(!form.on_set_price(9_000.0));
        assert_eq!(form.price(), 20_000.0);
        form.blur();
        assert!(form.on_set_price(9_000.0));
        assert_eq!(form.price(), 9_000.0);
    }

    #[test]
    fn test_set_price_rejects_non_positive() {
        let mut form = FinancingForm::default();
        assert!(!form.on_set_price(0.0));
        assert!(!form.on_set_price(f64::NAN));
        assert_eq!(form.price(), 20_000.0);
    }

    #[test]
    fn test_text_entry_is_sanitized() {
        let mut form = FinancingForm::default();
        form.input(FinanceField::Price, "$18,500");
        form.input(FinanceField::Apr, "6.9.9%");
        form.input(FinanceField::Down, "");
        assert_eq!(form.price(), 18_500.0);
        assert_eq!(form.apr(), 6.99);
        assert_eq!(form.down(), 0.0);
    }

    #[test]
    fn test_estimate_uses_form_values() {
        let mut form = FinancingForm::default();
        form.input(FinanceField::Apr, "0");
        assert_eq!(form.estimate().monthly_payment, 300.0);
    }

    #[test]
    fn test_format_rate() {
        assert_eq!(format_rate(8.49), "8.49");
        assert_eq!(format_rate(7.5), "7.5");
        assert_eq!(format_rate(10.0), "10");
    }
}
