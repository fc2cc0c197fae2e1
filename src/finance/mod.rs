//! Financing estimator.
//!
//! The payment math in [`estimator`] is total: it never panics and never
//! returns NaN. [`form`] wraps it with the estimator card's editable state.
//! [`application`] is the longer pre-qualification form.

pub mod application;
pub mod estimator;
pub mod form;
pub mod tiers;

use serde::{Deserialize, Serialize};

pub use application::{FinancingApplication, Party};
pub use estimator::{estimate_monthly, LoanEstimate};
pub use form::{FinanceField, FinancingForm};
pub use tiers::{find_tier, CreditTier};

/// `[financing]` section of `.dealerlot.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancingSettings {
    pub default_price: f64,
    pub default_down: f64,
    pub default_apr: f64,
    pub default_term: u32,
    pub default_tier: String,
    /// Loan lengths offered, in months.
    pub terms: Vec<u32>,
    /// Share of a broadcast price used as the prefilled down payment.
    pub down_payment_ratio: f64,
    pub tiers: Vec<CreditTier>,
}

impl Default for FinancingSettings {
    fn default() -> Self {
        Self {
            default_price: 20_000.0,
            default_down: 2_000.0,
            default_apr: 8.49,
            default_term: 60,
            default_tier: "good".to_string(),
            terms: vec![36, 48, 60, 72],
            down_payment_ratio: 0.10,
            tiers: CreditTier::defaults(),
        }
    }
}
