//! Amortizing-loan payment math.

use serde::{Deserialize, Serialize};

/// Monthly payment for a fixed-rate loan.
///
/// `P = max(price - down, 0)`, `r = apr / 100 / 12`, `n = term`. With
/// `r = 0` the payment is `P / n`, otherwise `P * r / (1 - (1 + r)^-n)`.
///
/// A zero term, or any input that would make the result non-finite,
/// yields 0.
pub fn estimate_monthly(price: f64, apr_percent: f64, term_months: u32, down: f64) -> f64 {
    if term_months == 0 {
        return 0.0;
    }
    let principal = (price - down).max(0.0);
    let rate = apr_percent / 100.0 / 12.0;
    let n = f64::from(term_months);

    let monthly = if rate == 0.0 {
        principal / n
    } else {
        principal * rate / (1.0 - (1.0 + rate).powf(-n))
    };

    if monthly.is_finite() {
        monthly
    } else {
        0.0
    }
}

/// Everything the estimator card displays.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanEstimate {
    pub monthly_payment: f64,
    pub amount_financed: f64,
    /// Whole dollars.
    pub total_paid: f64,
    pub total_interest: f64,
}

impl LoanEstimate {
    pub fn compute(price: f64, apr_percent: f64, term_months: u32, down: f64) -> Self {
        let monthly_payment = estimate_monthly(price, apr_percent, term_months, down);
        let amount_financed = finite_or_zero((price - down).max(0.0));
        let total_paid = (monthly_payment * f64::from(term_months)).round();
        let total_interest = (total_paid - amount_financed).max(0.0);

        Self {
            monthly_payment,
            amount_financed,
            total_paid,
            total_interest,
        }
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
