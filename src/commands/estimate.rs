//! `dealerlot estimate`: the payment estimator card on the command line.

use anyhow::Result;
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::OutputFormat;
use crate::config::resolve_config;
use crate::finance::{FinanceField, FinancingForm, FinancingSettings, LoanEstimate};
use crate::formatting::{format_usd, format_usd_cents, OutputFormatter};

#[derive(Debug, Clone, Default)]
pub struct EstimateConfig {
    pub price: Option<String>,
    pub down: Option<String>,
    pub apr: Option<String>,
    pub term: Option<u32>,
    pub tier: Option<String>,
    pub format: Option<OutputFormat>,
    pub config: Option<PathBuf>,
}

pub fn handle_estimate(config: EstimateConfig, formatter: &dyn OutputFormatter) -> Result<()> {
    let settings = resolve_config(config.config.as_deref())?;
    let form = build_form(&config, settings.financing)?;

    let output = match config.format.unwrap_or(OutputFormat::Terminal) {
        OutputFormat::Json => render_json(&form)?,
        OutputFormat::Terminal => render_terminal(&form, formatter),
    };
    println!("{output}");
    Ok(())
}

/// Fill the form the way a shopper would: tier first, then typed fields,
/// so an explicit `--apr` wins over the tier's rate.
pub fn build_form(config: &EstimateConfig, settings: FinancingSettings) -> Result<FinancingForm> {
    let mut form = FinancingForm::new(settings);

    if let Some(tier) = &config.tier {
        if !form.select_tier(tier) {
            let known: Vec<_> = form.tiers().iter().map(|t| t.id.as_str()).collect();
            anyhow::bail!(
                "Unknown credit tier '{}'. Expected one of: {}",
                tier,
                known.join(", ")
            );
        }
    }
    for (field, value) in [
        (FinanceField::Price, &config.price),
        (FinanceField::Down, &config.down),
        (FinanceField::Apr, &config.apr),
    ] {
        if let Some(value) = value {
            form.input(field, value);
        }
    }
    if let Some(term) = config.term {
        if !form.select_term(term) {
            let offered: Vec<_> = form.terms().iter().map(u32::to_string).collect();
            anyhow::bail!(
                "Term of {} months is not offered. Choose one of: {}",
                term,
                offered.join(", ")
            );
        }
    }
    Ok(form)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EstimateOutput<'a> {
    price: f64,
    down_payment: f64,
    apr: f64,
    term_months: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    tier: Option<&'a str>,
    #[serde(flatten)]
    estimate: LoanEstimate,
}

pub fn render_json(form: &FinancingForm) -> Result<String> {
    let output = EstimateOutput {
        price: form.price(),
        down_payment: form.down(),
        apr: form.apr(),
        term_months: form.term(),
        tier: form.selected_tier().map(|t| t.id.as_str()),
        estimate: form.estimate(),
    };
    Ok(serde_json::to_string_pretty(&output)?)
}

pub fn render_terminal(form: &FinancingForm, formatter: &dyn OutputFormatter) -> String {
    let estimate = form.estimate();
    let tier = form
        .selected_tier()
        .map(|t| format!(" ({}, {})", t.label, t.score_band()))
        .unwrap_or_default();

    let rows = [
        ("Price", format_usd(form.price())),
        ("Down payment", format_usd(form.down())),
        ("APR", format!("{}%{}", form.apr_text(), tier)),
        ("Term", format!("{} months", form.term())),
        ("Amount financed", format_usd(estimate.amount_financed)),
        ("Total paid", format_usd(estimate.total_paid)),
        ("Total interest", format_usd(estimate.total_interest)),
    ];

    let mut out = formatter.header(&format!(
        "Estimated payment: {}/mo",
        format_usd_cents(estimate.monthly_payment)
    ));
    out.push('\n');
    for (label, value) in rows {
        out.push_str(&format!("  {:<16} {}\n", label, value));
    }
    out.push_str(&formatter.dim("Estimate only. Actual rate depends on lender approval."));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatting::PlainFormatter;

    #[test]
    fn test_defaults_render() {
        let form = build_form(&EstimateConfig::default(), FinancingSettings::default()).unwrap();
        let output = render_terminal(&form, &PlainFormatter);
        assert!(output.starts_with("Estimated payment: $369."));
        assert!(output.contains("8.49% (Good, 700–749)"));
        assert!(output.contains("60 months"));
    }

    #[test]
    fn test_explicit_apr_beats_tier() {
        let config = EstimateConfig {
            tier: Some("excel".into()),
            apr: Some("0".into()),
            price: Some("$20,000".into()),
            ..EstimateConfig::default()
        };
        let form = build_form(&config, FinancingSettings::default()).unwrap();
        assert_eq!(form.estimate().monthly_payment, 300.0);
    }

    #[test]
    fn test_unknown_tier_and_term_are_errors() {
        let config = EstimateConfig {
            tier: Some("platinum".into()),
            ..EstimateConfig::default()
        };
        let err = build_form(&config, FinancingSettings::default()).unwrap_err();
        assert!(err.to_string().contains("rebuild, fair, good, excel"));

        let config = EstimateConfig {
            term: Some(84),
            ..EstimateConfig::default()
        };
        assert!(build_form(&config, FinancingSettings::default()).is_err());
    }

    #[test]
    fn test_json_output() {
        let config = EstimateConfig {
            apr: Some("0".into()),
            ..EstimateConfig::default()
        };
        let form = build_form(&config, FinancingSettings::default()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&render_json(&form).unwrap()).unwrap();
        assert_eq!(json["monthlyPayment"], 300.0);
        assert_eq!(json["amountFinanced"], 18_000.0);
        assert_eq!(json["termMonths"], 60);
        assert_eq!(json["tier"], "good");
    }
}
