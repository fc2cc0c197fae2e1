//! `dealerlot browse`: run a snapshot through the refine pipeline.

use anyhow::{Context, Result};
use chrono::Utc;
use comfy_table::{presets, Cell, ContentArrangement, Table};
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::OutputFormat;
use crate::config::{resolve_config, DealerlotConfig};
use crate::formatting::{
    format_miles, format_usd, ColoredFormatter, FormattingConfig, OutputFormatter,
};
use crate::inventory::{load_inventory, slugify, Vehicle};
use crate::refine::{
    range_label, FilterChange, FilterState, MileageStep, RangeBounds, RangeControl, ResultSet,
    SortKey,
};

#[derive(Debug, Clone)]
pub struct BrowseConfig {
    pub snapshot: PathBuf,
    pub query: Option<String>,
    pub make: Option<String>,
    pub body_type: Option<String>,
    pub price: (Option<u64>, Option<u64>),
    pub miles: (Option<u64>, Option<u64>),
    pub mileage_step: Option<String>,
    pub sort: SortKey,
    pub pages: usize,
    pub format: OutputFormat,
    pub config: Option<PathBuf>,
    pub formatting: FormattingConfig,
}

pub fn handle_browse(config: BrowseConfig) -> Result<()> {
    let settings = resolve_config(config.config.as_deref())?;
    let vehicles = load_inventory(&config.snapshot, Utc::now(), settings.new_arrival_days())
        .with_context(|| format!("Failed to load {}", config.snapshot.display()))?;

    let mut results = ResultSet::new(vehicles, settings.page_size());
    for change in filter_changes(&config, &settings)? {
        results.set_filter(change);
    }

    let output = match config.format {
        OutputFormat::Json => render_json(&results)?,
        OutputFormat::Terminal => {
            let formatter = ColoredFormatter::new(config.formatting);
            render_terminal(&results, &settings, &formatter, config.formatting)
        }
    };
    println!("{output}");
    Ok(())
}

/// Translate command-line flags into the same updates the refine panel
/// would send. Page comes last so earlier changes don't reset it.
pub fn filter_changes(config: &BrowseConfig, settings: &DealerlotConfig) -> Result<Vec<FilterChange>> {
    let mut changes = Vec::new();

    if let Some(query) = &config.query {
        changes.push(FilterChange::Query(query.clone()));
    }
    if config.make.is_some() {
        changes.push(FilterChange::Make(config.make.clone()));
    }
    if config.body_type.is_some() {
        changes.push(FilterChange::BodyType(config.body_type.clone()));
    }

    let (price_min, price_max) = config.price;
    changes.push(FilterChange::Price(commit_bounds(
        settings.price_control(),
        price_min,
        price_max,
    )));

    let miles = match &config.mileage_step {
        Some(label) => MileageStep::from_label(label)
            .map(|step| step.to_bounds())
            .with_context(|| {
                let known: Vec<_> = MileageStep::all().iter().map(|s| s.display_name()).collect();
                format!("Unknown mileage step '{}'. Expected one of: {}", label, known.join(", "))
            })?,
        None => {
            let (min, max) = config.miles;
            commit_bounds(settings.mileage_control(), min, max)
        }
    };
    changes.push(FilterChange::Miles(miles));

    changes.push(FilterChange::Sort(config.sort));
    changes.push(FilterChange::Page(config.pages));
    Ok(changes)
}

/// Push typed bounds through a range control's draft and apply them, so
/// they are clamped and normalized exactly as interactive edits are.
pub fn commit_bounds(mut control: RangeControl, min: Option<u64>, max: Option<u64>) -> RangeBounds {
    if min.is_none() && max.is_none() {
        return RangeBounds::ANY;
    }
    control.open();
    if let Some(min) = min {
        control.type_min(&min.to_string());
    }
    if let Some(max) = max {
        control.type_max(&max.to_string());
    }
    control.apply().unwrap_or_default()
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BrowseOutput<'a> {
    total: usize,
    shown: usize,
    page: usize,
    page_size: usize,
    has_more: bool,
    filters: &'a FilterState,
    vehicles: Vec<ListedVehicle<'a>>,
}

#[derive(Serialize)]
struct ListedVehicle<'a> {
    slug: String,
    #[serde(flatten)]
    vehicle: &'a Vehicle,
}

pub fn render_json(results: &ResultSet) -> Result<String> {
    let vehicles: Vec<_> = results
        .visible()
        .into_iter()
        .map(|vehicle| ListedVehicle {
            slug: slugify(vehicle),
            vehicle,
        })
        .collect();
    let output = BrowseOutput {
        total: results.total_count(),
        shown: vehicles.len(),
        page: results.state().page,
        page_size: results.page_size(),
        has_more: results.has_more(),
        filters: results.state(),
        vehicles,
    };
    serde_json::to_string_pretty(&output).context("Failed to serialize results")
}

pub fn render_terminal(
    results: &ResultSet,
    settings: &DealerlotConfig,
    formatter: &dyn OutputFormatter,
    formatting: FormattingConfig,
) -> String {
    let mut out = String::new();
    let state = results.state();
    let visible = results.visible();

    let headline = if state.active_count() > 0 {
        format!("{} matching vehicles", results.total_count())
    } else {
        format!("{} vehicles available", results.total_count())
    };
    out.push_str(&formatter.header(&headline));
    out.push('\n');
    out.push_str(&formatter.dim(&format!(
        "Price: {} · Mileage: {} · Sort: {}",
        range_label(&state.price, settings.price_domain().format),
        range_label(&state.miles, settings.mileage_domain().format),
        state.sort.display_name()
    )));
    out.push('\n');

    if visible.is_empty() {
        out.push_str("No vehicles match these filters.\n");
        return out;
    }

    let mut table = Table::new();
    if formatting.emoji.should_use_emoji() {
        table.load_preset(presets::UTF8_FULL);
    } else {
        table.load_preset(presets::ASCII_FULL);
    }
    table
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Vehicle", "Price", "Mileage", "Body", "Status"]);

    for vehicle in &visible {
        let mut title = vehicle.title();
        if vehicle.is_new {
            title = format!("{} {}", title, formatter.emoji("✨", "[NEW]"));
        }
        table.add_row(vec![
            Cell::new(title),
            Cell::new(vehicle.price.map(format_usd).unwrap_or_else(|| "Call".into())),
            Cell::new(vehicle.miles.map(format_miles).unwrap_or_else(|| "—".into())),
            Cell::new(vehicle.body_type.as_deref().unwrap_or("")),
            Cell::new(formatter.status(vehicle.status)),
        ]);
    }
    out.push_str(&table.to_string());
    out.push('\n');

    out.push_str(&format!(
        "Showing {} of {}",
        visible.len(),
        results.total_count()
    ));
    if results.has_more() {
        out.push_str(&formatter.dim(&format!(
            " (use --pages {} to load more)",
            state.page + 1
        )));
    }
    out.push('\n');
    out
}
