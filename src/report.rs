//! Report bundle generation.
//!
//! Runs every aggregation view over one manifest snapshot and writes the
//! tidy tables as CSV, the chart descriptions as JSON, and a timestamped
//! index describing what was produced.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::analysis::aggregate::{
    family_fares, median_age_division, survival_available, survival_demographics,
};
use crate::analysis::bands::AgeBands;
use crate::analysis::names::last_name_counts;
use crate::charts::{age_division_chart, demographic_chart, family_fare_chart};
use crate::output::write_csv;
use crate::record::Passenger;

/// Summary entry for one table in the bundle.
#[derive(Debug, Serialize)]
pub struct TableSummary {
    pub table: String,
    pub file: String,
    pub rows: usize,
}

/// Top-level index of a generated report bundle, written as `index.json`.
#[derive(Debug, Serialize)]
pub struct ReportIndex {
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub passengers: usize,
    pub survival_available: bool,
    pub tables: Vec<TableSummary>,
}

/// Runs all views against `passengers` and writes the bundle into
/// `out_dir`: one CSV per table, `charts.json`, and `index.json`.
pub fn write_report(
    passengers: &[Passenger],
    source: &str,
    out_dir: &Path,
    bands: &AgeBands,
) -> Result<ReportIndex> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("creating report directory {}", out_dir.display()))?;

    let demographics = survival_demographics(passengers, bands);
    let families = family_fares(passengers);
    let divisions = median_age_division(passengers);
    let names = last_name_counts(passengers);

    let mut tables = Vec::new();

    let mut write_table = |table: &str, file: &str, rows: usize| {
        tables.push(TableSummary {
            table: table.to_string(),
            file: file.to_string(),
            rows,
        });
    };

    write_csv(out_dir.join("demographics.csv"), &demographics)?;
    write_table("demographics", "demographics.csv", demographics.len());

    write_csv(out_dir.join("families.csv"), &families)?;
    write_table("families", "families.csv", families.len());

    write_csv(out_dir.join("age_division.csv"), &divisions)?;
    write_table("age_division", "age_division.csv", divisions.len());

    write_csv(out_dir.join("last_names.csv"), &names)?;
    write_table("last_names", "last_names.csv", names.len());

    let charts = vec![
        demographic_chart(&demographics)?,
        family_fare_chart(&families)?,
        age_division_chart(&divisions)?,
    ];
    fs::write(
        out_dir.join("charts.json"),
        serde_json::to_vec_pretty(&charts)?,
    )?;

    let index = ReportIndex {
        generated_at: Utc::now(),
        source: source.to_string(),
        passengers: passengers.len(),
        survival_available: survival_available(passengers),
        tables,
    };
    fs::write(
        out_dir.join("index.json"),
        serde_json::to_vec_pretty(&index)?,
    )?;

    info!(
        out_dir = %out_dir.display(),
        tables = index.tables.len(),
        "Report bundle written"
    );

    Ok(index)
}
