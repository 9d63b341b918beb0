//! Chart descriptions for the presentation layer.
//!
//! A [`ChartSpec`] binds chart channels (x, y, color, facet, size) to the
//! fixed column names of a tidy table and embeds the rows as JSON. The
//! rendering layer owns styling; builders here do no recomputation.

use anyhow::Result;
use serde::Serialize;

use crate::analysis::types::{AgeDivisionRow, DemographicRow, FamilyFareRow};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Bar,
    GroupedBar,
    Scatter,
}

/// An opaque chart description: kind, channel bindings, and tidy data.
#[derive(Debug, Serialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub x: String,
    pub y: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facet: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    pub data: serde_json::Value,
}

/// Faceted bar chart of survival rate by class and age band, one facet per
/// sex.
pub fn demographic_chart(rows: &[DemographicRow]) -> Result<ChartSpec> {
    Ok(ChartSpec {
        kind: ChartKind::Bar,
        title: "Survival Rate by Class, Sex, and Age Group".to_string(),
        x: "class".to_string(),
        y: "survival_rate".to_string(),
        color: Some("age_band".to_string()),
        facet: Some("sex".to_string()),
        size: None,
        data: serde_json::to_value(rows)?,
    })
}

/// Bubble scatter of average fare against family size, colored by class,
/// bubble size by group population.
pub fn family_fare_chart(rows: &[FamilyFareRow]) -> Result<ChartSpec> {
    Ok(ChartSpec {
        kind: ChartKind::Scatter,
        title: "Average Fare vs. Family Size by Passenger Class".to_string(),
        x: "family_size".to_string(),
        y: "avg_fare".to_string(),
        color: Some("class".to_string()),
        facet: None,
        size: Some("n_passengers".to_string()),
        data: serde_json::to_value(rows)?,
    })
}

/// Grouped bar chart of survival rate by class, split on the above-median
/// age flag.
pub fn age_division_chart(rows: &[AgeDivisionRow]) -> Result<ChartSpec> {
    Ok(ChartSpec {
        kind: ChartKind::GroupedBar,
        title: "Survival Rate by Class and Age Relative to Class Median".to_string(),
        x: "class".to_string(),
        y: "survival_rate".to_string(),
        color: Some("above_class_median_age".to_string()),
        facet: None,
        size: None,
        data: serde_json::to_value(rows)?,
    })
}
