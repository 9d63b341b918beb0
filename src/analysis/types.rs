//! Tidy output row types for the aggregation views.
//!
//! One row per group, one column per variable, with fixed names and types
//! so a rendering layer can bind chart channels without reshaping. The
//! survivor columns are `None` when the feed carries no survival outcome
//! (count-only degrade).

use serde::Serialize;

use crate::record::Sex;

/// One (class, sex, age band) group of the demographic survival view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DemographicRow {
    pub class: u8,
    pub sex: Sex,
    pub age_band: String,
    pub n_passengers: usize,
    pub n_survivors: Option<usize>,
    pub survival_rate: Option<f64>,
}

/// One (class, family size) group of the family/fare view. Fare statistics
/// cover non-null fares only; a group of all-null fares has `None` in all
/// three while still counting its passengers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FamilyFareRow {
    pub class: u8,
    pub family_size: u32,
    pub n_passengers: usize,
    pub avg_fare: Option<f64>,
    pub min_fare: Option<f64>,
    pub max_fare: Option<f64>,
}

/// One (class, above/not-above class median age) group of the median-age
/// division view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgeDivisionRow {
    pub class: u8,
    pub above_class_median_age: bool,
    pub n_passengers: usize,
    pub n_survivors: Option<usize>,
    pub survival_rate: Option<f64>,
}

/// One distinct last name and its occurrence count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LastNameCount {
    pub last_name: String,
    pub count: usize,
}
