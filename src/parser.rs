//! CSV parser for passenger manifests.

use anyhow::{Context, Result, bail};
use csv::ReaderBuilder;
use serde::Deserialize;

use crate::record::{Passenger, Sex};
use crate::schema;

/// A row as it comes off the wire, before value validation. `survived` is
/// the feed's 0/1 encoding and `sex` is free text until checked.
#[derive(Debug, Deserialize)]
struct RawPassenger {
    id: u32,
    class: u8,
    sex: String,
    #[serde(default)]
    age: Option<f64>,
    siblings_spouses: u32,
    parents_children: u32,
    #[serde(default)]
    fare: Option<f64>,
    #[serde(default)]
    survived: Option<u8>,
    name: String,
}

/// Decodes a CSV-encoded passenger manifest from raw bytes.
///
/// Headers are renamed to the canonical schema before deserialization, so
/// mirrors with Kaggle-style column names parse identically. Missing values
/// in nullable columns become `None`; an entirely absent `age`, `fare`, or
/// `survived` column is tolerated the same way.
///
/// # Errors
///
/// Returns an error if a structurally required column is absent, or if any
/// row carries a value that violates the schema contract (non-numeric text
/// in a numeric column, a class outside 1..=3, an unrecognized sex or
/// survived code, a negative age or fare).
pub fn parse_manifest(bytes: &[u8]) -> Result<Vec<Passenger>> {
    let mut rdr = ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let headers = rdr.headers().context("manifest has no header row")?;
    let canonical = schema::normalize_headers(headers);

    let missing = schema::missing_required(&canonical);
    if !missing.is_empty() {
        bail!("manifest is missing required columns: {}", missing.join(", "));
    }
    rdr.set_headers(canonical);

    let mut passengers = Vec::new();
    for (idx, result) in rdr.deserialize::<RawPassenger>().enumerate() {
        let raw = result.with_context(|| format!("malformed manifest row {}", idx + 1))?;
        let passenger =
            validate(raw).with_context(|| format!("invalid manifest row {}", idx + 1))?;
        passengers.push(passenger);
    }

    Ok(passengers)
}

fn validate(raw: RawPassenger) -> Result<Passenger> {
    let sex = match raw.sex.to_ascii_lowercase().as_str() {
        "female" => Sex::Female,
        "male" => Sex::Male,
        other => bail!("unrecognized sex code {other:?}"),
    };

    if !(1..=3).contains(&raw.class) {
        bail!("passenger class {} outside 1..=3", raw.class);
    }

    let survived = match raw.survived {
        None => None,
        Some(0) => Some(false),
        Some(1) => Some(true),
        Some(other) => bail!("unrecognized survived code {other}"),
    };

    if let Some(age) = raw.age
        && !(age >= 0.0)
    {
        bail!("negative or non-finite age {age}");
    }
    if let Some(fare) = raw.fare
        && !(fare >= 0.0)
    {
        bail!("negative or non-finite fare {fare}");
    }

    Ok(Passenger {
        id: raw.id,
        class: raw.class,
        sex,
        age: raw.age,
        siblings_spouses: raw.siblings_spouses,
        parents_children: raw.parents_children,
        fare: raw.fare,
        survived,
        name: raw.name,
    })
}
