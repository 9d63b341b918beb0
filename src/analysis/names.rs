//! Last-name extraction and frequency counts.

use std::collections::HashMap;

use crate::analysis::types::LastNameCount;
use crate::record::Passenger;

/// Extracts the last name from a `"Last, Rest"` formatted name: the text
/// before the first comma, trimmed. A name without a comma is used whole.
pub fn last_name(name: &str) -> &str {
    name.split(',').next().unwrap_or(name).trim()
}

/// Frequency of each distinct last name, sorted by count descending with
/// ties broken by last name ascending.
pub fn last_name_counts(passengers: &[Passenger]) -> Vec<LastNameCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for p in passengers {
        *counts.entry(last_name(&p.name)).or_default() += 1;
    }

    let mut rows: Vec<LastNameCount> = counts
        .into_iter()
        .map(|(name, count)| LastNameCount {
            last_name: name.to_string(),
            count,
        })
        .collect();
    rows.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.last_name.cmp(&b.last_name))
    });
    rows
}
