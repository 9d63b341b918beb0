//! Class-relative median age classification.

use std::collections::BTreeMap;

use crate::analysis::utility::median;
use crate::record::Passenger;

/// Median age per passenger class, computed over non-null ages only.
/// Classes with no usable age are absent from the map.
pub fn class_median_ages(passengers: &[Passenger]) -> BTreeMap<u8, f64> {
    let mut ages_by_class: BTreeMap<u8, Vec<f64>> = BTreeMap::new();
    for p in passengers {
        if let Some(age) = p.age {
            ages_by_class.entry(p.class).or_default().push(age);
        }
    }

    ages_by_class
        .into_iter()
        .filter_map(|(class, ages)| median(&ages).map(|m| (class, m)))
        .collect()
}

/// Labels each row with whether its age lies strictly above the median age
/// of its class. Null-propagating: a null age yields `None`, and an age
/// exactly equal to the class median is not-above.
///
/// Returns a column parallel to the input; the input table is untouched.
pub fn above_class_median(passengers: &[Passenger]) -> Vec<Option<bool>> {
    let medians = class_median_ages(passengers);
    passengers
        .iter()
        .map(|p| {
            let age = p.age?;
            let class_median = medians.get(&p.class)?;
            Some(age > *class_median)
        })
        .collect()
}
