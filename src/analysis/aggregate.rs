//! Grouped aggregation views over a normalized manifest.
//!
//! Each view is a pure function from the table to a sorted sequence of tidy
//! rows. Rows whose partition key is null (no age band, no median label)
//! are excluded from that view rather than collected into a synthetic
//! "unknown" group; the exclusion count is logged so the policy stays
//! observable. When the feed has no survival outcome at all, the survival
//! views degrade to passenger counts instead of failing.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::analysis::bands::AgeBands;
use crate::analysis::median::above_class_median;
use crate::analysis::types::{AgeDivisionRow, DemographicRow, FamilyFareRow};
use crate::analysis::utility::{mean, rate};
use crate::record::{Passenger, Sex};

/// The survived column counts as absent when no row carries a value. This
/// covers both a missing header and an all-empty column.
pub fn survival_available(passengers: &[Passenger]) -> bool {
    passengers.iter().any(|p| p.survived.is_some())
}

#[derive(Default)]
struct SurvivalAcc {
    n: usize,
    survivors: usize,
}

impl SurvivalAcc {
    fn add(&mut self, survived: Option<bool>) {
        self.n += 1;
        if survived == Some(true) {
            self.survivors += 1;
        }
    }
}

/// Survival statistics grouped by (class, sex, age band).
///
/// Rows without an age band (null age, or age outside the band edges) are
/// excluded: age is the partition key, so a missing age means no group.
/// Output is sorted by class, then sex (female first), then band ordinal.
pub fn survival_demographics(passengers: &[Passenger], bands: &AgeBands) -> Vec<DemographicRow> {
    let with_survival = survival_available(passengers);
    if !with_survival && !passengers.is_empty() {
        warn!("survived column absent; demographic view degrades to passenger counts");
    }

    let mut groups: BTreeMap<(u8, Sex, usize), SurvivalAcc> = BTreeMap::new();
    let mut excluded = 0usize;

    for p in passengers {
        let Some(band) = p.age.and_then(|a| bands.band_of(a)) else {
            excluded += 1;
            continue;
        };
        groups.entry((p.class, p.sex, band)).or_default().add(p.survived);
    }

    if excluded > 0 {
        debug!(excluded, "Rows without an age band excluded from demographic view");
    }
    if groups.is_empty() && !passengers.is_empty() {
        warn!("no usable age values; demographic view is empty");
    }

    groups
        .into_iter()
        .map(|((class, sex, band), acc)| DemographicRow {
            class,
            sex,
            age_band: bands.label(band).to_string(),
            n_passengers: acc.n,
            n_survivors: with_survival.then_some(acc.survivors),
            survival_rate: with_survival.then(|| rate(acc.survivors, acc.n)),
        })
        .collect()
}

/// Fare statistics grouped by (class, family size).
///
/// Every passenger counts toward `n_passengers`; the fare columns cover
/// non-null fares only. Output is sorted by class, then family size.
pub fn family_fares(passengers: &[Passenger]) -> Vec<FamilyFareRow> {
    #[derive(Default)]
    struct FareAcc {
        n: usize,
        fares: Vec<f64>,
    }

    let mut groups: BTreeMap<(u8, u32), FareAcc> = BTreeMap::new();
    for p in passengers {
        let acc = groups.entry((p.class, p.family_size())).or_default();
        acc.n += 1;
        if let Some(fare) = p.fare {
            acc.fares.push(fare);
        }
    }

    groups
        .into_iter()
        .map(|((class, family_size), acc)| FamilyFareRow {
            class,
            family_size,
            n_passengers: acc.n,
            avg_fare: mean(&acc.fares),
            min_fare: acc.fares.iter().copied().reduce(f64::min),
            max_fare: acc.fares.iter().copied().reduce(f64::max),
        })
        .collect()
}

/// Survival statistics grouped by (class, above-class-median age).
///
/// Rows with a null age carry no division label and are excluded, the same
/// policy as the demographic view. Output is sorted by class, then the
/// division flag (not-above first).
pub fn median_age_division(passengers: &[Passenger]) -> Vec<AgeDivisionRow> {
    let with_survival = survival_available(passengers);
    if !with_survival && !passengers.is_empty() {
        warn!("survived column absent; age-division view degrades to passenger counts");
    }

    let labels = above_class_median(passengers);

    let mut groups: BTreeMap<(u8, bool), SurvivalAcc> = BTreeMap::new();
    let mut excluded = 0usize;

    for (p, label) in passengers.iter().zip(&labels) {
        let Some(above) = *label else {
            excluded += 1;
            continue;
        };
        groups.entry((p.class, above)).or_default().add(p.survived);
    }

    if excluded > 0 {
        debug!(excluded, "Unclassifiable rows excluded from age-division view");
    }

    groups
        .into_iter()
        .map(|((class, above), acc)| AgeDivisionRow {
            class,
            above_class_median_age: above,
            n_passengers: acc.n,
            n_survivors: with_survival.then_some(acc.survivors),
            survival_rate: with_survival.then(|| rate(acc.survivors, acc.n)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passenger(
        id: u32,
        class: u8,
        sex: Sex,
        age: Option<f64>,
        fare: Option<f64>,
        survived: Option<bool>,
    ) -> Passenger {
        Passenger {
            id,
            class,
            sex,
            age,
            siblings_spouses: 0,
            parents_children: 0,
            fare,
            survived,
            name: "Doe, Test".to_string(),
        }
    }

    fn bands() -> AgeBands {
        AgeBands::new(
            vec![0.0, 12.0, 19.0, 59.0, 80.0],
            vec![
                "Child (0-12)".to_string(),
                "Teen (13-19)".to_string(),
                "Adult (20-59)".to_string(),
                "Senior (60+)".to_string(),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_demographics_counts_and_rate() {
        let rows = vec![
            passenger(1, 1, Sex::Female, Some(8.0), None, Some(true)),
            passenger(2, 1, Sex::Female, Some(8.0), None, Some(false)),
        ];
        let out = survival_demographics(&rows, &bands());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].age_band, "Child (0-12)");
        assert_eq!(out[0].n_passengers, 2);
        assert_eq!(out[0].n_survivors, Some(1));
        assert_eq!(out[0].survival_rate, Some(0.5));
    }

    #[test]
    fn test_demographics_excludes_null_age_rows() {
        let rows = vec![
            passenger(1, 1, Sex::Female, Some(8.0), None, Some(true)),
            passenger(2, 1, Sex::Female, None, None, Some(true)),
            passenger(3, 1, Sex::Female, Some(200.0), None, Some(true)),
        ];
        let out = survival_demographics(&rows, &bands());
        let total: usize = out.iter().map(|r| r.n_passengers).sum();
        assert_eq!(total, 1);
    }

    #[test]
    fn test_demographics_partition_sums_to_eligible_rows() {
        let rows = vec![
            passenger(1, 1, Sex::Female, Some(8.0), None, Some(true)),
            passenger(2, 1, Sex::Male, Some(30.0), None, Some(false)),
            passenger(3, 2, Sex::Male, Some(65.0), None, Some(false)),
            passenger(4, 3, Sex::Female, None, None, Some(true)),
        ];
        let out = survival_demographics(&rows, &bands());
        let eligible = rows.iter().filter(|p| p.age.is_some()).count();
        let total: usize = out.iter().map(|r| r.n_passengers).sum();
        assert_eq!(total, eligible);
        for row in &out {
            assert!(row.n_survivors.unwrap() <= row.n_passengers);
            let rate = row.survival_rate.unwrap();
            assert!((0.0..=1.0).contains(&rate));
        }
    }

    #[test]
    fn test_demographics_sorted_by_declared_key_order() {
        let rows = vec![
            passenger(1, 3, Sex::Male, Some(30.0), None, Some(false)),
            passenger(2, 1, Sex::Male, Some(30.0), None, Some(false)),
            passenger(3, 1, Sex::Female, Some(30.0), None, Some(true)),
            passenger(4, 1, Sex::Female, Some(8.0), None, Some(true)),
        ];
        let out = survival_demographics(&rows, &bands());
        let keys: Vec<_> = out
            .iter()
            .map(|r| (r.class, r.sex, r.age_band.clone()))
            .collect();
        assert_eq!(
            keys,
            vec![
                (1, Sex::Female, "Child (0-12)".to_string()),
                (1, Sex::Female, "Adult (20-59)".to_string()),
                (1, Sex::Male, "Adult (20-59)".to_string()),
                (3, Sex::Male, "Adult (20-59)".to_string()),
            ]
        );
    }

    #[test]
    fn test_demographics_degrades_without_survived() {
        let rows = vec![
            passenger(1, 1, Sex::Female, Some(8.0), None, None),
            passenger(2, 1, Sex::Female, Some(9.0), None, None),
        ];
        let out = survival_demographics(&rows, &bands());
        assert_eq!(out[0].n_passengers, 2);
        assert_eq!(out[0].n_survivors, None);
        assert_eq!(out[0].survival_rate, None);
    }

    #[test]
    fn test_family_fares_null_fare_counted_but_not_averaged() {
        let rows = vec![
            passenger(1, 2, Sex::Male, None, Some(10.0), None),
            passenger(2, 2, Sex::Male, None, Some(30.0), None),
            passenger(3, 2, Sex::Male, None, None, None),
        ];
        let out = family_fares(&rows);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].family_size, 1);
        assert_eq!(out[0].n_passengers, 3);
        assert_eq!(out[0].avg_fare, Some(20.0));
        assert_eq!(out[0].min_fare, Some(10.0));
        assert_eq!(out[0].max_fare, Some(30.0));
    }

    #[test]
    fn test_family_fares_all_null_fares() {
        let rows = vec![passenger(1, 3, Sex::Male, None, None, None)];
        let out = family_fares(&rows);
        assert_eq!(out[0].n_passengers, 1);
        assert_eq!(out[0].avg_fare, None);
        assert_eq!(out[0].min_fare, None);
        assert_eq!(out[0].max_fare, None);
    }

    #[test]
    fn test_family_fares_groups_by_family_size() {
        let mut big_family = passenger(1, 3, Sex::Female, None, Some(31.275), Some(false));
        big_family.siblings_spouses = 4;
        big_family.parents_children = 2;
        let rows = vec![
            big_family,
            passenger(2, 3, Sex::Male, None, Some(7.25), Some(false)),
        ];
        let out = family_fares(&rows);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].family_size, 1);
        assert_eq!(out[1].family_size, 7);
    }

    #[test]
    fn test_age_division_example() {
        let rows = vec![
            passenger(1, 2, Sex::Male, Some(30.0), None, Some(true)),
            passenger(2, 2, Sex::Male, Some(40.0), None, Some(false)),
            passenger(3, 2, Sex::Male, None, None, Some(true)),
        ];
        let out = median_age_division(&rows);
        // Median 35: one row below (survived), one above (did not), null excluded
        assert_eq!(out.len(), 2);
        assert!(!out[0].above_class_median_age);
        assert_eq!(out[0].n_passengers, 1);
        assert_eq!(out[0].survival_rate, Some(1.0));
        assert!(out[1].above_class_median_age);
        assert_eq!(out[1].survival_rate, Some(0.0));
    }

    #[test]
    fn test_age_division_degrades_without_survived() {
        let rows = vec![
            passenger(1, 2, Sex::Male, Some(30.0), None, None),
            passenger(2, 2, Sex::Male, Some(40.0), None, None),
        ];
        let out = median_age_division(&rows);
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|r| r.n_survivors.is_none()));
        assert!(out.iter().all(|r| r.survival_rate.is_none()));
    }

    #[test]
    fn test_views_leave_input_untouched() {
        let rows = vec![
            passenger(1, 1, Sex::Female, Some(8.0), Some(7.25), Some(true)),
            passenger(2, 2, Sex::Male, Some(40.0), None, Some(false)),
        ];
        let before: Vec<_> = rows.iter().map(|p| (p.id, p.age, p.fare)).collect();
        let _ = survival_demographics(&rows, &bands());
        let _ = family_fares(&rows);
        let _ = median_age_division(&rows);
        let after: Vec<_> = rows.iter().map(|p| (p.id, p.age, p.fare)).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_empty_manifest_yields_empty_views() {
        assert!(survival_demographics(&[], &bands()).is_empty());
        assert!(family_fares(&[]).is_empty());
        assert!(median_age_division(&[]).is_empty());
    }
}
