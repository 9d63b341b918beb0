//! Canonical manifest schema and header normalization.
//!
//! Mirrors of the dataset disagree on column naming (`Pclass` vs `pclass`
//! vs `class`). Ingest renames headers through a fixed case-insensitive
//! alias table before deserialization; unmapped columns pass through
//! unchanged and are ignored by the row type.

use csv::StringRecord;

/// Alias table: canonical name first, then the raw spellings that map to it.
/// Matching is case-insensitive, so only one casing per alias is listed.
static ALIASES: &[(&str, &[&str])] = &[
    ("id", &["id", "passengerid", "passenger_id"]),
    ("class", &["class", "pclass", "passenger_class"]),
    ("sex", &["sex", "gender"]),
    ("age", &["age"]),
    ("siblings_spouses", &["siblings_spouses", "sibsp"]),
    ("parents_children", &["parents_children", "parch"]),
    ("fare", &["fare"]),
    ("survived", &["survived"]),
    ("name", &["name"]),
];

/// Canonical columns that must be present in every feed. `age`, `fare`, and
/// `survived` are tolerated missing; the views degrade instead of failing.
static REQUIRED: &[&str] = &[
    "id",
    "class",
    "sex",
    "siblings_spouses",
    "parents_children",
    "name",
];

/// Maps a raw header name to its canonical form, if it has one.
pub fn canonical_name(raw: &str) -> Option<&'static str> {
    let lowered = raw.trim().to_ascii_lowercase();
    ALIASES
        .iter()
        .find(|(_, aliases)| aliases.contains(&lowered.as_str()))
        .map(|(canonical, _)| *canonical)
}

/// Rewrites a header record into canonical column names. Columns without a
/// canonical mapping keep their raw name.
pub fn normalize_headers(headers: &StringRecord) -> StringRecord {
    headers
        .iter()
        .map(|h| canonical_name(h).unwrap_or(h))
        .collect()
}

/// Checks that every structurally required column is present in a
/// canonicalized header record.
pub fn missing_required(headers: &StringRecord) -> Vec<&'static str> {
    REQUIRED
        .iter()
        .filter(|required| !headers.iter().any(|h| h == **required))
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_name_kaggle_headers() {
        assert_eq!(canonical_name("PassengerId"), Some("id"));
        assert_eq!(canonical_name("Pclass"), Some("class"));
        assert_eq!(canonical_name("SibSp"), Some("siblings_spouses"));
        assert_eq!(canonical_name("Parch"), Some("parents_children"));
        assert_eq!(canonical_name("Survived"), Some("survived"));
    }

    #[test]
    fn test_canonical_name_is_case_insensitive() {
        assert_eq!(canonical_name("SIBSP"), Some("siblings_spouses"));
        assert_eq!(canonical_name("age"), Some("age"));
        assert_eq!(canonical_name("AGE"), Some("age"));
    }

    #[test]
    fn test_canonical_name_unknown_column() {
        assert_eq!(canonical_name("Cabin"), None);
        assert_eq!(canonical_name("Embarked"), None);
    }

    #[test]
    fn test_normalize_headers_passes_unknown_through() {
        let raw = StringRecord::from(vec!["PassengerId", "Pclass", "Cabin"]);
        let normalized = normalize_headers(&raw);
        assert_eq!(normalized, StringRecord::from(vec!["id", "class", "Cabin"]));
    }

    #[test]
    fn test_missing_required_reports_absent_columns() {
        let headers = StringRecord::from(vec!["id", "class", "sex", "name"]);
        let missing = missing_required(&headers);
        assert_eq!(missing, vec!["siblings_spouses", "parents_children"]);
    }

    #[test]
    fn test_missing_required_tolerates_optional_columns() {
        // age / fare / survived absent: structurally fine
        let headers = StringRecord::from(vec![
            "id",
            "class",
            "sex",
            "siblings_spouses",
            "parents_children",
            "name",
        ]);
        assert!(missing_required(&headers).is_empty());
    }
}
