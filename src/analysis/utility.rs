/// Computes the arithmetic mean of a slice of values. Returns `None` for
/// empty input so an all-null fare group stays distinguishable from zero.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Computes the standard median: the middle value for odd-sized input, the
/// mean of the two middle values for even-sized input. Returns `None` for
/// empty input.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Some(sorted[mid])
    } else {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    }
}

/// Fraction `part / total`. An empty denominator yields NaN: the rate is
/// undefined, not zero.
pub fn rate(part: usize, total: usize) -> f64 {
    if total == 0 {
        f64::NAN
    } else {
        part as f64 / total as f64
    }
}
