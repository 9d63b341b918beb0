//! Age banding: continuous age to an ordered categorical band.

use anyhow::{Result, bail};

use crate::record::Passenger;

/// Top edge used by the presets when a manifest has no usable age at all.
const FALLBACK_MAX_AGE: f64 = 80.0;

/// A set of bin edges and band labels for converting a continuous age into
/// an ordered categorical band.
///
/// Intervals are left-open/right-closed, except the lowest edge, which is
/// inclusive: an age equal to an interior edge falls in the lower band, and
/// an age equal to the minimum edge falls in the first band. Ages outside
/// `[min(edges), max(edges)]` have no band.
///
/// Every caller that needs an age band for one rendered view must share a
/// single `AgeBands` value; mixing edge sets breaks comparability.
#[derive(Debug, Clone)]
pub struct AgeBands {
    edges: Vec<f64>,
    labels: Vec<String>,
}

impl AgeBands {
    /// Builds a band set from explicit edges and labels.
    ///
    /// # Errors
    ///
    /// Returns an error unless `labels.len() == edges.len() - 1` and the
    /// edges are finite and strictly increasing.
    pub fn new(edges: Vec<f64>, labels: Vec<String>) -> Result<Self> {
        if edges.len() < 2 {
            bail!("age bands need at least two edges, got {}", edges.len());
        }
        if labels.len() != edges.len() - 1 {
            bail!(
                "expected {} band labels for {} edges, got {}",
                edges.len() - 1,
                edges.len(),
                labels.len()
            );
        }
        if edges.iter().any(|e| !e.is_finite()) {
            bail!("age band edges must be finite");
        }
        if edges.windows(2).any(|w| w[0] >= w[1]) {
            bail!("age band edges must be strictly increasing");
        }
        Ok(Self { edges, labels })
    }

    /// The 4-band preset: Child/Teen/Adult/Senior, with the top edge taken
    /// from the oldest passenger on the manifest.
    pub fn coarse_for(passengers: &[Passenger]) -> Self {
        let top = top_edge(passengers, 59.0);
        Self::new(
            vec![0.0, 12.0, 19.0, 59.0, top],
            vec![
                "Child (0-12)".to_string(),
                "Teen (13-19)".to_string(),
                "Adult (20-59)".to_string(),
                "Senior (60+)".to_string(),
            ],
        )
        .expect("coarse preset is well-formed")
    }

    /// The 6-band preset, splitting children and adults more finely.
    pub fn fine_for(passengers: &[Passenger]) -> Self {
        let top = top_edge(passengers, 59.0);
        Self::new(
            vec![0.0, 5.0, 12.0, 19.0, 39.0, 59.0, top],
            vec![
                "Infant (0-5)".to_string(),
                "Child (6-12)".to_string(),
                "Teen (13-19)".to_string(),
                "Young Adult (20-39)".to_string(),
                "Adult (40-59)".to_string(),
                "Senior (60+)".to_string(),
            ],
        )
        .expect("fine preset is well-formed")
    }

    /// Number of bands.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Label of the band at `idx`. Panics on an out-of-range index.
    pub fn label(&self, idx: usize) -> &str {
        &self.labels[idx]
    }

    /// Ordinal band index for an age, or `None` when the age lies outside
    /// the edge range.
    pub fn band_of(&self, age: f64) -> Option<usize> {
        if !age.is_finite() {
            return None;
        }
        let first = self.edges[0];
        if age == first {
            return Some(0);
        }
        self.edges.windows(2).position(|w| age > w[0] && age <= w[1])
    }

    /// Null-propagating variant: a null age has no band.
    pub fn band_label(&self, age: Option<f64>) -> Option<&str> {
        age.and_then(|a| self.band_of(a)).map(|i| self.label(i))
    }
}

/// Highest non-null age on the manifest, provided it exceeds the last
/// interior edge; otherwise a fixed fallback keeps the edges increasing.
fn top_edge(passengers: &[Passenger], last_interior: f64) -> f64 {
    passengers
        .iter()
        .filter_map(|p| p.age)
        .fold(None::<f64>, |acc, a| Some(acc.map_or(a, |m| m.max(a))))
        .filter(|m| *m > last_interior)
        .unwrap_or(FALLBACK_MAX_AGE)
}
