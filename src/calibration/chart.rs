//! Reference color charts and nearest-entry matching
//!
//! A chart is an ordered list of calibration colors, each measured under a
//! known chemistry concentration. Matching is a linear scan for the entry
//! with the smallest weighted Euclidean distance, never an exact-key lookup.

use serde::{Deserialize, Serialize};

use crate::{color::Color, constants::matching::CHANNEL_WEIGHTS, AnalysisError, Result};

/// One calibration point: reference color and the reading it stands for
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartEntry {
    pub color: Color,
    pub value: f64,
}

impl ChartEntry {
    pub fn new(color: Color, value: f64) -> Self {
        Self { color, value }
    }
}

/// Ordered calibration chart for one parameter of one kit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReferenceChart {
    entries: Vec<ChartEntry>,
}

/// Best chart entry for a measured color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchResult {
    pub value: f64,
    /// Weighted Euclidean distance to the matched reference color
    pub distance: f64,
    /// Reference color that won
    pub reference: Color,
}

impl ReferenceChart {
    pub fn new(entries: Vec<ChartEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[ChartEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find the entry nearest to `measured`
    ///
    /// Ties keep the earliest entry in chart order.
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::ConfigurationError` if the chart is empty.
    pub fn match_color(&self, measured: Color) -> Result<MatchResult> {
        let mut best: Option<MatchResult> = None;

        for entry in &self.entries {
            let distance = weighted_distance(measured, entry.color);
            if best.map_or(true, |b| distance < b.distance) {
                best = Some(MatchResult {
                    value: entry.value,
                    distance,
                    reference: entry.color,
                });
            }
        }

        best.ok_or_else(|| AnalysisError::configuration("reference chart has no entries"))
    }
}

impl FromIterator<ChartEntry> for ReferenceChart {
    fn from_iter<I: IntoIterator<Item = ChartEntry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Weighted Euclidean distance between two colors
///
/// Each channel's squared difference is scaled by its weight
/// (R 1.2, G 1.0, B 0.8) before summing.
pub fn weighted_distance(a: Color, b: Color) -> f64 {
    a.channels()
        .iter()
        .zip(b.channels().iter())
        .zip(CHANNEL_WEIGHTS.iter())
        .map(|((&m, &r), &w)| {
            let diff = m as f64 - r as f64;
            w * diff * diff
        })
        .sum::<f64>()
        .sqrt()
}
