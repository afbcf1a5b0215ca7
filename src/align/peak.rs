//! Correlation peak selection

use crate::align::confidence;

/// Ratio reported when no positive secondary peak exists
pub const NO_SECONDARY_SENTINEL: f64 = 1e10;

/// The selected correlation peak and its quality
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorrelationPeak {
    /// Index of the primary peak in the correlation sequence
    pub index: usize,

    /// Correlation value at the primary peak
    pub value: f64,

    /// Blended confidence in [0, 1]
    pub confidence: f64,

    /// Primary-to-secondary ratio; [`NO_SECONDARY_SENTINEL`] when no
    /// positive secondary exists
    pub secondary_peak_ratio: f64,
}

/// Select the best alignment peak from a correlation sequence
///
/// The primary is the global maximum (first occurrence on ties); the
/// secondary is the largest value at any other index, with no exclusion
/// window around the primary. Empty input yields a zero peak with
/// confidence 0.
pub fn find_best_alignment(correlation: &[f64]) -> CorrelationPeak {
    if correlation.is_empty() {
        return CorrelationPeak {
            index: 0,
            value: 0.0,
            confidence: 0.0,
            secondary_peak_ratio: 1.0,
        };
    }

    let mut index = 0;
    let mut value = correlation[0];
    for (i, &v) in correlation.iter().enumerate().skip(1) {
        if v > value {
            value = v;
            index = i;
        }
    }

    let mut second = f64::NEG_INFINITY;
    for (i, &v) in correlation.iter().enumerate() {
        if i != index && v > second {
            second = v;
        }
    }

    let secondary_peak_ratio = if second > 0.0 {
        value / second
    } else {
        NO_SECONDARY_SENTINEL
    };

    CorrelationPeak {
        index,
        value,
        confidence: confidence::score(correlation, index),
        secondary_peak_ratio,
    }
}
