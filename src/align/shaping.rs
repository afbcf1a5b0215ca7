//! Feature shaping before correlation
//!
//! Scalar sequences are thresholded and rescaled so the correlation sees
//! onset structure rather than absolute levels.

use crate::dsp::stats::percentile_value;

/// Subtract a percentile floor and clamp at zero
///
/// The threshold is the value at `percentile` of the sorted sequence;
/// everything below it becomes 0, everything above keeps its margin. This
/// suppresses the noise floor while preserving peak spacing.
pub fn adaptive_threshold(features: &mut [f32], percentile: f32) {
    let Some(threshold) = percentile_value(features, percentile) else {
        return;
    };

    for value in features.iter_mut() {
        *value = (*value - threshold).max(0.0);
    }
}

/// Rescale a sequence to span [0, 1]
///
/// Constant sequences are left unchanged.
pub fn min_max_normalize(features: &mut [f32]) {
    if features.is_empty() {
        return;
    }

    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    for &value in features.iter() {
        min = min.min(value);
        max = max.max(value);
    }

    if max > min {
        let range = max - min;
        for value in features.iter_mut() {
            *value = (*value - min) / range;
        }
    }
}
