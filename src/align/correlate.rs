//! Cross-correlation of feature sequences
//!
//! The correlation is normalized by overlap count only: no mean subtraction
//! and no division by standard deviations, so the peak value stays in the
//! units of the feature products.

/// Cross-correlate two feature sequences over all lags
///
/// For sequences of lengths `La` and `Lb` the result has
/// `2 * min(La, Lb) - 1` entries; index `l` corresponds to signed lag
/// `l - (min(La, Lb) - 1)` frames. Each entry is the mean of
/// `a[i] * b[i + lag]` over the in-range overlap.
///
/// Empty input yields an empty correlation.
pub fn cross_correlate(a: &[f32], b: &[f32]) -> Vec<f64> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }

    let max_lag = a.len().min(b.len());
    let correlation_size = 2 * max_lag - 1;
    let mut correlation = vec![0.0f64; correlation_size];

    for (lag_index, value) in correlation.iter_mut().enumerate() {
        let lag = lag_index as i64 - max_lag as i64 + 1;

        let mut sum = 0.0f64;
        let mut count = 0usize;

        // Overlap range of i such that 0 <= i + lag < b.len()
        let start = (-lag).max(0) as usize;
        let end = a.len().min((b.len() as i64 - lag).max(0) as usize);

        for i in start..end {
            let j = (i as i64 + lag) as usize;
            sum += a[i] as f64 * b[j] as f64;
            count += 1;
        }

        if count > 0 {
            *value = sum / count as f64;
        }
    }

    correlation
}

/// Fold a per-dimension correlation into a running combination
///
/// The first call seeds the accumulator with `correlation * weight`; each
/// later call merges element-wise over the shared prefix as
/// `(acc + correlation * weight) / 2`.
pub fn merge_weighted(accumulator: &mut Vec<f64>, correlation: &[f64], weight: f64) {
    if accumulator.is_empty() {
        accumulator.extend(correlation.iter().map(|&v| v * weight));
        return;
    }

    let shared = accumulator.len().min(correlation.len());
    for i in 0..shared {
        accumulator[i] = (accumulator[i] + correlation[i] * weight) / 2.0;
    }
}

/// Convert a correlation peak index to a sample offset
///
/// The lag axis is centered so the middle index (signed lag zero) maps to
/// offset 0; positive offsets mean the target lags the reference.
pub fn lag_to_offset(peak_index: usize, correlation_len: usize, hop_size: usize) -> i64 {
    if correlation_len == 0 {
        return 0;
    }

    let center = (correlation_len as i64 - 1) / 2;
    (peak_index as i64 - center) * hop_size as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correlation_length() {
        let a = vec![1.0f32; 8];
        let b = vec![1.0f32; 5];
        assert_eq!(cross_correlate(&a, &b).len(), 2 * 5 - 1);
        assert_eq!(cross_correlate(&b, &a).len(), 2 * 5 - 1);
    }

    #[test]
    fn test_empty_input_yields_empty() {
        assert!(cross_correlate(&[], &[1.0]).is_empty());
        assert!(cross_correlate(&[1.0], &[]).is_empty());
    }

    #[test]
    fn test_identical_sparse_sequences_peak_at_center() {
        let a = vec![0.0f32, 1.0, 0.0, 0.0];
        let correlation = cross_correlate(&a, &a);
        assert_eq!(correlation.len(), 7);

        let peak = correlation
            .iter()
            .enumerate()
            .max_by(|x, y| x.1.partial_cmp(y.1).unwrap())
            .map(|(i, _)| i)
            .unwrap();
        // Signed lag 0 sits at index min - 1 = 3
        assert_eq!(peak, 3);
    }

    #[test]
    fn test_shifted_impulse_peak_location() {
        // b is a copy of a delayed by 2 frames
        let a = vec![0.0f32, 0.0, 1.0, 0.0, 0.0, 0.0];
        let b = vec![0.0f32, 0.0, 0.0, 0.0, 1.0, 0.0];
        let correlation = cross_correlate(&a, &b);

        let peak = correlation
            .iter()
            .enumerate()
            .max_by(|x, y| x.1.partial_cmp(y.1).unwrap())
            .map(|(i, _)| i)
            .unwrap();
        // Peak should land at signed lag +2, i.e. index (6 - 1) + 2 = 7
        assert_eq!(peak, 7);
    }

    #[test]
    fn test_mean_normalization_by_overlap() {
        // At full overlap the constant product 0.25 should come out exactly;
        // partial overlaps are normalized by their own count, not the total.
        let a = vec![0.5f32; 4];
        let correlation = cross_correlate(&a, &a);
        for &value in &correlation {
            assert!((value - 0.25).abs() < 1e-9);
        }
    }

    #[test]
    fn test_merge_weighted_seeds_then_averages() {
        let mut acc = Vec::new();
        merge_weighted(&mut acc, &[2.0, 4.0], 0.5);
        assert_eq!(acc, vec![1.0, 2.0]);

        merge_weighted(&mut acc, &[3.0, 3.0], 1.0);
        assert_eq!(acc, vec![2.0, 2.5]);
    }

    #[test]
    fn test_merge_weighted_respects_shorter_input() {
        let mut acc = vec![1.0, 1.0, 1.0];
        merge_weighted(&mut acc, &[3.0], 1.0);
        assert_eq!(acc, vec![2.0, 1.0, 1.0]);
    }

    #[test]
    fn test_lag_to_offset_centering() {
        // 7 lags -> center at index 3
        assert_eq!(lag_to_offset(3, 7, 256), 0);
        assert_eq!(lag_to_offset(5, 7, 256), 512);
        assert_eq!(lag_to_offset(0, 7, 256), -768);
        assert_eq!(lag_to_offset(0, 0, 256), 0);
    }
}
