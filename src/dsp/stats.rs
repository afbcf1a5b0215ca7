//! Scalar statistics over sample and feature slices

/// Root-mean-square of a slice
///
/// Returns 0.0 for empty input.
pub fn rms(values: &[f32]) -> f32 {
    if values.is_empty() {
        return 0.0;
    }

    let sum_sq: f64 = values.iter().map(|&x| (x as f64) * (x as f64)).sum();
    (sum_sq / values.len() as f64).sqrt() as f32
}

/// Maximum absolute value of a slice
pub fn peak_abs(values: &[f32]) -> f32 {
    values.iter().map(|x| x.abs()).fold(0.0f32, f32::max)
}

/// In-place median filter
///
/// Each interior sample is replaced by the median of its `filter_size`
/// neighborhood; the outer `filter_size / 2` samples at each edge are left
/// unchanged. Inputs shorter than 3 samples or filter sizes below 3 are a
/// no-op.
pub fn median_filter(values: &mut [f32], filter_size: usize) {
    if values.len() < 3 || filter_size < 3 {
        return;
    }

    let half = filter_size / 2;
    if values.len() < 2 * half + 1 {
        return;
    }

    let mut smoothed = values.to_vec();
    let mut window = Vec::with_capacity(2 * half + 1);

    for i in half..values.len() - half {
        window.clear();
        window.extend_from_slice(&values[i - half..=i + half]);
        window.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        smoothed[i] = window[window.len() / 2];
    }

    values.copy_from_slice(&smoothed);
}

/// Value at the given fraction of the sorted slice
///
/// Sorts a copy ascending and picks index `len * fraction` (truncated).
/// Returns `None` for empty input.
pub fn percentile_value(values: &[f32], fraction: f32) -> Option<f32> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let index = ((sorted.len() as f32 * fraction) as usize).min(sorted.len() - 1);
    Some(sorted[index])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rms_known_values() {
        assert_eq!(rms(&[]), 0.0);
        assert!((rms(&[1.0, 1.0, 1.0]) - 1.0).abs() < 1e-6);
        assert!((rms(&[3.0, 4.0]) - (12.5f32).sqrt()).abs() < 1e-6);
    }

    #[test]
    fn test_peak_abs() {
        assert_eq!(peak_abs(&[]), 0.0);
        assert_eq!(peak_abs(&[0.1, -0.9, 0.5]), 0.9);
    }

    #[test]
    fn test_median_filter_removes_spike() {
        let mut values = vec![1.0, 1.0, 10.0, 1.0, 1.0];
        median_filter(&mut values, 3);
        assert_eq!(values, vec![1.0, 1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_median_filter_preserves_edges() {
        let mut values = vec![5.0, 1.0, 1.0, 1.0, 7.0];
        median_filter(&mut values, 3);
        assert_eq!(values[0], 5.0);
        assert_eq!(values[4], 7.0);
    }

    #[test]
    fn test_median_filter_noop_cases() {
        let mut short = vec![1.0, 2.0];
        median_filter(&mut short, 3);
        assert_eq!(short, vec![1.0, 2.0]);

        let mut small_filter = vec![1.0, 9.0, 1.0, 9.0];
        let original = small_filter.clone();
        median_filter(&mut small_filter, 1);
        assert_eq!(small_filter, original);
    }

    #[test]
    fn test_percentile_value() {
        let values = vec![5.0, 1.0, 3.0, 2.0, 4.0];
        assert_eq!(percentile_value(&values, 0.0), Some(1.0));
        // len * 0.5 = 2 -> third smallest
        assert_eq!(percentile_value(&values, 0.5), Some(3.0));
        // Truncation keeps the top index in range
        assert_eq!(percentile_value(&values, 1.0), Some(5.0));
        assert_eq!(percentile_value(&[], 0.5), None);
    }
}
