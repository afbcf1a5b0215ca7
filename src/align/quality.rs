//! Correlation quality metrics
//!
//! Both metrics read the finished correlation curve: SNR compares the peak
//! against the median level outside its neighborhood, the noise floor is a
//! low percentile of the absolute curve. Degenerate curves fall back to
//! sentinels so the metrics are always defined.

/// Lags on each side of the peak excluded from the noise estimate
const PEAK_EXCLUSION_LAGS: i64 = 10;

/// SNR reported when the noise estimate is empty or zero
const DEFAULT_SNR_DB: f64 = 40.0;

/// Noise floor reported for an empty correlation
const NOISE_FLOOR_SENTINEL_DB: f64 = -60.0;

/// Epsilon keeping the noise-floor logarithm finite
const LOG_EPSILON: f64 = 1e-10;

/// Estimate the correlation signal-to-noise ratio in dB
///
/// Noise is the median of `|C[i]|` over all lags more than 10 positions
/// from the peak. When that set is empty or the median is zero, a 40 dB
/// default is reported.
pub fn snr_estimate(correlation: &[f64], peak_index: usize) -> f64 {
    if correlation.is_empty() || peak_index >= correlation.len() {
        return 0.0;
    }

    let signal = correlation[peak_index];

    let mut noise_values: Vec<f64> = correlation
        .iter()
        .enumerate()
        .filter(|(i, _)| (*i as i64 - peak_index as i64).abs() > PEAK_EXCLUSION_LAGS)
        .map(|(_, &v)| v.abs())
        .collect();

    if noise_values.is_empty() {
        return DEFAULT_SNR_DB;
    }

    noise_values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let noise = noise_values[noise_values.len() / 2];

    if noise > 0.0 {
        20.0 * (signal.abs() / noise).log10()
    } else {
        DEFAULT_SNR_DB
    }
}

/// Estimate the correlation noise floor in dB
///
/// Takes the absolute value at the 10th percentile of the sorted curve and
/// converts to dB with a small epsilon so silence stays finite.
pub fn noise_floor_db(correlation: &[f64]) -> f64 {
    if correlation.is_empty() {
        return NOISE_FLOOR_SENTINEL_DB;
    }

    let mut sorted: Vec<f64> = correlation.iter().map(|v| v.abs()).collect();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let floor = sorted[sorted.len() / 10];
    20.0 * (floor + LOG_EPSILON).log10()
}
