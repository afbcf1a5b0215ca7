//! Mel filterbank and DCT-II
//!
//! The filterbank spans `[0, sample_rate / 2]` on the mel scale
//! (`mel = 2595 * log10(1 + f / 700)`) with triangular filters mapped back
//! to FFT bin indices. Each filter peaks at 1.0. Filters are sized for the
//! lower half of the spectrum (`window_size / 2` bins), which is where all
//! of the mel band centers land.

/// Convert frequency in Hz to mel scale
pub fn hz_to_mel(frequency: f32) -> f32 {
    2595.0 * (1.0 + frequency / 700.0).log10()
}

/// Convert mel scale value back to Hz
pub fn mel_to_hz(mel: f32) -> f32 {
    700.0 * (10.0f32.powf(mel / 2595.0) - 1.0)
}

/// Build a triangular mel filterbank
///
/// # Arguments
///
/// * `num_filters` - Number of triangular filters
/// * `num_bins` - Spectrum bins each filter covers (`window_size / 2`)
/// * `sample_rate` - Sample rate in Hz
///
/// # Returns
///
/// `num_filters` rows of `num_bins` weights each. Degenerate geometry
/// (zero filters, zero bins, non-positive rate) yields empty rows.
pub fn mel_filter_bank(num_filters: usize, num_bins: usize, sample_rate: f64) -> Vec<Vec<f32>> {
    if num_filters == 0 || num_bins == 0 || sample_rate <= 0.0 {
        return vec![Vec::new(); num_filters];
    }

    let low_mel = hz_to_mel(0.0);
    let high_mel = hz_to_mel(sample_rate as f32 / 2.0);

    // Equally spaced points on the mel axis, then back to FFT bin indices
    let mut bin_indices = Vec::with_capacity(num_filters + 2);
    for i in 0..num_filters + 2 {
        let mel = low_mel + (high_mel - low_mel) * i as f32 / (num_filters + 1) as f32;
        let freq = mel_to_hz(mel);
        let bin = (freq as f64 * num_bins as f64 * 2.0 / sample_rate) as usize;
        bin_indices.push(bin.min(num_bins - 1));
    }

    let mut filter_bank = vec![vec![0.0f32; num_bins]; num_filters];

    for (i, filter) in filter_bank.iter_mut().enumerate() {
        let left = bin_indices[i];
        let center = bin_indices[i + 1];
        let right = bin_indices[i + 2];

        for j in left..center {
            filter[j] = (j - left) as f32 / (center - left) as f32;
        }
        for j in center..right {
            filter[j] = (right - j) as f32 / (right - center) as f32;
        }
    }

    filter_bank
}

/// DCT-II keeping the first `num_coeffs` coefficients
///
/// `out[k] = Σ_n in[n] * cos(π * k * (n + 0.5) / N)`
pub fn dct_ii(input: &[f32], num_coeffs: usize) -> Vec<f32> {
    let n = input.len();
    if n == 0 {
        return vec![0.0; num_coeffs];
    }

    (0..num_coeffs)
        .map(|k| {
            let mut sum = 0.0f64;
            for (i, &value) in input.iter().enumerate() {
                let phase = std::f64::consts::PI * k as f64 * (i as f64 + 0.5) / n as f64;
                sum += value as f64 * phase.cos();
            }
            sum as f32
        })
        .collect()
}
