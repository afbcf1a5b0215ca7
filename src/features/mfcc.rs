//! MFCC extraction
//!
//! Mel-frequency cepstral coefficients, a compact timbral descriptor:
//!
//! 1. Hann-windowed magnitude spectrum per hop
//! 2. Triangular mel filterbank energies
//! 3. `ln(energy + 1e-10)` per band
//! 4. DCT-II keeping the first `num_coeffs` coefficients
//!
//! Frames are concatenated flat: frame `i` occupies
//! `[i * num_coeffs, (i + 1) * num_coeffs)`. Coefficients may be negative.

use crate::audio::AudioClip;
use crate::dsp::mel::{dct_ii, mel_filter_bank};
use crate::dsp::spectrum::SpectrumAnalyzer;
use crate::features::{frame_count, resolve_hop};

/// Log-energy floor avoiding `ln(0)`
const LOG_ENERGY_EPSILON: f32 = 1e-10;

/// Extract concatenated MFCC frames from a clip
///
/// # Arguments
///
/// * `clip` - Source audio
/// * `window_size` - Analysis window (power of two, 64..=8192)
/// * `hop_size` - Stride between windows; 0 selects `window_size / 4`
/// * `num_coeffs` - Cepstral coefficients kept per frame
/// * `num_mel_filters` - Triangular filters in the mel bank
///
/// # Returns
///
/// A flat vector of `num_frames * num_coeffs` values; empty when the clip
/// is invalid, the window unsupported, or the parameters degenerate.
pub fn extract(
    clip: &AudioClip,
    window_size: usize,
    hop_size: usize,
    num_coeffs: usize,
    num_mel_filters: usize,
) -> Vec<f32> {
    if !clip.is_valid() || num_coeffs == 0 || num_mel_filters == 0 {
        return Vec::new();
    }

    let hop = resolve_hop(hop_size, window_size / 4);

    let analyzer = match SpectrumAnalyzer::new(window_size) {
        Ok(analyzer) => analyzer,
        Err(_) => {
            log::warn!("Unsupported window size {} for MFCC", window_size);
            return Vec::new();
        }
    };

    let samples = clip.samples();
    let num_frames = frame_count(samples.len(), window_size, hop);
    if num_frames == 0 {
        return Vec::new();
    }

    log::debug!(
        "Extracting MFCC: {} samples, window={}, hop={}, {} coeffs, {} filters, {} frames",
        samples.len(),
        window_size,
        hop,
        num_coeffs,
        num_mel_filters,
        num_frames
    );

    let filter_bank = mel_filter_bank(num_mel_filters, window_size / 2, clip.sample_rate());

    let mut features = Vec::with_capacity(num_frames * num_coeffs);
    let mut mel_energies = vec![0.0f32; num_mel_filters];

    for frame_idx in 0..num_frames {
        let start = frame_idx * hop;
        let magnitude = analyzer.magnitude(&samples[start..start + window_size]);

        for (band, filter) in filter_bank.iter().enumerate() {
            let energy: f32 = magnitude
                .iter()
                .zip(filter.iter())
                .map(|(&m, &w)| m * w)
                .sum();
            mel_energies[band] = (energy + LOG_ENERGY_EPSILON).ln();
        }

        features.extend(dct_ii(&mel_energies, num_coeffs));
    }

    features
}
