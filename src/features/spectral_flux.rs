//! Spectral flux extraction
//!
//! Flux is the positive-only sum of per-bin magnitude increases between
//! adjacent short-time spectra, a proxy for onsets:
//!
//! 1. Compute a Hann-windowed magnitude spectrum at each hop position
//! 2. `flux[t] = Σ_{k>=1} max(0, M_t[k] - M_{t-1}[k])` (DC bin skipped)
//! 3. Median-filter the flux curve (size 3)
//!
//! The first window yields no output, so a clip with `F` full windows
//! produces `F - 1` flux values.

use crate::audio::AudioClip;
use crate::dsp::spectrum::SpectrumAnalyzer;
use crate::dsp::stats::median_filter;
use crate::features::{frame_count, resolve_hop};

/// Median filter size applied to the raw flux curve
const FLUX_MEDIAN_SIZE: usize = 3;

/// Extract the spectral flux sequence of a clip
///
/// # Arguments
///
/// * `clip` - Source audio
/// * `window_size` - Analysis window (power of two, 64..=8192)
/// * `hop_size` - Stride between windows; 0 selects `window_size / 4`
///
/// # Returns
///
/// One flux value per frame transition, or an empty vector when the clip is
/// invalid, the window unsupported, or the audio shorter than one window.
pub fn extract(clip: &AudioClip, window_size: usize, hop_size: usize) -> Vec<f32> {
    if !clip.is_valid() {
        return Vec::new();
    }

    let hop = resolve_hop(hop_size, window_size / 4);

    let analyzer = match SpectrumAnalyzer::new(window_size) {
        Ok(analyzer) => analyzer,
        Err(_) => {
            log::warn!("Unsupported window size {} for spectral flux", window_size);
            return Vec::new();
        }
    };

    let samples = clip.samples();
    let num_frames = frame_count(samples.len(), window_size, hop);
    if num_frames < 2 {
        return Vec::new();
    }

    log::debug!(
        "Extracting spectral flux: {} samples, window={}, hop={}, {} frames",
        samples.len(),
        window_size,
        hop,
        num_frames
    );

    let mut flux = Vec::with_capacity(num_frames - 1);
    let mut prev_magnitude: Vec<f32> = Vec::new();

    for frame_idx in 0..num_frames {
        let start = frame_idx * hop;
        let magnitude = analyzer.magnitude(&samples[start..start + window_size]);

        if !prev_magnitude.is_empty() {
            let value: f32 = magnitude
                .iter()
                .zip(prev_magnitude.iter())
                .skip(1)
                .map(|(&cur, &prev)| (cur - prev).max(0.0))
                .sum();
            flux.push(value);
        }

        prev_magnitude = magnitude;
    }

    median_filter(&mut flux, FLUX_MEDIAN_SIZE);

    flux
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Sine carrier with short loud bursts at the given sample positions
    fn burst_signal(length: usize, burst_positions: &[usize], sample_rate: f32) -> Vec<f32> {
        let mut samples: Vec<f32> = (0..length)
            .map(|i| 0.05 * (2.0 * std::f32::consts::PI * 220.0 * i as f32 / sample_rate).sin())
            .collect();

        for &pos in burst_positions {
            for i in pos..(pos + 512).min(length) {
                samples[i] +=
                    0.8 * (2.0 * std::f32::consts::PI * 1760.0 * i as f32 / sample_rate).sin();
            }
        }

        samples
    }

    #[test]
    fn test_flux_length() {
        let clip = AudioClip::from_samples(&vec![0.1f32; 44100], 44100.0);
        let flux = extract(&clip, 1024, 256);
        let expected_frames = (44100 - 1024) / 256 + 1;
        assert_eq!(flux.len(), expected_frames - 1);
    }

    #[test]
    fn test_flux_peaks_at_bursts() {
        let sample_rate = 44100.0;
        let burst = 22050;
        let clip = AudioClip::from_samples(
            &burst_signal(44100, &[burst], sample_rate),
            sample_rate as f64,
        );

        let hop = 256;
        let flux = extract(&clip, 1024, hop);
        assert!(!flux.is_empty());

        let peak_frame = flux
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
            .map(|(i, _)| i)
            .unwrap();

        // flux[t] compares frames t and t+1; window overlap and the Hann
        // taper can smear the maximum across a few hops
        let peak_sample = (peak_frame + 1) * hop;
        assert!(
            (peak_sample as i64 - burst as i64).abs() <= 4 * hop as i64,
            "flux peak at sample {}, burst at {}",
            peak_sample,
            burst
        );
    }

    #[test]
    fn test_flux_nonnegative() {
        let clip = AudioClip::from_samples(&burst_signal(44100, &[11025], 44100.0), 44100.0);
        let flux = extract(&clip, 1024, 256);
        assert!(flux.iter().all(|&f| f >= 0.0));
    }

    #[test]
    fn test_flux_deterministic() {
        let clip = AudioClip::from_samples(&burst_signal(44100, &[11025], 44100.0), 44100.0);
        let first = extract(&clip, 1024, 256);
        let second = extract(&clip, 1024, 256);
        assert_eq!(first, second);
    }

    #[test]
    fn test_flux_auto_hop() {
        let clip = AudioClip::from_samples(&vec![0.1f32; 44100], 44100.0);
        let auto = extract(&clip, 1024, 0);
        let explicit = extract(&clip, 1024, 256);
        assert_eq!(auto, explicit);
    }

    #[test]
    fn test_flux_empty_cases() {
        assert!(extract(&AudioClip::new(), 1024, 256).is_empty());

        let short = AudioClip::from_samples(&vec![0.1f32; 512], 44100.0);
        assert!(extract(&short, 1024, 256).is_empty());

        let clip = AudioClip::from_samples(&vec![0.1f32; 44100], 44100.0);
        assert!(extract(&clip, 1000, 256).is_empty()); // not a power of two
    }
}
