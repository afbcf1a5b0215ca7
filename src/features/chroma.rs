//! Chroma sequence extraction
//!
//! One 12-bin pitch-class vector per hop position, concatenated into a flat
//! buffer: frame `i` occupies positions `[i * 12, (i + 1) * 12)`.

use crate::audio::AudioClip;
use crate::dsp::chroma::{chroma_vector, NUM_CHROMA_BINS};
use crate::dsp::spectrum::SpectrumAnalyzer;
use crate::features::{frame_count, resolve_hop};

/// Extract concatenated chroma frames from a clip
///
/// # Arguments
///
/// * `clip` - Source audio
/// * `window_size` - Analysis window (power of two, 64..=8192)
/// * `hop_size` - Stride between windows; 0 selects `window_size / 4`
///
/// # Returns
///
/// A flat vector of `num_frames * 12` values, each frame normalized to unit
/// sum; empty when the clip is invalid or shorter than one window.
pub fn extract(clip: &AudioClip, window_size: usize, hop_size: usize) -> Vec<f32> {
    if !clip.is_valid() {
        return Vec::new();
    }

    let hop = resolve_hop(hop_size, window_size / 4);

    let analyzer = match SpectrumAnalyzer::new(window_size) {
        Ok(analyzer) => analyzer,
        Err(_) => {
            log::warn!("Unsupported window size {} for chroma", window_size);
            return Vec::new();
        }
    };

    let samples = clip.samples();
    let num_frames = frame_count(samples.len(), window_size, hop);
    if num_frames == 0 {
        return Vec::new();
    }

    log::debug!(
        "Extracting chroma: {} samples, window={}, hop={}, {} frames",
        samples.len(),
        window_size,
        hop,
        num_frames
    );

    let mut features = Vec::with_capacity(num_frames * NUM_CHROMA_BINS);

    for frame_idx in 0..num_frames {
        let start = frame_idx * hop;
        let magnitude = analyzer.magnitude(&samples[start..start + window_size]);
        features.extend(chroma_vector(&magnitude, clip.sample_rate()));
    }

    features
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine_clip(freq: f32, seconds: f32, sample_rate: f32) -> AudioClip {
        let samples: Vec<f32> = (0..(seconds * sample_rate) as usize)
            .map(|i| (2.0 * std::f32::consts::PI * freq * i as f32 / sample_rate).sin())
            .collect();
        AudioClip::from_samples(&samples, sample_rate as f64)
    }

    #[test]
    fn test_chroma_frame_layout() {
        let clip = sine_clip(440.0, 1.0, 44100.0);
        let features = extract(&clip, 2048, 512);

        let expected_frames = (44100 - 2048) / 512 + 1;
        assert_eq!(features.len(), expected_frames * NUM_CHROMA_BINS);
    }

    #[test]
    fn test_tone_in_a_band_dominates_class_a() {
        // 882.9 Hz lands on an exact bin at window 2048 and inside the A5
        // semitone band, so its mainlobe stays in pitch class 9
        let clip = sine_clip(882.9, 1.0, 44100.0);
        let features = extract(&clip, 2048, 512);

        // Average each pitch class across frames; A is class 9
        let num_frames = features.len() / NUM_CHROMA_BINS;
        let mut averages = [0.0f32; NUM_CHROMA_BINS];
        for frame in 0..num_frames {
            for class in 0..NUM_CHROMA_BINS {
                averages[class] += features[frame * NUM_CHROMA_BINS + class];
            }
        }

        let dominant = averages
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
            .map(|(i, _)| i)
            .unwrap();
        assert_eq!(dominant, 9);
    }

    #[test]
    fn test_chroma_deterministic() {
        let clip = sine_clip(523.25, 0.5, 44100.0);
        assert_eq!(extract(&clip, 2048, 512), extract(&clip, 2048, 512));
    }

    #[test]
    fn test_chroma_empty_cases() {
        assert!(extract(&AudioClip::new(), 2048, 512).is_empty());

        let short = sine_clip(440.0, 0.01, 44100.0);
        assert!(extract(&short, 2048, 512).is_empty());
    }
}
