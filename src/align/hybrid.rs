//! Method fusion
//!
//! Runs the four primary methods and fuses the ones that succeed into a
//! single result. Every numeric field is combined as a confidence-weighted
//! mean except the secondary-peak ratio, which is a plain average (its
//! no-secondary sentinel would otherwise dominate the weighting).

use crate::align::{engine, validate_clip_pair, Alignment, Method};
use crate::audio::AudioClip;
use crate::config::SyncConfig;
use crate::error::SyncError;

/// Align with all primary methods and fuse the survivors
///
/// A method whose alignment errors is dropped from the fusion; when none
/// survive the hybrid itself fails with [`SyncError::ProcessingFailed`].
pub fn align_hybrid(
    reference: &AudioClip,
    target: &AudioClip,
    config: &SyncConfig,
) -> Result<Alignment, SyncError> {
    validate_clip_pair(reference, target)?;

    log::debug!(
        "Running hybrid alignment: ref {} samples, target {} samples",
        reference.len(),
        target.len()
    );

    let outcomes = [
        (
            Method::SpectralFlux,
            engine::align_spectral_flux(reference, target, config),
        ),
        (
            Method::Chroma,
            engine::align_chroma(reference, target, config),
        ),
        (
            Method::Energy,
            engine::align_energy(reference, target, config),
        ),
        (Method::Mfcc, engine::align_mfcc(reference, target, config)),
    ];

    let mut survivors = Vec::with_capacity(outcomes.len());
    for (method, outcome) in outcomes {
        match outcome {
            Ok(alignment) => survivors.push(alignment),
            Err(error) => {
                log::debug!("{} dropped from hybrid fusion: {}", method, error);
            }
        }
    }

    if survivors.is_empty() {
        log::warn!("Hybrid alignment failed: no method produced a usable result");
        return Err(SyncError::ProcessingFailed);
    }

    log::debug!("Hybrid fusion over {} surviving methods", survivors.len());

    fuse(&survivors).ok_or(SyncError::ProcessingFailed)
}

/// Confidence-weighted fusion of surviving alignments
///
/// Returns `None` when the combined weight is zero.
fn fuse(results: &[Alignment]) -> Option<Alignment> {
    let total_weight: f64 = results.iter().map(|r| r.confidence).sum();
    if total_weight <= 0.0 {
        return None;
    }

    let mut offset = 0.0f64;
    let mut confidence = 0.0f64;
    let mut correlation = 0.0f64;
    let mut snr = 0.0f64;
    let mut noise_floor = 0.0f64;

    for result in results {
        let weight = result.confidence;
        offset += result.offset_samples as f64 * weight;
        confidence += result.confidence * weight;
        correlation += result.peak_correlation * weight;
        snr += result.snr_estimate * weight;
        noise_floor += result.noise_floor_db * weight;
    }

    let secondary_mean = results
        .iter()
        .map(|r| r.secondary_peak_ratio)
        .sum::<f64>()
        / results.len() as f64;

    Some(Alignment {
        offset_samples: (offset / total_weight) as i64,
        confidence: confidence / total_weight,
        peak_correlation: correlation / total_weight,
        secondary_peak_ratio: secondary_mean,
        snr_estimate: snr / total_weight,
        noise_floor_db: noise_floor / total_weight,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alignment(offset: i64, confidence: f64) -> Alignment {
        Alignment {
            offset_samples: offset,
            confidence,
            peak_correlation: 0.5,
            secondary_peak_ratio: 2.0,
            snr_estimate: 20.0,
            noise_floor_db: -50.0,
        }
    }

    #[test]
    fn test_fuse_single_result_is_identity() {
        let result = alignment(4410, 0.9);
        let fused = fuse(&[result]).unwrap();
        assert_eq!(fused.offset_samples, 4410);
        assert!((fused.confidence - 0.9).abs() < 1e-12);
        assert!((fused.secondary_peak_ratio - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_fuse_weights_by_confidence() {
        let strong = alignment(1000, 0.8);
        let weak = alignment(2000, 0.2);
        let fused = fuse(&[strong, weak]).unwrap();

        // (1000*0.8 + 2000*0.2) / 1.0 = 1200
        assert_eq!(fused.offset_samples, 1200);
        // (0.8*0.8 + 0.2*0.2) / 1.0 = 0.68
        assert!((fused.confidence - 0.68).abs() < 1e-12);
    }

    #[test]
    fn test_fuse_secondary_ratio_plain_mean() {
        let mut a = alignment(0, 0.9);
        a.secondary_peak_ratio = 4.0;
        let mut b = alignment(0, 0.1);
        b.secondary_peak_ratio = 2.0;

        let fused = fuse(&[a, b]).unwrap();
        assert!((fused.secondary_peak_ratio - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_fuse_zero_weight_is_none() {
        let dead = alignment(100, 0.0);
        assert!(fuse(&[dead]).is_none());
        assert!(fuse(&[]).is_none());
    }

    #[test]
    fn test_hybrid_identical_clips() {
        // Tone cycle with bursts: enough structure for at least one method
        let sample_rate = 44100.0f32;
        let pitches = [261.63f32, 329.63, 392.0, 523.25];
        let segment = (0.5 * sample_rate) as usize;
        let length = (5.0 * sample_rate) as usize;

        let mut samples = vec![0.0f32; length];
        for (i, sample) in samples.iter_mut().enumerate() {
            let pitch = pitches[(i / segment) % pitches.len()];
            *sample = 0.2 * (2.0 * std::f32::consts::PI * pitch * i as f32 / sample_rate).sin();
        }
        let mut pos = segment;
        while pos + 256 < length {
            for i in 0..256 {
                samples[pos + i] +=
                    0.6 * (2.0 * std::f32::consts::PI * 2000.0 * i as f32 / sample_rate).sin();
            }
            pos += segment;
        }

        let clip = AudioClip::from_samples(&samples, sample_rate as f64);
        let mut config = SyncConfig::default();
        config.confidence_threshold = 0.5;

        let alignment = align_hybrid(&clip, &clip, &config).unwrap();
        assert_eq!(alignment.offset_samples, 0);
        assert!(alignment.confidence >= 0.5);
    }

    #[test]
    fn test_hybrid_silence_fails() {
        let silence = AudioClip::from_samples(&vec![0.0f32; 44100 * 5], 44100.0);
        let config = SyncConfig::default();
        assert_eq!(
            align_hybrid(&silence, &silence, &config),
            Err(SyncError::ProcessingFailed)
        );
    }

    #[test]
    fn test_hybrid_invalid_clip() {
        let clip = AudioClip::from_samples(&vec![0.1f32; 44100], 44100.0);
        let config = SyncConfig::default();
        assert_eq!(
            align_hybrid(&clip, &AudioClip::new(), &config),
            Err(SyncError::InvalidInput)
        );
    }
}
