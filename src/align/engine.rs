//! Per-method alignment pipelines
//!
//! Every method follows the same stages: validate the clip pair, extract
//! features from both clips, shape them, correlate, then gate on confidence
//! and assemble the quality metrics. Scalar methods (spectral flux, energy)
//! correlate one sequence; vector methods (chroma, MFCC) correlate each
//! dimension separately and fold the curves together before peak selection.

use crate::align::correlate::{cross_correlate, lag_to_offset, merge_weighted};
use crate::align::peak::find_best_alignment;
use crate::align::quality::{noise_floor_db, snr_estimate};
use crate::align::shaping::{adaptive_threshold, min_max_normalize};
use crate::align::{validate_clip_pair, Alignment};
use crate::audio::AudioClip;
use crate::config::SyncConfig;
use crate::dsp::chroma::NUM_CHROMA_BINS;
use crate::dsp::stats::median_filter;
use crate::error::SyncError;
use crate::features;

/// Percentile subtracted from onset curves before correlation
const ONSET_THRESHOLD_PERCENTILE: f32 = 0.1;

/// Hop for the spectral extractors, defaulting to a quarter window
fn spectral_hop(config: &SyncConfig) -> usize {
    if config.hop_size == 0 {
        config.window_size / 4
    } else {
        config.hop_size
    }
}

/// Hop for the energy extractor, defaulting to a half window
fn energy_hop(config: &SyncConfig) -> usize {
    if config.hop_size == 0 {
        config.window_size / 2
    } else {
        config.hop_size
    }
}

/// Weight for MFCC dimension `coeff`; lower coefficients carry more
/// perceptually relevant structure
fn mfcc_weight(coeff: usize) -> f64 {
    1.0 / (1.0 + coeff as f64 * 0.1)
}

/// Gate the correlation on confidence and assemble the alignment
fn finish(
    correlation: Vec<f64>,
    hop: usize,
    config: &SyncConfig,
    label: &str,
) -> Result<Alignment, SyncError> {
    if correlation.is_empty() {
        return Err(SyncError::ProcessingFailed);
    }

    let peak = find_best_alignment(&correlation);

    if peak.confidence < config.confidence_threshold {
        log::warn!(
            "{} alignment rejected: confidence {:.3} below threshold {:.2}",
            label,
            peak.confidence,
            config.confidence_threshold
        );
        return Err(SyncError::ProcessingFailed);
    }

    let offset_samples = lag_to_offset(peak.index, correlation.len(), hop);

    log::debug!(
        "{} alignment: offset={} samples, confidence={:.3}, peak={:.6}",
        label,
        offset_samples,
        peak.confidence,
        peak.value
    );

    Ok(Alignment {
        offset_samples,
        confidence: peak.confidence,
        peak_correlation: peak.value,
        secondary_peak_ratio: peak.secondary_peak_ratio,
        snr_estimate: snr_estimate(&correlation, peak.index),
        noise_floor_db: noise_floor_db(&correlation),
    })
}

/// Align by onset structure (spectral flux)
///
/// The flux curves are floored at their 10th percentile, median-smoothed
/// with the configured size, and min-max normalized before correlation.
pub fn align_spectral_flux(
    reference: &AudioClip,
    target: &AudioClip,
    config: &SyncConfig,
) -> Result<Alignment, SyncError> {
    validate_clip_pair(reference, target)?;

    let hop = spectral_hop(config);
    let mut ref_features = features::spectral_flux::extract(reference, config.window_size, hop);
    let mut target_features = features::spectral_flux::extract(target, config.window_size, hop);

    if ref_features.is_empty() || target_features.is_empty() {
        return Err(SyncError::InsufficientData);
    }

    for features in [&mut ref_features, &mut target_features] {
        adaptive_threshold(features, ONSET_THRESHOLD_PERCENTILE);
        median_filter(features, config.spectral_flux.median_filter_size);
        min_max_normalize(features);
    }

    let correlation = cross_correlate(&ref_features, &target_features);
    finish(correlation, hop, config, "Spectral flux")
}

/// Align by harmonic content (chroma)
///
/// Each of the 12 pitch classes is correlated on its own; the curves are
/// folded together with equal weights before peak selection. The frames
/// are already normalized by extraction, so no extra shaping is applied.
pub fn align_chroma(
    reference: &AudioClip,
    target: &AudioClip,
    config: &SyncConfig,
) -> Result<Alignment, SyncError> {
    validate_clip_pair(reference, target)?;

    let hop = spectral_hop(config);
    let ref_features = features::chroma::extract(reference, config.window_size, hop);
    let target_features = features::chroma::extract(target, config.window_size, hop);

    if ref_features.is_empty() || target_features.is_empty() {
        return Err(SyncError::InsufficientData);
    }

    let mut combined: Vec<f64> = Vec::new();

    for dim in 0..config.chroma.num_bins {
        let ref_dim: Vec<f32> = ref_features
            .iter()
            .copied()
            .skip(dim)
            .step_by(NUM_CHROMA_BINS)
            .collect();
        let target_dim: Vec<f32> = target_features
            .iter()
            .copied()
            .skip(dim)
            .step_by(NUM_CHROMA_BINS)
            .collect();

        if ref_dim.is_empty() || target_dim.is_empty() {
            continue;
        }

        let correlation = cross_correlate(&ref_dim, &target_dim);
        merge_weighted(&mut combined, &correlation, 1.0);
    }

    if combined.is_empty() {
        return Err(SyncError::ProcessingFailed);
    }

    finish(combined, hop, config, "Chroma")
}

/// Align by loudness envelope (short-time energy)
pub fn align_energy(
    reference: &AudioClip,
    target: &AudioClip,
    config: &SyncConfig,
) -> Result<Alignment, SyncError> {
    validate_clip_pair(reference, target)?;

    let hop = energy_hop(config);
    let mut ref_features = features::energy::extract(reference, config.window_size, hop);
    let mut target_features = features::energy::extract(target, config.window_size, hop);

    if ref_features.is_empty() || target_features.is_empty() {
        return Err(SyncError::InsufficientData);
    }

    for features in [&mut ref_features, &mut target_features] {
        median_filter(features, config.energy.smoothing_window_size);
        min_max_normalize(features);
    }

    let correlation = cross_correlate(&ref_features, &target_features);
    finish(correlation, hop, config, "Energy")
}

/// Align by timbre (MFCC)
///
/// Coefficients are correlated independently, weighted by
/// `1 / (1 + 0.1 * i)`, and folded together. Coefficient 0 carries overall
/// level rather than timbre and is skipped unless configured in.
pub fn align_mfcc(
    reference: &AudioClip,
    target: &AudioClip,
    config: &SyncConfig,
) -> Result<Alignment, SyncError> {
    validate_clip_pair(reference, target)?;

    let hop = spectral_hop(config);
    let num_coeffs = config.mfcc.num_coeffs;
    let ref_features = features::mfcc::extract(
        reference,
        config.window_size,
        hop,
        num_coeffs,
        config.mfcc.num_mel_filters,
    );
    let target_features = features::mfcc::extract(
        target,
        config.window_size,
        hop,
        num_coeffs,
        config.mfcc.num_mel_filters,
    );

    if ref_features.is_empty() || target_features.is_empty() {
        return Err(SyncError::InsufficientData);
    }

    let mut combined: Vec<f64> = Vec::new();

    for coeff in 0..num_coeffs {
        if coeff == 0 && !config.mfcc.include_c0 {
            continue;
        }

        let ref_coeff: Vec<f32> = ref_features
            .iter()
            .copied()
            .skip(coeff)
            .step_by(num_coeffs)
            .collect();
        let target_coeff: Vec<f32> = target_features
            .iter()
            .copied()
            .skip(coeff)
            .step_by(num_coeffs)
            .collect();

        if ref_coeff.is_empty() || target_coeff.is_empty() {
            continue;
        }

        let correlation = cross_correlate(&ref_coeff, &target_coeff);
        merge_weighted(&mut combined, &correlation, mfcc_weight(coeff));
    }

    if combined.is_empty() {
        return Err(SyncError::ProcessingFailed);
    }

    finish(combined, hop, config, "MFCC")
}
