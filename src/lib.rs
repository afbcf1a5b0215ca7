//! # Slate DSP
//!
//! Audio offset estimation for multi-camera and multi-track
//! synchronization. Given two mono PCM clips recorded at the same sample
//! rate, the engine reports by how many samples the target leads or lags
//! the reference, together with a calibrated confidence and correlation
//! quality metrics.
//!
//! ## Methods
//!
//! - **Spectral flux** — onset structure; robust for percussive material
//! - **Chroma** — harmonic content folded into pitch classes
//! - **Energy** — short-time RMS envelope; cheapest method
//! - **MFCC** — timbral envelope via cepstral coefficients
//! - **Hybrid** — confidence-weighted fusion of the four methods above
//!
//! ## Quick Start
//!
//! ```no_run
//! use slate_dsp::{align, Method, SyncConfig};
//!
//! // Mono f32 samples in [-1.0, 1.0], both clips at the same rate
//! let reference: Vec<f32> = vec![0.0; 44100 * 5];
//! let target: Vec<f32> = vec![0.0; 44100 * 5];
//!
//! let result = align(&reference, &target, 44100.0, Method::Hybrid, &SyncConfig::default());
//! if result.is_success() {
//!     println!(
//!         "target offset: {} samples (confidence {:.2})",
//!         result.offset_samples, result.confidence
//!     );
//! }
//! ```
//!
//! ## Pipeline
//!
//! ```text
//! PCM -> clip load (optional preprocess) -> feature extraction
//!     -> cross-correlation -> peak + confidence -> result record
//! ```
//!
//! Errors are values: every entry point returns a result record with a
//! stable integer code instead of panicking, and batch processing isolates
//! per-target failures.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod align;
pub mod audio;
pub mod config;
pub mod dsp;
pub mod error;
pub mod features;
pub mod result;

use rayon::prelude::*;

// Re-export main types
pub use align::{Alignment, Method};
pub use audio::AudioClip;
pub use config::SyncConfig;
pub use error::SyncError;
pub use result::SyncResult;

/// Highest accepted sample rate in Hz
const MAX_SAMPLE_RATE: f64 = 192_000.0;

/// Align a target clip against a reference clip
///
/// Both slices must contain mono samples at the same rate. The returned
/// record always carries the attempted method tag; on failure the numeric
/// fields are zeroed apart from the documented sentinels.
///
/// # Arguments
///
/// * `reference` - Reference PCM samples
/// * `target` - Target PCM samples
/// * `sample_rate` - Shared sample rate in Hz
/// * `method` - Alignment method (hybrid fuses the other four)
/// * `config` - Analysis configuration
///
/// # Example
///
/// ```no_run
/// use slate_dsp::{align, Method, SyncConfig};
///
/// let reference = vec![0.0f32; 44100 * 5];
/// let target = vec![0.0f32; 44100 * 5];
/// let result = align(&reference, &target, 44100.0, Method::SpectralFlux, &SyncConfig::default());
/// println!("error code: {}", result.error);
/// ```
pub fn align(
    reference: &[f32],
    target: &[f32],
    sample_rate: f64,
    method: Method,
    config: &SyncConfig,
) -> SyncResult {
    let reference = AudioClip::from_samples(reference, sample_rate);
    let target = AudioClip::from_samples(target, sample_rate);
    align_clips(&reference, &target, method, config)
}

/// Align two already-loaded clips
///
/// Unlike [`align`], the clips carry their own sample rates; a mismatch of
/// more than 1 Hz fails with `UnsupportedFormat`.
pub fn align_clips(
    reference: &AudioClip,
    target: &AudioClip,
    method: Method,
    config: &SyncConfig,
) -> SyncResult {
    log::debug!(
        "Aligning with {}: ref {} samples @ {} Hz, target {} samples @ {} Hz",
        method,
        reference.len(),
        reference.sample_rate(),
        target.len(),
        target.sample_rate()
    );

    if let Err(error) = config.validate() {
        return SyncResult::failure(error, method.name());
    }

    // Empty buffers and non-positive rates never load into a valid clip
    if !reference.is_valid() || !target.is_valid() {
        return SyncResult::failure(SyncError::InvalidInput, method.name());
    }

    if let Err(error) = validate_rates(reference, target) {
        return SyncResult::failure(error, method.name());
    }

    if let Err(error) = validate_lengths(reference, target, method) {
        return SyncResult::failure(error, method.name());
    }

    match align::run_alignment(reference, target, method, config) {
        Ok(alignment) => SyncResult::success(alignment, method.name()),
        Err(error) => SyncResult::failure(error, method.name()),
    }
}

/// Align several targets against one reference
///
/// The reference is loaded once and shared immutably across rayon workers;
/// each target is processed independently, so one failing target does not
/// affect the others.
///
/// # Errors
///
/// Returns [`SyncError::OutOfMemory`] if the result buffer cannot be
/// reserved. Per-target errors are reported inside the individual records.
pub fn align_batch(
    reference: &[f32],
    targets: &[&[f32]],
    sample_rate: f64,
    method: Method,
    config: &SyncConfig,
) -> Result<Vec<SyncResult>, SyncError> {
    log::debug!(
        "Batch alignment with {}: {} targets, ref {} samples",
        method,
        targets.len(),
        reference.len()
    );

    let mut results: Vec<SyncResult> = Vec::new();
    results
        .try_reserve_exact(targets.len())
        .map_err(|_| SyncError::OutOfMemory)?;

    if targets.is_empty() {
        return Ok(results);
    }

    let reference = AudioClip::from_samples(reference, sample_rate);

    results.par_extend(targets.par_iter().map(|target_samples| {
        let target = AudioClip::from_samples(target_samples, sample_rate);
        align_clips(&reference, &target, method, config)
    }));

    Ok(results)
}

/// Minimum clip length in samples for a reliable alignment
///
/// Spectral flux needs 2 s of audio, chroma 4 s, energy 1 s, MFCC 3 s and
/// hybrid 4 s. A non-positive sample rate yields 0.
pub fn min_audio_length(method: Method, sample_rate: f64) -> usize {
    if sample_rate <= 0.0 {
        return 0;
    }

    (method.min_duration_seconds() * sample_rate) as usize
}

/// Rough processing-time estimate in seconds
///
/// Scales the audio duration by an empirical per-method realtime ratio.
pub fn estimate_processing_time(
    audio_length_samples: usize,
    sample_rate: f64,
    method: Method,
) -> f64 {
    if sample_rate <= 0.0 {
        return 0.0;
    }

    let duration_seconds = audio_length_samples as f64 / sample_rate;

    let realtime_ratio = match method {
        Method::SpectralFlux => 0.08,
        Method::Chroma => 0.12,
        Method::Energy => 0.04,
        Method::Mfcc => 0.18,
        Method::Hybrid => 0.35,
    };

    duration_seconds * realtime_ratio
}

/// Convert a sample count to seconds
pub fn samples_to_seconds(samples: i64, sample_rate: f64) -> f64 {
    if sample_rate <= 0.0 {
        return 0.0;
    }
    samples as f64 / sample_rate
}

/// Convert seconds to a sample count
pub fn seconds_to_samples(seconds: f64, sample_rate: f64) -> i64 {
    (seconds * sample_rate) as i64
}

/// Library version string
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

fn validate_rates(reference: &AudioClip, target: &AudioClip) -> Result<(), SyncError> {
    for rate in [reference.sample_rate(), target.sample_rate()] {
        if rate <= 0.0 || rate > MAX_SAMPLE_RATE {
            return Err(SyncError::InvalidInput);
        }
    }

    if (reference.sample_rate() - target.sample_rate()).abs() > 1.0 {
        return Err(SyncError::UnsupportedFormat);
    }

    Ok(())
}

fn validate_lengths(
    reference: &AudioClip,
    target: &AudioClip,
    method: Method,
) -> Result<(), SyncError> {
    if reference.len() < min_audio_length(method, reference.sample_rate())
        || target.len() < min_audio_length(method, target.sample_rate())
    {
        return Err(SyncError::InsufficientData);
    }

    Ok(())
}
