//! Alignment engine
//!
//! Cross-correlation of feature sequences with a three-factor confidence
//! model. Each alignment runs the same four-stage pipeline — validate,
//! extract, correlate, score — and any stage may short-circuit to an error
//! value. Alignment is a pure function of `(reference, target, method,
//! config)`: no state is shared between calls, so one reference clip can be
//! aligned against many targets concurrently.

pub mod confidence;
pub mod correlate;
pub mod engine;
pub mod hybrid;
pub mod peak;
pub mod quality;
pub mod shaping;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::audio::AudioClip;
use crate::config::SyncConfig;
use crate::error::SyncError;

/// Maximum tolerated sample-rate difference between clips in Hz
const SAMPLE_RATE_TOLERANCE_HZ: f64 = 1.0;

/// Alignment method selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Method {
    /// Onset-driven alignment via spectral flux
    SpectralFlux,
    /// Harmonic alignment via 12-bin chroma vectors
    Chroma,
    /// Envelope alignment via short-time RMS energy
    Energy,
    /// Timbral alignment via mel-frequency cepstral coefficients
    Mfcc,
    /// Confidence-weighted fusion of the four primary methods
    Hybrid,
}

impl Method {
    /// Map a raw integer selector to a method
    ///
    /// Returns `None` for values outside `0..=4`.
    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            0 => Some(Method::SpectralFlux),
            1 => Some(Method::Chroma),
            2 => Some(Method::Energy),
            3 => Some(Method::Mfcc),
            4 => Some(Method::Hybrid),
            _ => None,
        }
    }

    /// Stable integer value of this method
    pub fn raw(&self) -> i32 {
        match self {
            Method::SpectralFlux => 0,
            Method::Chroma => 1,
            Method::Energy => 2,
            Method::Mfcc => 3,
            Method::Hybrid => 4,
        }
    }

    /// Display name, also used as the result record tag
    pub fn name(&self) -> &'static str {
        match self {
            Method::SpectralFlux => "Spectral Flux",
            Method::Chroma => "Chroma Features",
            Method::Energy => "Energy Correlation",
            Method::Mfcc => "MFCC",
            Method::Hybrid => "Hybrid",
        }
    }

    /// Minimum clip duration in seconds for a reliable alignment
    pub fn min_duration_seconds(&self) -> f64 {
        match self {
            Method::SpectralFlux => 2.0,
            Method::Chroma => 4.0,
            Method::Energy => 1.0,
            Method::Mfcc => 3.0,
            Method::Hybrid => 4.0,
        }
    }

    /// The four non-hybrid methods in fusion order
    pub fn primary_methods() -> [Method; 4] {
        [
            Method::SpectralFlux,
            Method::Chroma,
            Method::Energy,
            Method::Mfcc,
        ]
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A scored alignment between two clips
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Alignment {
    /// Offset of the target relative to the reference in samples;
    /// positive means the target lags
    pub offset_samples: i64,

    /// Blended confidence in [0, 1]
    pub confidence: f64,

    /// Raw correlation value at the primary peak
    pub peak_correlation: f64,

    /// Primary-to-secondary peak ratio; at least 1e10 when no genuine
    /// secondary exists
    pub secondary_peak_ratio: f64,

    /// Signal-to-noise estimate over the correlation curve in dB
    pub snr_estimate: f64,

    /// Correlation noise floor in dB
    pub noise_floor_db: f64,
}

/// Check that two clips can be aligned at all
///
/// # Errors
///
/// * [`SyncError::InvalidInput`] when either clip is invalid
/// * [`SyncError::UnsupportedFormat`] when the sample rates differ by more
///   than 1 Hz
pub fn validate_clip_pair(reference: &AudioClip, target: &AudioClip) -> Result<(), SyncError> {
    if !reference.is_valid() || !target.is_valid() {
        return Err(SyncError::InvalidInput);
    }

    if (reference.sample_rate() - target.sample_rate()).abs() > SAMPLE_RATE_TOLERANCE_HZ {
        return Err(SyncError::UnsupportedFormat);
    }

    Ok(())
}

/// Run one alignment with the chosen method
///
/// Hybrid dispatches to the four primary methods and fuses the survivors.
///
/// # Errors
///
/// Any of the pipeline error kinds; see [`SyncError`].
pub fn run_alignment(
    reference: &AudioClip,
    target: &AudioClip,
    method: Method,
    config: &SyncConfig,
) -> Result<Alignment, SyncError> {
    match method {
        Method::SpectralFlux => engine::align_spectral_flux(reference, target, config),
        Method::Chroma => engine::align_chroma(reference, target, config),
        Method::Energy => engine::align_energy(reference, target, config),
        Method::Mfcc => engine::align_mfcc(reference, target, config),
        Method::Hybrid => hybrid::align_hybrid(reference, target, config),
    }
}
