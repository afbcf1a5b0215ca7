//! Alignment result record
//!
//! [`SyncResult`] is the flat, `#[repr(C)]` record handed across the host
//! boundary: a signed sample offset, five quality metrics, a fixed 32-byte
//! NUL-terminated method tag, and an integer error code. Success and
//! failure both use the same record; a failure zeroes the numeric fields
//! apart from the two sentinels and keeps the tag of the method that was
//! attempted.

use crate::align::Alignment;
use crate::error::SyncError;

/// Size of the method tag field in bytes, including the terminating NUL
pub const METHOD_TAG_LEN: usize = 32;

/// Secondary-peak ratio reported on failure
const FAILURE_SECONDARY_RATIO: f64 = 1.0;

/// Noise floor reported on failure in dB
const FAILURE_NOISE_FLOOR_DB: f64 = -60.0;

/// Flat alignment result record
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct SyncResult {
    /// Offset of the target relative to the reference in samples;
    /// positive means the target lags
    pub offset_samples: i64,

    /// Confidence in [0, 1]; 0 on error
    pub confidence: f64,

    /// Raw correlation value at the primary peak; 0 on error
    pub peak_correlation: f64,

    /// Primary-to-secondary peak ratio; at least 1e10 when no secondary
    /// exists, 1.0 on error
    pub secondary_peak_ratio: f64,

    /// Signal-to-noise estimate in dB; 0 on error
    pub snr_estimate: f64,

    /// Correlation noise floor in dB; -60 on error
    pub noise_floor_db: f64,

    /// NUL-terminated ASCII tag of the method used (or attempted)
    pub method: [u8; METHOD_TAG_LEN],

    /// Error code: 0 on success, -1..=-5 otherwise
    pub error: i32,
}

impl SyncResult {
    /// Build a success record from a scored alignment
    pub fn success(alignment: Alignment, method_tag: &str) -> Self {
        Self {
            offset_samples: alignment.offset_samples,
            confidence: alignment.confidence,
            peak_correlation: alignment.peak_correlation,
            secondary_peak_ratio: alignment.secondary_peak_ratio,
            snr_estimate: alignment.snr_estimate,
            noise_floor_db: alignment.noise_floor_db,
            method: pack_tag(method_tag),
            error: 0,
        }
    }

    /// Build a failure record carrying the attempted method tag
    pub fn failure(error: SyncError, method_tag: &str) -> Self {
        Self {
            offset_samples: 0,
            confidence: 0.0,
            peak_correlation: 0.0,
            secondary_peak_ratio: FAILURE_SECONDARY_RATIO,
            snr_estimate: 0.0,
            noise_floor_db: FAILURE_NOISE_FLOOR_DB,
            method: pack_tag(method_tag),
            error: error.code(),
        }
    }

    /// Whether this record carries a successful alignment
    pub fn is_success(&self) -> bool {
        self.error == 0
    }

    /// The error kind, if any
    pub fn error_kind(&self) -> Option<SyncError> {
        SyncError::from_code(self.error)
    }

    /// The method tag as a string slice (up to the first NUL)
    pub fn method_name(&self) -> &str {
        let end = self
            .method
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(METHOD_TAG_LEN);
        std::str::from_utf8(&self.method[..end]).unwrap_or("")
    }
}

/// Pack a tag string into a fixed NUL-terminated byte array
///
/// Tags longer than 31 bytes are truncated so the terminator always fits.
fn pack_tag(tag: &str) -> [u8; METHOD_TAG_LEN] {
    let mut packed = [0u8; METHOD_TAG_LEN];
    let bytes = tag.as_bytes();
    let len = bytes.len().min(METHOD_TAG_LEN - 1);
    packed[..len].copy_from_slice(&bytes[..len]);
    packed
}
