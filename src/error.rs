//! Error types for the alignment engine
//!
//! Every failure mode maps to a stable integer code so results can cross the
//! host boundary as plain values. Errors are values throughout the crate;
//! internal numerical hazards (division by zero, log of zero) are absorbed by
//! sentinels so arithmetic stays total.

use std::fmt;

/// Errors that can occur during audio alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyncError {
    /// Invalid input parameters (empty buffers, bad sample rate, unknown
    /// method, bad config)
    InvalidInput,

    /// Not enough audio for reliable alignment (clips below the per-method
    /// minimum length, feature extraction produced no frames)
    InsufficientData,

    /// Alignment ran but did not produce an acceptable result (confidence
    /// below threshold, degenerate correlation)
    ProcessingFailed,

    /// Scratch allocation failure during batch assembly
    OutOfMemory,

    /// Reference and target disagree on format (sample-rate mismatch)
    UnsupportedFormat,
}

impl SyncError {
    /// Stable integer code for this error kind
    ///
    /// `0` is reserved for success; error kinds occupy `-1..=-5`.
    pub fn code(&self) -> i32 {
        match self {
            SyncError::InvalidInput => -1,
            SyncError::InsufficientData => -2,
            SyncError::ProcessingFailed => -3,
            SyncError::OutOfMemory => -4,
            SyncError::UnsupportedFormat => -5,
        }
    }

    /// Map a raw integer code back to an error kind
    ///
    /// Returns `None` for `0` (success) and for unknown codes.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            -1 => Some(SyncError::InvalidInput),
            -2 => Some(SyncError::InsufficientData),
            -3 => Some(SyncError::ProcessingFailed),
            -4 => Some(SyncError::OutOfMemory),
            -5 => Some(SyncError::UnsupportedFormat),
            _ => None,
        }
    }

    /// Human-readable description of this error kind
    pub fn description(&self) -> &'static str {
        match self {
            SyncError::InvalidInput => "Invalid input parameters provided",
            SyncError::InsufficientData => {
                "Insufficient audio data for reliable synchronization"
            }
            SyncError::ProcessingFailed => "Audio processing failed during synchronization",
            SyncError::OutOfMemory => "Insufficient memory to complete operation",
            SyncError::UnsupportedFormat => "Unsupported audio format or configuration",
        }
    }
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

impl std::error::Error for SyncError {}
