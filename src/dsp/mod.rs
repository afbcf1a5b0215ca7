//! Signal-processing primitives
//!
//! Pure building blocks shared by the feature extractors:
//! - Hann windowing (cached per length)
//! - Magnitude spectra via FFT
//! - Mel filterbank and DCT-II
//! - Chroma (pitch-class) mapping
//! - RMS, peak, median filter, percentile statistics

pub mod chroma;
pub mod mel;
pub mod spectrum;
pub mod stats;
pub mod window;
