//! Windowed magnitude spectra
//!
//! A [`SpectrumAnalyzer`] holds the FFT plan and Hann window for one frame
//! size so the per-frame cost is a single transform. Bin `k` of the output
//! represents frequency `k * sample_rate / window_size`.

use std::sync::Arc;

use rustfft::num_complex::Complex;
use rustfft::{Fft, FftPlanner};

use crate::dsp::window::hann_window;
use crate::error::SyncError;

/// Smallest supported analysis window
pub const MIN_WINDOW_SIZE: usize = 64;

/// Largest supported analysis window
pub const MAX_WINDOW_SIZE: usize = 8192;

/// Reusable magnitude-spectrum computation for one frame size
pub struct SpectrumAnalyzer {
    fft: Arc<dyn Fft<f32>>,
    window: Arc<[f32]>,
    window_size: usize,
}

impl SpectrumAnalyzer {
    /// Create an analyzer for the given window size
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::InvalidInput`] unless `window_size` is a power
    /// of two in 64..=8192.
    pub fn new(window_size: usize) -> Result<Self, SyncError> {
        if !(MIN_WINDOW_SIZE..=MAX_WINDOW_SIZE).contains(&window_size)
            || !window_size.is_power_of_two()
        {
            return Err(SyncError::InvalidInput);
        }

        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(window_size);

        Ok(Self {
            fft,
            window: hann_window(window_size),
            window_size,
        })
    }

    /// Window size this analyzer was planned for
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Number of magnitude bins produced per frame (`window_size / 2 + 1`)
    pub fn num_bins(&self) -> usize {
        self.window_size / 2 + 1
    }

    /// Compute the Hann-windowed magnitude spectrum of one frame
    ///
    /// `frame` must be exactly `window_size` samples; longer input is
    /// truncated, shorter input yields an empty spectrum.
    pub fn magnitude(&self, frame: &[f32]) -> Vec<f32> {
        if frame.len() < self.window_size {
            return Vec::new();
        }

        let mut buffer: Vec<Complex<f32>> = frame[..self.window_size]
            .iter()
            .zip(self.window.iter())
            .map(|(&sample, &w)| Complex::new(sample * w, 0.0))
            .collect();

        self.fft.process(&mut buffer);

        buffer[..self.num_bins()]
            .iter()
            .map(|c| (c.re * c.re + c.im * c.im).sqrt())
            .collect()
    }
}
