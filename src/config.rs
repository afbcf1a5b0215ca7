//! Configuration parameters for audio alignment
//!
//! A [`SyncConfig`] is a plain value: it carries the analysis window geometry,
//! the confidence gate, and per-algorithm tuning blocks. Presets for common
//! recording situations are available through [`SyncConfig::for_use_case`].

use serde::{Deserialize, Serialize};

use crate::error::SyncError;

/// Spectral flux algorithm tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpectralFluxConfig {
    /// Median filter size applied to the flux curve before correlation
    /// (default: 5)
    pub median_filter_size: usize,

    /// Pre-emphasis coefficient for optional high-frequency boosting
    /// (default: 0.97); applied via [`AudioClip::pre_emphasis`](crate::audio::AudioClip::pre_emphasis)
    pub pre_emphasis_alpha: f32,
}

/// Chroma algorithm tuning
///
/// The pitch-class fold is twelve-tone by construction; the bin count is
/// carried for completeness and should stay at 12.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChromaConfig {
    /// Number of chroma bins per frame (default: 12)
    pub num_bins: usize,
}

/// Energy correlation tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnergyConfig {
    /// Median smoothing window applied to the energy profile before
    /// correlation (default: 3)
    pub smoothing_window_size: usize,
}

/// MFCC algorithm tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MfccConfig {
    /// Number of cepstral coefficients kept per frame (default: 13)
    pub num_coeffs: usize,

    /// Number of triangular mel filters (default: 26)
    pub num_mel_filters: usize,

    /// Include coefficient 0 (overall log-energy) in correlation
    /// (default: false)
    pub include_c0: bool,
}

/// Alignment configuration parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Minimum confidence for a result to be accepted (default: 0.70)
    pub confidence_threshold: f64,

    /// Maximum search offset in samples; 0 selects the automatic rule of
    /// one quarter of the shorter clip (default: 0)
    pub max_offset_samples: i64,

    /// Analysis window size in samples; must be a power of two in 64..=8192
    /// (default: 1024)
    pub window_size: usize,

    /// Hop size between analysis windows in samples; 0 selects the
    /// per-method default (default: 256)
    pub hop_size: usize,

    /// Noise gate threshold in dB for optional preprocessing (default: -40.0)
    pub noise_gate_db: f64,

    /// Reserved drift-correction switch; carried but not acted on
    /// (default: true)
    pub enable_drift_correction: bool,

    /// Spectral flux tuning
    pub spectral_flux: SpectralFluxConfig,

    /// Chroma tuning
    pub chroma: ChromaConfig,

    /// Energy correlation tuning
    pub energy: EnergyConfig,

    /// MFCC tuning
    pub mfcc: MfccConfig,
}

impl Default for SpectralFluxConfig {
    fn default() -> Self {
        Self {
            median_filter_size: 5,
            pre_emphasis_alpha: 0.97,
        }
    }
}

impl Default for ChromaConfig {
    fn default() -> Self {
        Self { num_bins: 12 }
    }
}

impl Default for EnergyConfig {
    fn default() -> Self {
        Self {
            smoothing_window_size: 3,
        }
    }
}

impl Default for MfccConfig {
    fn default() -> Self {
        Self {
            num_coeffs: 13,
            num_mel_filters: 26,
            include_c0: false,
        }
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: 0.70,
            max_offset_samples: 0,
            window_size: 1024,
            hop_size: 256,
            noise_gate_db: -40.0,
            enable_drift_correction: true,
            spectral_flux: SpectralFluxConfig::default(),
            chroma: ChromaConfig::default(),
            energy: EnergyConfig::default(),
            mfcc: MfccConfig::default(),
        }
    }
}

impl SyncConfig {
    /// Build a configuration tuned for a recording situation
    ///
    /// Recognized tags: `"music"`, `"speech"`, `"ambient"`, `"multicam"`,
    /// `"broadcast"`. Unknown tags fall back to the default configuration.
    ///
    /// # Example
    ///
    /// ```
    /// use slate_dsp::SyncConfig;
    ///
    /// let config = SyncConfig::for_use_case("music");
    /// assert_eq!(config.window_size, 4096);
    /// assert!(SyncConfig::for_use_case("unknown") == SyncConfig::default());
    /// ```
    pub fn for_use_case(use_case: &str) -> Self {
        let mut config = Self::default();

        match use_case {
            "music" => {
                config.window_size = 4096;
                config.hop_size = 1024;
                config.noise_gate_db = -50.0;
                config.confidence_threshold = 0.75;
            }
            "speech" => {
                config.window_size = 1024;
                config.hop_size = 256;
                config.noise_gate_db = -35.0;
                config.confidence_threshold = 0.65;
            }
            "ambient" => {
                config.window_size = 2048;
                config.hop_size = 512;
                config.noise_gate_db = -45.0;
                config.confidence_threshold = 0.60;
            }
            "multicam" => {
                config.window_size = 2048;
                config.hop_size = 512;
                config.confidence_threshold = 0.70;
                config.enable_drift_correction = true;
            }
            "broadcast" => {
                config.window_size = 4096;
                config.hop_size = 1024;
                config.noise_gate_db = -55.0;
                config.confidence_threshold = 0.80;
            }
            _ => {
                log::debug!("Unknown use case '{}', using default config", use_case);
            }
        }

        config
    }

    /// Validate all configuration fields
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::InvalidInput`] if any field is out of bounds:
    /// confidence outside [0, 1], window size not a power of two in
    /// 64..=8192, hop size zero or larger than the window, noise gate
    /// outside [-120, 0] dB, or a negative offset cap.
    pub fn validate(&self) -> Result<(), SyncError> {
        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            return Err(SyncError::InvalidInput);
        }

        if !(64..=8192).contains(&self.window_size) || !self.window_size.is_power_of_two() {
            return Err(SyncError::InvalidInput);
        }

        if self.hop_size == 0 || self.hop_size > self.window_size {
            return Err(SyncError::InvalidInput);
        }

        if self.noise_gate_db > 0.0 || self.noise_gate_db < -120.0 {
            return Err(SyncError::InvalidInput);
        }

        if self.max_offset_samples < 0 {
            return Err(SyncError::InvalidInput);
        }

        Ok(())
    }

    /// Effective maximum search offset for a clip pair
    ///
    /// Returns the configured cap, or one quarter of the shorter clip when
    /// the cap is 0 (automatic).
    pub fn max_offset(&self, ref_length: usize, target_length: usize) -> i64 {
        if self.max_offset_samples > 0 {
            return self.max_offset_samples;
        }

        (ref_length.min(target_length) / 4) as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(SyncConfig::default().validate().is_ok());
    }

    #[test]
    fn test_presets_are_valid() {
        for tag in ["music", "speech", "ambient", "multicam", "broadcast"] {
            let config = SyncConfig::for_use_case(tag);
            assert!(config.validate().is_ok(), "preset '{}' failed validation", tag);
        }
    }

    #[test]
    fn test_unknown_use_case_falls_back_to_default() {
        assert_eq!(SyncConfig::for_use_case("podcast"), SyncConfig::default());
        assert_eq!(SyncConfig::for_use_case(""), SyncConfig::default());
    }

    #[test]
    fn test_preset_deltas() {
        let music = SyncConfig::for_use_case("music");
        assert_eq!(music.window_size, 4096);
        assert_eq!(music.hop_size, 1024);
        assert_eq!(music.noise_gate_db, -50.0);
        assert_eq!(music.confidence_threshold, 0.75);

        let speech = SyncConfig::for_use_case("speech");
        assert_eq!(speech.window_size, 1024);
        assert_eq!(speech.noise_gate_db, -35.0);

        let broadcast = SyncConfig::for_use_case("broadcast");
        assert_eq!(broadcast.confidence_threshold, 0.80);

        let multicam = SyncConfig::for_use_case("multicam");
        assert!(multicam.enable_drift_correction);
    }

    #[test]
    fn test_validate_rejects_bad_confidence() {
        let mut config = SyncConfig::default();
        config.confidence_threshold = 1.5;
        assert_eq!(config.validate(), Err(SyncError::InvalidInput));

        config.confidence_threshold = -0.1;
        assert_eq!(config.validate(), Err(SyncError::InvalidInput));
    }

    #[test]
    fn test_validate_rejects_bad_window() {
        let mut config = SyncConfig::default();
        config.window_size = 1000; // not a power of two
        assert_eq!(config.validate(), Err(SyncError::InvalidInput));

        config.window_size = 32; // below range
        assert_eq!(config.validate(), Err(SyncError::InvalidInput));

        config.window_size = 16384; // above range
        assert_eq!(config.validate(), Err(SyncError::InvalidInput));
    }

    #[test]
    fn test_validate_rejects_bad_hop() {
        let mut config = SyncConfig::default();
        config.hop_size = 0;
        assert_eq!(config.validate(), Err(SyncError::InvalidInput));

        config.hop_size = config.window_size + 1;
        assert_eq!(config.validate(), Err(SyncError::InvalidInput));
    }

    #[test]
    fn test_validate_rejects_bad_noise_gate() {
        let mut config = SyncConfig::default();
        config.noise_gate_db = 1.0;
        assert_eq!(config.validate(), Err(SyncError::InvalidInput));

        config.noise_gate_db = -130.0;
        assert_eq!(config.validate(), Err(SyncError::InvalidInput));
    }

    #[test]
    fn test_max_offset_auto_rule() {
        let config = SyncConfig::default();
        // Auto: one quarter of the shorter clip
        assert_eq!(config.max_offset(44100, 88200), 11025);
        assert_eq!(config.max_offset(88200, 44100), 11025);

        let mut capped = config;
        capped.max_offset_samples = 5000;
        assert_eq!(capped.max_offset(44100, 88200), 5000);
    }
}
