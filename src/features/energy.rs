//! Short-time energy profile
//!
//! RMS per analysis window, median-smoothed (size 5). The default hop is
//! half a window, coarser than the spectral extractors because energy
//! envelopes vary slowly.

use crate::audio::AudioClip;
use crate::dsp::stats::{median_filter, rms};
use crate::features::{frame_count, resolve_hop};

/// Median filter size applied to the raw energy profile
const ENERGY_MEDIAN_SIZE: usize = 5;

/// Extract the RMS energy sequence of a clip
///
/// # Arguments
///
/// * `clip` - Source audio
/// * `window_size` - Analysis window in samples
/// * `hop_size` - Stride between windows; 0 selects `window_size / 2`
///
/// # Returns
///
/// One RMS value per frame; empty when the clip is invalid or shorter than
/// one window.
pub fn extract(clip: &AudioClip, window_size: usize, hop_size: usize) -> Vec<f32> {
    if !clip.is_valid() || window_size == 0 {
        return Vec::new();
    }

    let hop = resolve_hop(hop_size, window_size / 2);
    if hop == 0 {
        return Vec::new();
    }

    let samples = clip.samples();
    let num_frames = frame_count(samples.len(), window_size, hop);
    if num_frames == 0 {
        return Vec::new();
    }

    log::debug!(
        "Extracting energy profile: {} samples, window={}, hop={}, {} frames",
        samples.len(),
        window_size,
        hop,
        num_frames
    );

    let mut profile = Vec::with_capacity(num_frames);
    for frame_idx in 0..num_frames {
        let start = frame_idx * hop;
        profile.push(rms(&samples[start..start + window_size]));
    }

    median_filter(&mut profile, ENERGY_MEDIAN_SIZE);

    profile
}
