//! Analysis window functions
//!
//! Hann windows are cached per length because the extractors request the
//! same geometry for every frame of a clip.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};

static HANN_CACHE: OnceLock<Mutex<HashMap<usize, Arc<[f32]>>>> = OnceLock::new();

/// Get a Hann window of the given length
///
/// `w[n] = 0.5 * (1 - cos(2π * n / (N - 1)))`
///
/// Windows are computed once per length and shared afterwards.
pub fn hann_window(length: usize) -> Arc<[f32]> {
    let cache = HANN_CACHE.get_or_init(|| Mutex::new(HashMap::new()));
    let mut cache = cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

    cache
        .entry(length)
        .or_insert_with(|| compute_hann(length))
        .clone()
}

fn compute_hann(length: usize) -> Arc<[f32]> {
    if length < 2 {
        return vec![1.0; length].into();
    }

    (0..length)
        .map(|n| {
            let x = 2.0 * std::f32::consts::PI * n as f32 / (length - 1) as f32;
            0.5 * (1.0 - x.cos())
        })
        .collect::<Vec<f32>>()
        .into()
}

/// Multiply a frame by a window in place
pub fn apply_window(frame: &mut [f32], window: &[f32]) {
    for (sample, &w) in frame.iter_mut().zip(window.iter()) {
        *sample *= w;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hann_endpoints_and_center() {
        let window = hann_window(1025);
        assert!(window[0].abs() < 1e-6);
        assert!(window[1024].abs() < 1e-6);
        // Odd length: exact center hits the cosine trough
        assert!((window[512] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_hann_symmetry() {
        let window = hann_window(1024);
        for i in 0..512 {
            assert!(
                (window[i] - window[1023 - i]).abs() < 1e-6,
                "asymmetry at index {}",
                i
            );
        }
    }

    #[test]
    fn test_cache_returns_shared_window() {
        let a = hann_window(2048);
        let b = hann_window(2048);
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_degenerate_lengths() {
        assert_eq!(hann_window(0).len(), 0);
        assert_eq!(hann_window(1).as_ref(), &[1.0]);
    }

    #[test]
    fn test_apply_window() {
        let mut frame = vec![1.0f32; 64];
        let window = hann_window(64);
        apply_window(&mut frame, &window);
        assert_eq!(frame.as_slice(), window.as_ref());
    }
}
