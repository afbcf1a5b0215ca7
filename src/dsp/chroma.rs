//! Chroma (pitch-class) mapping
//!
//! Folds a magnitude spectrum into a 12-element pitch-class distribution.
//! Only the musically useful band (80 Hz to 2 kHz) contributes; the vector
//! is normalized to unit sum so frames are comparable regardless of level.

/// Number of pitch classes per octave
pub const NUM_CHROMA_BINS: usize = 12;

/// Reference tuning frequency (A4)
const A4_FREQ: f64 = 440.0;

/// MIDI note number of A4
const A4_MIDI: f64 = 69.0;

/// Lower edge of the analyzed band in Hz
const MIN_FREQ: f64 = 80.0;

/// Upper edge of the analyzed band in Hz
const MAX_FREQ: f64 = 2000.0;

/// Fold one magnitude spectrum into a 12-bin chroma vector
///
/// Bin `i` of the spectrum is treated as frequency
/// `i * sample_rate / (2 * (len - 1))`; bins inside the 80 Hz - 2 kHz band
/// are assigned to pitch class `floor(12 * log2(f / 440) + 69) mod 12` and
/// their magnitudes accumulated. The result sums to 1 unless the band is
/// silent.
pub fn chroma_vector(magnitude: &[f32], sample_rate: f64) -> Vec<f32> {
    let mut chroma = vec![0.0f32; NUM_CHROMA_BINS];

    if magnitude.len() < 2 || sample_rate <= 0.0 {
        return chroma;
    }

    for (i, &value) in magnitude.iter().enumerate().skip(1) {
        let freq = i as f64 * sample_rate / (2.0 * (magnitude.len() - 1) as f64);

        if freq > MIN_FREQ && freq < MAX_FREQ {
            let midi_note = 12.0 * (freq / A4_FREQ).log2() + A4_MIDI;
            if midi_note >= 0.0 {
                let class = (midi_note as usize) % NUM_CHROMA_BINS;
                chroma[class] += value;
            }
        }
    }

    let sum: f32 = chroma.iter().sum();
    if sum > 0.0 {
        for value in &mut chroma {
            *value /= sum;
        }
    }

    chroma
}
