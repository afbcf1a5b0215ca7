//! Audio clip container and in-place preprocessing

pub mod clip;

pub use clip::AudioClip;
