//! DTMF audio codec for the 16-symbol keypad alphabet `0123456789*#ABCD`
//!
//! Encodes symbol strings as dual-tone audio and recovers them from
//! recorded buffers via band filtering, silence-gap or sliding-window
//! segmentation, and FFT peak matching

pub mod error;
pub mod symbols;
pub mod filter;
pub mod segment;
pub mod window;
pub mod spectrum;
pub mod debounce;
pub mod encoder;
pub mod decoder;
pub mod digest;

pub use decoder::{first_channel, Decoder, FrameObserver, SegmentStrategy};
pub use encoder::Encoder;
pub use error::{DtmfError, Result};
pub use spectrum::{SpectralFrame, ToneClassifier};

/// Half-open sample range `[start, end)` shared by both segmentation
/// strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub start: usize,
    pub end: usize,
}

impl Interval {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

// Synthesis defaults
pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;
pub const DEFAULT_TONE_SECONDS: f32 = 0.4;

// Band restriction
pub const HIGHPASS_CUTOFF_HZ: f32 = 650.0;
pub const LOWPASS_CUTOFF_HZ: f32 = 1700.0;

// Silence-gap segmentation
pub const SILENCE_THRESHOLD_RATIO: f32 = 0.02;
pub const MIN_SILENCE_SECONDS: f32 = 0.1;
pub const MIN_TONE_SECONDS: f32 = 0.05;

// Sliding-window segmentation
pub const WINDOW_SECONDS: f32 = 0.1;

// Spectral classification
pub const PEAK_MAGNITUDE_RATIO: f32 = 0.5;
pub const FREQUENCY_TOLERANCE_HZ: f32 = 10.0;
