//! Decode pipeline: band filter, segmentation, classification,
//! duplicate suppression
//!
//! Two interchangeable strategies split the filtered buffer into
//! analysis frames. Silence gaps give one frame per tone and decode
//! repeated symbols faithfully; sliding windows survive recordings
//! whose gaps are buried in noise, at the price of merging immediately
//! repeated symbols.

use crate::debounce::DebounceFilter;
use crate::error::Result;
use crate::filter;
use crate::segment;
use crate::spectrum::{SpectralFrame, ToneClassifier};
use crate::window;
use crate::{
    Interval, DEFAULT_SAMPLE_RATE, MIN_SILENCE_SECONDS, MIN_TONE_SECONDS,
    SILENCE_THRESHOLD_RATIO, WINDOW_SECONDS,
};

/// How the filtered buffer is split into analysis frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentStrategy {
    /// One frame per tone, bounded by silence gaps
    SilenceGaps,
    /// Fixed half-overlapping windows with duplicate suppression
    SlidingWindows,
}

/// Callback invoked for every analysis frame with its interval,
/// spectrum and match result; diagnostics only, the decoded output
/// does not depend on it
pub type FrameObserver = Box<dyn FnMut(Interval, &SpectralFrame, Option<char>)>;

/// DTMF decoder - recovers the symbol string from a sample buffer
pub struct Decoder {
    sample_rate: u32,
    strategy: SegmentStrategy,
    classifier: ToneClassifier,
    observer: Option<FrameObserver>,
}

impl Decoder {
    pub fn new(sample_rate: u32) -> Self {
        Self::with_strategy(sample_rate, SegmentStrategy::SilenceGaps)
    }

    pub fn with_strategy(sample_rate: u32, strategy: SegmentStrategy) -> Self {
        Self {
            sample_rate,
            strategy,
            classifier: ToneClassifier::new(sample_rate),
            observer: None,
        }
    }

    /// Attach a per-frame observer for tracing and visualization
    pub fn set_observer(&mut self, observer: FrameObserver) {
        self.observer = Some(observer);
    }

    /// Decode a mono sample buffer into its symbol string
    ///
    /// A buffer with no signal at all decodes to the empty string.
    /// Frames in which no tone pair stands out contribute nothing.
    pub fn decode(&mut self, samples: &[f32]) -> Result<String> {
        if samples.iter().all(|&s| s == 0.0) {
            return Ok(String::new());
        }

        let filtered = filter::band_pass(samples, self.sample_rate)?;
        let rate = self.sample_rate as f32;

        match self.strategy {
            SegmentStrategy::SilenceGaps => {
                let min_silence = (MIN_SILENCE_SECONDS * rate) as usize;
                let min_tone = (MIN_TONE_SECONDS * rate) as usize;

                let silences =
                    segment::silent_regions(&filtered, min_silence, SILENCE_THRESHOLD_RATIO);
                let intervals = segment::tone_intervals(&silences, min_tone);
                log::debug!("decoding {} tone intervals via silence gaps", intervals.len());

                let mut decoded = String::new();
                for interval in intervals {
                    let frame = filtered[interval.start..interval.end].to_vec();
                    if let Some(symbol) = self.classify_frame(interval, frame)? {
                        decoded.push(symbol);
                    }
                }
                Ok(decoded)
            }
            SegmentStrategy::SlidingWindows => {
                let window_samples = (WINDOW_SECONDS * rate) as usize;
                let intervals = window::windows(filtered.len(), window_samples);
                log::debug!("decoding {} sliding windows", intervals.len());

                let mut debounce = DebounceFilter::new();
                let mut decoded = String::new();
                for interval in intervals {
                    let mut frame = filtered[interval.start..interval.end].to_vec();
                    window::subtract_mean(&mut frame);
                    let matched = self.classify_frame(interval, frame)?;
                    if let Some(symbol) = debounce.push(matched) {
                        decoded.push(symbol);
                    }
                }
                Ok(decoded)
            }
        }
    }

    /// Spectrum and table match for one frame, with the observer
    /// notified whether or not a symbol matched
    fn classify_frame(&mut self, interval: Interval, frame: Vec<f32>) -> Result<Option<char>> {
        let spectrum = self.classifier.spectrum(&frame)?;
        let matched = self.classifier.match_spectrum(&spectrum);

        if let Some(observer) = self.observer.as_mut() {
            observer(interval, &spectrum, matched);
        }
        Ok(matched)
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLE_RATE)
    }
}

/// Keep only the first channel of an interleaved multi-channel buffer
pub fn first_channel(interleaved: &[f32], channels: usize) -> Vec<f32> {
    if channels <= 1 {
        return interleaved.to_vec();
    }
    interleaved.iter().step_by(channels).copied().collect()
}
