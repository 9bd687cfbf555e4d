//! Fixed-length sliding windows, the alternative to silence-gap
//! segmentation
//!
//! Windows advance by half their length so every tone onset lands fully
//! inside at least one window. The trailing stretch that does not fill
//! a whole window is dropped.

use crate::Interval;

/// Enumerate half-overlapping windows of `window_samples` over a buffer
/// of `len` samples
pub fn windows(len: usize, window_samples: usize) -> Vec<Interval> {
    if window_samples == 0 || len < window_samples {
        return Vec::new();
    }

    let hop = (window_samples / 2).max(1);
    let mut intervals = Vec::new();
    let mut start = 0;
    while start + window_samples <= len {
        intervals.push(Interval {
            start,
            end: start + window_samples,
        });
        start += hop;
    }
    intervals
}

/// Remove the DC component of one analysis frame in place
pub fn subtract_mean(frame: &mut [f32]) {
    if frame.is_empty() {
        return;
    }
    let mean = frame.iter().sum::<f32>() / frame.len() as f32;
    for sample in frame.iter_mut() {
        *sample -= mean;
    }
}
