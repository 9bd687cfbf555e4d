//! Silence-gap segmentation
//!
//! Splits a filtered buffer into tone candidates by finding the quiet
//! stretches between them. A sample counts as silent when its magnitude
//! falls below a fraction of the buffer peak, so the threshold adapts
//! to the recording level.

use crate::Interval;

/// Locate silence runs of at least `min_silence` samples
///
/// The threshold is `threshold_ratio` times the buffer's peak
/// magnitude. A run is recorded when a loud sample terminates it, or
/// when it reaches the end of the buffer with at least `min_silence`
/// samples from its start.
pub fn silent_regions(samples: &[f32], min_silence: usize, threshold_ratio: f32) -> Vec<Interval> {
    let peak = samples.iter().fold(0.0f32, |acc, &s| acc.max(s.abs()));
    let threshold = threshold_ratio * peak;

    let mut regions = Vec::new();
    let mut run_start: Option<usize> = None;

    for (i, &sample) in samples.iter().enumerate() {
        if sample.abs() < threshold {
            if run_start.is_none() {
                run_start = Some(i);
            }
        } else if let Some(start) = run_start.take() {
            if i - start >= min_silence {
                regions.push(Interval { start, end: i });
            }
        }
    }

    // Unterminated run at the end of the buffer
    if let Some(start) = run_start {
        if samples.len() - start >= min_silence {
            regions.push(Interval {
                start,
                end: samples.len(),
            });
        }
    }

    log::debug!(
        "silence scan: {} regions above {} samples (threshold {:.6})",
        regions.len(),
        min_silence,
        threshold
    );
    regions
}

/// Derive tone candidates from the recorded silences
///
/// Each candidate is the stretch between the previous silence (or the
/// buffer start) and the next silence. Candidates shorter than
/// `min_tone` samples are discarded. Audio after the last silence is
/// not a candidate, so a tone only counts once a silence follows it.
pub fn tone_intervals(silences: &[Interval], min_tone: usize) -> Vec<Interval> {
    let mut tones = Vec::new();
    let mut cursor = 0usize;

    for silence in silences {
        let candidate = Interval {
            start: cursor,
            end: silence.start,
        };
        if !candidate.is_empty() && candidate.len() >= min_tone {
            tones.push(candidate);
        }
        cursor = silence.end;
    }

    log::debug!("{} tone candidates from {} silences", tones.len(), silences.len());
    tones
}
