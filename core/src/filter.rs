//! Zero-phase band restriction around the DTMF frequencies
//!
//! The decode pipeline first strips everything outside the 650-1700 Hz
//! band: a first-order Butterworth high-pass at 650 Hz followed by a
//! first-order low-pass at 1700 Hz. Each section runs over the buffer
//! forward and then backward (filtfilt-style), which cancels the phase
//! shift and squares the magnitude response. Coefficients come from the
//! bilinear transform with frequency prewarping, expressed as biquad
//! sections with the z^-2 taps zeroed.

use biquad::{Biquad, Coefficients, DirectForm1};
use std::f32::consts::PI;

use crate::error::{DtmfError, Result};
use crate::{HIGHPASS_CUTOFF_HZ, LOWPASS_CUTOFF_HZ};

/// Amplitudes below this are filter ringdown residue, not signal
const RINGDOWN_FLOOR: f32 = 1e-20;

/// Restrict `samples` to the DTMF band
///
/// Output length equals input length and an all-zero buffer stays
/// all-zero; quiet stretches settle to exact zero rather than carrying
/// ringdown residue. Errors with `SampleRateTooLow` when the rate
/// cannot represent the upper band edge (rate <= 2 x 1700 Hz).
pub fn band_pass(samples: &[f32], sample_rate: u32) -> Result<Vec<f32>> {
    if sample_rate as f32 <= 2.0 * LOWPASS_CUTOFF_HZ {
        return Err(DtmfError::SampleRateTooLow(sample_rate));
    }

    let rate = sample_rate as f32;
    let high_passed = zero_phase(samples, first_order_high_pass(HIGHPASS_CUTOFF_HZ, rate));
    let mut band = zero_phase(&high_passed, first_order_low_pass(LOWPASS_CUTOFF_HZ, rate));

    // The ringdown after a tone decays into f32 denormals and sticks
    // there; flush the dust so quiet stretches come out exactly silent
    for sample in band.iter_mut() {
        if sample.abs() < RINGDOWN_FLOOR {
            *sample = 0.0;
        }
    }
    Ok(band)
}

/// Run one filter section forward and then backward over the buffer
fn zero_phase(samples: &[f32], coefficients: Coefficients<f32>) -> Vec<f32> {
    let mut forward = DirectForm1::<f32>::new(coefficients);
    let mut filtered: Vec<f32> = samples.iter().map(|&s| forward.run(s)).collect();

    let mut backward = DirectForm1::<f32>::new(coefficients);
    for sample in filtered.iter_mut().rev() {
        *sample = backward.run(*sample);
    }
    filtered
}

/// First-order Butterworth high-pass, bilinear transform with prewarping
fn first_order_high_pass(cutoff_hz: f32, sample_rate: f32) -> Coefficients<f32> {
    let k = (PI * cutoff_hz / sample_rate).tan();
    let norm = 1.0 / (k + 1.0);
    Coefficients {
        a1: (k - 1.0) * norm,
        a2: 0.0,
        b0: norm,
        b1: -norm,
        b2: 0.0,
    }
}

/// First-order Butterworth low-pass, bilinear transform with prewarping
fn first_order_low_pass(cutoff_hz: f32, sample_rate: f32) -> Coefficients<f32> {
    let k = (PI * cutoff_hz / sample_rate).tan();
    let norm = 1.0 / (k + 1.0);
    Coefficients {
        a1: (k - 1.0) * norm,
        a2: 0.0,
        b0: k * norm,
        b1: k * norm,
        b2: 0.0,
    }
}
