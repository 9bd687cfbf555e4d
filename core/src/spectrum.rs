//! FFT magnitude spectra and tone-pair classification
//!
//! Each analysis frame is transformed with a real-input FFT of the
//! frame's own length, so the bin width follows the frame duration
//! (10 Hz for the default 100 ms window at 44.1 kHz). Peaks are
//! interior strict local maxima that reach at least half the frame's
//! maximum magnitude; the pair match walks the symbol table and the
//! first fit wins.

use realfft::RealFftPlanner;

use crate::error::{DtmfError, Result};
use crate::symbols;
use crate::{FREQUENCY_TOLERANCE_HZ, PEAK_MAGNITUDE_RATIO};

/// Magnitude spectrum of one analysis frame
#[derive(Debug, Clone)]
pub struct SpectralFrame {
    /// Unnormalized bin magnitudes, DC first
    pub magnitudes: Vec<f32>,
    /// Width of one bin in Hz
    pub bin_hz: f32,
}

impl SpectralFrame {
    /// Frequencies of interior strict local maxima reaching
    /// `min_ratio` of the frame's maximum magnitude
    ///
    /// The DC and Nyquist bins are never peaks. An all-zero spectrum
    /// has none.
    pub fn peak_frequencies(&self, min_ratio: f32) -> Vec<f32> {
        let max = self.magnitudes.iter().fold(0.0f32, |acc, &m| acc.max(m));
        if max <= 0.0 {
            return Vec::new();
        }
        let floor = min_ratio * max;

        let mut peaks = Vec::new();
        for i in 1..self.magnitudes.len().saturating_sub(1) {
            let magnitude = self.magnitudes[i];
            if magnitude >= floor
                && magnitude > self.magnitudes[i - 1]
                && magnitude > self.magnitudes[i + 1]
            {
                peaks.push(i as f32 * self.bin_hz);
            }
        }
        peaks
    }
}

/// Classifies analysis frames into DTMF symbols
///
/// Owns the FFT planner so transform plans are cached across frames of
/// the same length.
pub struct ToneClassifier {
    sample_rate: f32,
    planner: RealFftPlanner<f32>,
}

impl ToneClassifier {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate: sample_rate as f32,
            planner: RealFftPlanner::new(),
        }
    }

    /// Compute the magnitude spectrum of one frame
    pub fn spectrum(&mut self, frame: &[f32]) -> Result<SpectralFrame> {
        if frame.len() < 2 {
            // Too short for any interior bin; classifies as no tone
            return Ok(SpectralFrame {
                magnitudes: Vec::new(),
                bin_hz: 0.0,
            });
        }

        let r2c = self.planner.plan_fft_forward(frame.len());
        let mut input = frame.to_vec();
        let mut output = r2c.make_output_vec();
        r2c.process(&mut input, &mut output)
            .map_err(|e| DtmfError::FftError(format!("FFT forward process failed: {:?}", e)))?;

        let magnitudes: Vec<f32> = output.iter().map(|c| c.norm()).collect();
        Ok(SpectralFrame {
            magnitudes,
            bin_hz: self.sample_rate / frame.len() as f32,
        })
    }

    /// Match a computed spectrum against the symbol table
    ///
    /// Peak pick at the adaptive threshold, then first-wins table walk.
    pub fn match_spectrum(&self, spectrum: &SpectralFrame) -> Option<char> {
        let peaks = spectrum.peak_frequencies(PEAK_MAGNITUDE_RATIO);
        symbols::match_peaks(&peaks, FREQUENCY_TOLERANCE_HZ)
    }

    /// Classify one frame, requiring a peak in each frequency band
    ///
    /// Errors with `NoToneDetected` when the peak set fits no symbol;
    /// the decode pipeline treats that miss as a skip for the frame
    /// rather than a failure.
    pub fn classify(&mut self, frame: &[f32]) -> Result<char> {
        let spectrum = self.spectrum(frame)?;
        self.match_spectrum(&spectrum).ok_or(DtmfError::NoToneDetected)
    }
}
