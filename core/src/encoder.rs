//! DTMF tone synthesis
//!
//! Each symbol becomes a dual sine tone followed by an equally long
//! silence, and the whole signal is peak-normalized into the signed
//! 16-bit range.

use std::f32::consts::PI;

use crate::symbols;
use crate::{DEFAULT_SAMPLE_RATE, DEFAULT_TONE_SECONDS};

/// DTMF encoder - synthesizes PCM audio from a symbol string
pub struct Encoder {
    sample_rate: u32,
    tone_seconds: f32,
}

impl Encoder {
    pub fn new(sample_rate: u32, tone_seconds: f32) -> Self {
        Self {
            sample_rate,
            tone_seconds,
        }
    }

    /// Synthesize 16-bit PCM for a symbol string
    ///
    /// Each in-alphabet character contributes `tone_seconds` of its
    /// dual tone plus the same duration of silence. Characters outside
    /// the alphabet are skipped and contribute nothing. The result is
    /// normalized so the loudest sample reaches 32767; an input with no
    /// valid symbols yields an empty buffer.
    pub fn encode(&self, symbols_text: &str) -> Vec<i16> {
        let samples_per_tone = (self.tone_seconds * self.sample_rate as f32) as usize;
        let sample_rate = self.sample_rate as f32;

        let mut signal: Vec<f32> = Vec::new();
        for symbol in symbols_text.chars() {
            let Some((low, high)) = symbols::frequency_pair(symbol) else {
                log::debug!("skipping {:?}, not a DTMF symbol", symbol);
                continue;
            };

            for i in 0..samples_per_tone {
                let t = i as f32 / sample_rate;
                let low_tone = (2.0 * PI * low * t).sin();
                let high_tone = (2.0 * PI * high * t).sin();
                signal.push(low_tone + high_tone);
            }
            signal.extend(std::iter::repeat(0.0).take(samples_per_tone));
        }

        let peak = signal.iter().fold(0.0f32, |acc, &s| acc.max(s.abs()));
        if peak == 0.0 {
            return vec![0; signal.len()];
        }

        let scale = 32767.0 / peak;
        signal.iter().map(|&s| (s * scale) as i16).collect()
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLE_RATE, DEFAULT_TONE_SECONDS)
    }
}
