//! Per-sample waveform generation.
//!
//! One closed formula per [`Instrument`]. Amplitude shaping lives in
//! [`Envelope`]: a single exponential decay per instrument, applied once by
//! the renderer. Pluck uses a steeper rate instead of a second stacked decay.

use crate::config::AudioConfig;
use crate::core::Instrument;
use std::f64::consts::TAU;

/// Raw oscillator output in [-1,1] at local time `t` seconds.
#[inline]
pub fn oscillator(instrument: Instrument, frequency_hz: f32, t: f64) -> f32 {
    let cycles = frequency_hz as f64 * t;
    let value = match instrument {
        Instrument::Sine | Instrument::Pluck => (TAU * cycles).sin(),
        // band-unlimited, aliases at high pitches
        Instrument::Saw => 2.0 * (cycles - (0.5 + cycles).floor()),
        Instrument::Square => sign((TAU * cycles).sin()),
    };
    value as f32
}

/// `oscillator * amplitude`.
#[inline]
pub fn sample(instrument: Instrument, frequency_hz: f32, t: f64, amplitude: f32) -> f32 {
    oscillator(instrument, frequency_hz, t) * amplitude
}

#[inline]
fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// `velocity * exp(-rate * age)` with a per-instrument rate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Envelope {
    pub decay_rate: f32,
    pub pluck_decay_rate: f32,
}

impl Envelope {
    pub fn from_config(config: &AudioConfig) -> Self {
        Self {
            decay_rate: config.decay_rate,
            pluck_decay_rate: config.pluck_decay_rate,
        }
    }

    #[inline]
    pub fn rate(&self, instrument: Instrument) -> f32 {
        match instrument {
            Instrument::Pluck => self.pluck_decay_rate,
            Instrument::Sine | Instrument::Saw | Instrument::Square => self.decay_rate,
        }
    }

    #[inline]
    pub fn gain(&self, instrument: Instrument, velocity: f32, age_sec: f64) -> f32 {
        velocity * (-(self.rate(instrument) as f64) * age_sec.max(0.0)).exp() as f32
    }
}

impl Default for Envelope {
    fn default() -> Self {
        Self::from_config(&AudioConfig::default())
    }
}
