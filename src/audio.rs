//! Real-time block renderer.
//!
//! [`AudioRenderer::render`] is the one entry point in the crate that runs on
//! the audio device's callback thread. It takes a lock-free snapshot of the
//! engine state, never allocates, never logs, and never blocks on the
//! gesture thread.

use crate::config::AudioConfig;
use crate::engine::{EngineContext, EngineState};
use crate::synth::{self, Envelope};
use std::sync::Arc;

pub struct AudioRenderer {
    context: Arc<EngineContext>,
    sample_rate: u32,
    master_gain: f32,
    envelope: Envelope,
    // samples, kept in [0, sample_rate) so local time stays small
    phase: u64,
}

impl AudioRenderer {
    pub fn new(context: Arc<EngineContext>, config: &AudioConfig) -> Self {
        Self {
            context,
            sample_rate: config.sample_rate.max(1),
            master_gain: config.master_gain,
            envelope: Envelope::from_config(config),
            phase: 0,
        }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn phase(&self) -> u64 {
        self.phase
    }

    pub fn set_phase(&mut self, phase: u64) {
        self.phase = phase % self.sample_rate as u64;
    }

    /// Fill an interleaved buffer of `channels` channels from the current
    /// engine state, using the context clock for voice ages.
    pub fn render(&mut self, out: &mut [f32], channels: usize) {
        let now = self.context.now_sec();
        let state = self.context.load();
        self.render_state(&state, out, channels, now);
    }

    /// Render against an explicit state and time. Same inputs and phase give
    /// the same samples.
    pub fn render_state(
        &mut self,
        state: &EngineState,
        out: &mut [f32],
        channels: usize,
        now_sec: f64,
    ) {
        let channels = channels.max(1);
        let frames = out.len() / channels;
        out.fill(0.0);

        let sr = self.sample_rate as f64;
        let instrument = state.instrument;
        for voice in state.voices.snapshot_alive(now_sec) {
            let freq = voice.frequency_hz;
            if !(freq.is_finite() && freq > 0.0) {
                continue;
            }
            let amp = self
                .envelope
                .gain(instrument, voice.velocity, voice.age(now_sec));
            if !amp.is_finite() {
                continue;
            }
            for (i, frame) in out.chunks_exact_mut(channels).enumerate() {
                let t = (self.phase + i as u64) as f64 / sr;
                frame[0] += synth::sample(instrument, freq, t, amp);
            }
        }

        for frame in out.chunks_exact_mut(channels) {
            let mixed = frame[0] * self.master_gain;
            let value = if mixed.is_finite() {
                mixed.clamp(-1.0, 1.0)
            } else {
                0.0
            };
            frame.fill(value);
        }

        self.phase = (self.phase + frames as u64) % self.sample_rate as u64;
    }
}
