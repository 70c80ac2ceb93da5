//! Shared engine state and the gesture-side owner that mutates it.
//!
//! ```text
//!  gesture thread                                audio callback
//!  ──────────────                                ──────────────
//!  RawFrame ─adapt─▶ tracker ─▶ Engine::apply
//!                                   │ build next EngineState
//!                                   ▼
//!                     EngineContext (ArcSwap) ───load()───▶ AudioRenderer
//! ```
//!
//! [`Engine`] is the only writer. Every processed frame publishes a complete
//! [`EngineState`]; readers always see one committed composite, never a new
//! scale next to a stale instrument. Replaced states are retired on the
//! gesture thread, so the audio callback never frees one.

use crate::audio::AudioRenderer;
use crate::config::EngineConfig;
use crate::core::{Instrument, InstrumentSelector, Scale, ScaleController};
use crate::error::Result;
use crate::events::{Eye, GestureEvent, GestureEvents, GestureStateTracker};
use crate::landmarks::{adapt, LandmarkFrame, RawFrame};
use crate::voices::VoicePool;
use arc_swap::{ArcSwap, Guard};
use crossbeam_channel::{Receiver, Sender};
use std::sync::Arc;
use std::time::Instant;

/// Immutable snapshot of everything the renderer and HUD read.
#[derive(Clone, Debug)]
pub struct EngineState {
    pub voices: VoicePool,
    pub instrument: Instrument,
    pub scale: Scale,
    pub tilt: f32,
    pub blinks: [u64; 2],
}

impl EngineState {
    pub fn blink_count(&self, eye: Eye) -> u64 {
        self.blinks[eye.index()]
    }
}

/// Handle shared by the gesture thread, the audio callback and HUD readers.
pub struct EngineContext {
    state: ArcSwap<EngineState>,
    epoch: Instant,
}

impl EngineContext {
    pub fn new(initial: EngineState) -> Self {
        Self {
            state: ArcSwap::from_pointee(initial),
            epoch: Instant::now(),
        }
    }

    /// Seconds since the context was created. Frames, voices and the
    /// renderer all share this clock.
    pub fn now_sec(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64()
    }

    /// Lock-free read for the audio callback.
    #[inline]
    pub fn load(&self) -> Guard<Arc<EngineState>> {
        self.state.load()
    }

    pub fn snapshot(&self) -> Arc<EngineState> {
        self.state.load_full()
    }

    /// Store `state` and hand back the one it replaced.
    fn publish(&self, state: EngineState) -> Arc<EngineState> {
        self.state.swap(Arc::new(state))
    }

    pub fn root_note_name(&self) -> &'static str {
        self.load().scale.root_name()
    }

    pub fn instrument_name(&self) -> &'static str {
        self.load().instrument.name()
    }

    pub fn scale_frequencies(&self) -> Vec<f32> {
        self.load().scale.frequencies().to_vec()
    }

    pub fn tilt(&self) -> f32 {
        self.load().tilt
    }
}

/// Gesture-side engine: owns the tracker and controllers, applies events in
/// arrival order, and publishes the result.
pub struct Engine {
    config: EngineConfig,
    context: Arc<EngineContext>,
    tracker: GestureStateTracker,
    scale: ScaleController,
    instruments: InstrumentSelector,
    voices: VoicePool,
    tilt: f32,
    blinks: [u64; 2],
    subscribers: Vec<Sender<GestureEvent>>,
    // Last published states. A renderer guard taken before a publish may
    // outlive it; holding these here keeps the final drop, and the frees of
    // the voice and scale vectors, on this thread instead of the callback.
    retired: [Option<Arc<EngineState>>; RETAINED_STATES],
}

/// Published states kept alive after being replaced. At ~30 frames per
/// second this covers audio blocks far longer than any device uses.
const RETAINED_STATES: usize = 2;

impl Engine {
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let scale = Scale::new(config.scale.root_midi, config.scale.intervals.clone())?;
        let scale = ScaleController::new(scale, config.scale.min_root, config.scale.max_root);
        let instruments = InstrumentSelector::new();
        let voices = VoicePool::new(config.audio.max_voice_age_sec);
        let context = Arc::new(EngineContext::new(EngineState {
            voices: voices.clone(),
            instrument: instruments.current(),
            scale: scale.scale().clone(),
            tilt: 0.0,
            blinks: [0; 2],
        }));
        log::info!(
            "[engine] root={} instrument={} degrees={}",
            scale.scale().root_name(),
            instruments.current().name(),
            scale.scale().len()
        );
        Ok(Self {
            tracker: GestureStateTracker::new(config.gestures.clone()),
            config,
            context,
            scale,
            instruments,
            voices,
            tilt: 0.0,
            blinks: [0; 2],
            subscribers: Vec::new(),
            retired: Default::default(),
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn context(&self) -> Arc<EngineContext> {
        Arc::clone(&self.context)
    }

    /// Renderer bound to this engine's context, for the audio callback.
    pub fn renderer(&self) -> AudioRenderer {
        AudioRenderer::new(self.context(), &self.config.audio)
    }

    /// Receive every event this engine emits, in order, from now on.
    pub fn subscribe(&mut self) -> Receiver<GestureEvent> {
        let (tx, rx) = crossbeam_channel::unbounded();
        self.subscribers.push(tx);
        rx
    }

    pub fn scale(&self) -> &Scale {
        self.scale.scale()
    }

    pub fn instrument(&self) -> Instrument {
        self.instruments.current()
    }

    pub fn voices(&self) -> &VoicePool {
        &self.voices
    }

    /// Adapt an external snapshot and process it.
    pub fn process_raw(&mut self, raw: &RawFrame) -> GestureEvents {
        let frame = adapt(raw, self.config.gestures.mirror);
        self.process_frame(&frame)
    }

    pub fn process_frame(&mut self, frame: &LandmarkFrame) -> GestureEvents {
        let events = self.tracker.process(frame, self.scale.scale().len());
        for event in &events {
            self.apply(event);
        }
        self.subscribers.retain(|tx| {
            events.iter().all(|event| tx.send(*event).is_ok())
        });
        let now = if frame.timestamp_sec.is_finite() {
            frame.timestamp_sec
        } else {
            self.context.now_sec()
        };
        self.commit(now);
        events
    }

    /// Sweep expired voices and republish without a new frame.
    pub fn tick(&mut self, now_sec: f64) {
        self.commit(now_sec);
    }

    /// Apply one event to the owned controllers. Does not publish.
    pub fn apply(&mut self, event: &GestureEvent) {
        match *event {
            GestureEvent::NoteOn {
                hand,
                degree,
                velocity,
                timestamp_sec,
                ..
            } => {
                // tracker already skips degrees past the scale
                if let Some(freq) = self.scale.frequency_for_degree(degree) {
                    self.voices.add_voice(freq, timestamp_sec, velocity);
                    log::debug!(
                        "[gesture] {:?} degree {} -> {:.1} Hz vel {:.2}",
                        hand,
                        degree,
                        freq,
                        velocity
                    );
                }
            }
            GestureEvent::PinchShift { direction, .. } => {
                if self.scale.shift(direction) {
                    log::info!("[scale] root -> {}", self.scale.scale().root_name());
                }
            }
            GestureEvent::TapSwitch { .. } => {
                let instrument = self.instruments.advance();
                log::info!("[instrument] -> {}", instrument.name());
            }
            GestureEvent::Blink { eye, .. } => {
                self.blinks[eye.index()] += 1;
                log::debug!("[gesture] blink {:?}", eye);
            }
            GestureEvent::TiltUpdate { angle, .. } => {
                self.tilt = angle;
            }
        }
    }

    fn commit(&mut self, now_sec: f64) {
        let swept = self.voices.sweep(now_sec);
        if swept > 0 {
            log::trace!("[voices] swept {swept}, {} left", self.voices.len());
        }
        let previous = self.context.publish(EngineState {
            voices: self.voices.clone(),
            instrument: self.instruments.current(),
            scale: self.scale.scale().clone(),
            tilt: self.tilt,
            blinks: self.blinks,
        });
        // oldest retained state is dropped here, on the gesture thread
        self.retired.rotate_left(1);
        self.retired[RETAINED_STATES - 1] = Some(previous);
    }
}
