//! Gesture-driven polyphonic synthesis.
//!
//! Hand and face landmark frames go in; note-ons, transpositions and
//! instrument switches come out and drive a small decaying-voice synth.
//!
//! Typical wiring:
//! - Build an [`Engine`] from an [`EngineConfig`]
//! - Hand [`Engine::renderer`] to the audio device callback
//! - Feed frames to [`Engine::process_raw`] on the gesture thread
//! - Read [`EngineContext`] accessors for HUD text

pub mod audio;
pub mod config;
pub mod constants;
pub mod core;
pub mod engine;
pub mod error;
pub mod events;
pub mod landmarks;
pub mod synth;
pub mod voices;

pub use audio::AudioRenderer;
pub use config::EngineConfig;
pub use crate::core::{Instrument, InstrumentSelector, Scale, ScaleController};
pub use engine::{Engine, EngineContext, EngineState};
pub use error::{EngineError, Result};
pub use events::{GestureEvent, GestureStateTracker};
pub use landmarks::{adapt, Hand, LandmarkFrame, RawFrame};
pub use voices::{Voice, VoicePool};
