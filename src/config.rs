//! Engine configuration.
//!
//! Every field has a default from [`crate::constants`], so a TOML file only
//! needs the values it wants to change:
//!
//! ```toml
//! [scale]
//! root_midi = 57
//!
//! [gestures]
//! pinch_cooldown_sec = 0.5
//! ```

use crate::constants::*;
use crate::core::MAJOR;
use crate::error::{EngineError, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AudioConfig {
    pub sample_rate: u32,
    pub master_gain: f32,
    pub max_voice_age_sec: f64,
    pub decay_rate: f32,
    pub pluck_decay_rate: f32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sample_rate: SAMPLE_RATE,
            master_gain: MASTER_GAIN,
            max_voice_age_sec: MAX_VOICE_AGE_SEC,
            decay_rate: DECAY_RATE,
            pluck_decay_rate: PLUCK_DECAY_RATE,
        }
    }
}

/// Root and interval pattern of the playable scale.
///
/// `min_root`/`max_root` clamp pinch transposition to the MIDI range.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScaleConfig {
    pub root_midi: i32,
    pub intervals: Vec<i32>,
    pub min_root: i32,
    pub max_root: i32,
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            root_midi: DEFAULT_ROOT_MIDI,
            intervals: MAJOR.to_vec(),
            min_root: MIN_ROOT_MIDI,
            max_root: MAX_ROOT_MIDI,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GestureConfig {
    /// Flip x and swap left/right for hands, eyes and ears (for unmirrored
    /// camera input).
    pub mirror: bool,
    pub pinch_threshold: f32,
    pub pinch_cooldown_sec: f64,
    pub tap_distance: f32,
    pub tap_min_speed: f32,
    pub tap_cooldown_sec: f64,
    pub blink_threshold: f32,
    pub velocity_gain: f32,
    pub velocity_min: f32,
    pub velocity_max: f32,
    pub first_touch_velocity: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            mirror: false,
            pinch_threshold: PINCH_THRESHOLD,
            pinch_cooldown_sec: PINCH_COOLDOWN_SEC,
            tap_distance: TAP_DISTANCE,
            tap_min_speed: TAP_MIN_SPEED,
            tap_cooldown_sec: TAP_COOLDOWN_SEC,
            blink_threshold: BLINK_THRESHOLD,
            velocity_gain: VELOCITY_GAIN,
            velocity_min: VELOCITY_MIN,
            velocity_max: VELOCITY_MAX,
            first_touch_velocity: FIRST_TOUCH_VELOCITY,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub audio: AudioConfig,
    pub scale: ScaleConfig,
    pub gestures: GestureConfig,
}

impl EngineConfig {
    /// Parse a TOML document; missing fields keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| EngineError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        log::info!(target: "config", "loaded {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let a = &self.audio;
        if a.sample_rate == 0 {
            return Err(invalid("audio.sample_rate must be positive"));
        }
        if !a.master_gain.is_finite() || a.master_gain < 0.0 {
            return Err(invalid("audio.master_gain must be a finite, non-negative number"));
        }
        if !(a.max_voice_age_sec.is_finite() && a.max_voice_age_sec > 0.0) {
            return Err(invalid("audio.max_voice_age_sec must be positive"));
        }
        if !(a.decay_rate.is_finite() && a.decay_rate >= 0.0)
            || !(a.pluck_decay_rate.is_finite() && a.pluck_decay_rate >= 0.0)
        {
            return Err(invalid("decay rates must be finite and non-negative"));
        }

        let s = &self.scale;
        if s.min_root > s.max_root {
            return Err(invalid("scale.min_root exceeds scale.max_root"));
        }
        if !(s.min_root..=s.max_root).contains(&s.root_midi) {
            return Err(invalid("scale.root_midi lies outside [min_root, max_root]"));
        }
        // Scale::new owns the interval and frequency checks. Pitch is
        // monotonic in the root, so both clamp ends cover every reachable root.
        for root in [s.min_root, s.root_midi, s.max_root] {
            crate::core::Scale::new(root, s.intervals.clone())?;
        }

        let g = &self.gestures;
        let positive = [
            ("gestures.pinch_threshold", g.pinch_threshold),
            ("gestures.tap_distance", g.tap_distance),
            ("gestures.blink_threshold", g.blink_threshold),
            ("gestures.velocity_gain", g.velocity_gain),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid(&format!("{name} must be positive")));
            }
        }
        if !(g.pinch_cooldown_sec >= 0.0 && g.tap_cooldown_sec >= 0.0) {
            return Err(invalid("gesture cooldowns must be non-negative"));
        }
        if !(0.0..=1.0).contains(&g.velocity_min)
            || !(0.0..=1.0).contains(&g.velocity_max)
            || g.velocity_min > g.velocity_max
        {
            return Err(invalid("velocity limits must satisfy 0 <= min <= max <= 1"));
        }
        if !(g.velocity_min..=g.velocity_max).contains(&g.first_touch_velocity) {
            return Err(invalid("first_touch_velocity must lie within the velocity limits"));
        }
        Ok(())
    }
}

fn invalid(msg: &str) -> EngineError {
    EngineError::InvalidConfig(msg.to_string())
}
