//! Landmark indices and default tuning values.
//!
//! Landmark indices follow the 21-point hand model and the 468-point face
//! mesh used by common pose trackers. Tuning values are the defaults behind
//! [`crate::config::EngineConfig`]; a config file can override any of them.

// Hand model
pub const HAND_LANDMARK_COUNT: usize = 21;
pub const THUMB_TIP: usize = 4;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_TIP: usize = 12;
pub const RING_TIP: usize = 16;
pub const PINKY_TIP: usize = 20;
pub const PINKY_BASE: usize = 17; // outer edge of the palm, used for taps

// Joint offsets relative to a fingertip index
pub const MIDDLE_JOINT_OFFSET: usize = 2;
pub const BASE_JOINT_OFFSET: usize = 3;

// Face mesh (subject's own left/right)
pub const FACE_LANDMARK_COUNT: usize = 468;
pub const RIGHT_EYE_UPPER: usize = 159;
pub const RIGHT_EYE_LOWER: usize = 145;
pub const LEFT_EYE_UPPER: usize = 386;
pub const LEFT_EYE_LOWER: usize = 374;
pub const RIGHT_EAR: usize = 234;
pub const LEFT_EAR: usize = 454;

// Audio
pub const SAMPLE_RATE: u32 = 44_100;
pub const MASTER_GAIN: f32 = 0.3;
pub const MAX_VOICE_AGE_SEC: f64 = 1.5;
pub const DECAY_RATE: f32 = 3.0; // exp(-3 * 1.5) ~ 0.011 at eviction
pub const PLUCK_DECAY_RATE: f32 = 6.0;

// Scale
pub const DEFAULT_ROOT_MIDI: i32 = 60; // C4
pub const MIN_ROOT_MIDI: i32 = 0;
pub const MAX_ROOT_MIDI: i32 = 127;

// Finger notes
pub const VELOCITY_GAIN: f32 = 10.0; // normalized dy per frame -> velocity
pub const VELOCITY_MIN: f32 = 0.2;
pub const VELOCITY_MAX: f32 = 1.0;
pub const FIRST_TOUCH_VELOCITY: f32 = 0.7;

// Pinch
pub const PINCH_THRESHOLD: f32 = 0.05;
pub const PINCH_COOLDOWN_SEC: f64 = 0.8;

// Tap (hand edges knocked together)
pub const TAP_DISTANCE: f32 = 0.07;
pub const TAP_MIN_SPEED: f32 = 0.01; // closing distance per frame
pub const TAP_COOLDOWN_SEC: f64 = 1.0;

// Blink: ~5 px eyelid gap on a 480-line frame
pub const BLINK_THRESHOLD: f32 = 0.01;
