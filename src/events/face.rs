//! Face gestures: per-eye blinks and head tilt.

use super::Eye;
use crate::constants::{
    LEFT_EAR, LEFT_EYE_LOWER, LEFT_EYE_UPPER, RIGHT_EAR, RIGHT_EYE_LOWER, RIGHT_EYE_UPPER,
};
use crate::landmarks::FaceLandmarks;

/// Vertical gap between the upper and lower eyelid of `eye`.
pub fn eye_gap(face: &FaceLandmarks, eye: Eye) -> f32 {
    let (upper, lower) = match eye {
        Eye::Left => (LEFT_EYE_UPPER, LEFT_EYE_LOWER),
        Eye::Right => (RIGHT_EYE_UPPER, RIGHT_EYE_LOWER),
    };
    (face.point(lower).y - face.point(upper).y).abs()
}

/// Vertical offset between the ears; positive when the left ear sits lower
/// in the image.
pub fn head_tilt(face: &FaceLandmarks) -> f32 {
    face.point(LEFT_EAR).y - face.point(RIGHT_EAR).y
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BlinkState {
    closed: [bool; 2],
}

impl BlinkState {
    /// Returns `true` when `eye` goes from open to closed.
    pub fn observe(&mut self, eye: Eye, closed: bool) -> bool {
        let slot = &mut self.closed[eye.index()];
        let onset = closed && !*slot;
        *slot = closed;
        onset
    }
}
