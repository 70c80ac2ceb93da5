//! Hand gestures: finger extension, thumb-index pinch, and edge taps.
//!
//! Predicates are pure functions of one hand; the `*State` types hold the
//! previous-frame values needed to turn them into rising edges.

use super::Finger;
use crate::config::GestureConfig;
use crate::constants::{
    BASE_JOINT_OFFSET, INDEX_TIP, MIDDLE_JOINT_OFFSET, PINKY_BASE, THUMB_TIP,
};
use crate::landmarks::HandLandmarks;

/// A finger is extended when tip, middle joint and base joint climb
/// monotonically toward the top of the image (y grows downward).
pub fn is_extended(hand: &HandLandmarks, finger: Finger) -> bool {
    let tip = finger.tip();
    let tip_y = hand.point(tip).y;
    let middle_y = hand.point(tip - MIDDLE_JOINT_OFFSET).y;
    let base_y = hand.point(tip - BASE_JOINT_OFFSET).y;
    tip_y < middle_y && middle_y < base_y
}

/// Image-plane distance between thumb tip and index tip.
#[inline]
pub fn pinch_distance(hand: &HandLandmarks) -> f32 {
    hand.point_xy(THUMB_TIP).distance(hand.point_xy(INDEX_TIP))
}

/// Image-plane distance between the outer palm edges of two hands.
#[inline]
pub fn edge_distance(left: &HandLandmarks, right: &HandLandmarks) -> f32 {
    left.point_xy(PINKY_BASE).distance(right.point_xy(PINKY_BASE))
}

/// Velocity from vertical fingertip travel since the last frame.
pub fn note_velocity(previous_tip_y: Option<f32>, tip_y: f32, config: &GestureConfig) -> f32 {
    match previous_tip_y {
        Some(prev) => ((prev - tip_y) * config.velocity_gain)
            .abs()
            .clamp(config.velocity_min, config.velocity_max),
        None => config.first_touch_velocity,
    }
}

#[inline]
fn cooled_down(last_accepted_sec: Option<f64>, now_sec: f64, cooldown_sec: f64) -> bool {
    match last_accepted_sec {
        Some(last) => now_sec - last > cooldown_sec,
        None => true,
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FingerState {
    extended: bool,
    last_tip_y: Option<f32>,
}

impl FingerState {
    /// Record an observation. Returns the note velocity on a
    /// retracted -> extended transition.
    pub fn observe(&mut self, extended: bool, tip_y: f32, config: &GestureConfig) -> Option<f32> {
        let velocity = note_velocity(self.last_tip_y, tip_y, config);
        self.last_tip_y = Some(tip_y);
        let rising = extended && !self.extended;
        self.extended = extended;
        rising.then_some(velocity)
    }

    pub fn is_extended(&self) -> bool {
        self.extended
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PinchState {
    pinching: bool,
    last_accepted_sec: Option<f64>,
}

impl PinchState {
    /// Returns `true` for a pinch onset outside the cooldown window.
    pub fn observe(&mut self, pinching: bool, now_sec: f64, cooldown_sec: f64) -> bool {
        let onset = pinching && !self.pinching;
        self.pinching = pinching;
        if !onset {
            return false;
        }
        if !cooled_down(self.last_accepted_sec, now_sec, cooldown_sec) {
            log::debug!("[gesture] pinch ignored, cooling down");
            return false;
        }
        self.last_accepted_sec = Some(now_sec);
        true
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TapState {
    last_distance: Option<f32>,
    last_accepted_sec: Option<f64>,
}

impl TapState {
    /// Feed the current edge distance. A tap needs the hands close, closing
    /// fast since the previous frame, and the global cooldown elapsed.
    pub fn observe(&mut self, distance: f32, now_sec: f64, config: &GestureConfig) -> bool {
        let accepted = match self.last_distance {
            Some(prev) => {
                let closing_speed = prev - distance;
                distance < config.tap_distance
                    && closing_speed > config.tap_min_speed
                    && cooled_down(self.last_accepted_sec, now_sec, config.tap_cooldown_sec)
            }
            None => false,
        };
        if accepted {
            self.last_accepted_sec = Some(now_sec);
        }
        self.last_distance = Some(distance);
        accepted
    }
}
