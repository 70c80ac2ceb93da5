// Synthetic landmark builders shared by the integration tests.
#![allow(dead_code)]

use glam::Vec3;
use handpiano::constants::*;
use handpiano::events::Finger;
use handpiano::landmarks::{FaceLandmarks, HandLandmarks, LandmarkFrame, RawFace, RawHand};
use handpiano::Hand;

const FINGERS: [Finger; 4] = [Finger::Index, Finger::Middle, Finger::Ring, Finger::Pinky];

/// A hand held palm-to-camera. Pinky sits on the side facing the other hand
/// so that moving the hands together closes the pinky-base gap.
#[derive(Clone, Copy, Debug)]
pub struct Pose {
    pub hand: Hand,
    pub cx: f32,
    pub extended: [bool; 4],
    pub pinch: bool,
    pub lift: f32,
}

pub fn pose(hand: Hand) -> Pose {
    Pose {
        hand,
        cx: match hand {
            Hand::Left => 0.3,
            Hand::Right => 0.7,
        },
        extended: [false; 4],
        pinch: false,
        lift: 0.0,
    }
}

impl Pose {
    pub fn extend(mut self, finger: Finger) -> Self {
        self.extended[finger_slot(finger)] = true;
        self
    }

    pub fn retract(mut self, finger: Finger) -> Self {
        self.extended[finger_slot(finger)] = false;
        self
    }

    pub fn pinching(mut self) -> Self {
        self.pinch = true;
        self
    }

    pub fn at(mut self, cx: f32) -> Self {
        self.cx = cx;
        self
    }

    /// Raise the whole hand by `lift` (normalized units, y grows downward).
    pub fn lifted(mut self, lift: f32) -> Self {
        self.lift = lift;
        self
    }

    fn pinky_side(&self) -> f32 {
        match self.hand {
            Hand::Left => 1.0,
            Hand::Right => -1.0,
        }
    }

    pub fn points(&self) -> [Vec3; HAND_LANDMARK_COUNT] {
        let side = self.pinky_side();
        let y = |v: f32| v - self.lift;
        let mut p = [Vec3::ZERO; HAND_LANDMARK_COUNT];
        p[0] = Vec3::new(self.cx, y(0.9), 0.0);

        for finger in FINGERS {
            let offset = match finger {
                Finger::Index => -0.04,
                Finger::Middle => -0.01,
                Finger::Ring => 0.02,
                Finger::Pinky => 0.05,
            };
            let x = self.cx + side * offset;
            let tip = finger.tip();
            let ys = if self.extended[finger_slot(finger)] {
                [0.6, 0.5, 0.45, 0.4]
            } else {
                [0.6, 0.55, 0.6, 0.65]
            };
            for (k, fy) in ys.iter().enumerate() {
                p[tip - 3 + k] = Vec3::new(x, y(*fy), 0.0);
            }
        }

        let thumb_x = self.cx - side * 0.12;
        for (k, fy) in [0.85, 0.8, 0.78, 0.75].iter().enumerate() {
            p[1 + k] = Vec3::new(thumb_x, y(*fy), 0.0);
        }
        if self.pinch {
            p[THUMB_TIP] = p[INDEX_TIP] + Vec3::new(0.01, 0.0, 0.0);
        }
        p
    }

    pub fn landmarks(&self) -> HandLandmarks {
        HandLandmarks::new(self.hand, self.points())
    }

    pub fn raw(&self) -> RawHand {
        RawHand {
            label: format!("{:?}", self.hand),
            points: self.points().iter().map(|v| v.to_array()).collect(),
        }
    }
}

fn finger_slot(finger: Finger) -> usize {
    FINGERS.iter().position(|f| *f == finger).unwrap()
}

pub fn frame(t: f64, poses: &[Pose]) -> LandmarkFrame {
    poses
        .iter()
        .fold(LandmarkFrame::new(t), |f, p| f.with_hand(p.landmarks()))
}

/// Face mesh with the given eyelid gaps and ear offset; everything else at
/// the image centre.
pub fn face_points(left_gap: f32, right_gap: f32, tilt: f32) -> Vec<Vec3> {
    let mut p = vec![Vec3::new(0.5, 0.5, 0.0); FACE_LANDMARK_COUNT];
    p[LEFT_EYE_UPPER] = Vec3::new(0.55, 0.45, 0.0);
    p[LEFT_EYE_LOWER] = Vec3::new(0.55, 0.45 + left_gap, 0.0);
    p[RIGHT_EYE_UPPER] = Vec3::new(0.45, 0.45, 0.0);
    p[RIGHT_EYE_LOWER] = Vec3::new(0.45, 0.45 + right_gap, 0.0);
    p[LEFT_EAR] = Vec3::new(0.65, 0.5 + tilt / 2.0, 0.0);
    p[RIGHT_EAR] = Vec3::new(0.35, 0.5 - tilt / 2.0, 0.0);
    p
}

pub fn face(left_gap: f32, right_gap: f32, tilt: f32) -> FaceLandmarks {
    FaceLandmarks::new(face_points(left_gap, right_gap, tilt)).unwrap()
}

pub fn raw_face(left_gap: f32, right_gap: f32, tilt: f32) -> RawFace {
    RawFace {
        points: face_points(left_gap, right_gap, tilt)
            .iter()
            .map(|v| v.to_array())
            .collect(),
    }
}
