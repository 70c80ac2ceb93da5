//! Landmark frames: the external snapshot format and its engine-side form.
//!
//! [`adapt`] is a pure transform from [`RawFrame`] (whatever the vision
//! process sends) to [`LandmarkFrame`]. Hands or faces with too few points,
//! unknown labels or non-finite coordinates are dropped, which downstream
//! reads as "not observed this frame".

use crate::constants::{
    FACE_LANDMARK_COUNT, HAND_LANDMARK_COUNT, LEFT_EAR, LEFT_EYE_LOWER, LEFT_EYE_UPPER, RIGHT_EAR,
    RIGHT_EYE_LOWER, RIGHT_EYE_UPPER,
};
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hand {
    Left,
    Right,
}

impl Hand {
    pub const ALL: [Hand; 2] = [Hand::Left, Hand::Right];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Hand::Left => 0,
            Hand::Right => 1,
        }
    }

    #[inline]
    pub fn opposite(self) -> Hand {
        match self {
            Hand::Left => Hand::Right,
            Hand::Right => Hand::Left,
        }
    }

    /// Accepts the tracker's labels ("Left"/"Right") in any case.
    pub fn from_label(label: &str) -> Option<Hand> {
        if label.eq_ignore_ascii_case("left") {
            Some(Hand::Left)
        } else if label.eq_ignore_ascii_case("right") {
            Some(Hand::Right)
        } else {
            None
        }
    }
}

// ---------------- External format ----------------

/// One vision-cycle snapshot as produced by the tracking collaborator.
///
/// Coordinates are normalized image space: x and y in [0,1] with y growing
/// downward, z relative depth.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawFrame {
    pub timestamp_sec: f64,
    #[serde(default)]
    pub hands: Vec<RawHand>,
    #[serde(default)]
    pub face: Option<RawFace>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawHand {
    pub label: String,
    pub points: Vec<[f32; 3]>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawFace {
    pub points: Vec<[f32; 3]>,
}

// ---------------- Engine format ----------------

#[derive(Clone, Debug, PartialEq)]
pub struct HandLandmarks {
    pub hand: Hand,
    points: [Vec3; HAND_LANDMARK_COUNT],
}

impl HandLandmarks {
    pub fn new(hand: Hand, points: [Vec3; HAND_LANDMARK_COUNT]) -> Self {
        Self { hand, points }
    }

    /// Landmark `i`; indices come from [`crate::constants`] and are < 21.
    #[inline]
    pub fn point(&self, i: usize) -> Vec3 {
        self.points[i]
    }

    /// Landmark `i` projected onto the image plane.
    #[inline]
    pub fn point_xy(&self, i: usize) -> Vec2 {
        self.points[i].truncate()
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FaceLandmarks {
    points: Vec<Vec3>,
}

impl FaceLandmarks {
    /// `None` if the mesh is shorter than the face model.
    pub fn new(points: Vec<Vec3>) -> Option<Self> {
        (points.len() >= FACE_LANDMARK_COUNT).then_some(Self { points })
    }

    #[inline]
    pub fn point(&self, i: usize) -> Vec3 {
        self.points[i]
    }

    /// Exchange the left and right eye and ear landmarks.
    fn swap_sides(mut self) -> Self {
        for (left, right) in [
            (LEFT_EYE_UPPER, RIGHT_EYE_UPPER),
            (LEFT_EYE_LOWER, RIGHT_EYE_LOWER),
            (LEFT_EAR, RIGHT_EAR),
        ] {
            self.points.swap(left, right);
        }
        self
    }
}

/// Adapted frame: at most one hand per label, optional face.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LandmarkFrame {
    pub timestamp_sec: f64,
    pub hands: SmallVec<[HandLandmarks; 2]>,
    pub face: Option<FaceLandmarks>,
}

impl LandmarkFrame {
    pub fn new(timestamp_sec: f64) -> Self {
        Self {
            timestamp_sec,
            ..Default::default()
        }
    }

    pub fn with_hand(mut self, hand: HandLandmarks) -> Self {
        if self.hand(hand.hand).is_none() {
            self.hands.push(hand);
        }
        self
    }

    pub fn with_face(mut self, face: FaceLandmarks) -> Self {
        self.face = Some(face);
        self
    }

    /// Look a hand up by label; detection order is irrelevant.
    pub fn hand(&self, hand: Hand) -> Option<&HandLandmarks> {
        self.hands.iter().find(|h| h.hand == hand)
    }

    pub fn is_empty(&self) -> bool {
        self.hands.is_empty() && self.face.is_none()
    }
}

/// Normalize a raw snapshot. With `mirror`, x becomes `1 - x` and left/right
/// identities swap for hands, eyes and ears alike, matching a horizontally
/// flipped camera image. Blink sides and the tilt sign follow the hands.
pub fn adapt(raw: &RawFrame, mirror: bool) -> LandmarkFrame {
    let mut frame = LandmarkFrame::new(raw.timestamp_sec);
    if !raw.timestamp_sec.is_finite() {
        return frame;
    }

    for raw_hand in &raw.hands {
        let Some(mut hand) = Hand::from_label(&raw_hand.label) else {
            continue;
        };
        if mirror {
            hand = hand.opposite();
        }
        if frame.hand(hand).is_some() || raw_hand.points.len() < HAND_LANDMARK_COUNT {
            continue;
        }
        let mut points = [Vec3::ZERO; HAND_LANDMARK_COUNT];
        let mut valid = true;
        for (dst, src) in points.iter_mut().zip(&raw_hand.points) {
            match to_point(*src, mirror) {
                Some(p) => *dst = p,
                None => {
                    valid = false;
                    break;
                }
            }
        }
        if valid {
            frame.hands.push(HandLandmarks::new(hand, points));
        }
    }

    if let Some(raw_face) = &raw.face {
        let points: Option<Vec<Vec3>> = raw_face
            .points
            .iter()
            .map(|p| to_point(*p, mirror))
            .collect();
        frame.face = points
            .and_then(FaceLandmarks::new)
            .map(|face| if mirror { face.swap_sides() } else { face });
    }

    frame
}

#[inline]
fn to_point([x, y, z]: [f32; 3], mirror: bool) -> Option<Vec3> {
    let p = Vec3::new(if mirror { 1.0 - x } else { x }, y, z);
    p.is_finite().then_some(p)
}
