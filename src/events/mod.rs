//! Gesture events and the tracker that derives them from landmark frames.

pub mod face;
pub mod hands;
pub mod tracker;

pub use tracker::{GestureStateTracker, GestureStream};

use crate::constants::{INDEX_TIP, MIDDLE_TIP, PINKY_TIP, RING_TIP};
use crate::landmarks::Hand;
use serde::Serialize;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Finger {
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    #[inline]
    pub const fn tip(self) -> usize {
        match self {
            Finger::Index => INDEX_TIP,
            Finger::Middle => MIDDLE_TIP,
            Finger::Ring => RING_TIP,
            Finger::Pinky => PINKY_TIP,
        }
    }
}

/// One of the eight note-playing fingers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FingerSlot {
    pub hand: Hand,
    pub finger: Finger,
}

const fn slot(hand: Hand, finger: Finger) -> FingerSlot {
    FingerSlot { hand, finger }
}

/// Slot order doubles as scale-degree order: left pinky plays the lowest
/// degree, right pinky the highest.
pub const FINGER_SLOTS: [FingerSlot; 8] = [
    slot(Hand::Left, Finger::Pinky),
    slot(Hand::Left, Finger::Ring),
    slot(Hand::Left, Finger::Middle),
    slot(Hand::Left, Finger::Index),
    slot(Hand::Right, Finger::Index),
    slot(Hand::Right, Finger::Middle),
    slot(Hand::Right, Finger::Ring),
    slot(Hand::Right, Finger::Pinky),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum PinchDirection {
    Up,
    Down,
}

impl PinchDirection {
    /// Right hand raises the root, left hand lowers it.
    #[inline]
    pub fn for_hand(hand: Hand) -> Self {
        match hand {
            Hand::Right => PinchDirection::Up,
            Hand::Left => PinchDirection::Down,
        }
    }

    #[inline]
    pub fn semitones(self) -> i32 {
        match self {
            PinchDirection::Up => 1,
            PinchDirection::Down => -1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Eye {
    Left,
    Right,
}

impl Eye {
    pub const ALL: [Eye; 2] = [Eye::Left, Eye::Right];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Eye::Left => 0,
            Eye::Right => 1,
        }
    }
}

/// A discrete musical gesture. Timestamps are the capture time of the frame
/// the gesture was detected in.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum GestureEvent {
    NoteOn {
        hand: Hand,
        finger: Finger,
        degree: usize,
        velocity: f32,
        timestamp_sec: f64,
    },
    PinchShift {
        hand: Hand,
        direction: PinchDirection,
        timestamp_sec: f64,
    },
    TapSwitch {
        timestamp_sec: f64,
    },
    Blink {
        eye: Eye,
        timestamp_sec: f64,
    },
    TiltUpdate {
        angle: f32,
        timestamp_sec: f64,
    },
}

impl GestureEvent {
    pub fn timestamp_sec(&self) -> f64 {
        match *self {
            GestureEvent::NoteOn { timestamp_sec, .. }
            | GestureEvent::PinchShift { timestamp_sec, .. }
            | GestureEvent::TapSwitch { timestamp_sec }
            | GestureEvent::Blink { timestamp_sec, .. }
            | GestureEvent::TiltUpdate { timestamp_sec, .. } => timestamp_sec,
        }
    }
}

/// Events from a single frame; eight notes plus a pinch fit inline.
pub type GestureEvents = SmallVec<[GestureEvent; 8]>;
