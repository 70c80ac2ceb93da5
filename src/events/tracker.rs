use super::face::{self, BlinkState};
use super::hands::{self, FingerState, PinchState, TapState};
use super::{Eye, GestureEvent, GestureEvents, PinchDirection, FINGER_SLOTS};
use crate::config::GestureConfig;
use crate::landmarks::{FaceLandmarks, Hand, HandLandmarks, LandmarkFrame};

/// Turns a sequence of landmark frames into discrete gesture events.
///
/// State is per finger slot (8), per hand (pinch), global (tap) and per eye
/// (blink). A hand or face missing from a frame leaves its state untouched,
/// so a tracking dropout cannot fake a rising edge when it comes back.
///
/// Within one frame events come out in a fixed order: left-hand notes, left
/// pinch, right-hand notes, right pinch, tap, blinks, tilt.
#[derive(Clone, Debug)]
pub struct GestureStateTracker {
    config: GestureConfig,
    fingers: [FingerState; FINGER_SLOTS.len()],
    pinches: [PinchState; 2],
    tap: TapState,
    blinks: BlinkState,
}

impl GestureStateTracker {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            fingers: Default::default(),
            pinches: Default::default(),
            tap: TapState::default(),
            blinks: BlinkState::default(),
        }
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Whether the finger playing `degree` was extended at its last sighting.
    pub fn is_finger_extended(&self, degree: usize) -> bool {
        self.fingers.get(degree).is_some_and(|f| f.is_extended())
    }

    /// Process one frame. Fingers mapped to a degree `>= degree_count` are
    /// skipped entirely.
    pub fn process(&mut self, frame: &LandmarkFrame, degree_count: usize) -> GestureEvents {
        let mut events = GestureEvents::new();
        let now = frame.timestamp_sec;
        if !now.is_finite() {
            return events;
        }

        for hand in Hand::ALL {
            if let Some(landmarks) = frame.hand(hand) {
                self.track_fingers(landmarks, degree_count, now, &mut events);
                self.track_pinch(landmarks, now, &mut events);
            }
        }

        if let (Some(left), Some(right)) = (frame.hand(Hand::Left), frame.hand(Hand::Right)) {
            let distance = hands::edge_distance(left, right);
            if self.tap.observe(distance, now, &self.config) {
                events.push(GestureEvent::TapSwitch { timestamp_sec: now });
            }
        }

        if let Some(face) = &frame.face {
            self.track_face(face, now, &mut events);
        }

        events
    }

    /// Lazily map `frames` to the events they produce.
    pub fn events<I>(&mut self, frames: I, degree_count: usize) -> GestureStream<'_, I::IntoIter>
    where
        I: IntoIterator<Item = LandmarkFrame>,
    {
        GestureStream {
            tracker: self,
            frames: frames.into_iter(),
            degree_count,
            pending: GestureEvents::new().into_iter(),
        }
    }

    fn track_fingers(
        &mut self,
        landmarks: &HandLandmarks,
        degree_count: usize,
        now: f64,
        events: &mut GestureEvents,
    ) {
        for (degree, slot) in FINGER_SLOTS.iter().enumerate() {
            if slot.hand != landmarks.hand || degree >= degree_count {
                continue;
            }
            let extended = hands::is_extended(landmarks, slot.finger);
            let tip_y = landmarks.point(slot.finger.tip()).y;
            if let Some(velocity) = self.fingers[degree].observe(extended, tip_y, &self.config) {
                events.push(GestureEvent::NoteOn {
                    hand: slot.hand,
                    finger: slot.finger,
                    degree,
                    velocity,
                    timestamp_sec: now,
                });
            }
        }
    }

    fn track_pinch(&mut self, landmarks: &HandLandmarks, now: f64, events: &mut GestureEvents) {
        let pinching = hands::pinch_distance(landmarks) < self.config.pinch_threshold;
        let state = &mut self.pinches[landmarks.hand.index()];
        if state.observe(pinching, now, self.config.pinch_cooldown_sec) {
            events.push(GestureEvent::PinchShift {
                hand: landmarks.hand,
                direction: PinchDirection::for_hand(landmarks.hand),
                timestamp_sec: now,
            });
        }
    }

    fn track_face(&mut self, landmarks: &FaceLandmarks, now: f64, events: &mut GestureEvents) {
        for eye in Eye::ALL {
            let closed = face::eye_gap(landmarks, eye) < self.config.blink_threshold;
            if self.blinks.observe(eye, closed) {
                events.push(GestureEvent::Blink {
                    eye,
                    timestamp_sec: now,
                });
            }
        }
        events.push(GestureEvent::TiltUpdate {
            angle: face::head_tilt(landmarks),
            timestamp_sec: now,
        });
    }
}

/// Iterator returned by [`GestureStateTracker::events`]. Pulls one frame at a
/// time and yields its events before pulling the next.
pub struct GestureStream<'a, I> {
    tracker: &'a mut GestureStateTracker,
    frames: I,
    degree_count: usize,
    pending: smallvec::IntoIter<[GestureEvent; 8]>,
}

impl<I> Iterator for GestureStream<'_, I>
where
    I: Iterator<Item = LandmarkFrame>,
{
    type Item = GestureEvent;

    fn next(&mut self) -> Option<GestureEvent> {
        loop {
            if let Some(event) = self.pending.next() {
                return Some(event);
            }
            let frame = self.frames.next()?;
            self.pending = self.tracker.process(&frame, self.degree_count).into_iter();
        }
    }
}
