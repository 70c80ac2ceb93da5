//! Landmark frame sources for the gesture thread.
//!
//! The vision process is external. `--stdin` reads its snapshots as JSON
//! lines; without it a scripted pair of hands plays scales so the audio path
//! can be heard without a camera.

use handpiano::landmarks::{RawFrame, RawHand};
use handpiano::{EngineContext, Hand};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

const FRAME_INTERVAL: Duration = Duration::from_millis(33);
const SCRIPT_PERIOD_SEC: f64 = 8.0;
const JITTER: f32 = 0.002;

pub enum FrameSource {
    Simulated(SimulatedHands),
    Stdin(StdinFrames),
}

impl Iterator for FrameSource {
    type Item = RawFrame;

    fn next(&mut self) -> Option<RawFrame> {
        match self {
            FrameSource::Simulated(s) => s.next(),
            FrameSource::Stdin(s) => s.next(),
        }
    }
}

/// One JSON `RawFrame` per line. Frames are restamped on arrival with the
/// engine clock so voice ages match what the renderer sees.
///
/// Holds the `Stdin` handle rather than a lock so the source can move to
/// the gesture thread.
pub struct StdinFrames {
    context: Arc<EngineContext>,
    stdin: std::io::Stdin,
    line: String,
}

impl StdinFrames {
    pub fn new(context: Arc<EngineContext>) -> Self {
        Self {
            context,
            stdin: std::io::stdin(),
            line: String::new(),
        }
    }
}

impl Iterator for StdinFrames {
    type Item = RawFrame;

    fn next(&mut self) -> Option<RawFrame> {
        loop {
            self.line.clear();
            match self.stdin.read_line(&mut self.line) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(err) => {
                    log::error!("[source] stdin: {err}");
                    return None;
                }
            }
            if self.line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<RawFrame>(&self.line) {
                Ok(mut frame) => {
                    frame.timestamp_sec = self.context.now_sec();
                    return Some(frame);
                }
                Err(err) => log::warn!("[source] skipping malformed frame: {err}"),
            }
        }
    }
}

/// Two hands following a fixed script at about 30 frames per second:
/// each finger lifts in turn, the right hand pinches once, then the hands
/// knock together.
pub struct SimulatedHands {
    context: Arc<EngineContext>,
    rng: StdRng,
    first: bool,
}

impl SimulatedHands {
    pub fn new(context: Arc<EngineContext>) -> Self {
        Self {
            context,
            rng: StdRng::seed_from_u64(42),
            first: true,
        }
    }

    fn hand(&mut self, hand: Hand, t: f64) -> RawHand {
        // finger k of the eight lifts during [k * 0.5, k * 0.5 + 0.3)
        let lifted = |slot: usize| {
            let start = slot as f64 * 0.5;
            (start..start + 0.3).contains(&t)
        };
        let knock = (6.5..6.7).contains(&t);
        let cx = match (hand, knock) {
            (Hand::Left, false) => 0.3,
            (Hand::Left, true) => 0.45,
            (Hand::Right, false) => 0.7,
            (Hand::Right, true) => 0.55,
        };
        let pinch = hand == Hand::Right && (5.0..5.3).contains(&t);
        // pinky faces the other hand
        let side = match hand {
            Hand::Left => 1.0,
            Hand::Right => -1.0,
        };

        let mut points = [[0.0f32; 3]; 21];
        points[0] = [cx, 0.9, 0.0];
        // (tip index, x offset toward the pinky, degree slot)
        let fingers = match hand {
            Hand::Left => [(8, -0.04, 3), (12, -0.01, 2), (16, 0.02, 1), (20, 0.05, 0)],
            Hand::Right => [(8, -0.04, 4), (12, -0.01, 5), (16, 0.02, 6), (20, 0.05, 7)],
        };
        for (tip, offset, slot) in fingers {
            let ys = if lifted(slot) {
                [0.6, 0.5, 0.45, 0.4]
            } else {
                [0.6, 0.55, 0.6, 0.65]
            };
            for (k, y) in ys.into_iter().enumerate() {
                points[tip - 3 + k] = [cx + side * offset, y, 0.0];
            }
        }
        for (k, y) in [0.85, 0.8, 0.78, 0.75].into_iter().enumerate() {
            points[1 + k] = [cx - side * 0.12, y, 0.0];
        }
        if pinch {
            points[4] = [points[8][0] + 0.01, points[8][1], 0.0];
        }

        for p in points.iter_mut() {
            p[0] += self.rng.gen_range(-JITTER..JITTER);
            p[1] += self.rng.gen_range(-JITTER..JITTER);
        }
        RawHand {
            label: format!("{hand:?}"),
            points: points.to_vec(),
        }
    }
}

impl Iterator for SimulatedHands {
    type Item = RawFrame;

    fn next(&mut self) -> Option<RawFrame> {
        if !self.first {
            thread::sleep(FRAME_INTERVAL);
        }
        self.first = false;
        let now = self.context.now_sec();
        let t = now % SCRIPT_PERIOD_SEC;
        let hands = vec![self.hand(Hand::Left, t), self.hand(Hand::Right, t)];
        Some(RawFrame {
            timestamp_sec: now,
            hands,
            face: None,
        })
    }
}
