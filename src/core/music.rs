use crate::error::{EngineError, Result};
use crate::events::PinchDirection;

/// Major scale over one octave, root repeated at the top so eight fingers
/// each get a degree.
pub const MAJOR: &[i32] = &[0, 2, 4, 5, 7, 9, 11, 12];

/// Pitch-class names, enharmonic spellings for the black keys.
pub const NOTE_NAMES: [&str; 12] = [
    "C", "C# / Db", "D", "D# / Eb", "E", "F", "F# / Gb", "G", "G# / Ab", "A", "A# / Bb", "B",
];

/// Convert a MIDI note number to Hertz (A4=440 Hz).
///
/// Monotonic and exhibits octave symmetry: +12 semitones doubles the frequency.
pub fn midi_to_hz(midi: f32) -> f32 {
    440.0 * (2.0_f32).powf((midi - 69.0) / 12.0)
}

/// Name of the pitch class of a MIDI note, e.g. `61 -> "C# / Db"`.
#[inline]
pub fn note_name(midi: i32) -> &'static str {
    NOTE_NAMES[midi.rem_euclid(12) as usize]
}

/// Root note plus interval pattern, with the frequency of every degree
/// precomputed.
///
/// `intervals` is non-empty and strictly increasing, so `frequencies` is
/// strictly increasing and always the same length.
#[derive(Clone, Debug, PartialEq)]
pub struct Scale {
    root_midi: i32,
    intervals: Vec<i32>,
    frequencies: Vec<f32>,
}

impl Scale {
    pub fn new(root_midi: i32, intervals: Vec<i32>) -> Result<Self> {
        if intervals.is_empty() {
            return Err(EngineError::InvalidScale("interval list is empty".into()));
        }
        if intervals.windows(2).any(|w| w[0] >= w[1]) {
            return Err(EngineError::InvalidScale(format!(
                "intervals must be strictly increasing, got {intervals:?}"
            )));
        }
        let frequencies = Self::build(root_midi, &intervals)?;
        Ok(Self {
            root_midi,
            intervals,
            frequencies,
        })
    }

    /// Degree frequencies for `root_midi`. Every pitch must fit in `i32`
    /// and the resulting frequencies must be finite and strictly increasing.
    fn build(root_midi: i32, intervals: &[i32]) -> Result<Vec<f32>> {
        let mut frequencies = Vec::with_capacity(intervals.len());
        for &interval in intervals {
            let midi = root_midi.checked_add(interval).ok_or_else(|| {
                EngineError::InvalidScale(format!("root {root_midi} + interval {interval} overflows"))
            })?;
            let hz = midi_to_hz(midi as f32);
            if !hz.is_finite() {
                return Err(EngineError::InvalidScale(format!(
                    "MIDI note {midi} has no finite frequency"
                )));
            }
            if frequencies.last().is_some_and(|prev| *prev >= hz) {
                return Err(EngineError::InvalidScale(format!(
                    "frequencies stop increasing at MIDI note {midi}"
                )));
            }
            frequencies.push(hz);
        }
        Ok(frequencies)
    }

    /// Move the root and recompute every degree from it. On error the scale
    /// is unchanged.
    pub fn set_root(&mut self, root_midi: i32) -> Result<()> {
        self.frequencies = Self::build(root_midi, &self.intervals)?;
        self.root_midi = root_midi;
        Ok(())
    }

    pub fn root_midi(&self) -> i32 {
        self.root_midi
    }

    pub fn root_name(&self) -> &'static str {
        note_name(self.root_midi)
    }

    pub fn intervals(&self) -> &[i32] {
        &self.intervals
    }

    pub fn frequencies(&self) -> &[f32] {
        &self.frequencies
    }

    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// Frequency of degree `i`, `None` past the last degree.
    #[inline]
    pub fn frequency_for_degree(&self, degree: usize) -> Option<f32> {
        self.frequencies.get(degree).copied()
    }
}

/// Owns the playable scale and transposes it one semitone per accepted pinch.
///
/// The root is clamped to `[min_root, max_root]`; a pinch that would leave the
/// range is a no-op.
#[derive(Clone, Debug)]
pub struct ScaleController {
    scale: Scale,
    min_root: i32,
    max_root: i32,
}

impl ScaleController {
    pub fn new(scale: Scale, min_root: i32, max_root: i32) -> Self {
        Self {
            scale,
            min_root,
            max_root,
        }
    }

    /// Apply a pinch. Returns `true` if the root moved.
    pub fn shift(&mut self, direction: PinchDirection) -> bool {
        let root = self.scale.root_midi();
        let next = match root.checked_add(direction.semitones()) {
            Some(next) if (self.min_root..=self.max_root).contains(&next) => next,
            _ => {
                log::debug!("[scale] root {root} already at limit");
                return false;
            }
        };
        if let Err(err) = self.scale.set_root(next) {
            log::debug!("[scale] root {root} kept: {err}");
            return false;
        }
        true
    }

    pub fn scale(&self) -> &Scale {
        &self.scale
    }

    pub fn frequency_for_degree(&self, degree: usize) -> Option<f32> {
        self.scale.frequency_for_degree(degree)
    }
}
