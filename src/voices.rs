//! The set of currently sounding notes.

/// One note instance: pitch baked in at creation, decays independently.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Voice {
    pub frequency_hz: f32,
    pub start_sec: f64,
    pub velocity: f32,
}

impl Voice {
    /// Seconds since onset, never negative.
    #[inline]
    pub fn age(&self, now_sec: f64) -> f64 {
        (now_sec - self.start_sec).max(0.0)
    }

    #[inline]
    pub fn is_alive(&self, now_sec: f64, max_age_sec: f64) -> bool {
        now_sec - self.start_sec < max_age_sec
    }
}

/// Unordered voices with age-based expiry.
///
/// There is no count cap: every note-on adds a voice, even at a pitch that is
/// already sounding. Expired voices are filtered out of [`Self::snapshot_alive`]
/// and physically dropped by [`Self::sweep`].
#[derive(Clone, Debug, PartialEq)]
pub struct VoicePool {
    voices: Vec<Voice>,
    max_age_sec: f64,
}

impl VoicePool {
    pub fn new(max_age_sec: f64) -> Self {
        Self {
            voices: Vec::new(),
            max_age_sec,
        }
    }

    /// Velocity is clamped to [0,1]; no deduplication.
    pub fn add_voice(&mut self, frequency_hz: f32, start_sec: f64, velocity: f32) {
        self.voices.push(Voice {
            frequency_hz,
            start_sec,
            velocity: velocity.clamp(0.0, 1.0),
        });
    }

    /// Voices still alive at `now_sec`. Borrowing, allocation-free.
    pub fn snapshot_alive(&self, now_sec: f64) -> impl Iterator<Item = &Voice> + '_ {
        let max_age = self.max_age_sec;
        self.voices
            .iter()
            .filter(move |v| v.is_alive(now_sec, max_age))
    }

    /// Drop expired voices; returns how many went.
    pub fn sweep(&mut self, now_sec: f64) -> usize {
        let before = self.voices.len();
        let max_age = self.max_age_sec;
        self.voices.retain(|v| v.is_alive(now_sec, max_age));
        before - self.voices.len()
    }

    pub fn max_age_sec(&self) -> f64 {
        self.max_age_sec
    }

    /// Stored voices, including any not yet swept.
    pub fn len(&self) -> usize {
        self.voices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Voice> + '_ {
        self.voices.iter()
    }
}
