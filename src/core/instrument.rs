/// Waveform palette, in the order taps cycle through it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Instrument {
    #[default]
    Sine,
    Saw,
    Square,
    Pluck,
}

impl Instrument {
    pub const PALETTE: [Instrument; 4] = [
        Instrument::Sine,
        Instrument::Saw,
        Instrument::Square,
        Instrument::Pluck,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Instrument::Sine => "sine",
            Instrument::Saw => "saw",
            Instrument::Square => "square",
            Instrument::Pluck => "pluck",
        }
    }
}

/// Index into [`Instrument::PALETTE`]; a tap advances it, wrapping at the end.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InstrumentSelector {
    index: usize,
}

impl InstrumentSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self) -> Instrument {
        self.index = (self.index + 1) % Instrument::PALETTE.len();
        self.current()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> Instrument {
        Instrument::PALETTE[self.index]
    }
}
