// Pitch math, scale transposition and instrument cycling.

use handpiano::core::*;
use handpiano::events::PinchDirection;
use handpiano::EngineError;

fn major_at(root: i32) -> ScaleController {
    ScaleController::new(Scale::new(root, MAJOR.to_vec()).unwrap(), 0, 127)
}

#[test]
fn midi_to_hz_matches_a4_and_octave() {
    let a4 = midi_to_hz(69.0);
    assert!((a4 - 440.0).abs() < 1e-4);
    let a5 = midi_to_hz(81.0);
    assert!((a5 - 880.0).abs() < 1e-3);
    assert!((a5 / a4 - 2.0).abs() < 1e-4);
}

#[test]
fn midi_to_hz_is_monotonic_over_range() {
    let mut prev = midi_to_hz(0.0);
    for m in 1..=127 {
        let f = midi_to_hz(m as f32);
        assert!(f > prev, "frequency not increasing at midi {m}");
        prev = f;
    }
}

#[test]
fn midi_to_hz_octave_doubling_property() {
    for midi in 20..100 {
        let freq1 = midi_to_hz(midi as f32);
        let freq2 = midi_to_hz((midi + 12) as f32);
        let ratio = freq2 / freq1;
        assert!(
            (ratio - 2.0).abs() < 1e-5,
            "Octave doubling failed for MIDI {midi}: {freq1} -> {freq2} (ratio: {ratio})"
        );
    }
}

#[test]
fn note_names_wrap_by_octave() {
    assert_eq!(note_name(60), "C");
    assert_eq!(note_name(61), "C# / Db");
    assert_eq!(note_name(69), "A");
    assert_eq!(note_name(71 + 12), "B");
    assert_eq!(note_name(-1), "B");
}

#[test]
fn scale_rejects_bad_intervals() {
    assert!(matches!(
        Scale::new(60, vec![]),
        Err(EngineError::InvalidScale(_))
    ));
    assert!(matches!(
        Scale::new(60, vec![0, 4, 4, 7]),
        Err(EngineError::InvalidScale(_))
    ));
    assert!(matches!(
        Scale::new(60, vec![0, 7, 4]),
        Err(EngineError::InvalidScale(_))
    ));
}

#[test]
fn default_scale_is_c_major() {
    let scale = Scale::new(60, MAJOR.to_vec()).unwrap();
    assert_eq!(scale.len(), 8);
    assert_eq!(scale.root_name(), "C");
    assert!((scale.frequencies()[0] - 261.6256).abs() < 1e-2);
    assert!((scale.frequencies()[7] - 523.2511).abs() < 1e-2);
}

#[test]
fn k_pinches_up_raise_root_by_k() {
    for k in 0..20 {
        let mut ctl = major_at(60);
        for _ in 0..k {
            assert!(ctl.shift(PinchDirection::Up));
        }
        let scale = ctl.scale();
        assert_eq!(scale.root_midi(), 60 + k);
        assert_eq!(scale.len(), MAJOR.len());
        for w in scale.frequencies().windows(2) {
            assert!(w[0] < w[1], "not strictly increasing: {w:?}");
        }
        for (f, interval) in scale.frequencies().iter().zip(MAJOR) {
            let expected = 440.0 * 2f32.powf((60 + k + interval - 69) as f32 / 12.0);
            assert!((f - expected).abs() / expected < 1e-5, "{f} vs {expected}");
        }
    }
}

#[test]
fn pinch_down_lowers_root() {
    let mut ctl = major_at(60);
    ctl.shift(PinchDirection::Down);
    ctl.shift(PinchDirection::Down);
    assert_eq!(ctl.scale().root_midi(), 58);
    assert_eq!(ctl.scale().root_name(), "A# / Bb");
}

#[test]
fn root_is_clamped_to_midi_range() {
    let mut ctl = major_at(127);
    assert!(!ctl.shift(PinchDirection::Up));
    assert_eq!(ctl.scale().root_midi(), 127);

    let mut ctl = major_at(0);
    assert!(!ctl.shift(PinchDirection::Down));
    assert_eq!(ctl.scale().root_midi(), 0);
    assert!(ctl.shift(PinchDirection::Up));
}

#[test]
fn scale_rejects_unrepresentable_pitches() {
    assert!(matches!(
        Scale::new(i32::MAX, vec![0, 1]),
        Err(EngineError::InvalidScale(_))
    ));
    assert!(matches!(
        Scale::new(60, vec![0, 5000]),
        Err(EngineError::InvalidScale(_))
    ));
}

#[test]
fn shift_stops_where_frequencies_run_out() {
    let scale = Scale::new(1400, MAJOR.to_vec()).unwrap();
    let mut ctl = ScaleController::new(scale, 0, i32::MAX);
    let moved = (0..500).filter(|_| ctl.shift(PinchDirection::Up)).count();
    assert!(moved > 0 && moved < 500, "moved {moved}");
    assert!(!ctl.shift(PinchDirection::Up));
    let freqs = ctl.scale().frequencies();
    assert!(freqs.iter().all(|f| f.is_finite()));
    for w in freqs.windows(2) {
        assert!(w[0] < w[1]);
    }
}

#[test]
fn degree_lookup_is_bounded() {
    let ctl = major_at(60);
    assert!(ctl.frequency_for_degree(7).is_some());
    assert_eq!(ctl.frequency_for_degree(8), None);
    assert_eq!(ctl.frequency_for_degree(usize::MAX), None);
}

#[test]
fn k_taps_select_k_mod_palette() {
    let m = Instrument::PALETTE.len();
    for k in 0..(3 * m + 1) {
        let mut sel = InstrumentSelector::new();
        for _ in 0..k {
            sel.advance();
        }
        assert_eq!(sel.index(), k % m);
        assert_eq!(sel.current(), Instrument::PALETTE[k % m]);
    }
}

#[test]
fn palette_order_and_names() {
    let names: Vec<_> = Instrument::PALETTE.iter().map(|i| i.name()).collect();
    assert_eq!(names, ["sine", "saw", "square", "pluck"]);
    assert_eq!(InstrumentSelector::new().current(), Instrument::Sine);
}
