// Block rendering: determinism, phase, mixing and sanitizing.

use handpiano::config::{AudioConfig, EngineConfig};
use handpiano::engine::EngineState;
use handpiano::{AudioRenderer, Engine, Instrument, Scale, VoicePool};

const SR: u32 = 44_100;

fn state_with(voices: &[(f32, f64, f32)], instrument: Instrument) -> EngineState {
    let mut pool = VoicePool::new(1.5);
    for &(f, start, vel) in voices {
        pool.add_voice(f, start, vel);
    }
    EngineState {
        voices: pool,
        instrument,
        scale: Scale::new(60, handpiano::core::MAJOR.to_vec()).unwrap(),
        tilt: 0.0,
        blinks: [0; 2],
    }
}

fn renderer() -> AudioRenderer {
    Engine::new(EngineConfig::default()).unwrap().renderer()
}

fn renderer_with(audio: AudioConfig) -> AudioRenderer {
    let config = EngineConfig {
        audio,
        ..EngineConfig::default()
    };
    Engine::new(config).unwrap().renderer()
}

#[test]
fn empty_state_renders_silence_and_advances_phase() {
    let mut r = renderer();
    let state = state_with(&[], Instrument::Sine);
    let mut out = vec![1.0f32; 512 * 2];
    r.render_state(&state, &mut out, 2, 0.0);
    assert!(out.iter().all(|s| *s == 0.0));
    assert_eq!(r.phase(), 512);
}

#[test]
fn same_state_and_phase_give_identical_blocks() {
    let state = state_with(&[(440.0, 0.0, 0.9), (554.37, 0.05, 0.6)], Instrument::Saw);
    let mut a = renderer();
    let mut b = renderer();
    a.set_phase(1234);
    b.set_phase(1234);
    let mut out_a = vec![0.0f32; 256];
    let mut out_b = vec![0.0f32; 256];
    a.render_state(&state, &mut out_a, 1, 0.1);
    b.render_state(&state, &mut out_b, 1, 0.1);
    assert_eq!(out_a, out_b);
    assert!(out_a.iter().any(|s| *s != 0.0));
}

#[test]
fn phase_wraps_at_sample_rate() {
    let mut r = renderer();
    let state = state_with(&[], Instrument::Sine);
    r.set_phase(SR as u64 - 100);
    let mut out = vec![0.0f32; 300];
    r.render_state(&state, &mut out, 1, 0.0);
    assert_eq!(r.phase(), 200);
    r.set_phase(SR as u64 * 3 + 7);
    assert_eq!(r.phase(), 7);
}

#[test]
fn single_sine_voice_matches_closed_form() {
    let mut r = renderer();
    let state = state_with(&[(441.0, 0.0, 1.0)], Instrument::Sine);
    let mut out = vec![0.0f32; 64];
    r.render_state(&state, &mut out, 1, 0.0);
    for (i, s) in out.iter().enumerate() {
        let t = i as f64 / SR as f64;
        let expected = (std::f64::consts::TAU * 441.0 * t).sin() as f32 * 0.3;
        assert!((s - expected).abs() < 1e-5, "sample {i}: {s} vs {expected}");
    }
}

#[test]
fn channels_carry_the_same_signal() {
    let mut r = renderer();
    let state = state_with(&[(330.0, 0.0, 1.0)], Instrument::Square);
    let mut out = vec![0.0f32; 128 * 2];
    r.render_state(&state, &mut out, 2, 0.2);
    for frame in out.chunks_exact(2) {
        assert_eq!(frame[0], frame[1]);
    }
}

#[test]
fn invalid_voices_are_skipped() {
    let mut r = renderer();
    let bad = state_with(
        &[(f32::NAN, 0.0, 1.0), (0.0, 0.0, 1.0), (-220.0, 0.0, 1.0)],
        Instrument::Sine,
    );
    let mut out = vec![0.5f32; 128];
    r.render_state(&bad, &mut out, 1, 0.0);
    assert!(out.iter().all(|s| *s == 0.0));
}

#[test]
fn dense_mix_is_clamped() {
    let mut r = renderer_with(AudioConfig {
        master_gain: 1.0,
        ..AudioConfig::default()
    });
    let voices: Vec<_> = (0..32).map(|_| (220.0, 0.0, 1.0)).collect();
    let state = state_with(&voices, Instrument::Square);
    let mut out = vec![0.0f32; 512];
    r.render_state(&state, &mut out, 1, 0.0);
    assert!(out.iter().all(|s| (-1.0..=1.0).contains(s)));
    assert!(out.iter().any(|s| *s == 1.0));
}

#[test]
fn expired_voices_do_not_sound() {
    let mut r = renderer();
    let state = state_with(&[(440.0, 0.0, 1.0)], Instrument::Sine);
    let mut out = vec![0.0f32; 128];
    r.render_state(&state, &mut out, 1, 1.6);
    assert!(out.iter().all(|s| *s == 0.0));
}

#[test]
fn pluck_decays_faster_than_sine() {
    let sine = state_with(&[(440.0, 0.0, 1.0)], Instrument::Sine);
    let pluck = state_with(&[(440.0, 0.0, 1.0)], Instrument::Pluck);
    let energy = |state: &EngineState| {
        let mut r = renderer();
        let mut out = vec![0.0f32; 1024];
        r.render_state(state, &mut out, 1, 0.5);
        out.iter().map(|s| s * s).sum::<f32>()
    };
    assert!(energy(&pluck) < energy(&sine));
}
