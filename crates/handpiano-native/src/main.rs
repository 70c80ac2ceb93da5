mod output;
mod source;

use anyhow::Context;
use handpiano::{Engine, EngineConfig, EngineContext};
use source::{FrameSource, SimulatedHands, StdinFrames};
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

const HUD_INTERVAL_SEC: f64 = 1.0;

struct Args {
    config: Option<PathBuf>,
    stdin: bool,
    seconds: Option<f64>,
}

fn parse_args() -> anyhow::Result<Args> {
    let args: Vec<String> = std::env::args().collect();
    let value_of = |flag: &str| {
        args.iter()
            .position(|a| a == flag)
            .and_then(|i| args.get(i + 1).cloned())
    };
    let seconds = match value_of("--seconds") {
        Some(s) => Some(s.parse().with_context(|| format!("--seconds {s:?}"))?),
        None => None,
    };
    Ok(Args {
        config: value_of("--config").map(PathBuf::from),
        stdin: args.iter().any(|a| a == "--stdin"),
        seconds,
    })
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = parse_args()?;
    let mut config = match &args.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };

    let device = output::OutputDevice::open_default()?;
    if device.sample_rate() != config.audio.sample_rate {
        log::info!(
            "[audio] using device rate {} Hz instead of {} Hz",
            device.sample_rate(),
            config.audio.sample_rate
        );
        config.audio.sample_rate = device.sample_rate();
    }

    let engine = Engine::new(config)?;
    let context = engine.context();
    let output = device.start(engine.renderer())?;

    let source = if args.stdin {
        log::info!("[source] reading JSON frames from stdin");
        FrameSource::Stdin(StdinFrames::new(Arc::clone(&context)))
    } else {
        log::info!("[source] simulated hands");
        FrameSource::Simulated(SimulatedHands::new(Arc::clone(&context)))
    };

    let gesture = thread::Builder::new()
        .name("gesture".into())
        .spawn(move || run_gestures(engine, source, args.seconds))
        .context("spawning gesture thread")?;

    if gesture.join().is_err() {
        log::error!("gesture thread panicked");
    }
    // let the last voices ring out
    thread::sleep(Duration::from_millis(300));
    output.stop()?;
    Ok(())
}

/// Gesture thread: the only writer of engine state.
fn run_gestures(mut engine: Engine, source: FrameSource, seconds: Option<f64>) {
    let context = engine.context();
    let mut next_hud = 0.0;
    for frame in source {
        engine.process_raw(&frame);
        let now = context.now_sec();
        if now >= next_hud {
            log_hud(&context);
            next_hud = now + HUD_INTERVAL_SEC;
        }
        if seconds.is_some_and(|limit| now >= limit) {
            break;
        }
    }
    engine.tick(context.now_sec());
    log::info!("[gesture] source finished");
}

fn log_hud(context: &EngineContext) {
    let state = context.load();
    log::info!(
        "[hud] root={} instrument={} voices={} tilt={:+.3}",
        state.scale.root_name(),
        state.instrument.name(),
        state.voices.snapshot_alive(context.now_sec()).count(),
        state.tilt
    );
}
