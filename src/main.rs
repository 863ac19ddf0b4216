//! Flapper entry point
//!
//! Parses a handful of flags, loads configuration and runs either the
//! terminal game or a headless autopilot run.

use std::io;

use anyhow::{Context, Result, bail};

use flapper::audio::{AudioBackend, AudioManager, SilentAudio};
use flapper::render::{NullRenderer, Renderer};
use flapper::sim::{GamePhase, autopilot};
use flapper::terminal::{self, TerminalRenderer};
use flapper::{GameSession, Settings, Tuning};

const USAGE: &str = "usage: flapper [--seed N] [--tuning PATH] [--settings PATH] [--demo] [--headless FRAMES]";

#[derive(Debug, Default)]
struct Args {
    seed: Option<u64>,
    tuning: Option<String>,
    settings: Option<String>,
    demo: bool,
    headless: Option<u64>,
}

fn parse_args() -> Result<Args> {
    let mut args = Args::default();
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--seed" => {
                let v = it.next().context("--seed needs a value")?;
                args.seed = Some(v.parse().with_context(|| format!("bad seed {v:?}"))?);
            }
            "--tuning" => args.tuning = Some(it.next().context("--tuning needs a path")?),
            "--settings" => args.settings = Some(it.next().context("--settings needs a path")?),
            "--demo" => args.demo = true,
            "--headless" => {
                let v = it.next().context("--headless needs a frame count")?;
                args.headless = Some(v.parse().with_context(|| format!("bad frame count {v:?}"))?);
            }
            "-h" | "--help" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            other => bail!("unknown argument {other:?}\n{USAGE}"),
        }
    }
    Ok(args)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = parse_args()?;

    let settings = match &args.settings {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let tuning = match &args.tuning {
        Some(path) => Tuning::load(path)?,
        None => Tuning::default(),
    };
    let seed = args
        .seed
        .or(settings.seed)
        .unwrap_or_else(rand::random::<u64>);

    let backend: Box<dyn AudioBackend> = if settings.sound && args.headless.is_none() {
        open_audio()
    } else {
        Box::new(SilentAudio)
    };
    let mut audio = AudioManager::new(backend);
    settings.apply_audio(&mut audio);

    if let Some(frames) = args.headless {
        return run_headless(seed, tuning, audio, frames);
    }

    log::info!("Flapper starting...");
    let renderer: Box<dyn Renderer> = Box::new(TerminalRenderer::new(io::stdout()));
    let mut session = GameSession::new(seed, tuning, audio, renderer);
    terminal::run(&mut session, settings.effective_fps(), args.demo)?;
    println!(
        "Score {}  Best {}  (seed {})",
        session.score(),
        session.best_score(),
        seed
    );
    Ok(())
}

#[cfg(feature = "sound")]
fn open_audio() -> Box<dyn AudioBackend> {
    match flapper::audio::RodioAudio::open() {
        Ok(audio) => Box::new(audio),
        Err(e) => {
            log::warn!("Sound disabled: {e:#}");
            Box::new(SilentAudio)
        }
    }
}

#[cfg(not(feature = "sound"))]
fn open_audio() -> Box<dyn AudioBackend> {
    Box::new(SilentAudio)
}

/// Let the autopilot play for a fixed number of frames without a terminal
fn run_headless(seed: u64, tuning: Tuning, audio: AudioManager, frames: u64) -> Result<()> {
    let mut session = GameSession::new(seed, tuning, audio, Box::new(NullRenderer));
    let mut runs = 0u32;
    for _ in 0..frames {
        if autopilot::wants_flap(session.state()) {
            session.on_input();
        } else if session.phase() == GamePhase::Ended {
            runs += 1;
            log::info!("Run {} ended with score {}", runs, session.score());
            session.on_input();
        }
        session.advance();
    }
    println!(
        "Headless: {} frames, {} finished run(s), current score {}, best {} (seed {})",
        frames,
        runs,
        session.score(),
        session.best_score(),
        seed
    );
    Ok(())
}
