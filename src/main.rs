//! Headless runner: plays a seeded session frame by frame

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use vector_rocks::audio::{AudioManager, LogSink};
use vector_rocks::consts::FRAME_MS;
use vector_rocks::platform::{FrameClock, KeyBindings, KeyState};
use vector_rocks::renderer::{AsciiCanvas, draw_scene};
use vector_rocks::sim::{GameEvent, GamePhase, SessionState, TickInput, tick};
use vector_rocks::Tuning;

#[derive(Parser, Debug)]
#[command(name = "vector-rocks")]
#[command(about = "Deterministic vector asteroids simulation")]
struct Cli {
    /// RNG seed for the session
    #[arg(long, default_value_t = 1)]
    seed: u64,
    /// Frames to simulate (stops early on game over)
    #[arg(long, default_value_t = 3600)]
    frames: u64,
    /// JSON tuning file
    #[arg(long)]
    tuning: Option<PathBuf>,
    /// Print the final frame as ASCII art
    #[arg(long)]
    ascii: bool,
    /// Print a JSON run summary
    #[arg(long)]
    json: bool,
    /// Disable the autopilot (ship drifts with no keys held)
    #[arg(long)]
    manual: bool,
}

#[derive(Debug, Serialize)]
struct RunSummary {
    seed: u64,
    frames: u64,
    phase: GamePhase,
    level: u32,
    score: u64,
    lives: u32,
    asteroids: usize,
    levels_started: usize,
    saucers_destroyed: usize,
    sounds_played: u64,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let tuning = match &cli.tuning {
        Some(path) => {
            Tuning::load(path).with_context(|| format!("failed to load tuning from {}", path.display()))?
        }
        None => Tuning::default(),
    };

    log::info!("Vector Rocks (native) starting with seed {}", cli.seed);
    let mut state = SessionState::new(cli.seed, tuning);
    let mut audio = AudioManager::new(LogSink);
    let keys = KeyState::new();
    let bindings = KeyBindings::default();

    let mut levels_started = 0;
    let mut saucers_destroyed = 0;

    // Host refresh callbacks are simulated at the display rate
    let mut clock = FrameClock::new();
    let mut host_time_ms = 0.0_f64;

    while state.frame < cli.frames && !state.is_over() {
        for _ in 0..clock.frames_due(host_time_ms) {
            let mut input = TickInput::poll(&keys, &bindings);
            input.idle_mode = !cli.manual;
            tick(&mut state, &input);

            let events = state.drain_events();
            for event in &events {
                match event {
                    GameEvent::LevelStarted { .. } => levels_started += 1,
                    GameEvent::SaucerDestroyed { .. } => saucers_destroyed += 1,
                    _ => {}
                }
            }
            audio.set_focused(input.focused);
            audio.handle_events(&events);

            if state.frame >= cli.frames || state.is_over() {
                break;
            }
        }
        host_time_ms += f64::from(FRAME_MS);
    }

    log::info!(
        "Finished after {} frames: level {}, score {}",
        state.frame,
        state.level,
        state.score.value
    );

    if cli.ascii {
        let mut canvas = AsciiCanvas::new(96, 35);
        draw_scene(&state, &mut canvas);
        print!("{canvas}");
    }

    if cli.json {
        let summary = RunSummary {
            seed: cli.seed,
            frames: state.frame,
            phase: state.phase,
            level: state.level,
            score: state.score.value,
            lives: state.lives,
            asteroids: state.asteroids.len(),
            levels_started,
            saucers_destroyed,
            sounds_played: audio.played(),
        };
        let json = serde_json::to_string_pretty(&summary).context("failed to serialize run summary")?;
        println!("{json}");
    }

    Ok(())
}
