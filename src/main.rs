//! Infernal entry point
//!
//! Runs a headless autopilot session: the simulation plays itself against
//! the device-free platform backends and a summary is logged at the end.
//!
//! Environment:
//! - `RUST_LOG`: log filter (default `info`)
//! - `INFERNAL_TUNING`: path to a JSON balance override
//! - `INFERNAL_SETTINGS`: path to a JSON volume settings file
//! - `INFERNAL_SEED`: session seed (default: current time)
//! - `INFERNAL_DEMO_FRAMES`: frames to play (default 3600, one minute)
//! - `INFERNAL_REALTIME`: pace frames with the wall clock when set

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use env_logger::Env;

use infernal::consts::WINDOW_TITLE;
use infernal::platform::Clock;
use infernal::platform::headless::{
    FixedClock, NullAudio, NullRenderer, ScriptedInput, SystemClock,
};
use infernal::sim::GameState;
use infernal::{Session, Settings, Tuning};

const DEFAULT_DEMO_FRAMES: u64 = 3600;

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    log::info!("{} (headless) starting...", WINDOW_TITLE);

    let tuning = match std::env::var("INFERNAL_TUNING") {
        Ok(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("reading tuning file {path}"))?;
            match Tuning::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path);
                    tuning
                }
                Err(e) => {
                    log::warn!("Ignoring tuning file {}: {}", path, e);
                    Tuning::default()
                }
            }
        }
        Err(_) => Tuning::default(),
    };

    let settings = match std::env::var("INFERNAL_SETTINGS") {
        Ok(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("reading settings file {path}"))?;
            Settings::from_json(&json).with_context(|| format!("parsing settings file {path}"))?
        }
        Err(_) => Settings::default(),
    };

    let seed = match std::env::var("INFERNAL_SEED") {
        Ok(value) => value.parse::<u64>().context("INFERNAL_SEED must be an unsigned integer")?,
        Err(_) => SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default(),
    };

    let frames = match std::env::var("INFERNAL_DEMO_FRAMES") {
        Ok(value) => value
            .parse::<u64>()
            .context("INFERNAL_DEMO_FRAMES must be an unsigned integer")?,
        Err(_) => DEFAULT_DEMO_FRAMES,
    };

    log::info!("Game initialized with seed: {}", seed);
    let state = GameState::with_tuning(seed, tuning);

    if std::env::var_os("INFERNAL_REALTIME").is_some() {
        play(state, SystemClock::new(), settings, frames);
    } else {
        play(state, FixedClock::new(), settings, frames);
    }
    Ok(())
}

fn play<C: Clock>(state: GameState, clock: C, settings: Settings, frames: u64) {
    let mut session = Session::new(
        state,
        NullRenderer,
        clock,
        ScriptedInput::default(),
        NullAudio,
        settings,
    )
    .with_autopilot(true);

    let played = session.run(Some(frames));
    let state = session.state();
    log::info!(
        "Played {} frames ({} ms simulated): phase {:?}, level {}, score {}, health {}/{}, rooms generated {}",
        played,
        session.clock().now_ms(),
        state.phase,
        state.progression.reached_level,
        state.player.score,
        state.player.current_health,
        state.player.max_health,
        state.rooms_generated,
    );
}
