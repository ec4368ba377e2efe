//! Grid Snake entry point
//!
//! Headless runner: drives a session with the demo autopilot, feeding the
//! fixed-step clock simulated frame time, and logs what happens.
//!
//! Usage: `grid-snake [settings.json] [max-ticks]`

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use grid_snake::assets::DirAssetStore;
use grid_snake::audio::LoggingAudioDevice;
use grid_snake::sim::steer_toward_food;
use grid_snake::{LogicalKey, Session, Settings};

/// Stop the demo after this many steps if the pilot survives
const DEFAULT_MAX_TICKS: u64 = 5_000;
/// Simulated render rate for the headless loop
const FRAME_DT: f64 = 1.0 / 60.0;

fn seed_from_time() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Grid Snake (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings_path = args.next().map(PathBuf::from);
    let max_ticks = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(DEFAULT_MAX_TICKS);

    let settings = Settings::load_or_default(settings_path.as_deref());
    let seed = settings.seed.unwrap_or_else(seed_from_time);
    let store = DirAssetStore::new(settings.asset_dir.clone());

    let mut session = Session::new(settings, LoggingAudioDevice::default(), &store, seed);

    // Render-rate loop; gameplay advances only when the clock releases a step
    let mut steps = 0u64;
    while steps < max_ticks && !session.grid().is_game_over() {
        session.on_key_down(LogicalKey::from(steer_toward_food(session.grid())));

        let score = session.grid().score();
        let ran = session.update(FRAME_DT);
        if ran > 0 {
            steps += ran as u64;
            if session.grid().score() != score {
                log::info!("{} (length {})", session.status_text(), session.grid().snake_len());
            }
        }
    }

    if !session.grid().is_game_over() {
        log::info!("Tick limit reached after {steps} steps");
    }

    log::info!(
        "Audio: {} sample bytes submitted",
        session.voices().device().submitted_bytes()
    );
    println!("{}", session.window_title());
}
