//! Grid Snake - A fixed-timestep snake game with synchronized sound
//!
//! Core modules:
//! - `sim`: Deterministic grid simulation (movement, collisions, scoring)
//! - `audio`: WAV decoding and per-channel voice control
//! - `session`: Binds input, clock and audio to the simulation
//! - `clock`: Fixed-step accumulator decoupled from frame rate
//! - `assets`: Named sound asset storage
//! - `settings`: Data-driven configuration

pub mod assets;
pub mod audio;
pub mod clock;
pub mod error;
pub mod session;
pub mod settings;
pub mod sim;

pub use clock::FixedStepClock;
pub use error::{AssetParseError, AudioDeviceError, SettingsError, SetupError};
pub use session::{LogicalKey, PresentationObserver, Session};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (10 Hz, one grid move per step)
    pub const SIM_DT: f64 = 0.1;
    /// Maximum gameplay steps per clock update; backlog beyond this is dropped
    pub const MAX_STEPS_PER_UPDATE: u32 = 1;
    /// Frame deltas this close to the step are snapped to it (absorbs vsync jitter)
    pub const STEP_SNAP_EPSILON: f64 = 1.0 / 4000.0;

    /// Default grid dimensions (cells)
    pub const GRID_WIDTH: i32 = 40;
    pub const GRID_HEIGHT: i32 = 30;
    /// Smallest accepted width and height; one eat can never fill such a grid
    pub const MIN_GRID_SIDE: i32 = 2;
}
