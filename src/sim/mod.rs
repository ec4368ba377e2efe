//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One discrete move per tick
//! - Seeded RNG only, reseeded only on reset
//! - No audio, rendering or platform dependencies

pub mod autopilot;
pub mod state;
pub mod tick;

pub use autopilot::steer_toward_food;
pub use state::{Cell, Direction, GamePhase, GridSnapshot, GridState};
pub use tick::{TickOutcome, advance, resolve_direction};
