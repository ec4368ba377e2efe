//! Game session
//!
//! Binds input and clock events to the grid simulation and the voice
//! controller. A session is an explicitly constructed value owned by whatever
//! runs the event loop; there is no global game instance.

use crate::assets::{AssetStore, EAT_SOUND, GAME_OVER_SOUND, MUSIC_TRACK, load_asset};
use crate::audio::{AudioDevice, Channel, Sound, VoiceController};
use crate::clock::FixedStepClock;
use crate::settings::Settings;
use crate::sim::{Direction, GridSnapshot, GridState, TickOutcome};

/// Closed set of inputs the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalKey {
    Up,
    Down,
    Left,
    Right,
    ToggleMute,
    Restart,
}

impl LogicalKey {
    /// Map a platform key name; anything outside the closed set is `None`
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name {
            "Up" | "ArrowUp" => Some(LogicalKey::Up),
            "Down" | "ArrowDown" => Some(LogicalKey::Down),
            "Left" | "ArrowLeft" => Some(LogicalKey::Left),
            "Right" | "ArrowRight" => Some(LogicalKey::Right),
            "M" | "m" => Some(LogicalKey::ToggleMute),
            "Space" | " " => Some(LogicalKey::Restart),
            _ => {
                log::trace!("Ignoring unmapped key {name:?}");
                None
            }
        }
    }

    pub fn direction(self) -> Option<Direction> {
        match self {
            LogicalKey::Up => Some(Direction::Up),
            LogicalKey::Down => Some(Direction::Down),
            LogicalKey::Left => Some(Direction::Left),
            LogicalKey::Right => Some(Direction::Right),
            LogicalKey::ToggleMute | LogicalKey::Restart => None,
        }
    }
}

impl From<Direction> for LogicalKey {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Up => LogicalKey::Up,
            Direction::Down => LogicalKey::Down,
            Direction::Left => LogicalKey::Left,
            Direction::Right => LogicalKey::Right,
        }
    }
}

/// Notifications from the presentation layer when its device goes away and comes back
pub trait PresentationObserver {
    fn on_presentation_lost(&mut self);
    fn on_presentation_restored(&mut self);
}

/// Seed for the `run`-th run of a session started with `base`
fn run_seed(base: u64, run: u64) -> u64 {
    base.wrapping_add(run.wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// One game session: grid, voices and clock
pub struct Session<D: AudioDevice> {
    settings: Settings,
    grid: GridState,
    voices: VoiceController<D>,
    clock: FixedStepClock,
    base_seed: u64,
    run: u64,
    status: String,
}

impl<D: AudioDevice> Session<D> {
    /// Load the sounds, start the music and begin the first run.
    ///
    /// Settings that fail validation are replaced by the defaults.
    pub fn new(settings: Settings, device: D, assets: &dyn AssetStore, seed: u64) -> Self {
        let settings = match settings.validate() {
            Ok(()) => settings,
            Err(e) => {
                log::warn!("Invalid settings, using defaults: {e}");
                Settings::default()
            }
        };

        let mut voices = VoiceController::new(device);
        voices.bind(Channel::Music, load_asset(assets, MUSIC_TRACK));
        voices.bind_effect(Sound::Eat, load_asset(assets, EAT_SOUND));
        voices.bind_effect(Sound::GameOver, load_asset(assets, GAME_OVER_SOUND));

        if settings.music_enabled {
            voices.trigger(Channel::Music, true);
        } else {
            voices.set_music_enabled(false);
        }

        let grid = GridState::new(settings.grid_width, settings.grid_height, seed);
        let clock = FixedStepClock::new(settings.tick_seconds);

        let mut session = Self {
            settings,
            grid,
            voices,
            clock,
            base_seed: seed,
            run: 0,
            status: String::new(),
        };
        session.refresh_status();
        log::info!(
            "Session started: {}x{} grid, seed {seed}",
            session.grid.width(),
            session.grid.height()
        );
        session
    }

    /// Handle one key-down event
    pub fn on_key_down(&mut self, key: LogicalKey) {
        match key {
            LogicalKey::Restart => {
                self.restart();
            }
            LogicalKey::ToggleMute => {
                let enabled = !self.voices.music_enabled();
                if enabled && self.grid.is_game_over() {
                    // Music comes back with the next run
                    self.voices.arm_music();
                } else {
                    self.voices.set_music_enabled(enabled);
                }
                log::info!("Music {}", if enabled { "on" } else { "off" });
            }
            _ => {
                if self.grid.is_game_over() {
                    return;
                }
                if let Some(direction) = key.direction() {
                    self.grid.set_pending_direction(direction);
                }
            }
        }
    }

    /// Start a new run. Only accepted once the current run is over.
    pub fn restart(&mut self) -> bool {
        if !self.grid.is_game_over() {
            log::trace!("Restart ignored while playing");
            return false;
        }

        self.run += 1;
        let seed = run_seed(self.base_seed, self.run);
        self.grid
            .reset(self.settings.grid_width, self.settings.grid_height, seed);
        self.voices.trigger(Channel::Music, true);
        self.refresh_status();
        log::info!("Run {} started with seed {seed}", self.run);
        true
    }

    /// Run one gameplay step and its audio/HUD side effects
    pub fn tick(&mut self) -> TickOutcome {
        let outcome = self.grid.advance();
        if outcome == TickOutcome::Ate {
            self.voices.play_effect(Sound::Eat);
            self.refresh_status();
        } else if outcome.is_collision() {
            self.voices.stop(Channel::Music);
            self.voices.play_effect(Sound::GameOver);
            self.refresh_status();
            log::info!(
                "Game over ({outcome:?}) after {} ticks, score {}",
                self.grid.ticks(),
                self.grid.score()
            );
        }
        outcome
    }

    /// Feed `dt` seconds of wall time; runs every whole step that became due
    pub fn update(&mut self, dt: f64) -> u32 {
        let steps = self.clock.advance(dt);
        for _ in 0..steps {
            self.tick();
        }
        steps
    }

    /// Power suspend: freeze gameplay time
    pub fn on_suspending(&mut self) {
        self.clock.set_paused(true);
        log::info!("Suspended");
    }

    /// Power resume: drop the time spent suspended and bring the music back
    pub fn on_resuming(&mut self) {
        self.clock.set_paused(false);
        self.clock.reset_elapsed();
        if !self.grid.is_game_over() {
            self.voices.trigger(Channel::Music, true);
        }
        log::info!("Resumed");
    }

    fn refresh_status(&mut self) {
        self.status = if self.grid.is_game_over() {
            format!("Game Over! Score: {}", self.grid.score())
        } else {
            format!("Score: {}", self.grid.score())
        };
    }

    /// HUD text: `Score: N` or `Game Over! Score: N`
    pub fn status_text(&self) -> &str {
        &self.status
    }

    pub fn window_title(&self) -> String {
        if self.grid.is_game_over() {
            format!("Snake - {} (SPACE to restart)", self.status)
        } else {
            format!("Snake - {}", self.status)
        }
    }

    pub fn grid(&self) -> &GridState {
        &self.grid
    }

    pub fn snapshot(&self) -> GridSnapshot {
        self.grid.snapshot()
    }

    pub fn voices(&self) -> &VoiceController<D> {
        &self.voices
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn clock(&self) -> &FixedStepClock {
        &self.clock
    }

    /// Completed restarts since the session began
    pub fn run(&self) -> u64 {
        self.run
    }

    #[cfg(test)]
    pub(crate) fn grid_mut(&mut self) -> &mut GridState {
        &mut self.grid
    }

    #[cfg(test)]
    pub(crate) fn voices_mut(&mut self) -> &mut VoiceController<D> {
        &mut self.voices
    }
}

impl<D: AudioDevice> PresentationObserver for Session<D> {
    fn on_presentation_lost(&mut self) {
        self.clock.set_paused(true);
        log::warn!("Presentation lost - gameplay paused");
    }

    fn on_presentation_restored(&mut self) {
        self.clock.set_paused(false);
        self.clock.reset_elapsed();
        if !self.grid.is_game_over() {
            self.voices.trigger(Channel::Music, true);
        }
        log::info!("Presentation restored");
    }
}
