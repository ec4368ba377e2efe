//! Grid state and core simulation types
//!
//! Everything a tick reads or writes lives in `GridState`. Renderers only see
//! it through the read-only accessors or an owned `GridSnapshot`.

use std::collections::VecDeque;

use glam::IVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::MIN_GRID_SIDE;
use crate::error::SetupError;

/// A grid coordinate. `y` grows downward.
pub type Cell = IVec2;

/// Movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit step for this direction
    pub fn delta(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::NEG_Y,
            Direction::Down => IVec2::Y,
            Direction::Left => IVec2::NEG_X,
            Direction::Right => IVec2::X,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    #[inline]
    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Snake is moving
    Playing,
    /// Run ended; ticks are no-ops until reset
    GameOver,
}

/// Owned copy of everything a renderer draws
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSnapshot {
    pub width: i32,
    pub height: i32,
    /// Head first
    pub snake: Vec<Cell>,
    pub food: Cell,
    pub direction: Direction,
    pub score: u32,
    pub game_over: bool,
}

/// Complete grid simulation state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GridState {
    width: i32,
    height: i32,
    /// Head first, never empty, no duplicates
    pub(crate) snake: VecDeque<Cell>,
    /// Never on the snake
    pub(crate) food: Cell,
    pub(crate) direction: Direction,
    pub(crate) pending_direction: Direction,
    pub(crate) grow_pending: bool,
    pub(crate) phase: GamePhase,
    pub(crate) score: u32,
    /// Ticks that moved the snake or ended the run
    pub(crate) ticks: u64,
    seed: u64,
    rng: Pcg32,
}

impl GridState {
    /// Create a fresh run on a `width` x `height` grid
    pub fn new(width: i32, height: i32, seed: u64) -> Self {
        let mut state = Self {
            width,
            height,
            snake: VecDeque::new(),
            food: IVec2::ZERO,
            direction: Direction::Right,
            pending_direction: Direction::Right,
            grow_pending: false,
            phase: GamePhase::Playing,
            score: 0,
            ticks: 0,
            seed,
            rng: Pcg32::seed_from_u64(seed),
        };
        state.reset(width, height, seed);
        state
    }

    /// Start a new run: single segment at the grid center heading right.
    ///
    /// Both sides must be at least [`MIN_GRID_SIDE`]. That only covers the
    /// start of a run: once the snake fills every cell, food respawn never
    /// terminates.
    pub fn reset(&mut self, width: i32, height: i32, seed: u64) {
        debug_assert!(
            width >= MIN_GRID_SIDE && height >= MIN_GRID_SIDE,
            "grid {width}x{height} is below the minimum side"
        );

        self.width = width;
        self.height = height;
        self.seed = seed;
        self.rng = Pcg32::seed_from_u64(seed);

        self.snake.clear();
        self.snake.push_back(IVec2::new(width / 2, height / 2));
        self.direction = Direction::Right;
        self.pending_direction = Direction::Right;
        self.grow_pending = false;
        self.phase = GamePhase::Playing;
        self.score = 0;
        self.ticks = 0;

        self.spawn_food();
    }

    /// Build an explicit scenario, rejecting any that break the grid invariants.
    ///
    /// `snake` is head first. The pending direction starts equal to `direction`.
    pub fn from_parts(
        width: i32,
        height: i32,
        snake: impl IntoIterator<Item = Cell>,
        direction: Direction,
        food: Cell,
        seed: u64,
    ) -> Result<Self, SetupError> {
        if width < MIN_GRID_SIDE || height < MIN_GRID_SIDE {
            return Err(SetupError::GridTooSmall { width, height });
        }

        let in_bounds = |c: Cell| c.x >= 0 && c.y >= 0 && c.x < width && c.y < height;

        let mut body: VecDeque<Cell> = VecDeque::new();
        for cell in snake {
            if !in_bounds(cell) {
                return Err(SetupError::OutOfBounds(cell));
            }
            if body.contains(&cell) {
                return Err(SetupError::DuplicateSegment(cell));
            }
            body.push_back(cell);
        }
        if body.is_empty() {
            return Err(SetupError::EmptySnake);
        }
        if !in_bounds(food) {
            return Err(SetupError::OutOfBounds(food));
        }
        if body.contains(&food) {
            return Err(SetupError::FoodOnSnake(food));
        }

        Ok(Self {
            width,
            height,
            snake: body,
            food,
            direction,
            pending_direction: direction,
            grow_pending: false,
            phase: GamePhase::Playing,
            score: 0,
            ticks: 0,
            seed,
            rng: Pcg32::seed_from_u64(seed),
        })
    }

    /// Queue a direction for the next tick (last write before the tick wins)
    pub fn set_pending_direction(&mut self, direction: Direction) {
        self.pending_direction = direction;
    }

    /// Advance one tick (see [`crate::sim::tick::advance`])
    pub fn advance(&mut self) -> super::TickOutcome {
        super::tick::advance(self)
    }

    /// Place food on a uniformly random free cell.
    ///
    /// Rejection sampling: terminates only while at least one cell is free.
    pub(crate) fn spawn_food(&mut self) {
        debug_assert!(
            self.snake.len() < self.cell_count(),
            "snake fills the grid, food respawn cannot terminate"
        );

        loop {
            let cell = IVec2::new(
                self.rng.random_range(0..self.width),
                self.rng.random_range(0..self.height),
            );
            if !self.is_occupied(cell) {
                self.food = cell;
                return;
            }
        }
    }

    #[inline]
    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && cell.x < self.width && cell.y < self.height
    }

    /// True if any snake segment covers `cell`
    pub fn is_occupied(&self, cell: Cell) -> bool {
        self.snake.contains(&cell)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn cell_count(&self) -> usize {
        self.width.max(0) as usize * self.height.max(0) as usize
    }

    /// Snake segments, head first
    pub fn snake(&self) -> impl ExactSizeIterator<Item = Cell> + '_ {
        self.snake.iter().copied()
    }

    pub fn snake_len(&self) -> usize {
        self.snake.len()
    }

    pub fn head(&self) -> Cell {
        // Invariant: the snake always has at least one segment
        self.snake.front().copied().unwrap_or(IVec2::ZERO)
    }

    pub fn food(&self) -> Cell {
        self.food
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_direction(&self) -> Direction {
        self.pending_direction
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Seed of the current run
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot {
            width: self.width,
            height: self.height,
            snake: self.snake.iter().copied().collect(),
            food: self.food,
            direction: self.direction,
            score: self.score,
            game_over: self.is_game_over(),
        }
    }
}
