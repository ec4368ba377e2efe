//! Idle/demo steering
//!
//! Greedy pilot used by the headless runner: head for the food, never turn
//! back on itself, and avoid walls and body cells when any safe move exists.

use super::state::{Direction, GridState};

/// Pick the next direction to queue for `grid`
pub fn steer_toward_food(grid: &GridState) -> Direction {
    let head = grid.head();
    let food = grid.food();
    let current = grid.direction();

    let safe = |d: Direction| {
        let next = head + d.delta();
        grid.in_bounds(next) && !grid.is_occupied(next)
    };

    // Stable candidate order keeps the pilot deterministic
    Direction::ALL
        .into_iter()
        .filter(|&d| !current.is_opposite(d) && safe(d))
        .min_by_key(|&d| {
            let next = head + d.delta();
            let dist = (food - next).abs();
            // Prefer keeping course on ties to avoid zig-zagging
            (dist.x + dist.y, d != current)
        })
        .unwrap_or(current)
}
