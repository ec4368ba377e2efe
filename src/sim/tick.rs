//! Fixed timestep simulation tick
//!
//! One call moves the snake exactly one cell and reports what happened.

use super::state::{Direction, GamePhase, GridState};

/// Tagged result of one tick, driving side effects outside the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Game already over; nothing changed
    Idle,
    /// Snake moved one cell
    Moved,
    /// Snake moved onto the food and will grow
    Ate,
    /// Head would leave the grid
    CollisionWall,
    /// Head would enter the snake's own body
    CollisionSelf,
}

impl TickOutcome {
    pub fn is_collision(self) -> bool {
        matches!(self, TickOutcome::CollisionWall | TickOutcome::CollisionSelf)
    }
}

/// Advance the grid by one tick
pub fn advance(state: &mut GridState) -> TickOutcome {
    if state.phase == GamePhase::GameOver {
        return TickOutcome::Idle;
    }

    // Reversal is judged against the committed direction, never the previous pending one
    state.direction = resolve_direction(state.direction, state.pending_direction);

    state.ticks += 1;
    let head = state.head() + state.direction.delta();

    if !state.in_bounds(head) {
        state.phase = GamePhase::GameOver;
        return TickOutcome::CollisionWall;
    }

    // The tail has not moved yet, so stepping into it counts as a collision
    if state.is_occupied(head) {
        state.phase = GamePhase::GameOver;
        return TickOutcome::CollisionSelf;
    }

    state.snake.push_front(head);

    let mut outcome = TickOutcome::Moved;
    if head == state.food {
        state.grow_pending = true;
        state.score += 1;
        state.spawn_food();
        outcome = TickOutcome::Ate;
    }

    if state.grow_pending {
        state.grow_pending = false;
    } else {
        state.snake.pop_back();
    }

    outcome
}

/// Resolve which direction a tick would commit to, without mutating state
pub fn resolve_direction(committed: Direction, pending: Direction) -> Direction {
    if committed.is_opposite(pending) {
        committed
    } else {
        pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Cell;
    use glam::IVec2;
    use proptest::prelude::*;

    fn cells(points: &[(i32, i32)]) -> Vec<Cell> {
        points.iter().map(|&(x, y)| IVec2::new(x, y)).collect()
    }

    fn grid(w: i32, h: i32, snake: &[(i32, i32)], dir: Direction, food: (i32, i32)) -> GridState {
        GridState::from_parts(w, h, cells(snake), dir, IVec2::new(food.0, food.1), 1234).unwrap()
    }

    #[test]
    fn test_eat_grows_and_respawns_food() {
        let mut state = grid(10, 10, &[(5, 5)], Direction::Right, (6, 5));

        let outcome = advance(&mut state);
        assert_eq!(outcome, TickOutcome::Ate);
        assert_eq!(state.snake().collect::<Vec<_>>(), cells(&[(6, 5), (5, 5)]));
        assert_eq!(state.score(), 1);
        assert!(!state.is_occupied(state.food()));
        assert!(state.in_bounds(state.food()));
        assert!(!state.grow_pending);
    }

    #[test]
    fn test_wall_collision_leaves_snake_in_place() {
        let mut state = grid(10, 10, &[(0, 0)], Direction::Left, (5, 5));

        let outcome = advance(&mut state);
        assert_eq!(outcome, TickOutcome::CollisionWall);
        assert!(state.is_game_over());
        assert_eq!(state.snake().collect::<Vec<_>>(), cells(&[(0, 0)]));
        assert_eq!(state.food(), IVec2::new(5, 5));
    }

    #[test]
    fn test_wall_collision_on_far_edges() {
        let mut right = grid(4, 3, &[(3, 1)], Direction::Right, (0, 0));
        assert_eq!(advance(&mut right), TickOutcome::CollisionWall);

        let mut down = grid(4, 3, &[(1, 2)], Direction::Down, (0, 0));
        assert_eq!(advance(&mut down), TickOutcome::CollisionWall);

        let mut up = grid(4, 3, &[(1, 0)], Direction::Up, (3, 2));
        assert_eq!(advance(&mut up), TickOutcome::CollisionWall);
    }

    #[test]
    fn test_move_drops_tail() {
        let mut state = grid(10, 10, &[(3, 3), (2, 3), (2, 2)], Direction::Down, (9, 9));

        let outcome = advance(&mut state);
        assert_eq!(outcome, TickOutcome::Moved);
        assert_eq!(
            state.snake().collect::<Vec<_>>(),
            cells(&[(3, 4), (3, 3), (2, 3)])
        );
        assert!(!state.is_game_over());
    }

    #[test]
    fn test_reversal_is_ignored() {
        let mut state = grid(10, 10, &[(5, 5), (4, 5)], Direction::Right, (0, 0));
        state.set_pending_direction(Direction::Left);

        assert_eq!(advance(&mut state), TickOutcome::Moved);
        assert_eq!(state.direction(), Direction::Right);
        assert_eq!(state.head(), IVec2::new(6, 5));
    }

    #[test]
    fn test_reversal_checked_against_committed_direction() {
        // Up then Left within one tick: Left is the last write and is the reversal
        let mut state = grid(10, 10, &[(5, 5), (4, 5)], Direction::Right, (0, 0));
        state.set_pending_direction(Direction::Up);
        state.set_pending_direction(Direction::Left);

        advance(&mut state);
        assert_eq!(state.direction(), Direction::Right);
        assert_eq!(state.head(), IVec2::new(6, 5));

        // A non-opposite turn is adopted
        state.set_pending_direction(Direction::Up);
        advance(&mut state);
        assert_eq!(state.direction(), Direction::Up);
        assert_eq!(state.head(), IVec2::new(6, 4));
    }

    #[test]
    fn test_self_collision() {
        let mut state = grid(
            10,
            10,
            &[(2, 2), (3, 2), (3, 3), (2, 3), (1, 3)],
            Direction::Left,
            (8, 8),
        );
        state.set_pending_direction(Direction::Down);

        let before = state.snapshot();
        assert_eq!(advance(&mut state), TickOutcome::CollisionSelf);
        assert!(state.is_game_over());
        assert_eq!(state.snapshot().snake, before.snake);
    }

    #[test]
    fn test_moving_into_tail_collides() {
        let mut state = grid(10, 10, &[(1, 1), (2, 1), (2, 2), (1, 2)], Direction::Left, (8, 8));
        state.set_pending_direction(Direction::Down);
        assert_eq!(advance(&mut state), TickOutcome::CollisionSelf);
    }

    #[test]
    fn test_tick_after_game_over_is_noop() {
        let mut state = grid(10, 10, &[(0, 0)], Direction::Left, (5, 5));
        advance(&mut state);
        assert!(state.is_game_over());

        let before = state.snapshot();
        let ticks = state.ticks();
        state.set_pending_direction(Direction::Down);
        for _ in 0..5 {
            assert_eq!(advance(&mut state), TickOutcome::Idle);
        }
        assert_eq!(state.snapshot(), before);
        assert_eq!(state.ticks(), ticks);
    }

    #[test]
    fn test_growth_keeps_tail_for_one_tick_only() {
        let mut state = grid(20, 20, &[(5, 5), (4, 5)], Direction::Right, (6, 5));
        assert_eq!(advance(&mut state), TickOutcome::Ate);
        assert_eq!(state.snake_len(), 3);

        // Next move without food: length is kept, tail moves
        if state.food() == IVec2::new(7, 5) {
            state.food = IVec2::new(0, 0);
        }
        assert_eq!(advance(&mut state), TickOutcome::Moved);
        assert_eq!(state.snake_len(), 3);
        assert_eq!(state.snake().last(), Some(IVec2::new(5, 5)));
    }

    #[test]
    fn test_resolve_direction() {
        assert_eq!(resolve_direction(Direction::Right, Direction::Left), Direction::Right);
        assert_eq!(resolve_direction(Direction::Right, Direction::Up), Direction::Up);
        assert_eq!(resolve_direction(Direction::Up, Direction::Up), Direction::Up);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed and inputs produce identical results
        let inputs = [
            Direction::Up,
            Direction::Left,
            Direction::Left,
            Direction::Down,
            Direction::Right,
        ];
        let mut a = GridState::new(16, 12, 99999);
        let mut b = GridState::new(16, 12, 99999);

        for i in 0..40 {
            let d = inputs[i % inputs.len()];
            a.set_pending_direction(d);
            b.set_pending_direction(d);
            assert_eq!(advance(&mut a), advance(&mut b));
            assert_eq!(a.snapshot(), b.snapshot());
        }
    }

    fn direction_strategy() -> impl Strategy<Value = Direction> {
        prop_oneof![
            Just(Direction::Up),
            Just(Direction::Down),
            Just(Direction::Left),
            Just(Direction::Right),
        ]
    }

    proptest! {
        #[test]
        fn prop_invariants_hold_over_random_play(
            seed in any::<u64>(),
            inputs in proptest::collection::vec(direction_strategy(), 1..60),
        ) {
            // 12x12 = 144 cells; 60 ticks can never fill it
            let mut state = GridState::new(12, 12, seed);
            for d in inputs {
                let committed = state.direction();
                let before = state.snapshot();
                state.set_pending_direction(d);
                let outcome = advance(&mut state);

                if outcome != TickOutcome::Idle {
                    prop_assert_eq!(state.direction(), resolve_direction(committed, d));
                    prop_assert_ne!(state.direction(), committed.opposite());
                }

                match outcome {
                    TickOutcome::Idle => prop_assert_eq!(state.snapshot(), before),
                    TickOutcome::CollisionWall | TickOutcome::CollisionSelf => {
                        prop_assert!(state.is_game_over());
                        prop_assert_eq!(state.snapshot().snake, before.snake.clone());
                    }
                    TickOutcome::Ate => {
                        prop_assert_eq!(state.score(), before.score + 1);
                        prop_assert_eq!(state.snake_len(), before.snake.len() + 1);
                    }
                    TickOutcome::Moved => {
                        prop_assert_eq!(state.score(), before.score);
                        prop_assert_eq!(state.snake_len(), before.snake.len());
                    }
                }

                let body: Vec<_> = state.snake().collect();
                for (i, cell) in body.iter().enumerate() {
                    prop_assert!(state.in_bounds(*cell));
                    prop_assert!(!body[i + 1..].contains(cell));
                }
                prop_assert!(!body.contains(&state.food()));
                prop_assert_eq!(body.len(), state.score() as usize + 1);
            }
        }
    }
}
