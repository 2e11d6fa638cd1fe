use crate::config::{EngineConfig, GridSize};
use crate::food::FoodPlacer;
use crate::input::{direction_change_is_valid, Direction, DirectionMailbox};
use crate::snake::{Position, Snake};
use crate::speed::next_speed;

/// Segments in a freshly started snake.
pub const STARTING_LENGTH: usize = 3;

/// Heading of a freshly started snake.
pub const STARTING_DIRECTION: Direction = Direction::Right;

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Running,
    Paused,
    GameOver,
    /// The snake fills every cell; no food can be placed.
    Victory,
}

impl GameStatus {
    /// Returns true for states only a reset can leave.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::GameOver | Self::Victory)
    }
}

/// What ended a session.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DeathReason {
    Wall,
    SelfCollision,
}

/// Result of one call to [`GameSession::step`].
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum StepOutcome {
    /// The session was not running; nothing changed.
    Idle,
    Moved,
    Grew { score: u32, speed_ms: u64 },
    GameOver { final_score: u32, reason: DeathReason },
    Victory { final_score: u32 },
}

/// Complete mutable state for one session.
///
/// `food` is `None` only once the session reached [`GameStatus::Victory`].
#[derive(Debug, Clone)]
pub struct GameSession {
    pub snake: Snake,
    pub food: Option<Position>,
    pub direction: Direction,
    pub pending: DirectionMailbox,
    pub score: u32,
    pub speed_ms: u64,
    pub status: GameStatus,
    pub tick_count: u64,
    pub death_reason: Option<DeathReason>,
    bounds: GridSize,
}

impl GameSession {
    /// Creates a running session with the starting snake centred on the grid.
    ///
    /// `config` must have passed [`EngineConfig::validate`].
    #[must_use]
    pub fn new(config: &EngineConfig, placer: &mut FoodPlacer) -> Self {
        let bounds = config.grid();
        let head = Position {
            x: i32::from(bounds.width / 2) - 1,
            y: i32::from(bounds.height / 2) - 1,
        };
        let snake = Snake::straight(head, STARTING_DIRECTION, STARTING_LENGTH);
        let food = placer.place(bounds, &snake);
        let status = if food.is_some() {
            GameStatus::Running
        } else {
            GameStatus::Victory
        };

        Self {
            snake,
            food,
            direction: STARTING_DIRECTION,
            pending: DirectionMailbox::new(STARTING_DIRECTION),
            score: 0,
            speed_ms: config.initial_speed_ms,
            status,
            tick_count: 0,
            death_reason: None,
            bounds,
        }
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.bounds
    }

    /// A paused session that has never stepped is waiting for its first start.
    #[must_use]
    pub fn is_start_screen(&self) -> bool {
        self.status == GameStatus::Paused && self.tick_count == 0 && self.score == 0
    }

    /// Buffers a direction request for the next tick.
    pub fn queue_direction(&mut self, direction: Direction) {
        self.pending.queue(direction);
    }

    /// Advances one tick using the direction waiting in the mailbox.
    pub fn step(&mut self, placer: &mut FoodPlacer, config: &EngineConfig) -> StepOutcome {
        let requested = self.pending.peek();
        self.step_with(requested, placer, config)
    }

    /// Advances one tick towards `requested`, subject to the anti-reversal rule.
    pub fn step_with(
        &mut self,
        requested: Direction,
        placer: &mut FoodPlacer,
        config: &EngineConfig,
    ) -> StepOutcome {
        if self.status != GameStatus::Running {
            return StepOutcome::Idle;
        }

        let direction = if direction_change_is_valid(self.direction, requested, self.snake.len()) {
            requested
        } else {
            self.direction
        };

        let new_head = self.snake.head().stepped(direction);

        if !new_head.is_within_bounds(self.bounds) {
            return self.end(DeathReason::Wall);
        }

        if self.snake.occupies(new_head) {
            return self.end(DeathReason::SelfCollision);
        }

        self.direction = direction;
        self.tick_count += 1;

        if self.food != Some(new_head) {
            self.snake.advance(new_head, false);
            return StepOutcome::Moved;
        }

        self.snake.advance(new_head, true);
        self.score = self.score.saturating_add(config.score_per_food);
        self.speed_ms = next_speed(self.speed_ms, config);
        self.food = placer.place(self.bounds, &self.snake);

        if self.food.is_none() {
            self.status = GameStatus::Victory;
            return StepOutcome::Victory {
                final_score: self.score,
            };
        }

        StepOutcome::Grew {
            score: self.score,
            speed_ms: self.speed_ms,
        }
    }

    fn end(&mut self, reason: DeathReason) -> StepOutcome {
        self.status = GameStatus::GameOver;
        self.death_reason = Some(reason);
        StepOutcome::GameOver {
            final_score: self.score,
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use crate::config::EngineConfig;
    use crate::food::FoodPlacer;
    use crate::input::Direction;
    use crate::snake::{Position, Snake};

    use super::{DeathReason, GameSession, GameStatus, StepOutcome};

    fn session_with_seed(seed: u64) -> (GameSession, FoodPlacer, EngineConfig) {
        let config = EngineConfig::default();
        let mut placer = FoodPlacer::from_seed(seed);
        let session = GameSession::new(&config, &mut placer);
        (session, placer, config)
    }

    #[test]
    fn fresh_session_matches_starting_layout() {
        let (session, _, _) = session_with_seed(1);
        let cells: Vec<Position> = session.snake.segments().copied().collect();

        assert_eq!(
            cells,
            vec![Position::new(8, 8), Position::new(7, 8), Position::new(6, 8)]
        );
        assert_eq!(session.direction, Direction::Right);
        assert_eq!(session.speed_ms, 160);
        assert_eq!(session.status, GameStatus::Running);
        let food = session.food.expect("fresh session has food");
        assert!(!session.snake.occupies(food));
    }

    #[test]
    fn reversal_is_rejected_with_a_body() {
        let (mut session, mut placer, config) = session_with_seed(2);
        session.food = Some(Position::new(0, 0));

        session.queue_direction(Direction::Left);
        let outcome = session.step(&mut placer, &config);

        assert_eq!(outcome, StepOutcome::Moved);
        assert_eq!(session.direction, Direction::Right);
        assert_eq!(session.snake.head(), Position::new(9, 8));
        assert_eq!(session.pending.peek(), Direction::Left);
    }

    #[test]
    fn reversal_is_allowed_at_length_one() {
        let (mut session, mut placer, config) = session_with_seed(3);
        session.snake = Snake::new(Position::new(5, 5));
        session.food = Some(Position::new(0, 0));

        session.queue_direction(Direction::Left);
        session.step(&mut placer, &config);

        assert_eq!(session.direction, Direction::Left);
        assert_eq!(session.snake.head(), Position::new(4, 5));
    }

    #[test]
    fn two_ticks_right_eat_the_food() {
        let (mut session, mut placer, config) = session_with_seed(4);
        session.food = Some(Position::new(10, 8));

        assert_eq!(session.step(&mut placer, &config), StepOutcome::Moved);
        let outcome = session.step(&mut placer, &config);

        assert_eq!(
            outcome,
            StepOutcome::Grew {
                score: 10,
                speed_ms: 152
            }
        );
        assert_eq!(session.score, 10);
        assert_eq!(session.snake.len(), 4);
        assert_eq!(session.snake.head(), Position::new(10, 8));
        let food = session.food.expect("grid still has open cells");
        let occupied: HashSet<Position> = [(10, 8), (9, 8), (8, 8), (7, 8)]
            .into_iter()
            .map(|(x, y)| Position::new(x, y))
            .collect();
        assert!(!occupied.contains(&food));
        assert!(food.is_within_bounds(session.bounds()));
    }

    #[test]
    fn leaving_the_grid_ends_the_game() {
        let (mut session, mut placer, config) = session_with_seed(5);
        session.snake = Snake::straight(Position::new(0, 3), Direction::Left, 3);
        session.direction = Direction::Left;
        session.pending.queue(Direction::Left);
        session.score = 30;
        session.food = Some(Position::new(10, 10));

        let outcome = session.step(&mut placer, &config);

        assert_eq!(
            outcome,
            StepOutcome::GameOver {
                final_score: 30,
                reason: DeathReason::Wall
            }
        );
        assert_eq!(session.status, GameStatus::GameOver);
        assert_eq!(session.score, 30);
        assert_eq!(session.snake.head(), Position::new(0, 3));
    }

    #[test]
    fn turning_into_own_body_ends_the_game() {
        let (mut session, mut placer, config) = session_with_seed(6);
        session.snake = Snake::from_segments(vec![
            Position::new(2, 2),
            Position::new(1, 2),
            Position::new(1, 3),
            Position::new(2, 3),
            Position::new(3, 3),
        ])
        .expect("non-empty");
        session.direction = Direction::Right;
        session.food = Some(Position::new(10, 10));

        session.queue_direction(Direction::Down);
        let outcome = session.step(&mut placer, &config);

        assert!(matches!(
            outcome,
            StepOutcome::GameOver {
                reason: DeathReason::SelfCollision,
                ..
            }
        ));
        assert_eq!(session.death_reason, Some(DeathReason::SelfCollision));
    }

    #[test]
    fn moving_onto_the_current_tail_is_a_collision() {
        let (mut session, mut placer, config) = session_with_seed(7);
        session.snake = Snake::from_segments(vec![
            Position::new(2, 2),
            Position::new(3, 2),
            Position::new(3, 3),
            Position::new(2, 3),
        ])
        .expect("non-empty");
        session.direction = Direction::Left;
        session.food = Some(Position::new(10, 10));

        session.queue_direction(Direction::Down);

        assert!(matches!(
            session.step(&mut placer, &config),
            StepOutcome::GameOver { .. }
        ));
    }

    #[test]
    fn only_an_unstarted_paused_session_is_the_start_screen() {
        let (mut session, mut placer, config) = session_with_seed(10);
        session.food = Some(Position::new(0, 0));
        assert!(!session.is_start_screen());

        session.status = GameStatus::Paused;
        assert!(session.is_start_screen());

        session.status = GameStatus::Running;
        session.step(&mut placer, &config);
        session.status = GameStatus::Paused;
        assert_eq!(session.tick_count, 1);
        assert!(!session.is_start_screen());
    }

    #[test]
    fn paused_and_finished_sessions_do_not_move() {
        let (mut session, mut placer, config) = session_with_seed(8);
        let before = session.snake.clone();

        session.status = GameStatus::Paused;
        assert_eq!(session.step(&mut placer, &config), StepOutcome::Idle);

        session.status = GameStatus::GameOver;
        assert_eq!(session.step(&mut placer, &config), StepOutcome::Idle);

        assert_eq!(session.snake, before);
        assert_eq!(session.tick_count, 0);
    }

    #[test]
    fn filling_the_grid_is_a_victory() {
        let config = EngineConfig {
            grid_size: 6,
            ..EngineConfig::default()
        };
        let mut placer = FoodPlacer::from_seed(9);
        let mut session = GameSession::new(&config, &mut placer);

        // Serpentine over the 6x6 grid; the last cell is left for the food.
        let path: Vec<Position> = (0..6)
            .flat_map(|y| {
                let row: Vec<i32> = if y % 2 == 0 {
                    (0..6).collect()
                } else {
                    (0..6).rev().collect()
                };
                row.into_iter().map(move |x| Position::new(x, y))
            })
            .collect();
        let body: Vec<Position> = path[..35].iter().rev().copied().collect();
        session.snake = Snake::from_segments(body).expect("non-empty");
        session.direction = Direction::Left;
        session.pending.queue(Direction::Left);
        session.food = Some(path[35]);

        let outcome = session.step(&mut placer, &config);

        assert_eq!(outcome, StepOutcome::Victory { final_score: 10 });
        assert_eq!(session.status, GameStatus::Victory);
        assert_eq!(session.snake.len(), 36);
        assert_eq!(session.food, None);
    }
}
