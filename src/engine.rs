//! Host-facing façade over one snake session.
//!
//! The host feeds input through [`Engine::queue_direction`],
//! [`Engine::submit_gesture`], the pause calls and [`Engine::reset`], and
//! drives time through [`Engine::poll`]. Results come back through an
//! [`EngineObserver`]; the session itself is only ever handed out by shared
//! reference.

use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::error::ConfigError;
use crate::food::FoodPlacer;
use crate::game::{GameSession, GameStatus, StepOutcome};
use crate::gesture::{map_gesture, GesturePoint};
use crate::input::Direction;
use crate::scheduler::TickScheduler;
use crate::score::{KeyValueStore, ScoreStore};

/// Callbacks fired while the engine advances. All methods default to no-ops.
pub trait EngineObserver {
    /// Fired after every successful step with the resulting state.
    fn on_tick(&mut self, _session: &GameSession) {}

    /// Fired on growth with the new score and on game end with the final score.
    fn on_score(&mut self, _score: u32) {}

    /// Fired once per transition into a terminal state.
    fn on_game_over(&mut self, _final_score: u32) {}
}

impl EngineObserver for () {}

pub struct Engine<S> {
    config: EngineConfig,
    session: GameSession,
    placer: FoodPlacer,
    scheduler: TickScheduler,
    scores: ScoreStore<S>,
    best_at_start: u32,
}

impl<S: KeyValueStore> Engine<S> {
    /// Validates `config`, creates the first session and starts ticking from `now`.
    pub fn new(
        config: EngineConfig,
        mut placer: FoodPlacer,
        scores: ScoreStore<S>,
        now: Instant,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let session = GameSession::new(&config, &mut placer);
        let best_at_start = scores.get();
        let mut engine = Self {
            config,
            session,
            placer,
            scheduler: TickScheduler::new(),
            scores,
            best_at_start,
        };
        engine.sync_scheduler(now);

        info!(
            grid = engine.config.grid_size,
            speed_ms = engine.session.speed_ms,
            best = best_at_start,
            "engine started"
        );
        Ok(engine)
    }

    #[must_use]
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn scheduler(&self) -> &TickScheduler {
        &self.scheduler
    }

    /// Returns the persisted best score.
    #[must_use]
    pub fn best_score(&self) -> u32 {
        self.scores.get()
    }

    /// Returns the best score as it was when the current session began.
    #[must_use]
    pub fn best_at_session_start(&self) -> u32 {
        self.best_at_start
    }

    /// Buffers a direction for the next tick; the latest request wins.
    pub fn queue_direction(&mut self, direction: Direction) {
        self.session.queue_direction(direction);
    }

    /// Maps a pointer swipe to a direction and queues it.
    ///
    /// Returns the queued direction; swipes inside the dead zone queue nothing.
    pub fn submit_gesture(&mut self, start: GesturePoint, end: GesturePoint) -> Option<Direction> {
        let direction = map_gesture(start, end, self.config.vertical_dead_zone_px)?;
        self.queue_direction(direction);
        Some(direction)
    }

    /// Pauses or resumes a live session. Terminal sessions are left alone.
    pub fn set_paused(&mut self, paused: bool, now: Instant) {
        let next = match (self.session.status, paused) {
            (GameStatus::Running, true) => GameStatus::Paused,
            (GameStatus::Paused, false) => GameStatus::Running,
            _ => return,
        };

        self.session.status = next;
        debug!(status = ?next, "pause toggled");
        self.sync_scheduler(now);
    }

    pub fn toggle_pause(&mut self, now: Instant) {
        let paused = self.session.status == GameStatus::Paused;
        self.set_paused(!paused, now);
    }

    /// Starts a fresh running session. Any pending tick is cancelled first.
    pub fn reset(&mut self, now: Instant) {
        self.scheduler.stop();
        self.session = GameSession::new(&self.config, &mut self.placer);
        self.best_at_start = self.scores.get();
        self.sync_scheduler(now);

        info!(best = self.best_at_start, "session reset");
    }

    /// Runs a tick when the scheduler says one is due.
    pub fn poll(
        &mut self,
        now: Instant,
        observer: &mut impl EngineObserver,
    ) -> Option<StepOutcome> {
        if !self.scheduler.poll(now) {
            return None;
        }
        Some(self.tick(now, observer))
    }

    /// Returns how long the host may wait before calling [`Engine::poll`] again.
    #[must_use]
    pub fn time_until_next_tick(&self, now: Instant) -> Option<Duration> {
        self.scheduler.time_until_due(now)
    }

    /// Advances the session by one step. Only [`Engine::poll`] calls this.
    fn tick(&mut self, now: Instant, observer: &mut impl EngineObserver) -> StepOutcome {
        let outcome = self.session.step(&mut self.placer, &self.config);

        match outcome {
            StepOutcome::Idle => {}
            StepOutcome::Moved => observer.on_tick(&self.session),
            StepOutcome::Grew { score, speed_ms } => {
                self.scores.set_if_greater(score);
                debug!(score, speed_ms, len = self.session.snake.len(), "food eaten");
                self.sync_scheduler(now);
                observer.on_tick(&self.session);
                observer.on_score(score);
            }
            StepOutcome::GameOver {
                final_score,
                reason,
            } => {
                self.finish(final_score, now, observer);
                info!(final_score, ?reason, "game over");
            }
            StepOutcome::Victory { final_score } => {
                observer.on_tick(&self.session);
                self.finish(final_score, now, observer);
                info!(final_score, "grid filled");
            }
        }

        outcome
    }

    fn finish(&mut self, final_score: u32, now: Instant, observer: &mut impl EngineObserver) {
        self.scores.set_if_greater(final_score);
        self.sync_scheduler(now);
        observer.on_score(final_score);
        observer.on_game_over(final_score);
    }

    /// Runs the scheduler exactly when the session is running, at its current speed.
    fn sync_scheduler(&mut self, now: Instant) {
        if self.session.status != GameStatus::Running {
            self.scheduler.stop();
            return;
        }

        let interval = Duration::from_millis(self.session.speed_ms);
        if self.scheduler.interval() != Some(interval) {
            if self.scheduler.is_running() {
                debug!(interval_ms = self.session.speed_ms, "tick interval changed");
            }
            self.scheduler.restart(interval, now);
        }
    }
}
