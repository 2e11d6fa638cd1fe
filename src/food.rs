use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::GridSize;
use crate::snake::{Position, Snake};

/// Chooses food cells uniformly among the cells the snake leaves open.
#[derive(Debug, Clone)]
pub struct FoodPlacer {
    rng: StdRng,
}

impl FoodPlacer {
    /// Creates a deterministic placer for tests and reproducible sessions.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Creates a placer seeded from OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Picks a free cell, or `None` when the snake covers the whole grid.
    pub fn place(&mut self, bounds: GridSize, snake: &Snake) -> Option<Position> {
        open_cell(&mut self.rng, bounds, snake)
    }
}

/// Draws a position not occupied by the snake, uniformly over all open cells.
#[must_use]
pub fn open_cell<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: GridSize,
    snake: &Snake,
) -> Option<Position> {
    if snake.len() >= bounds.total_cells() {
        return None;
    }

    let mut candidates = Vec::with_capacity(bounds.total_cells() - snake.len());

    for y in 0..i32::from(bounds.height) {
        for x in 0..i32::from(bounds.width) {
            let position = Position { x, y };
            if !snake.occupies(position) {
                candidates.push(position);
            }
        }
    }

    if candidates.is_empty() {
        return None;
    }

    let index = rng.gen_range(0..candidates.len());
    Some(candidates[index])
}
