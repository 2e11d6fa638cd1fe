use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns a square grid with `size` cells per side.
    #[must_use]
    pub fn square(size: u16) -> Self {
        Self {
            width: size,
            height: size,
        }
    }

    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

/// Default cells per grid side.
pub const DEFAULT_GRID_SIZE: u16 = 18;

/// Smallest grid that still fits the three-segment starting snake.
pub const MIN_GRID_SIZE: u16 = 6;

/// Largest grid whose two-column board and border still fit a `u16` terminal width.
pub const MAX_GRID_SIZE: u16 = 255;

/// Cosmetic cell edge in pixels, used to scale pointer gestures.
pub const DEFAULT_CELL_SIZE_PX: u16 = 16;

/// Tick interval of a fresh session in milliseconds.
pub const DEFAULT_INITIAL_SPEED_MS: u64 = 160;

/// Interval reduction per food eaten in milliseconds.
pub const DEFAULT_SPEED_STEP_MS: u64 = 8;

/// Floor for the tick interval in milliseconds.
pub const DEFAULT_MIN_SPEED_MS: u64 = 80;

/// Score granted per food eaten.
pub const DEFAULT_SCORE_PER_FOOD: u32 = 10;

/// Minimum vertical swipe displacement in pixels.
pub const DEFAULT_VERTICAL_DEAD_ZONE_PX: f32 = 12.0;

/// Every tunable of the engine.
///
/// Missing fields in a config file fall back to the defaults above.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub grid_size: u16,
    pub cell_size_px: u16,
    pub initial_speed_ms: u64,
    pub speed_step_ms: u64,
    pub min_speed_ms: u64,
    pub score_per_food: u32,
    pub vertical_dead_zone_px: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            cell_size_px: DEFAULT_CELL_SIZE_PX,
            initial_speed_ms: DEFAULT_INITIAL_SPEED_MS,
            speed_step_ms: DEFAULT_SPEED_STEP_MS,
            min_speed_ms: DEFAULT_MIN_SPEED_MS,
            score_per_food: DEFAULT_SCORE_PER_FOOD,
            vertical_dead_zone_px: DEFAULT_VERTICAL_DEAD_ZONE_PX,
        }
    }
}

impl EngineConfig {
    /// Reads a JSON config file and validates it.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Checks the invariants the engine relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size < MIN_GRID_SIZE {
            return Err(ConfigError::GridTooSmall(self.grid_size));
        }
        if self.grid_size > MAX_GRID_SIZE {
            return Err(ConfigError::GridTooLarge(self.grid_size));
        }
        if self.initial_speed_ms == 0 || self.min_speed_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        if self.min_speed_ms > self.initial_speed_ms {
            return Err(ConfigError::FloorAboveInitial {
                min_ms: self.min_speed_ms,
                initial_ms: self.initial_speed_ms,
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn grid(&self) -> GridSize {
        GridSize::square(self.grid_size)
    }
}
