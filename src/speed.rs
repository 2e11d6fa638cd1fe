use crate::config::EngineConfig;

/// Returns the tick interval after one food is eaten.
///
/// The interval shrinks by `speed_step_ms` and never drops below `min_speed_ms`.
#[must_use]
pub fn next_speed(current_ms: u64, config: &EngineConfig) -> u64 {
    current_ms
        .saturating_sub(config.speed_step_ms)
        .max(config.min_speed_ms)
}
