use crate::input::Direction;

/// Pointer coordinate in host pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GesturePoint {
    pub x: f32,
    pub y: f32,
}

impl GesturePoint {
    #[must_use]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Maps a pointer-down/pointer-up pair to a cardinal direction.
///
/// The dominant axis decides. Horizontal swipes have no minimum distance and
/// win only on a strict majority; vertical swipes must exceed `vertical_dead_zone`.
#[must_use]
pub fn map_gesture(
    start: GesturePoint,
    end: GesturePoint,
    vertical_dead_zone: f32,
) -> Option<Direction> {
    let dx = end.x - start.x;
    let dy = end.y - start.y;

    if dx.abs() > dy.abs() {
        return Some(if dx > 0.0 {
            Direction::Right
        } else {
            Direction::Left
        });
    }

    if dy.abs() > vertical_dead_zone {
        return Some(if dy > 0.0 {
            Direction::Down
        } else {
            Direction::Up
        });
    }

    None
}

/// Remembers where a pointer went down until it comes back up.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwipeTracker {
    start: Option<GesturePoint>,
}

impl SwipeTracker {
    pub fn begin(&mut self, point: GesturePoint) {
        self.start = Some(point);
    }

    /// Completes the swipe, returning its start and end points.
    ///
    /// A release without a matching press yields nothing.
    pub fn end(&mut self, point: GesturePoint) -> Option<(GesturePoint, GesturePoint)> {
        let start = self.start.take()?;
        Some((start, point))
    }

    /// Drops a pending press, e.g. when the pointer leaves the play area.
    pub fn cancel(&mut self) {
        self.start = None;
    }
}
