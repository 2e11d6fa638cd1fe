use std::collections::VecDeque;
use std::iter;

use crate::config::GridSize;
use crate::input::Direction;

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns true when the position lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(bounds.width)
            && self.y < i32::from(bounds.height)
    }

    /// Returns the neighbouring cell one step towards `direction`.
    #[must_use]
    pub fn stepped(self, direction: Direction) -> Self {
        let (dx, dy) = direction.unit_vector();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Snake body, head first.
///
/// The head is stored apart from the rest so a snake can never be empty.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snake {
    head: Position,
    body: VecDeque<Position>,
}

impl Snake {
    /// Creates a one-cell snake at `start`.
    #[must_use]
    pub fn new(start: Position) -> Self {
        Self {
            head: start,
            body: VecDeque::new(),
        }
    }

    /// Creates a straight snake of `len` cells trailing behind `head`, opposite to `heading`.
    #[must_use]
    pub fn straight(head: Position, heading: Direction, len: usize) -> Self {
        let trail = heading.opposite();
        let body = iter::successors(Some(head.stepped(trail)), |segment| {
            Some(segment.stepped(trail))
        })
        .take(len.saturating_sub(1))
        .collect();

        Self { head, body }
    }

    /// Creates a snake from explicit body segments (front is head).
    ///
    /// Returns `None` for an empty segment list.
    #[must_use]
    pub fn from_segments(segments: Vec<Position>) -> Option<Self> {
        let mut body = VecDeque::from(segments);
        let head = body.pop_front()?;
        Some(Self { head, body })
    }

    /// Moves the head to `new_head`. The tail is kept when `grow` is set.
    pub fn advance(&mut self, new_head: Position, grow: bool) {
        self.body.push_front(self.head);
        self.head = new_head;
        if !grow {
            let _ = self.body.pop_back();
        }
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        self.head
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.head == position || self.body.contains(&position)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len() + 1
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        iter::once(&self.head).chain(self.body.iter())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use crate::config::GridSize;
    use crate::input::Direction;

    use super::{Position, Snake};

    #[test]
    fn bounds_check_rejects_every_edge() {
        let bounds = GridSize::square(18);

        assert!(Position::new(0, 0).is_within_bounds(bounds));
        assert!(Position::new(17, 17).is_within_bounds(bounds));
        assert!(!Position::new(-1, 4).is_within_bounds(bounds));
        assert!(!Position::new(4, -1).is_within_bounds(bounds));
        assert!(!Position::new(18, 4).is_within_bounds(bounds));
        assert!(!Position::new(4, 18).is_within_bounds(bounds));
    }

    #[test]
    fn straight_snake_trails_behind_heading() {
        let snake = Snake::straight(Position::new(8, 8), Direction::Right, 3);
        let cells: Vec<Position> = snake.segments().copied().collect();

        assert_eq!(
            cells,
            vec![Position::new(8, 8), Position::new(7, 8), Position::new(6, 8)]
        );
    }

    #[test]
    fn snake_moves_one_cell_per_advance() {
        let mut snake = Snake::straight(Position::new(5, 5), Direction::Right, 3);

        snake.advance(Position::new(6, 5), false);

        assert_eq!(snake.head(), Position::new(6, 5));
        assert_eq!(snake.len(), 3);
        assert!(!snake.occupies(Position::new(3, 5)));
    }

    #[test]
    fn snake_growth_keeps_previous_tail() {
        let mut snake = Snake::new(Position::new(5, 5));

        snake.advance(Position::new(5, 4), true);

        assert_eq!(snake.len(), 2);
        assert_eq!(snake.segments().last(), Some(&Position::new(5, 5)));
    }

    #[test]
    fn segments_stay_distinct_while_moving() {
        let mut snake = Snake::straight(Position::new(2, 2), Direction::Down, 4);
        for next in [Position::new(3, 2), Position::new(3, 3), Position::new(3, 4)] {
            snake.advance(next, false);
            let unique: HashSet<Position> = snake.segments().copied().collect();
            assert_eq!(unique.len(), snake.len());
        }
    }

    #[test]
    fn empty_segment_list_is_not_a_snake() {
        assert!(Snake::from_segments(Vec::new()).is_none());
    }
}
