/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Returns the one-cell offset `(dx, dy)` for this direction. `y` grows downward.
    #[must_use]
    pub fn unit_vector(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    /// Maps a host key name (`"ArrowUp"`, `"w"`, ...) to a direction.
    ///
    /// Matching is case-insensitive. Unknown keys map to `None` and must not
    /// reach the mailbox.
    #[must_use]
    pub fn from_key_name(key: &str) -> Option<Self> {
        match key.to_ascii_lowercase().as_str() {
            "arrowup" | "w" => Some(Self::Up),
            "arrowdown" | "s" => Some(Self::Down),
            "arrowleft" | "a" => Some(Self::Left),
            "arrowright" | "d" => Some(Self::Right),
            _ => None,
        }
    }
}

/// High-level input events consumed by the host loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    Pause,
    Reset,
    Quit,
}

/// Returns whether a direction change is legal (no immediate 180° turns).
///
/// A one-segment snake has no body to turn into, so any change is legal.
#[must_use]
pub fn direction_change_is_valid(current: Direction, next: Direction, snake_len: usize) -> bool {
    snake_len <= 1 || next != current.opposite()
}

/// Single-slot overwrite buffer for the most recent requested direction.
///
/// Reading does not clear the slot: without a new write the snake keeps
/// heading the way the slot already says.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct DirectionMailbox {
    slot: Direction,
}

impl DirectionMailbox {
    #[must_use]
    pub fn new(initial: Direction) -> Self {
        Self { slot: initial }
    }

    /// Overwrites the pending direction. Last write before a tick wins.
    pub fn queue(&mut self, direction: Direction) {
        self.slot = direction;
    }

    /// Returns the pending direction without clearing it.
    #[must_use]
    pub fn peek(self) -> Direction {
        self.slot
    }
}

#[cfg(test)]
mod tests {
    use super::{direction_change_is_valid, Direction, DirectionMailbox};

    #[test]
    fn opposite_direction_is_correct() {
        assert_eq!(Direction::Up.opposite(), Direction::Down);
        assert_eq!(Direction::Down.opposite(), Direction::Up);
        assert_eq!(Direction::Left.opposite(), Direction::Right);
        assert_eq!(Direction::Right.opposite(), Direction::Left);
    }

    #[test]
    fn reversal_rejected_only_with_a_body() {
        assert!(!direction_change_is_valid(Direction::Right, Direction::Left, 3));
        assert!(!direction_change_is_valid(Direction::Up, Direction::Down, 2));
        assert!(direction_change_is_valid(Direction::Up, Direction::Left, 3));
        assert!(direction_change_is_valid(Direction::Right, Direction::Left, 1));
    }

    #[test]
    fn key_names_cover_arrows_and_wasd() {
        assert_eq!(Direction::from_key_name("ArrowUp"), Some(Direction::Up));
        assert_eq!(Direction::from_key_name("S"), Some(Direction::Down));
        assert_eq!(Direction::from_key_name("a"), Some(Direction::Left));
        assert_eq!(Direction::from_key_name("ARROWRIGHT"), Some(Direction::Right));
        assert_eq!(Direction::from_key_name("x"), None);
        assert_eq!(Direction::from_key_name("Enter"), None);
    }

    #[test]
    fn mailbox_last_write_wins_and_persists() {
        let mut mailbox = DirectionMailbox::new(Direction::Right);
        assert_eq!(mailbox.peek(), Direction::Right);

        mailbox.queue(Direction::Up);
        mailbox.queue(Direction::Left);
        assert_eq!(mailbox.peek(), Direction::Left);
        assert_eq!(mailbox.peek(), Direction::Left);
    }
}
