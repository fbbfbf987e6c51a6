/// Cardinal heading on the game grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// The 180-degree reverse of this heading.
    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Returns true if `other` is the exact reverse of this heading.
    pub fn is_opposite(&self, other: Direction) -> bool {
        other == self.opposite()
    }

    /// Unit grid delta (dx, dy) for one step along this heading.
    /// Smaller y is the top of the grid.
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// One heading signal delivered to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Request a new heading to take effect at the next tick.
    Move(Direction),
    /// No new signal; the buffered pending heading is retained as-is.
    Continue,
}

impl From<Direction> for Action {
    fn from(direction: Direction) -> Self {
        Action::Move(direction)
    }
}

impl From<Option<Direction>> for Action {
    fn from(direction: Option<Direction>) -> Self {
        match direction {
            Some(d) => Action::Move(d),
            None => Action::Continue,
        }
    }
}
