use super::action::{Action, Direction};

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighboring cell one step along `direction`
    pub fn stepped(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Type of collision that ended a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Head moved outside the grid bounds
    Wall,
    /// Head moved onto an existing body cell
    SelfCollision,
}

/// Lifecycle phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Ticks advance the snake
    Running,
    /// Ticks are inert until resumed
    Paused,
    /// Terminal; only an explicit reset leaves this phase
    GameOver,
}

/// The snake: body cells plus its visible and buffered headings
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body cells, head at index 0
    pub body: Vec<Position>,
    /// Heading the snake is currently moving along
    pub heading: Direction,
    /// Most recently accepted heading request; promoted at the next tick
    pub pending_heading: Direction,
}

impl Snake {
    /// Create a one-cell snake at `head` moving along `heading`
    pub fn new(head: Position, heading: Direction) -> Self {
        Self {
            body: vec![head],
            heading,
            pending_heading: heading,
        }
    }

    /// The head cell
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Body cells excluding the head
    pub fn body_segments(&self) -> &[Position] {
        &self.body[1..]
    }

    /// Whether `pos` lands on an existing body cell (head excluded)
    pub fn hits_body(&self, pos: Position) -> bool {
        self.body_segments().contains(&pos)
    }

    /// Prepend `new_head`, keeping the tail when `grow` is set
    pub fn advance_to(&mut self, new_head: Position, grow: bool) {
        self.body.insert(0, new_head);
        if !grow {
            self.body.pop();
        }
    }

    /// Number of body cells
    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Complete game state, owned by the caller and mutated only through
/// `submit`, `set_paused`, the engine's `tick`, and an explicit reset.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Position,
    pub grid_width: usize,
    pub grid_height: usize,
    pub score: u32,
    pub ticks: u32,
    pub phase: Phase,
}

impl GameState {
    /// Create a fresh running state
    pub fn new(snake: Snake, food: Position, grid_width: usize, grid_height: usize) -> Self {
        Self {
            snake,
            food,
            grid_width,
            grid_height,
            score: 0,
            ticks: 0,
            phase: Phase::Running,
        }
    }

    /// Buffer a heading request.
    ///
    /// `Move` updates the pending heading immediately unless it is the exact
    /// reverse of the current heading; `Continue` retains whatever was last
    /// accepted. Requests are accepted in every phase; buffered headings
    /// stay inert until a running tick promotes them.
    pub fn submit(&mut self, action: Action) {
        if let Action::Move(requested) = action {
            if !self.snake.heading.is_opposite(requested) {
                self.snake.pending_heading = requested;
            }
        }
    }

    /// Apply the level-triggered pause signal.
    ///
    /// Toggles between Running and Paused; has no effect once the run is
    /// over. Idempotent for a repeated level.
    pub fn set_paused(&mut self, paused: bool) {
        match (self.phase, paused) {
            (Phase::Running, true) => self.phase = Phase::Paused,
            (Phase::Paused, false) => self.phase = Phase::Running,
            _ => {}
        }
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0
            && pos.x < self.grid_width as i32
            && pos.y >= 0
            && pos.y < self.grid_height as i32
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn is_paused(&self) -> bool {
        self.phase == Phase::Paused
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }
}
