use super::{
    action::Direction,
    config::GameConfig,
    state::{CollisionType, GameState, Phase, Position, Snake},
};
use rand::Rng;

/// What one call to `tick` did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickOutcome {
    /// Whether the tick took effect (false while paused or after game over)
    pub advanced: bool,
    /// Whether the snake ate food this tick
    pub ate_food: bool,
    /// Collision that terminated the run, if any
    pub collision: Option<CollisionType>,
}

/// The game engine that advances and resets game state.
///
/// Ticks are serialized by ownership: the engine and its state live on one
/// task and every mutation goes through `&mut self`.
pub struct GameEngine {
    config: GameConfig,
    rng: rand::rngs::ThreadRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            rng: rand::thread_rng(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Reset to the fixed starting state: a one-cell snake at the grid
    /// center heading right, food at the fixed starting cell, score zero.
    ///
    /// The two fixed cells are distinct and in bounds on grids of at
    /// least 3 cells per side; the CLI rejects anything smaller.
    pub fn reset(&mut self) -> GameState {
        let start = Position::new(
            (self.config.grid_width / 2) as i32,
            (self.config.grid_height / 2) as i32,
        );
        let food = Position::new(
            (self.config.grid_width * 3 / 4) as i32,
            (self.config.grid_height * 3 / 4) as i32,
        );

        GameState::new(
            Snake::new(start, Direction::Right),
            food,
            self.config.grid_width,
            self.config.grid_height,
        )
    }

    /// Advance the game by one tick.
    ///
    /// Promotes the pending heading, moves the head one cell, and either
    /// terminates the run (wall or body), grows onto food, or slides the
    /// tail forward. A no-op unless the state is Running.
    pub fn tick(&mut self, state: &mut GameState) -> TickOutcome {
        if state.phase != Phase::Running {
            return TickOutcome::default();
        }

        // Promote the buffered heading before moving
        state.snake.heading = state.snake.pending_heading;

        let new_head = state.snake.head().stepped(state.snake.heading);

        let collision = if !state.is_in_bounds(new_head) {
            Some(CollisionType::Wall)
        } else if state.snake.hits_body(new_head) {
            Some(CollisionType::SelfCollision)
        } else {
            None
        };

        state.ticks += 1;

        if collision.is_some() {
            // Body and score stay as they were immediately before the tick
            state.phase = Phase::GameOver;
            return TickOutcome {
                advanced: true,
                ate_food: false,
                collision,
            };
        }

        let ate_food = new_head == state.food;
        state.snake.advance_to(new_head, ate_food);

        if ate_food {
            state.score += self.config.food_score;
            state.food = self.place_food(state);
        }

        TickOutcome {
            advanced: true,
            ate_food,
            collision: None,
        }
    }

    /// Draw a replacement food cell uniformly over the grid.
    ///
    /// Single draw with no body-cell exclusion: relocated food can land on
    /// the snake, where it sits until the head reaches that cell.
    fn place_food(&mut self, state: &GameState) -> Position {
        Position::new(
            self.rng.gen_range(0..state.grid_width as i32),
            self.rng.gen_range(0..state.grid_height as i32),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::action::Action;

    #[test]
    fn test_reset_fixed_start() {
        let mut engine = GameEngine::new(GameConfig::default());
        let state = engine.reset();

        assert_eq!(state.snake.body, vec![Position::new(10, 10)]);
        assert_eq!(state.snake.heading, Direction::Right);
        assert_eq!(state.snake.pending_heading, Direction::Right);
        assert_eq!(state.food, Position::new(15, 15));
        assert_eq!(state.score, 0);
        assert_eq!(state.ticks, 0);
        assert_eq!(state.phase, Phase::Running);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut engine = GameEngine::new(GameConfig::default());
        let first = engine.reset();
        let second = engine.reset();
        assert_eq!(first, second);
    }

    #[test]
    fn test_one_tick_moves_head_right() {
        let mut engine = GameEngine::new(GameConfig::default());
        let mut state = engine.reset();

        let outcome = engine.tick(&mut state);

        assert!(outcome.advanced);
        assert!(!outcome.ate_food);
        assert_eq!(state.snake.body, vec![Position::new(11, 10)]);
        assert_eq!(state.food, Position::new(15, 15));
        assert_eq!(state.score, 0);
        assert_eq!(state.phase, Phase::Running);
    }

    #[test]
    fn test_heading_promoted_at_tick() {
        let mut engine = GameEngine::new(GameConfig::default());
        let mut state = engine.reset();

        state.submit(Action::Move(Direction::Up));
        assert_eq!(state.snake.heading, Direction::Right);

        engine.tick(&mut state);
        assert_eq!(state.snake.heading, Direction::Up);
        assert_eq!(state.snake.head(), Position::new(10, 9));
    }

    #[test]
    fn test_eating_grows_and_scores() {
        let mut engine = GameEngine::new(GameConfig::default());
        let mut state = engine.reset();

        // Place food directly in front of the head
        state.food = state.snake.head().stepped(state.snake.heading);
        let length_before = state.snake.len();

        let outcome = engine.tick(&mut state);

        assert!(outcome.ate_food);
        assert_eq!(state.snake.len(), length_before + 1);
        assert_eq!(state.score, 10);
        assert!(state.is_in_bounds(state.food));
    }

    #[test]
    fn test_wall_collision_preserves_state() {
        let mut engine = GameEngine::new(GameConfig::small());
        let mut state = GameState::new(
            Snake::new(Position::new(0, 5), Direction::Left),
            Position::new(8, 8),
            10,
            10,
        );
        let body_before = state.snake.body.clone();
        let score_before = state.score;

        let outcome = engine.tick(&mut state);

        assert_eq!(outcome.collision, Some(CollisionType::Wall));
        assert_eq!(state.phase, Phase::GameOver);
        assert_eq!(state.snake.body, body_before);
        assert_eq!(state.score, score_before);
    }

    #[test]
    fn test_self_collision_terminates() {
        let mut engine = GameEngine::new(GameConfig::small());
        // Four cells heading right: (5,5) (4,5) (3,5) (2,5)
        let snake = Snake {
            body: vec![
                Position::new(5, 5),
                Position::new(4, 5),
                Position::new(3, 5),
                Position::new(2, 5),
            ],
            heading: Direction::Right,
            pending_heading: Direction::Right,
        };
        let mut state = GameState::new(snake, Position::new(8, 8), 10, 10);

        // Box turn: right, down, left, then up into the body
        engine.tick(&mut state);
        state.submit(Action::Move(Direction::Down));
        engine.tick(&mut state);
        state.submit(Action::Move(Direction::Left));
        engine.tick(&mut state);
        state.submit(Action::Move(Direction::Up));
        let outcome = engine.tick(&mut state);

        assert_eq!(outcome.collision, Some(CollisionType::SelfCollision));
        assert_eq!(state.phase, Phase::GameOver);
    }

    #[test]
    fn test_tick_is_inert_while_paused() {
        let mut engine = GameEngine::new(GameConfig::default());
        let mut state = engine.reset();
        state.set_paused(true);
        let before = state.clone();

        let outcome = engine.tick(&mut state);

        assert!(!outcome.advanced);
        assert_eq!(state, before);
    }

    #[test]
    fn test_heading_buffered_while_paused_applies_on_resume() {
        let mut engine = GameEngine::new(GameConfig::default());
        let mut state = engine.reset();

        state.set_paused(true);
        state.submit(Action::Move(Direction::Down));
        engine.tick(&mut state); // inert
        assert_eq!(state.snake.head(), Position::new(10, 10));

        state.set_paused(false);
        engine.tick(&mut state);
        assert_eq!(state.snake.heading, Direction::Down);
        assert_eq!(state.snake.head(), Position::new(10, 11));
    }

    #[test]
    fn test_tick_is_inert_after_game_over() {
        let mut engine = GameEngine::new(GameConfig::small());
        let mut state = GameState::new(
            Snake::new(Position::new(0, 5), Direction::Left),
            Position::new(8, 8),
            10,
            10,
        );
        engine.tick(&mut state);
        assert_eq!(state.phase, Phase::GameOver);
        let before = state.clone();

        let outcome = engine.tick(&mut state);

        assert!(!outcome.advanced);
        assert_eq!(state, before);
    }
}
