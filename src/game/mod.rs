//! Core snake engine
//!
//! All game logic lives here with no I/O or rendering dependencies: the
//! grid state machine, heading buffering, and the fixed-cadence tick
//! advance. The shell drives it from keyboard or gesture input alike.

pub mod action;
pub mod config;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use config::GameConfig;
pub use engine::{GameEngine, TickOutcome};
pub use state::{CollisionType, GameState, Phase, Position, Snake};
