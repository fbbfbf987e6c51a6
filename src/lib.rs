//! Gesture Snake - a terminal snake game steered by hand gestures
//!
//! This library provides:
//! - Core game logic (game module)
//! - Hand gesture classification over tracked landmarks (gesture module)
//! - The tracker process boundary (tracker module)
//! - Keyboard and gesture-to-command mapping (input module)
//! - TUI rendering (render module)
//! - Flavor-line generation (flavor module)
//! - Player recognition from hand geometry (recognition module)
//! - Execution modes (modes module: human, gesture)

pub mod flavor;
pub mod game;
pub mod gesture;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod recognition;
pub mod render;
pub mod tracker;
