//! Input mapping
//!
//! Keyboard events and classified gestures both reduce to game commands
//! here, so the mode loops stay free of device details.

pub mod gestures;
pub mod handler;

pub use gestures::{direction_for_count, map_gesture, FrameInput};
pub use handler::{InputHandler, KeyAction};
