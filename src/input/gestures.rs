//! Mapping from classified gestures to game commands

use crate::game::Direction;
use crate::gesture::Gesture;

/// Gesture name that holds the game paused while it stays on screen.
const PAUSE_GESTURE: &str = "Fist";

/// Per-frame control derived from one classified gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameInput {
    pub heading: Option<Direction>,
    pub pause: bool,
}

/// Steering table: raised-finger count to requested heading.
///
/// Open-palm and closed-hand counts steer nothing, so the snake keeps
/// its heading while the player's hand is at rest.
pub fn direction_for_count(count: u8) -> Option<Direction> {
    match count {
        1 => Some(Direction::Up),
        2 => Some(Direction::Down),
        3 => Some(Direction::Right),
        4 => Some(Direction::Left),
        _ => None,
    }
}

/// Map one classified gesture onto per-frame game input.
///
/// Steering goes by finger count alone: "Peace" and a plain two-finger
/// count both turn the snake down. Only the fist carries extra meaning,
/// holding the game paused for as long as it is shown.
pub fn map_gesture(gesture: &Gesture) -> FrameInput {
    if gesture.name == PAUSE_GESTURE {
        return FrameInput {
            heading: None,
            pause: true,
        };
    }

    FrameInput {
        heading: direction_for_count(gesture.extended_fingers),
        pause: false,
    }
}
