//! Hand gesture recognition
//!
//! Pure classification from tracked hand landmarks to named gestures.
//! Nothing here performs I/O; the tracker module feeds frames in and the
//! input module maps the results onto game actions.

pub mod classifier;
pub mod landmarks;

pub use classifier::{classify, Features, Gesture};
pub use landmarks::{FingerState, HandFrame, Handedness, Landmark};
