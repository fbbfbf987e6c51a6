//! Hand tracker process boundary
//!
//! The tracker itself runs out of process and prints newline-delimited
//! JSON. This module decodes that stream and turns it into a channel of
//! typed hand frames for the gesture mode.

pub mod frame;
pub mod source;

pub use frame::decode_line;
pub use source::{FrameSource, FRAME_CHANNEL_DEPTH};
