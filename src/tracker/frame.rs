//! Wire format of the hand tracker
//!
//! The tracker process prints one JSON object per line: a list of detected
//! hands, each with a handedness label, a detection score, and 21 landmarks.
//! Decoding is lossy on purpose; a bad line costs one frame, never the game.

use serde::Deserialize;
use tracing::{debug, warn};

use crate::gesture::landmarks::LANDMARK_COUNT;
use crate::gesture::{HandFrame, Handedness, Landmark};

/// Hands scoring below this are treated as not detected.
const MIN_HAND_SCORE: f32 = 0.5;

#[derive(Debug, Deserialize)]
struct LandmarkJson {
    x: f32,
    y: f32,
    z: f32,
}

#[derive(Debug, Deserialize)]
struct HandJson {
    handedness: String,
    score: f32,
    landmarks: Vec<LandmarkJson>,
}

#[derive(Debug, Deserialize)]
struct FrameJson {
    #[serde(default)]
    hands: Vec<HandJson>,
    #[serde(default)]
    error: Option<String>,
}

/// Decode one tracker output line into at most one tracked hand.
///
/// Malformed lines and tracker-reported errors are logged and dropped.
/// A well-formed frame without a usable hand decodes to `None`, which the
/// game reads as "hand out of view".
pub fn decode_line(line: &str) -> Option<HandFrame> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let frame: FrameJson = match serde_json::from_str(line) {
        Ok(frame) => frame,
        Err(e) => {
            warn!("skipping malformed tracker line: {}", e);
            return None;
        }
    };

    if let Some(error) = frame.error {
        warn!("tracker reported error: {}", error);
        return None;
    }

    first_tracked_hand(frame.hands)
}

/// Pick the first hand that clears the score threshold and carries a full
/// landmark set.
fn first_tracked_hand(hands: Vec<HandJson>) -> Option<HandFrame> {
    for hand in hands {
        if hand.score < MIN_HAND_SCORE {
            debug!(
                "ignoring low-score hand: {} at {:.2}",
                hand.handedness, hand.score
            );
            continue;
        }

        if hand.landmarks.len() != LANDMARK_COUNT {
            warn!(
                "expected {} landmarks, got {}",
                LANDMARK_COUNT,
                hand.landmarks.len()
            );
            continue;
        }

        let Some(handedness) = Handedness::from_label(&hand.handedness) else {
            warn!("unknown handedness label: {}", hand.handedness);
            continue;
        };

        let mut landmarks = [Landmark::default(); LANDMARK_COUNT];
        for (slot, lm) in landmarks.iter_mut().zip(&hand.landmarks) {
            *slot = Landmark::new(lm.x, lm.y, lm.z);
        }

        return Some(HandFrame::new(landmarks, handedness));
    }

    None
}
