//! Hand landmark scheme and per-finger geometry
//!
//! Models the 21-point hand reported by a MediaPipe-style tracker:
//! normalized landmark coordinates, handedness, and the extension test
//! that decides whether each finger is held straight or curled.

/// Landmark indices (MediaPipe hand landmark model convention)
pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_FINGER_MCP: usize = 5;
pub const INDEX_FINGER_PIP: usize = 6;
pub const INDEX_FINGER_DIP: usize = 7;
pub const INDEX_FINGER_TIP: usize = 8;
pub const MIDDLE_FINGER_MCP: usize = 9;
pub const MIDDLE_FINGER_PIP: usize = 10;
pub const MIDDLE_FINGER_DIP: usize = 11;
pub const MIDDLE_FINGER_TIP: usize = 12;
pub const RING_FINGER_MCP: usize = 13;
pub const RING_FINGER_PIP: usize = 14;
pub const RING_FINGER_DIP: usize = 15;
pub const RING_FINGER_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

/// Total number of landmarks per tracked hand.
pub const LANDMARK_COUNT: usize = 21;

/// A fingertip must rise this far above its middle joint to count as
/// extended (normalized units; smaller y is higher in the image).
const FINGER_MARGIN: f32 = 0.015;

/// Lateral margin for the thumb's extension test (normalized units).
const THUMB_MARGIN: f32 = 0.03;

/// A single tracked point with normalized coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Landmark {
    /// X coordinate, normalized to image width
    pub x: f32,
    /// Y coordinate, normalized to image height
    pub y: f32,
    /// Depth relative to the wrist
    pub z: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Which hand the tracker saw.
///
/// The tracker presents a mirrored view, so the thumb's lateral
/// extension test compares in opposite directions for the two hands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handedness {
    Left,
    Right,
}

impl Handedness {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }

    /// Parse a tracker handedness label.
    pub fn from_label(label: &str) -> Option<Handedness> {
        match label {
            "Left" | "left" => Some(Handedness::Left),
            "Right" | "right" => Some(Handedness::Right),
            _ => None,
        }
    }
}

/// One tracked frame: all 21 landmarks plus the handedness tag.
///
/// The array length carries the input contract; no further validation
/// happens downstream of construction.
#[derive(Debug, Clone, PartialEq)]
pub struct HandFrame {
    pub landmarks: [Landmark; LANDMARK_COUNT],
    pub handedness: Handedness,
}

impl HandFrame {
    pub fn new(landmarks: [Landmark; LANDMARK_COUNT], handedness: Handedness) -> Self {
        Self {
            landmarks,
            handedness,
        }
    }
}

/// Extension flags for the five fingers, derived per frame and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FingerState {
    pub thumb: bool,
    pub index: bool,
    pub middle: bool,
    pub ring: bool,
    pub pinky: bool,
}

impl FingerState {
    /// Derive extension flags from one tracked frame.
    ///
    /// The four non-thumb fingers test vertically: the tip must sit more
    /// than the margin above the PIP joint. The thumb tests laterally
    /// against its IP joint, with the comparison direction mirrored by
    /// handedness.
    pub fn from_frame(frame: &HandFrame) -> Self {
        let lm = &frame.landmarks;
        let raised = |tip: usize, pip: usize| lm[tip].y < lm[pip].y - FINGER_MARGIN;

        let thumb = match frame.handedness {
            Handedness::Right => lm[THUMB_TIP].x < lm[THUMB_IP].x - THUMB_MARGIN,
            Handedness::Left => lm[THUMB_TIP].x > lm[THUMB_IP].x + THUMB_MARGIN,
        };

        Self {
            thumb,
            index: raised(INDEX_FINGER_TIP, INDEX_FINGER_PIP),
            middle: raised(MIDDLE_FINGER_TIP, MIDDLE_FINGER_PIP),
            ring: raised(RING_FINGER_TIP, RING_FINGER_PIP),
            pinky: raised(PINKY_TIP, PINKY_PIP),
        }
    }

    /// Number of extended fingers, 0..=5.
    pub fn extended_count(&self) -> u8 {
        [self.thumb, self.index, self.middle, self.ring, self.pinky]
            .iter()
            .filter(|&&up| up)
            .count() as u8
    }
}

/// Planar Euclidean distance between two landmarks (z ignored throughout).
pub fn planar_distance(a: &Landmark, b: &Landmark) -> f32 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    (dx * dx + dy * dy).sqrt()
}

/// A frame in which every finger tests retracted, for either handedness.
#[cfg(test)]
fn curled_frame(handedness: Handedness) -> HandFrame {
    let mut lm = [Landmark::default(); LANDMARK_COUNT];
    lm[WRIST] = Landmark::new(0.52, 0.80, 0.0);

    // Thumb: tip level with the IP joint, inside the lateral margin
    lm[THUMB_CMC] = Landmark::new(0.42, 0.55, 0.0);
    lm[THUMB_MCP] = Landmark::new(0.45, 0.52, 0.0);
    lm[THUMB_IP] = Landmark::new(0.48, 0.50, 0.0);
    lm[THUMB_TIP] = Landmark::new(0.48, 0.58, 0.0);

    // Each finger column: PIP at 0.50, tip hanging below it
    for (mcp, x) in [
        (INDEX_FINGER_MCP, 0.40),
        (MIDDLE_FINGER_MCP, 0.48),
        (RING_FINGER_MCP, 0.56),
        (PINKY_MCP, 0.64),
    ] {
        lm[mcp] = Landmark::new(x, 0.55, 0.0);
        lm[mcp + 1] = Landmark::new(x, 0.50, 0.0); // PIP
        lm[mcp + 2] = Landmark::new(x, 0.47, 0.0); // DIP
        lm[mcp + 3] = Landmark::new(x, 0.60, 0.0); // TIP
    }

    HandFrame::new(lm, handedness)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landmark_scheme_bounds() {
        assert_eq!(WRIST, 0);
        assert_eq!(THUMB_TIP, 4);
        assert_eq!(INDEX_FINGER_TIP, 8);
        assert_eq!(PINKY_TIP, LANDMARK_COUNT - 1);
    }

    #[test]
    fn test_curled_frame_has_no_extended_fingers() {
        for handedness in [Handedness::Left, Handedness::Right] {
            let fingers = FingerState::from_frame(&curled_frame(handedness));
            assert_eq!(fingers, FingerState::default(), "{:?}", handedness);
            assert_eq!(fingers.extended_count(), 0);
        }
    }

    #[test]
    fn test_raised_tip_is_extended() {
        let mut frame = curled_frame(Handedness::Right);
        frame.landmarks[INDEX_FINGER_TIP].y = 0.35;

        let fingers = FingerState::from_frame(&frame);
        assert!(fingers.index);
        assert_eq!(fingers.extended_count(), 1);
    }

    #[test]
    fn test_tip_exactly_at_margin_is_not_extended() {
        let mut frame = curled_frame(Handedness::Right);
        let pip_y = frame.landmarks[INDEX_FINGER_PIP].y;
        frame.landmarks[INDEX_FINGER_TIP].y = pip_y - 0.015;

        let fingers = FingerState::from_frame(&frame);
        assert!(!fingers.index);
    }

    #[test]
    fn test_thumb_mirrors_by_handedness() {
        // Tip moved well to the left of the IP joint
        let mut right = curled_frame(Handedness::Right);
        right.landmarks[THUMB_TIP].x = right.landmarks[THUMB_IP].x - 0.10;
        assert!(FingerState::from_frame(&right).thumb);

        let mut left = curled_frame(Handedness::Left);
        left.landmarks[THUMB_TIP].x = left.landmarks[THUMB_IP].x - 0.10;
        assert!(!FingerState::from_frame(&left).thumb);

        left.landmarks[THUMB_TIP].x = left.landmarks[THUMB_IP].x + 0.20;
        assert!(FingerState::from_frame(&left).thumb);
    }

    #[test]
    fn test_thumb_inside_margin_is_not_extended() {
        let mut frame = curled_frame(Handedness::Right);
        frame.landmarks[THUMB_TIP].x = frame.landmarks[THUMB_IP].x - 0.02;
        assert!(!FingerState::from_frame(&frame).thumb);
    }

    #[test]
    fn test_planar_distance_ignores_z() {
        let a = Landmark::new(0.0, 0.0, 0.0);
        let b = Landmark::new(0.3, 0.4, 9.0);
        assert!((planar_distance(&a, &b) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_handedness_labels() {
        assert_eq!(Handedness::from_label("Left"), Some(Handedness::Left));
        assert_eq!(Handedness::from_label("right"), Some(Handedness::Right));
        assert_eq!(Handedness::from_label("both"), None);
        assert_eq!(Handedness::Left.as_str(), "left");
    }
}
