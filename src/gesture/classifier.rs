//! Gesture classification over one tracked hand frame
//!
//! An ordered rule table drives the whole module: each rule is a predicate
//! over per-finger extension flags and fingertip gaps, evaluated top to
//! bottom with first match winning. A counting fallback makes the
//! classifier total, so every frame yields a gesture.

use super::landmarks::{
    planar_distance, FingerState, HandFrame, INDEX_FINGER_TIP, MIDDLE_FINGER_TIP, PINKY_TIP,
    RING_FINGER_TIP, THUMB_TIP,
};

/// Thumb-to-index gap below which the hand reads as an "OK" ring.
const PINCH_MAX: f32 = 0.04;

/// Thumb-to-index gap below which the hand reads as a finger heart.
const HEART_PINCH_MAX: f32 = 0.05;

/// Fingertip gap separating "touching" pairs from the split between them.
const SPLIT_GAP: f32 = 0.05;

const FALLBACK_CONFIDENCE: f32 = 0.8;

/// A classified gesture with its display metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Gesture {
    pub name: String,
    pub glyph: &'static str,
    /// Extended-finger count for the frame, independent of which rule fired
    pub extended_fingers: u8,
    pub confidence: f32,
    pub description: &'static str,
}

/// Geometry extracted once per frame; every rule predicate reads from here.
#[derive(Debug, Clone, Copy)]
pub struct Features {
    pub fingers: FingerState,
    pub thumb_index_gap: f32,
    pub index_middle_gap: f32,
    pub middle_ring_gap: f32,
    pub ring_pinky_gap: f32,
}

impl Features {
    pub fn from_frame(frame: &HandFrame) -> Self {
        let lm = &frame.landmarks;
        let gap = |a: usize, b: usize| planar_distance(&lm[a], &lm[b]);

        Self {
            fingers: FingerState::from_frame(frame),
            thumb_index_gap: gap(THUMB_TIP, INDEX_FINGER_TIP),
            index_middle_gap: gap(INDEX_FINGER_TIP, MIDDLE_FINGER_TIP),
            middle_ring_gap: gap(MIDDLE_FINGER_TIP, RING_FINGER_TIP),
            ring_pinky_gap: gap(RING_FINGER_TIP, PINKY_TIP),
        }
    }
}

/// One entry of the cascade: a predicate plus the gesture it names.
struct Rule {
    name: &'static str,
    glyph: &'static str,
    confidence: f32,
    description: &'static str,
    matches: fn(&Features) -> bool,
}

/// The ordered cascade. Earlier rules shadow later ones, which keeps the
/// exact-shape rules above the looser pinch and count rules they overlap.
const RULES: [Rule; 11] = [
    Rule {
        name: "Thumbs Up",
        glyph: "👍",
        confidence: 0.95,
        description: "a thumbs up of approval",
        matches: is_thumbs_up,
    },
    Rule {
        name: "Peace",
        glyph: "✌️",
        confidence: 0.95,
        description: "index and middle fingers raised in a V",
        matches: is_peace,
    },
    Rule {
        name: "OK",
        glyph: "👌",
        confidence: 0.9,
        description: "thumb and index closed into a ring",
        matches: is_ok_sign,
    },
    Rule {
        name: "Rock",
        glyph: "🤘",
        confidence: 0.95,
        description: "horns thrown with index and pinky",
        matches: is_rock,
    },
    Rule {
        name: "Pointing",
        glyph: "☝️",
        confidence: 0.95,
        description: "a single index finger pointing the way",
        matches: is_pointing,
    },
    Rule {
        name: "Fist",
        glyph: "✊",
        confidence: 0.9,
        description: "a closed fist",
        matches: is_fist,
    },
    Rule {
        name: "Shaka",
        glyph: "🤙",
        confidence: 0.95,
        description: "thumb and pinky spread wide, hanging loose",
        matches: is_shaka,
    },
    Rule {
        name: "Spider-Man",
        glyph: "🤟",
        confidence: 0.95,
        description: "thumb, index and pinky out, ready to sling webs",
        matches: is_spider_man,
    },
    Rule {
        name: "Love Heart",
        glyph: "🫰",
        confidence: 0.9,
        description: "thumb and index pinched into a tiny heart",
        matches: is_love_heart,
    },
    Rule {
        name: "Vulcan",
        glyph: "🖖",
        confidence: 0.95,
        description: "fingers split down the middle in a Vulcan salute",
        matches: is_vulcan,
    },
    Rule {
        name: "High Five",
        glyph: "🖐️",
        confidence: 0.95,
        description: "an open palm with all five fingers up",
        matches: is_high_five,
    },
];

fn is_thumbs_up(f: &Features) -> bool {
    let FingerState {
        thumb,
        index,
        middle,
        ring,
        pinky,
    } = f.fingers;
    thumb && !index && !middle && !ring && !pinky
}

fn is_peace(f: &Features) -> bool {
    let FingerState {
        thumb,
        index,
        middle,
        ring,
        pinky,
    } = f.fingers;
    !thumb && index && middle && !ring && !pinky
}

fn is_ok_sign(f: &Features) -> bool {
    let FingerState {
        middle, ring, pinky, ..
    } = f.fingers;
    f.thumb_index_gap < PINCH_MAX && middle && ring && pinky
}

fn is_rock(f: &Features) -> bool {
    let FingerState {
        thumb,
        index,
        middle,
        ring,
        pinky,
    } = f.fingers;
    !thumb && index && !middle && !ring && pinky
}

fn is_pointing(f: &Features) -> bool {
    let FingerState {
        thumb,
        index,
        middle,
        ring,
        pinky,
    } = f.fingers;
    !thumb && index && !middle && !ring && !pinky
}

fn is_fist(f: &Features) -> bool {
    f.fingers.extended_count() == 0
}

fn is_shaka(f: &Features) -> bool {
    let FingerState {
        thumb,
        index,
        middle,
        ring,
        pinky,
    } = f.fingers;
    thumb && !index && !middle && !ring && pinky
}

fn is_spider_man(f: &Features) -> bool {
    let FingerState {
        thumb,
        index,
        middle,
        ring,
        pinky,
    } = f.fingers;
    thumb && index && !middle && !ring && pinky
}

fn is_love_heart(f: &Features) -> bool {
    let FingerState {
        middle, ring, pinky, ..
    } = f.fingers;
    f.thumb_index_gap < HEART_PINCH_MAX && !middle && !ring && !pinky
}

fn is_vulcan(f: &Features) -> bool {
    let FingerState {
        index,
        middle,
        ring,
        pinky,
        ..
    } = f.fingers;
    index
        && middle
        && ring
        && pinky
        && f.index_middle_gap < SPLIT_GAP
        && f.ring_pinky_gap < SPLIT_GAP
        && f.middle_ring_gap > SPLIT_GAP
}

fn is_high_five(f: &Features) -> bool {
    f.fingers.extended_count() == 5
}

/// Classify one tracked frame. Total over all inputs: when no named rule
/// matches, the counting fallback reports the raised-finger count.
pub fn classify(frame: &HandFrame) -> Gesture {
    let features = Features::from_frame(frame);
    let count = features.fingers.extended_count();

    for rule in &RULES {
        if (rule.matches)(&features) {
            return Gesture {
                name: rule.name.to_string(),
                glyph: rule.glyph,
                extended_fingers: count,
                confidence: rule.confidence,
                description: rule.description,
            };
        }
    }

    counting_fallback(count)
}

fn counting_fallback(count: u8) -> Gesture {
    let name = if count == 1 {
        "1 Finger".to_string()
    } else {
        format!("{count} Fingers")
    };

    Gesture {
        name,
        glyph: count_glyph(count),
        extended_fingers: count,
        confidence: FALLBACK_CONFIDENCE,
        description: "a hand counting on raised fingers",
    }
}

fn count_glyph(count: u8) -> &'static str {
    match count {
        1 => "☝️",
        2 => "✌️",
        3 => "🤟",
        4 => "🖖",
        5 => "🖐️",
        _ => "👋",
    }
}
