//! Player recognition over hand geometry
//!
//! Players enroll offline by dropping one NDJSON tracker recording per
//! person into a profile directory; each recording reduces to a geometric
//! signature of that hand. Live frames are matched against the stored
//! signatures by nearest distance, and anything beyond the tolerance
//! reads as Unknown.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::gesture::HandFrame;
use crate::gesture::landmarks::{
    INDEX_FINGER_TIP, MIDDLE_FINGER_TIP, PINKY_TIP, RING_FINGER_TIP, THUMB_TIP, WRIST,
    planar_distance,
};
use crate::tracker::decode_line;

/// Signature distance above which the nearest profile is rejected.
const MATCH_TOLERANCE: f32 = 0.15;

/// Features per signature: five wrist-to-fingertip reaches plus four
/// neighboring fingertip gaps.
const SIGNATURE_DIMS: usize = 9;

/// Geometric fingerprint of one tracked hand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Signature([f32; SIGNATURE_DIMS]);

impl Signature {
    pub fn from_frame(frame: &HandFrame) -> Self {
        let lm = &frame.landmarks;
        let d = |a: usize, b: usize| planar_distance(&lm[a], &lm[b]);

        Self([
            d(WRIST, THUMB_TIP),
            d(WRIST, INDEX_FINGER_TIP),
            d(WRIST, MIDDLE_FINGER_TIP),
            d(WRIST, RING_FINGER_TIP),
            d(WRIST, PINKY_TIP),
            d(THUMB_TIP, INDEX_FINGER_TIP),
            d(INDEX_FINGER_TIP, MIDDLE_FINGER_TIP),
            d(MIDDLE_FINGER_TIP, RING_FINGER_TIP),
            d(RING_FINGER_TIP, PINKY_TIP),
        ])
    }

    /// Euclidean distance between two signatures.
    fn distance(&self, other: &Signature) -> f32 {
        self.0
            .iter()
            .zip(&other.0)
            .map(|(a, b)| (a - b) * (a - b))
            .sum::<f32>()
            .sqrt()
    }

    /// Component-wise mean over a non-empty set of samples.
    fn mean(samples: &[Signature]) -> Signature {
        let mut acc = [0.0f32; SIGNATURE_DIMS];
        for sample in samples {
            for (slot, value) in acc.iter_mut().zip(&sample.0) {
                *slot += value;
            }
        }
        let n = samples.len() as f32;
        for slot in &mut acc {
            *slot /= n;
        }
        Signature(acc)
    }
}

/// One enrolled player: a display name and the mean signature of their
/// recording.
#[derive(Debug, Clone)]
pub struct Profile {
    pub name: String,
    signature: Signature,
}

/// Who the tracked hand belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    Player(String),
    Unknown,
}

impl Identity {
    pub fn label(&self) -> &str {
        match self {
            Identity::Player(name) => name,
            Identity::Unknown => "Unknown",
        }
    }
}

/// The enrolled players, loaded once at startup.
#[derive(Debug)]
pub struct ProfileStore {
    profiles: Vec<Profile>,
}

impl ProfileStore {
    /// Load every `.ndjson` recording in `dir`; the file stem names the
    /// player. Recordings without a single decodable frame are skipped.
    ///
    /// An empty store is allowed: every hand then reads as Unknown.
    pub async fn load(dir: &Path) -> Result<ProfileStore> {
        let mut entries = tokio::fs::read_dir(dir)
            .await
            .with_context(|| format!("failed to read profile directory {}", dir.display()))?;

        let mut profiles = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("ndjson") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            let name = display_name(stem);

            let contents = tokio::fs::read_to_string(&path)
                .await
                .with_context(|| format!("failed to read profile {}", path.display()))?;
            let samples: Vec<Signature> = contents
                .lines()
                .filter_map(decode_line)
                .map(|frame| Signature::from_frame(&frame))
                .collect();

            if samples.is_empty() {
                warn!("no decodable frames in {}, skipping", path.display());
                continue;
            }

            info!("enrolled {} from {} frames", name, samples.len());
            profiles.push(Profile {
                name,
                signature: Signature::mean(&samples),
            });
        }

        if profiles.is_empty() {
            warn!("no profiles in {}, every hand will read Unknown", dir.display());
        }

        Ok(ProfileStore { profiles })
    }

    /// Match a tracked hand against the enrolled players.
    ///
    /// The nearest signature wins if its distance stays inside the
    /// tolerance; a farther hand, or an empty store, reads as Unknown.
    pub fn identify(&self, frame: &HandFrame) -> Identity {
        let signature = Signature::from_frame(frame);

        let nearest = self
            .profiles
            .iter()
            .map(|profile| (profile, profile.signature.distance(&signature)))
            .min_by(|(_, a), (_, b)| a.total_cmp(b));

        match nearest {
            Some((profile, distance)) if distance <= MATCH_TOLERANCE => {
                Identity::Player(profile.name.clone())
            }
            _ => Identity::Unknown,
        }
    }
}

/// File stem to display name: underscores become spaces, words are
/// title-cased.
fn display_name(stem: &str) -> String {
    stem.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
