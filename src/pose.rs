//! Static hand pose predicates.
//!
//! Every predicate is a pure function of one frame: identical landmarks always
//! give identical answers. A geometric test that needs a landmark the tracker
//! did not deliver is `false`: a finger without base or tip is not extended,
//! and a thumb without its tip is neither out nor up.

use crate::{
    constants::{
        DEFAULT_EXTENSION_MARGIN, DEFAULT_PINCH_THRESHOLD, DEFAULT_THUMBS_UP_OFFSET,
        DEFAULT_THUMB_EXTENSION_DISTANCE, INDEX_MCP, INDEX_TIP, MIDDLE_MCP, MIDDLE_TIP,
        NO_PINCH_DISTANCE, PINKY_MCP, PINKY_TIP, RING_MCP, RING_TIP, THUMB_MCP, THUMB_TIP,
    },
    landmarks::{HandFrame, LandmarkFrame},
};
use serde::{Deserialize, Serialize};

/// Geometric thresholds used by the pose predicates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoseThresholds {
    /// How far a fingertip must sit above its base to count as extended
    pub extension_margin: f64,

    /// Thumb tip to index tip distance below which the hand is pinching
    pub pinch_threshold: f64,

    /// Thumb tip to index base distance above which the thumb is out
    pub thumb_extension_distance: f64,

    /// How far the thumb tip must sit above the thumb MCP for thumbs-up
    pub thumbs_up_offset: f64,
}

impl Default for PoseThresholds {
    fn default() -> Self {
        Self {
            extension_margin: DEFAULT_EXTENSION_MARGIN,
            pinch_threshold: DEFAULT_PINCH_THRESHOLD,
            thumb_extension_distance: DEFAULT_THUMB_EXTENSION_DISTANCE,
            thumbs_up_offset: DEFAULT_THUMBS_UP_OFFSET,
        }
    }
}

/// The four non-thumb fingers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finger {
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    /// (base, tip) landmark indices of this finger's chain
    #[must_use]
    pub const fn chain(self) -> (usize, usize) {
        match self {
            Self::Index => (INDEX_MCP, INDEX_TIP),
            Self::Middle => (MIDDLE_MCP, MIDDLE_TIP),
            Self::Ring => (RING_MCP, RING_TIP),
            Self::Pinky => (PINKY_MCP, PINKY_TIP),
        }
    }
}

/// True iff the tip at `tip` is above the base at `base` by more than `margin`.
///
/// Image y grows downward, so "above" means a smaller y.
#[must_use]
pub fn finger_extended(frame: &LandmarkFrame, base: usize, tip: usize, margin: f64) -> bool {
    match (frame.get(base), frame.get(tip)) {
        (Some(base), Some(tip)) => tip.y < base.y - margin,
        _ => false,
    }
}

/// Extension state of the four non-thumb fingers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FingerStates {
    pub index: bool,
    pub middle: bool,
    pub ring: bool,
    pub pinky: bool,
}

impl FingerStates {
    /// Evaluate all four fingers. An untracked base or tip reads as curled.
    #[must_use]
    pub fn from_frame(frame: &LandmarkFrame, margin: f64) -> Self {
        let extended = |finger: Finger| {
            let (base, tip) = finger.chain();
            finger_extended(frame, base, tip, margin)
        };
        Self {
            index: extended(Finger::Index),
            middle: extended(Finger::Middle),
            ring: extended(Finger::Ring),
            pinky: extended(Finger::Pinky),
        }
    }

    /// All four fingers extended
    #[must_use]
    pub const fn all_extended(&self) -> bool {
        self.index && self.middle && self.ring && self.pinky
    }

    /// No finger extended
    #[must_use]
    pub const fn all_curled(&self) -> bool {
        !self.index && !self.middle && !self.ring && !self.pinky
    }

    /// Index extended, middle, ring and pinky curled
    #[must_use]
    pub const fn only_index(&self) -> bool {
        self.index && !self.middle && !self.ring && !self.pinky
    }
}

/// Thumb tip to index tip distance, or 1.0 when either tip is missing
#[must_use]
pub fn pinch_distance(hand: &HandFrame) -> f64 {
    match (hand.thumb_tip(), hand.index_tip()) {
        (Some(thumb), Some(index)) => thumb.distance(&index),
        _ => NO_PINCH_DISTANCE,
    }
}

/// Pose predicates bound to a set of thresholds
#[derive(Debug, Clone, Default)]
pub struct PoseClassifier {
    thresholds: PoseThresholds,
}

impl PoseClassifier {
    /// Create a classifier with the given thresholds
    #[must_use]
    pub const fn new(thresholds: PoseThresholds) -> Self {
        Self { thresholds }
    }

    /// Thresholds in use
    #[must_use]
    pub const fn thresholds(&self) -> &PoseThresholds {
        &self.thresholds
    }

    /// Extension state of the four fingers
    #[must_use]
    pub fn finger_states(&self, hand: &HandFrame) -> FingerStates {
        FingerStates::from_frame(hand.landmarks(), self.thresholds.extension_margin)
    }

    /// Thumb and index tips closer than the pinch threshold
    #[must_use]
    pub fn is_pinching(&self, hand: &HandFrame) -> bool {
        pinch_distance(hand) < self.thresholds.pinch_threshold
    }

    /// All four fingers extended
    #[must_use]
    pub fn is_open_palm(&self, hand: &HandFrame) -> bool {
        self.finger_states(hand).all_extended()
    }

    /// No finger extended
    #[must_use]
    pub fn is_closed_fist(&self, hand: &HandFrame) -> bool {
        self.finger_states(hand).all_curled()
    }

    /// Index extended, the others curled; thumb ignored
    #[must_use]
    pub fn is_pointing_index(&self, hand: &HandFrame) -> bool {
        self.finger_states(hand).only_index()
    }

    /// Thumb pushed out away from the index base, fingers curled
    #[must_use]
    pub fn is_thumb_gesture(&self, hand: &HandFrame) -> bool {
        self.is_closed_fist(hand) && self.thumb_extended(hand.landmarks())
    }

    /// Thumb pointing up above its MCP joint, fingers curled
    #[must_use]
    pub fn is_thumbs_up(&self, hand: &HandFrame) -> bool {
        self.is_closed_fist(hand) && self.thumb_pointing_up(hand.landmarks())
    }

    /// Thumb tip further than the extension distance from the index base
    #[must_use]
    pub fn thumb_extended(&self, frame: &LandmarkFrame) -> bool {
        match (frame.get(THUMB_TIP), frame.get(THUMB_MCP), frame.get(INDEX_MCP)) {
            (Some(tip), Some(_), Some(index_base)) => {
                tip.distance(&index_base) > self.thresholds.thumb_extension_distance
            }
            _ => false,
        }
    }

    /// Thumb tip above the thumb MCP by more than the thumbs-up offset
    #[must_use]
    pub fn thumb_pointing_up(&self, frame: &LandmarkFrame) -> bool {
        match (frame.get(THUMB_TIP), frame.get(THUMB_MCP)) {
            (Some(tip), Some(base)) => tip.y < base.y - self.thresholds.thumbs_up_offset,
            _ => false,
        }
    }
}
