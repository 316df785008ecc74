//! Fist/palm toggle detection.
//!
//! Remembers the last stable coarse pose so that the edges `fist -> palm` and
//! `palm -> fist` can be reported once, as pulses, rather than as levels.

/// Coarse hand pose fed into the tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoarsePose {
    Fist,
    Palm,
}

/// Last stable coarse pose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StablePose {
    /// Nothing observed since the last reset
    #[default]
    Unknown,
    Fist,
    Palm,
}

/// One-shot edge between fist and palm
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoseTransition {
    /// Hand closed after being open
    FistFromPalm,
    /// Hand opened after being closed
    PalmFromFist,
}

/// State machine over `StablePose` that emits `PoseTransition` pulses
#[derive(Debug, Clone, Default)]
pub struct TransitionTracker {
    state: StablePose,
}

impl TransitionTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an observed pose and return the edge it completes, if any
    pub fn observe(&mut self, pose: CoarsePose) -> Option<PoseTransition> {
        let (next, transition) = match (self.state, pose) {
            (StablePose::Palm, CoarsePose::Fist) => (StablePose::Fist, Some(PoseTransition::FistFromPalm)),
            (StablePose::Fist, CoarsePose::Palm) => (StablePose::Palm, Some(PoseTransition::PalmFromFist)),
            (_, CoarsePose::Fist) => (StablePose::Fist, None),
            (_, CoarsePose::Palm) => (StablePose::Palm, None),
        };
        self.state = next;
        transition
    }

    /// Current stable pose
    #[must_use]
    pub const fn state(&self) -> StablePose {
        self.state
    }

    /// Return to `Unknown`
    pub fn reset(&mut self) {
        self.state = StablePose::Unknown;
    }
}
