//! Hand landmark data as delivered by an external hand tracker.
//!
//! A tracker reports 21 points per hand in normalized image coordinates
//! (x and y in [0, 1], y increasing downward) plus a relative depth. Points
//! can be missing or non-finite when tracking degrades; such points are stored
//! as `None` and every consumer treats them as "not available".

use crate::{
    constants::{INDEX_TIP, MIDDLE_MCP, NUM_HAND_LANDMARKS, THUMB_TIP, WRIST},
    Error, Result,
};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// A single 3D landmark
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3 {
    /// Horizontal position, normalized to the image width
    pub x: f64,
    /// Vertical position, normalized to the image height
    pub y: f64,
    /// Relative depth
    #[serde(default)]
    pub z: f64,
}

impl Point3 {
    /// Create a new point
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Build a point from `[x, y]` or `[x, y, z]`; a missing depth is zero
    #[must_use]
    pub fn from_slice(values: &[f64]) -> Option<Self> {
        match *values {
            [x, y] => Some(Self::new(x, y, 0.0)),
            [x, y, z, ..] => Some(Self::new(x, y, z)),
            _ => None,
        }
    }

    /// Euclidean distance in 3D
    #[must_use]
    pub fn distance(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Point halfway between `self` and `other`
    #[must_use]
    pub fn midpoint(&self, other: &Self) -> Self {
        Self::new(
            (self.x + other.x) / 2.0,
            (self.y + other.y) / 2.0,
            (self.z + other.z) / 2.0,
        )
    }

    /// True if all coordinates are finite
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// The 21 landmarks of one hand for one tracker frame
#[derive(Debug, Clone, PartialEq)]
pub struct LandmarkFrame {
    points: [Option<Point3>; NUM_HAND_LANDMARKS],
}

impl LandmarkFrame {
    /// Create a frame from a complete set of landmarks
    #[must_use]
    pub fn new(points: [Point3; NUM_HAND_LANDMARKS]) -> Self {
        Self {
            points: points.map(|p| p.is_finite().then_some(p)),
        }
    }

    /// Create a frame from a slice that must hold exactly 21 landmarks
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` if the slice length is not 21.
    pub fn try_from_slice(points: &[Point3]) -> Result<Self> {
        let points: [Point3; NUM_HAND_LANDMARKS] = points.try_into().map_err(|_| {
            Error::InvalidInput(format!(
                "expected {NUM_HAND_LANDMARKS} landmarks, got {}",
                points.len()
            ))
        })?;
        Ok(Self::new(points))
    }

    /// Create a frame from possibly incomplete tracker output.
    ///
    /// Missing trailing points and non-finite points become `None`; points past
    /// index 20 are ignored.
    #[must_use]
    pub fn from_partial<I>(points: I) -> Self
    where
        I: IntoIterator<Item = Option<Point3>>,
    {
        let mut frame = Self {
            points: [None; NUM_HAND_LANDMARKS],
        };
        for (slot, point) in frame.points.iter_mut().zip(points) {
            *slot = point.filter(Point3::is_finite);
        }
        frame
    }

    /// Landmark at `index`, if present
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Point3> {
        self.points.get(index).copied().flatten()
    }

    /// Number of landmarks that are present
    #[must_use]
    pub fn present_count(&self) -> usize {
        self.points.iter().filter(|p| p.is_some()).count()
    }

    /// Midpoint of the wrist and the middle finger base
    #[must_use]
    pub fn palm_center(&self) -> Option<Point3> {
        Some(self.get(WRIST)?.midpoint(&self.get(MIDDLE_MCP)?))
    }
}

/// Which hand the tracker believes it is seeing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Handedness {
    /// Left hand
    Left,
    /// Right hand
    Right,
    /// Tracker did not say
    #[default]
    Unknown,
}

impl FromStr for Handedness {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "left" => Self::Left,
            "right" => Self::Right,
            _ => Self::Unknown,
        })
    }
}

impl fmt::Display for Handedness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Left => "Left",
            Self::Right => "Right",
            Self::Unknown => "Unknown",
        };
        f.write_str(label)
    }
}

/// One detected hand: its landmarks plus values derived from them
#[derive(Debug, Clone, PartialEq)]
pub struct HandFrame {
    landmarks: LandmarkFrame,
    handedness: Handedness,
    palm_center: Option<Point3>,
}

impl HandFrame {
    /// Wrap a landmark frame and derive the palm center
    #[must_use]
    pub fn new(landmarks: LandmarkFrame, handedness: Handedness) -> Self {
        let palm_center = landmarks.palm_center();
        Self {
            landmarks,
            handedness,
            palm_center,
        }
    }

    /// The raw landmarks
    #[must_use]
    pub const fn landmarks(&self) -> &LandmarkFrame {
        &self.landmarks
    }

    /// Reported handedness
    #[must_use]
    pub const fn handedness(&self) -> Handedness {
        self.handedness
    }

    /// Midpoint of wrist and middle finger base
    #[must_use]
    pub const fn palm_center(&self) -> Option<Point3> {
        self.palm_center
    }

    #[must_use]
    pub fn thumb_tip(&self) -> Option<Point3> {
        self.landmarks.get(THUMB_TIP)
    }

    #[must_use]
    pub fn index_tip(&self) -> Option<Point3> {
        self.landmarks.get(INDEX_TIP)
    }
}
