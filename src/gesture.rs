//! Gesture labels published to consumers.

use crate::{
    motion::{NavDirection, SwipeDirection},
    transition::PoseTransition,
    Error,
};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// A recognized gesture. At most one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Gesture {
    Pinch,
    Palm,
    Fist,
    FistFromPalm,
    PalmFromFist,
    PointingIndex,
    PointingNavForward,
    ThumbGesture,
    ThumbNavBackward,
    ThumbsUp,
    ThumbsNavForward,
    ThumbsNavBackward,
    SwipeLeft,
    SwipeRight,
    SwipeUp,
    SwipeDown,
    /// Hand present but no specific pose recognized
    Pointing,
}

impl Gesture {
    /// Every label
    pub const ALL: [Self; 17] = [
        Self::Pinch,
        Self::Palm,
        Self::Fist,
        Self::FistFromPalm,
        Self::PalmFromFist,
        Self::PointingIndex,
        Self::PointingNavForward,
        Self::ThumbGesture,
        Self::ThumbNavBackward,
        Self::ThumbsUp,
        Self::ThumbsNavForward,
        Self::ThumbsNavBackward,
        Self::SwipeLeft,
        Self::SwipeRight,
        Self::SwipeUp,
        Self::SwipeDown,
        Self::Pointing,
    ];

    /// Wire name of the label
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pinch => "pinch",
            Self::Palm => "palm",
            Self::Fist => "fist",
            Self::FistFromPalm => "fist-from-palm",
            Self::PalmFromFist => "palm-from-fist",
            Self::PointingIndex => "pointing-index",
            Self::PointingNavForward => "pointing-nav-forward",
            Self::ThumbGesture => "thumb-gesture",
            Self::ThumbNavBackward => "thumb-nav-backward",
            Self::ThumbsUp => "thumbs-up",
            Self::ThumbsNavForward => "thumbs-nav-forward",
            Self::ThumbsNavBackward => "thumbs-nav-backward",
            Self::SwipeLeft => "swipe-left",
            Self::SwipeRight => "swipe-right",
            Self::SwipeUp => "swipe-up",
            Self::SwipeDown => "swipe-down",
            Self::Pointing => "pointing",
        }
    }

    /// Navigation events produced by pose-gated motion
    #[must_use]
    pub const fn is_navigation(self) -> bool {
        matches!(
            self,
            Self::PointingNavForward | Self::ThumbNavBackward | Self::ThumbsNavForward | Self::ThumbsNavBackward
        )
    }

    #[must_use]
    pub const fn is_swipe(self) -> bool {
        matches!(self, Self::SwipeLeft | Self::SwipeRight | Self::SwipeUp | Self::SwipeDown)
    }

    #[must_use]
    pub const fn is_transition(self) -> bool {
        matches!(self, Self::FistFromPalm | Self::PalmFromFist)
    }

    /// Edge-triggered labels; everything else is a steady pose
    #[must_use]
    pub const fn is_pulse(self) -> bool {
        self.is_navigation() || self.is_swipe() || self.is_transition()
    }

    /// Direction of a navigation label
    #[must_use]
    pub const fn nav_direction(self) -> Option<NavDirection> {
        match self {
            Self::PointingNavForward | Self::ThumbsNavForward => Some(NavDirection::Forward),
            Self::ThumbNavBackward | Self::ThumbsNavBackward => Some(NavDirection::Backward),
            _ => None,
        }
    }
}

impl From<SwipeDirection> for Gesture {
    fn from(direction: SwipeDirection) -> Self {
        match direction {
            SwipeDirection::Left => Self::SwipeLeft,
            SwipeDirection::Right => Self::SwipeRight,
            SwipeDirection::Up => Self::SwipeUp,
            SwipeDirection::Down => Self::SwipeDown,
        }
    }
}

impl From<PoseTransition> for Gesture {
    fn from(transition: PoseTransition) -> Self {
        match transition {
            PoseTransition::FistFromPalm => Self::FistFromPalm,
            PoseTransition::PalmFromFist => Self::PalmFromFist,
        }
    }
}

impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gesture {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| Error::InvalidInput(format!("Unknown gesture: {s}")))
    }
}
