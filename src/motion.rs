//! Palm motion tracking: a short position history and the velocity based
//! detectors built on it (free swipes and pose-gated navigation).

use crate::constants::{
    DEFAULT_HISTORY_CAPACITY, DEFAULT_NAV_COOLDOWN_MS, DEFAULT_POINTING_NAV_THRESHOLD,
    DEFAULT_SWIPE_THRESHOLD, DEFAULT_THUMBS_NAV_THRESHOLD, DEFAULT_THUMB_NAV_THRESHOLD,
    DEFAULT_VELOCITY_WINDOW,
};
use log::trace;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Motion detection parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionSettings {
    /// Number of palm samples kept
    pub history_capacity: usize,

    /// Number of most recent samples used for velocity
    pub velocity_window: usize,

    /// Minimum speed for a swipe (normalized units per second)
    pub swipe_threshold: f64,

    /// Minimum horizontal speed for pointing navigation
    pub pointing_nav_threshold: f64,

    /// Minimum horizontal speed for thumb navigation
    pub thumb_nav_threshold: f64,

    /// Minimum horizontal speed for thumbs-up navigation
    pub thumbs_nav_threshold: f64,

    /// Minimum time between two events of the same navigation detector
    pub nav_cooldown_ms: u64,
}

impl Default for MotionSettings {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            velocity_window: DEFAULT_VELOCITY_WINDOW,
            swipe_threshold: DEFAULT_SWIPE_THRESHOLD,
            pointing_nav_threshold: DEFAULT_POINTING_NAV_THRESHOLD,
            thumb_nav_threshold: DEFAULT_THUMB_NAV_THRESHOLD,
            thumbs_nav_threshold: DEFAULT_THUMBS_NAV_THRESHOLD,
            nav_cooldown_ms: DEFAULT_NAV_COOLDOWN_MS,
        }
    }
}

/// One palm center observation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionSample {
    pub x: f64,
    pub y: f64,
    pub timestamp_ms: u64,
}

/// Velocity in normalized units per second
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Velocity {
    pub x: f64,
    pub y: f64,
}

/// Bounded FIFO of palm center samples
#[derive(Debug, Clone)]
pub struct MotionHistory {
    capacity: usize,
    samples: VecDeque<MotionSample>,
}

impl MotionHistory {
    /// Create an empty history holding at most `capacity` samples
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            samples: VecDeque::with_capacity(capacity),
        }
    }

    /// Append a sample, evicting the oldest one when full
    pub fn push(&mut self, x: f64, y: f64, timestamp_ms: u64) {
        if self.capacity == 0 {
            return;
        }
        if self.samples.len() >= self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(MotionSample { x, y, timestamp_ms });
    }

    /// Drop every sample
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Samples from oldest to newest
    pub fn samples(&self) -> impl Iterator<Item = &MotionSample> {
        self.samples.iter()
    }

    /// Velocity between the oldest and newest of the last `window` samples.
    ///
    /// `None` until `window` samples are available, or when they all share one
    /// timestamp.
    #[must_use]
    pub fn velocity(&self, window: usize) -> Option<Velocity> {
        if window < 2 || self.samples.len() < window {
            return None;
        }
        let oldest = self.samples.get(self.samples.len() - window)?;
        let newest = self.samples.back()?;

        let elapsed_ms = newest.timestamp_ms.checked_sub(oldest.timestamp_ms)?;
        if elapsed_ms == 0 {
            return None;
        }

        #[allow(clippy::cast_precision_loss)] // millisecond spans are far below 2^52
        let elapsed = elapsed_ms as f64;
        let velocity = Velocity {
            x: (newest.x - oldest.x) / elapsed * 1000.0,
            y: (newest.y - oldest.y) / elapsed * 1000.0,
        };
        trace!("Palm velocity over {} ms: ({:.3}, {:.3})", elapsed_ms, velocity.x, velocity.y);
        Some(velocity)
    }
}

impl Default for MotionHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

/// Direction of a free swipe, in raw (unmirrored) image space
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    Left,
    Right,
    Up,
    Down,
}

/// Detects fast palm movement along the dominant axis
#[derive(Debug, Clone)]
pub struct SwipeDetector {
    threshold: f64,
    window: usize,
}

impl SwipeDetector {
    /// Create a swipe detector
    #[must_use]
    pub const fn new(threshold: f64, window: usize) -> Self {
        Self { threshold, window }
    }

    /// Swipe direction if the recent motion is fast enough
    #[must_use]
    pub fn detect(&self, history: &MotionHistory) -> Option<SwipeDirection> {
        let velocity = history.velocity(self.window)?;
        let (vx, vy) = (velocity.x.abs(), velocity.y.abs());

        if vx > self.threshold && vx > vy {
            return Some(if velocity.x > 0.0 {
                SwipeDirection::Right
            } else {
                SwipeDirection::Left
            });
        }
        if vy > self.threshold && vy > vx {
            return Some(if velocity.y > 0.0 {
                SwipeDirection::Down
            } else {
                SwipeDirection::Up
            });
        }
        None
    }
}

/// Navigation direction reported to the consumer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavDirection {
    Forward,
    Backward,
}

/// How a navigation detector turns horizontal motion into a direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationRule {
    /// Any fast motion navigates forward
    AlwaysForward,
    /// Any fast motion navigates backward
    AlwaysBackward,
    /// Direction follows the motion on a mirrored display: raw rightward
    /// motion is backward, raw leftward motion is forward
    MirroredHorizontal,
}

/// Pose-gated horizontal navigation with a cooldown
#[derive(Debug, Clone)]
pub struct NavigationDetector {
    rule: NavigationRule,
    threshold: f64,
    window: usize,
    cooldown_ms: u64,
    last_fired_ms: Option<u64>,
}

impl NavigationDetector {
    /// Create a navigation detector
    #[must_use]
    pub const fn new(rule: NavigationRule, threshold: f64, window: usize, cooldown_ms: u64) -> Self {
        Self {
            rule,
            threshold,
            window,
            cooldown_ms,
            last_fired_ms: None,
        }
    }

    /// Check the history for a navigation event at `now_ms`.
    ///
    /// A successful detection starts the cooldown. Clearing the history is
    /// left to the caller.
    pub fn detect(&mut self, history: &MotionHistory, now_ms: u64) -> Option<NavDirection> {
        if self.in_cooldown(now_ms) {
            return None;
        }
        let velocity = history.velocity(self.window)?;
        if velocity.x.abs() <= self.threshold {
            return None;
        }

        self.last_fired_ms = Some(now_ms);
        Some(match self.rule {
            NavigationRule::AlwaysForward => NavDirection::Forward,
            NavigationRule::AlwaysBackward => NavDirection::Backward,
            NavigationRule::MirroredHorizontal if velocity.x > 0.0 => NavDirection::Backward,
            NavigationRule::MirroredHorizontal => NavDirection::Forward,
        })
    }

    /// True while the last event is younger than the cooldown
    #[must_use]
    pub fn in_cooldown(&self, now_ms: u64) -> bool {
        self.last_fired_ms
            .is_some_and(|fired| now_ms.saturating_sub(fired) < self.cooldown_ms)
    }

    /// Forget the last event
    pub fn reset(&mut self) {
        self.last_fired_ms = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history_with(samples: &[(f64, f64, u64)]) -> MotionHistory {
        let mut history = MotionHistory::new(10);
        for &(x, y, t) in samples {
            history.push(x, y, t);
        }
        history
    }

    #[test]
    fn test_history_evicts_oldest() {
        let mut history = MotionHistory::new(3);
        for i in 0..5u32 {
            history.push(f64::from(i), 0.0, u64::from(i));
        }
        assert_eq!(history.len(), 3);
        let first = history.samples().next().unwrap();
        assert_eq!(first.timestamp_ms, 2);
    }

    #[test]
    fn test_velocity_uses_last_window() {
        // Stale sample far in the past is outside the window
        let history = history_with(&[
            (0.9, 0.5, 0),
            (0.2, 0.5, 1000),
            (0.275, 0.5, 1025),
            (0.35, 0.5, 1050),
            (0.425, 0.5, 1075),
            (0.5, 0.5, 1100),
        ]);
        let velocity = history.velocity(5).unwrap();
        assert!((velocity.x - 3.0).abs() < 1e-9);
        assert!(velocity.y.abs() < 1e-9);
    }

    #[test]
    fn test_velocity_needs_full_window() {
        let history = history_with(&[(0.1, 0.1, 0), (0.2, 0.2, 10)]);
        assert!(history.velocity(5).is_none());
    }

    #[test]
    fn test_velocity_zero_span() {
        let history = history_with(&[(0.1, 0.1, 5), (0.2, 0.1, 5), (0.3, 0.1, 5)]);
        assert!(history.velocity(3).is_none());
    }

    #[test]
    fn test_swipe_dominant_axis() {
        let detector = SwipeDetector::new(1.5, 5);

        let right = history_with(&[(0.1, 0.5, 0), (0.15, 0.5, 25), (0.2, 0.5, 50), (0.25, 0.5, 75), (0.3, 0.5, 100)]);
        assert_eq!(detector.detect(&right), Some(SwipeDirection::Right));

        let up = history_with(&[(0.5, 0.8, 0), (0.5, 0.75, 25), (0.5, 0.7, 50), (0.5, 0.65, 75), (0.5, 0.6, 100)]);
        assert_eq!(detector.detect(&up), Some(SwipeDirection::Up));

        let slow = history_with(&[(0.5, 0.5, 0), (0.51, 0.5, 25), (0.52, 0.5, 50), (0.53, 0.5, 75), (0.54, 0.5, 100)]);
        assert_eq!(detector.detect(&slow), None);
    }

    #[test]
    fn test_navigation_cooldown() {
        let mut detector = NavigationDetector::new(NavigationRule::AlwaysForward, 1.5, 5, 500);
        let fast = history_with(&[(0.2, 0.5, 0), (0.275, 0.5, 25), (0.35, 0.5, 50), (0.425, 0.5, 75), (0.5, 0.5, 100)]);

        assert_eq!(detector.detect(&fast, 100), Some(NavDirection::Forward));
        assert!(detector.in_cooldown(599));
        assert_eq!(detector.detect(&fast, 599), None);
        assert_eq!(detector.detect(&fast, 600), Some(NavDirection::Forward));

        detector.reset();
        assert!(!detector.in_cooldown(601));
    }

    #[test]
    fn test_mirrored_navigation_direction() {
        let mut detector = NavigationDetector::new(NavigationRule::MirroredHorizontal, 2.0, 5, 500);
        let rightward = history_with(&[(0.2, 0.5, 0), (0.275, 0.5, 25), (0.35, 0.5, 50), (0.425, 0.5, 75), (0.5, 0.5, 100)]);
        assert_eq!(detector.detect(&rightward, 100), Some(NavDirection::Backward));

        detector.reset();
        let leftward = history_with(&[(0.5, 0.5, 0), (0.425, 0.5, 25), (0.35, 0.5, 50), (0.275, 0.5, 75), (0.2, 0.5, 100)]);
        assert_eq!(detector.detect(&leftward, 100), Some(NavDirection::Forward));
    }

    #[test]
    fn test_navigation_below_threshold() {
        let mut detector = NavigationDetector::new(NavigationRule::AlwaysBackward, 2.0, 5, 500);
        // 1.9 units per second
        let history = history_with(&[(0.2, 0.5, 0), (0.25, 0.5, 25), (0.3, 0.5, 50), (0.35, 0.5, 75), (0.39, 0.5, 100)]);
        assert_eq!(detector.detect(&history, 100), None);
        assert!(!detector.in_cooldown(100));
    }
}
