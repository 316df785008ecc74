//! Frame-driven gesture classifier.
//!
//! Each incoming tracker frame updates the continuous outputs (mirrored palm
//! position, pinch distance, motion history) and, outside the debounce window,
//! resolves one gesture label by testing poses in a fixed priority order:
//!
//! 1. pinch
//! 2. pointing index (or `pointing-nav-forward` on fast motion)
//! 3. thumb out (or `thumb-nav-backward` on fast motion)
//! 4. thumbs up (or `thumbs-nav-forward` / `thumbs-nav-backward`)
//! 5. fist (`fist-from-palm` on the edge from a stable palm)
//! 6. open palm (a swipe on fast motion, `palm-from-fist` on the edge from a
//!    stable fist)
//! 7. `pointing` for any other hand shape
//!
//! A label is published only when it differs from the current one and the
//! previous change is at least the debounce interval old.

use crate::{
    clock::{Clock, SystemClock},
    config::Config,
    constants::{CENTER_POSITION, NO_PINCH_DISTANCE},
    filters::{NoFilter, PositionFilter},
    gesture::Gesture,
    landmarks::HandFrame,
    motion::{
        MotionHistory, MotionSettings, NavDirection, NavigationDetector, NavigationRule, SwipeDetector,
    },
    pose::{self, PoseClassifier},
    transition::{CoarsePose, StablePose, TransitionTracker},
    Result,
};
use log::{debug, info};
use serde::Serialize;

/// Published palm position in [0, 1] x [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    /// Position reported when no hand is tracked
    pub const CENTER: Self = Self {
        x: CENTER_POSITION.0,
        y: CENTER_POSITION.1,
    };
}

impl Default for Position {
    fn default() -> Self {
        Self::CENTER
    }
}

/// Classifier outputs after one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GestureUpdate {
    /// Time of the frame that produced this update
    pub timestamp_ms: u64,

    /// Currently published label, `None` for no hand or disabled
    pub gesture: Option<Gesture>,

    /// True if `gesture` was published by this frame
    #[serde(skip)]
    pub changed: bool,

    /// Mirrored palm position
    pub position: Position,

    /// Thumb tip to index tip distance
    pub pinch_distance: f64,
}

impl GestureUpdate {
    /// The label if it was published by this frame
    #[must_use]
    pub fn event(&self) -> Option<Gesture> {
        self.gesture.filter(|_| self.changed)
    }

    fn is(&self, gesture: Gesture) -> bool {
        self.gesture == Some(gesture)
    }

    #[must_use]
    pub fn is_pinching(&self) -> bool {
        self.is(Gesture::Pinch)
    }

    /// Open palm, including the edge from a fist
    #[must_use]
    pub fn is_open_palm(&self) -> bool {
        self.is(Gesture::Palm) || self.is(Gesture::PalmFromFist)
    }

    /// Closed fist, including the edge from a palm
    #[must_use]
    pub fn is_closed_fist(&self) -> bool {
        self.is(Gesture::Fist) || self.is(Gesture::FistFromPalm)
    }

    #[must_use]
    pub fn is_swiping_left(&self) -> bool {
        self.is(Gesture::SwipeLeft)
    }

    #[must_use]
    pub fn is_swiping_right(&self) -> bool {
        self.is(Gesture::SwipeRight)
    }

    #[must_use]
    pub fn is_swiping_up(&self) -> bool {
        self.is(Gesture::SwipeUp)
    }

    #[must_use]
    pub fn is_swiping_down(&self) -> bool {
        self.is(Gesture::SwipeDown)
    }

    #[must_use]
    pub fn is_thumbs_up(&self) -> bool {
        self.is(Gesture::ThumbsUp)
    }

    #[must_use]
    pub fn is_thumbs_nav_forward(&self) -> bool {
        self.is(Gesture::ThumbsNavForward)
    }

    #[must_use]
    pub fn is_thumbs_nav_backward(&self) -> bool {
        self.is(Gesture::ThumbsNavBackward)
    }

    #[must_use]
    pub fn is_pointing_index(&self) -> bool {
        self.is(Gesture::PointingIndex)
    }

    #[must_use]
    pub fn is_pointing_nav_forward(&self) -> bool {
        self.is(Gesture::PointingNavForward)
    }

    #[must_use]
    pub fn is_thumb_gesture(&self) -> bool {
        self.is(Gesture::ThumbGesture)
    }

    #[must_use]
    pub fn is_thumb_nav_backward(&self) -> bool {
        self.is(Gesture::ThumbNavBackward)
    }

    #[must_use]
    pub fn is_fist_from_palm(&self) -> bool {
        self.is(Gesture::FistFromPalm)
    }

    #[must_use]
    pub fn is_palm_from_fist(&self) -> bool {
        self.is(Gesture::PalmFromFist)
    }
}

/// Gesture classifier for a single hand and a single consumer
pub struct GestureClassifier<C: Clock = SystemClock> {
    clock: C,
    poses: PoseClassifier,
    history: MotionHistory,
    swipe: SwipeDetector,
    pointing_nav: NavigationDetector,
    thumb_nav: NavigationDetector,
    thumbs_nav: NavigationDetector,
    transitions: TransitionTracker,
    filter: Box<dyn PositionFilter>,
    min_gesture_interval_ms: u64,
    mirror_x: bool,

    enabled: bool,
    gesture: Option<Gesture>,
    last_change_ms: Option<u64>,
    position: Position,
    pinch_distance: f64,
    last_frame_ms: u64,
}

impl GestureClassifier<SystemClock> {
    /// Classifier with default thresholds on the system clock
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(SystemClock::new())
    }

    /// Classifier configured from `config` on the system clock
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::from_config_with_clock(config, SystemClock::new())
    }
}

impl Default for GestureClassifier<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> GestureClassifier<C> {
    /// Classifier with default thresholds on `clock`
    pub fn with_clock(clock: C) -> Self {
        let config = Config::default();
        Self::build(&config, clock, Box::new(NoFilter))
    }

    /// Classifier configured from `config` on `clock`
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn from_config_with_clock(config: &Config, clock: C) -> Result<Self> {
        config.validate()?;
        let filter = config.create_filter()?;
        debug!("Creating gesture classifier with position filter {}", filter.name());
        Ok(Self::build(config, clock, filter))
    }

    fn build(config: &Config, clock: C, filter: Box<dyn PositionFilter>) -> Self {
        let MotionSettings {
            history_capacity,
            velocity_window,
            swipe_threshold,
            pointing_nav_threshold,
            thumb_nav_threshold,
            thumbs_nav_threshold,
            nav_cooldown_ms,
        } = config.motion;

        Self {
            clock,
            poses: PoseClassifier::new(config.pose.clone()),
            history: MotionHistory::new(history_capacity),
            swipe: SwipeDetector::new(swipe_threshold, velocity_window),
            pointing_nav: NavigationDetector::new(
                NavigationRule::AlwaysForward,
                pointing_nav_threshold,
                velocity_window,
                nav_cooldown_ms,
            ),
            thumb_nav: NavigationDetector::new(
                NavigationRule::AlwaysBackward,
                thumb_nav_threshold,
                velocity_window,
                nav_cooldown_ms,
            ),
            thumbs_nav: NavigationDetector::new(
                NavigationRule::MirroredHorizontal,
                thumbs_nav_threshold,
                velocity_window,
                nav_cooldown_ms,
            ),
            transitions: TransitionTracker::new(),
            filter,
            min_gesture_interval_ms: config.debounce.min_gesture_interval_ms,
            mirror_x: config.output.mirror_x,
            enabled: true,
            gesture: None,
            last_change_ms: None,
            position: Position::CENTER,
            pinch_distance: NO_PINCH_DISTANCE,
            last_frame_ms: 0,
        }
    }

    /// Process one tracker frame stamped with the injected clock.
    ///
    /// `None` means the tracker saw no hand.
    pub fn update(&mut self, frame: Option<&HandFrame>) -> GestureUpdate {
        let now_ms = self.clock.now_ms();
        self.update_at(frame, now_ms)
    }

    /// Process one tracker frame observed at `now_ms`
    pub fn update_at(&mut self, frame: Option<&HandFrame>, now_ms: u64) -> GestureUpdate {
        self.last_frame_ms = now_ms;
        if !self.enabled {
            return self.snapshot_with(false);
        }

        // A hand without wrist or middle base has no palm and is treated as absent
        let Some((hand, center)) = frame.and_then(|hand| hand.palm_center().map(|c| (hand, c))) else {
            return self.hand_lost(now_ms);
        };

        let x = if self.mirror_x { 1.0 - center.x } else { center.x };
        let (x, y) = self.filter.apply(x, center.y);
        self.position = Position { x, y };
        self.history.push(center.x, center.y, now_ms);
        self.pinch_distance = pose::pinch_distance(hand);

        if self.in_debounce(now_ms) {
            return self.snapshot_with(false);
        }

        let resolved = self.resolve(hand, now_ms);
        let changed = self.publish(resolved, now_ms);
        self.snapshot_with(changed)
    }

    /// Clear the label at once; the clear counts as a change for debounce
    fn hand_lost(&mut self, now_ms: u64) -> GestureUpdate {
        self.pinch_distance = NO_PINCH_DISTANCE;
        let changed = self.gesture.take().is_some();
        if changed {
            debug!("Hand lost at {} ms, clearing gesture", now_ms);
            self.last_change_ms = Some(now_ms);
        }
        self.snapshot_with(changed)
    }

    fn in_debounce(&self, now_ms: u64) -> bool {
        self.last_change_ms
            .is_some_and(|last| now_ms.saturating_sub(last) < self.min_gesture_interval_ms)
    }

    fn publish(&mut self, gesture: Gesture, now_ms: u64) -> bool {
        if self.gesture == Some(gesture) {
            return false;
        }
        debug!(
            "Gesture {} -> {} at {} ms",
            self.gesture.map_or("none", Gesture::as_str),
            gesture,
            now_ms
        );
        self.gesture = Some(gesture);
        self.last_change_ms = Some(now_ms);
        true
    }

    fn resolve(&mut self, hand: &HandFrame, now_ms: u64) -> Gesture {
        if self.pinch_distance < self.poses.thresholds().pinch_threshold {
            return Gesture::Pinch;
        }

        let fingers = self.poses.finger_states(hand);

        if fingers.only_index() {
            return match fire_navigation(&mut self.pointing_nav, &mut self.history, now_ms) {
                Some(_) => Gesture::PointingNavForward,
                None => Gesture::PointingIndex,
            };
        }

        if fingers.all_curled() {
            let landmarks = hand.landmarks();
            if self.poses.thumb_extended(landmarks) {
                return match fire_navigation(&mut self.thumb_nav, &mut self.history, now_ms) {
                    Some(_) => Gesture::ThumbNavBackward,
                    None => Gesture::ThumbGesture,
                };
            }
            if self.poses.thumb_pointing_up(landmarks) {
                return match fire_navigation(&mut self.thumbs_nav, &mut self.history, now_ms) {
                    Some(NavDirection::Forward) => Gesture::ThumbsNavForward,
                    Some(NavDirection::Backward) => Gesture::ThumbsNavBackward,
                    None => Gesture::ThumbsUp,
                };
            }
            return self
                .transitions
                .observe(CoarsePose::Fist)
                .map_or(Gesture::Fist, Gesture::from);
        }

        if fingers.all_extended() {
            if let Some(direction) = self.swipe.detect(&self.history) {
                debug!("Swipe {:?} detected, clearing motion history", direction);
                self.history.clear();
                return direction.into();
            }
            return self
                .transitions
                .observe(CoarsePose::Palm)
                .map_or(Gesture::Palm, Gesture::from);
        }

        Gesture::Pointing
    }

    /// Start a fresh session: forget history, stable pose, label and timers
    pub fn enable(&mut self) {
        info!("Gesture recognition enabled");
        self.reset_session();
        self.enabled = true;
    }

    /// Stop processing; the label clears and the position recenters at once
    pub fn disable(&mut self) {
        info!("Gesture recognition disabled");
        self.reset_session();
        self.enabled = false;
    }

    /// Enable or disable; a no-op if already in the requested state
    pub fn set_enabled(&mut self, enabled: bool) {
        match (self.enabled, enabled) {
            (false, true) => self.enable(),
            (true, false) => self.disable(),
            _ => {}
        }
    }

    fn reset_session(&mut self) {
        self.history.clear();
        self.transitions.reset();
        self.pointing_nav.reset();
        self.thumb_nav.reset();
        self.thumbs_nav.reset();
        self.filter.reset();
        self.gesture = None;
        self.last_change_ms = None;
        self.position = Position::CENTER;
        self.pinch_distance = NO_PINCH_DISTANCE;
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Currently published label
    #[must_use]
    pub const fn gesture(&self) -> Option<Gesture> {
        self.gesture
    }

    /// Mirrored palm position
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    #[must_use]
    pub const fn pinch_distance(&self) -> f64 {
        self.pinch_distance
    }

    /// Last stable coarse pose used for fist/palm edges
    #[must_use]
    pub const fn stable_pose(&self) -> StablePose {
        self.transitions.state()
    }

    /// Palm samples currently held for velocity estimation
    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// The injected clock
    pub const fn clock(&self) -> &C {
        &self.clock
    }

    /// Current outputs without processing a frame
    #[must_use]
    pub fn snapshot(&self) -> GestureUpdate {
        self.snapshot_with(false)
    }

    fn snapshot_with(&self, changed: bool) -> GestureUpdate {
        GestureUpdate {
            timestamp_ms: self.last_frame_ms,
            gesture: self.gesture,
            changed,
            position: self.position,
            pinch_distance: self.pinch_distance,
        }
    }
}

/// Run a navigation detector and clear the history when it fires, so the
/// next event needs a fresh burst of motion
fn fire_navigation(
    detector: &mut NavigationDetector,
    history: &mut MotionHistory,
    now_ms: u64,
) -> Option<NavDirection> {
    let direction = detector.detect(history, now_ms)?;
    debug!("Navigation {:?} detected, clearing motion history", direction);
    history.clear();
    Some(direction)
}
