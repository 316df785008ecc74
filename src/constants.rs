//! Constants used throughout the library

/// Number of landmarks reported per hand
pub const NUM_HAND_LANDMARKS: usize = 21;

/// Landmark indices (wrist, then each finger chain ordered base to tip)
pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_TIP: usize = 20;

/// Minimum vertical margin for a fingertip to count as above its base
pub const DEFAULT_EXTENSION_MARGIN: f64 = 0.02;

/// Thumb tip to index tip distance below which the hand is pinching
pub const DEFAULT_PINCH_THRESHOLD: f64 = 0.08;

/// Thumb tip to index base distance above which the thumb is extended outward
pub const DEFAULT_THUMB_EXTENSION_DISTANCE: f64 = 0.1;

/// Thumb tip must sit this far above the thumb MCP for thumbs-up
pub const DEFAULT_THUMBS_UP_OFFSET: f64 = 0.05;

/// Distance reported when the thumb or index tip is unavailable
pub const NO_PINCH_DISTANCE: f64 = 1.0;

/// Motion history defaults
pub const DEFAULT_HISTORY_CAPACITY: usize = 10;
pub const DEFAULT_VELOCITY_WINDOW: usize = 5;

/// Velocity thresholds in normalized units per second
pub const DEFAULT_SWIPE_THRESHOLD: f64 = 1.5;
pub const DEFAULT_POINTING_NAV_THRESHOLD: f64 = 1.5;
pub const DEFAULT_THUMB_NAV_THRESHOLD: f64 = 1.5;
pub const DEFAULT_THUMBS_NAV_THRESHOLD: f64 = 2.0;

/// Timers in milliseconds
pub const DEFAULT_NAV_COOLDOWN_MS: u64 = 500;
pub const DEFAULT_MIN_GESTURE_INTERVAL_MS: u64 = 200;

/// Published position when no hand is tracked
pub const CENTER_POSITION: (f64, f64) = (0.5, 0.5);

/// Default window sizes and parameters for position filters
pub const DEFAULT_MOVING_AVERAGE_WINDOW: usize = 5;
pub const DEFAULT_EXPONENTIAL_ALPHA: f64 = 0.5;
