//! Hand gesture recognition from tracked hand landmarks.
//!
//! This library turns a stream of hand landmarks (21 points per frame, as
//! produced by an external hand tracker) into:
//! - a continuous, mirrored palm position
//! - a debounced gesture label (pinch, palm, fist, pointing, thumb poses)
//! - navigation pulses from fast palm motion while holding a finger pose
//! - fist/palm toggle pulses
//!
//! The pipeline per frame:
//! 1. Palm center and pinch distance are derived from the landmarks
//! 2. The palm center is appended to a short motion history
//! 3. Outside the debounce window, poses are tested in priority order and
//!    motion detectors are consulted for the matching pose
//! 4. A changed label is published
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```no_run
//! use hand_gesture::{
//!     classifier::GestureClassifier,
//!     landmarks::{HandFrame, Handedness, LandmarkFrame, Point3},
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut classifier = GestureClassifier::new();
//!
//! // Landmarks come from an external tracker
//! let points = vec![Point3::new(0.5, 0.5, 0.0); 21];
//! let hand = HandFrame::new(LandmarkFrame::try_from_slice(&points)?, Handedness::Right);
//!
//! let update = classifier.update(Some(&hand));
//! if let Some(gesture) = update.event() {
//!     println!("New gesture: {gesture}");
//! }
//! println!("Cursor at ({:.2}, {:.2})", update.position.x, update.position.y);
//!
//! // Frames without a hand clear the label
//! classifier.update(None);
//! # Ok(())
//! # }
//! ```
//!
//! ## Deterministic Time
//!
//! ```no_run
//! use hand_gesture::{clock::ManualClock, config::Config};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let clock = ManualClock::new(0);
//! let mut classifier = Config::default().classifier_with_clock(clock.clone())?;
//!
//! classifier.update(None);
//! clock.advance(33);
//! classifier.update(None);
//! # Ok(())
//! # }
//! ```

/// Hand landmark frames and derived points
pub mod landmarks;

/// Pure pose predicates over a single frame
pub mod pose;

/// Palm motion history, swipe and navigation detectors
pub mod motion;

/// Fist/palm edge state machine
pub mod transition;

/// Published gesture labels
pub mod gesture;

/// Frame-driven classifier tying the stages together
pub mod classifier;

/// Millisecond clocks
pub mod clock;

/// Palm position smoothing filters
pub mod filters;

/// Replay of recorded landmark streams
pub mod replay;

/// Error types and result handling
pub mod error;

/// Constants used throughout the library
pub mod constants;

/// Configuration management
pub mod config;

pub use classifier::{GestureClassifier, GestureUpdate, Position};
pub use error::{Error, Result};
pub use gesture::Gesture;
