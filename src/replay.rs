//! Replay of recorded landmark streams.
//!
//! A recording is JSON Lines, one tracker frame per line:
//!
//! ```text
//! {"timestamp_ms": 0, "landmarks": [[0.5, 0.8, 0.0], ...], "handedness": "Right"}
//! {"timestamp_ms": 33, "landmarks": null}
//! {"timestamp_ms": 66, "enabled": false}
//! ```
//!
//! `landmarks` holds 21 `[x, y]` or `[x, y, z]` points (`null` for a point the
//! tracker lost), or is `null` when no hand was seen. The optional `enabled`
//! flag toggles the classifier before the frame is processed. Blank lines and
//! lines starting with `#` are ignored.

use crate::{
    classifier::{GestureClassifier, GestureUpdate},
    clock::Clock,
    constants::NUM_HAND_LANDMARKS,
    landmarks::{HandFrame, Handedness, LandmarkFrame, Point3},
    Error, Result,
};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::io::BufRead;

/// One recorded tracker frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameRecord {
    /// Frame time in milliseconds
    pub timestamp_ms: u64,

    /// 21 landmarks, or `None` for a frame without a hand. Individual
    /// points may be `null` when the tracker lost them.
    #[serde(default)]
    pub landmarks: Option<Vec<Option<Vec<f64>>>>,

    /// Handedness label reported by the tracker
    #[serde(default)]
    pub handedness: Option<String>,

    /// Enable or disable the classifier before this frame
    #[serde(default)]
    pub enabled: Option<bool>,
}

impl FrameRecord {
    /// Record a hand frame
    #[must_use]
    pub fn from_hand(timestamp_ms: u64, hand: &HandFrame) -> Self {
        let landmarks = (0..NUM_HAND_LANDMARKS)
            .map(|i| hand.landmarks().get(i).map(|p| vec![p.x, p.y, p.z]))
            .collect();
        Self {
            timestamp_ms,
            landmarks: Some(landmarks),
            handedness: Some(hand.handedness().to_string()),
            enabled: None,
        }
    }

    /// Convert the record into a hand frame, `None` when no hand was seen
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` if the landmark list does not hold 21
    /// entries or a present point lacks x or y.
    pub fn hand_frame(&self) -> Result<Option<HandFrame>> {
        let Some(raw) = &self.landmarks else {
            return Ok(None);
        };

        if raw.len() != NUM_HAND_LANDMARKS {
            return Err(Error::InvalidInput(format!(
                "expected {NUM_HAND_LANDMARKS} landmarks, got {}",
                raw.len()
            )));
        }

        let points = raw
            .iter()
            .enumerate()
            .map(|(i, coords)| match coords {
                None => Ok(None),
                Some(coords) => Point3::from_slice(coords).map(Some).ok_or_else(|| {
                    Error::InvalidInput(format!("landmark {i} has {} coordinates", coords.len()))
                }),
            })
            .collect::<Result<Vec<_>>>()?;
        let landmarks = LandmarkFrame::from_partial(points);

        let handedness = self
            .handedness
            .as_deref()
            .and_then(|h| h.parse::<Handedness>().ok())
            .unwrap_or_default();
        Ok(Some(HandFrame::new(landmarks, handedness)))
    }
}

/// Replay behaviour
#[derive(Debug, Clone, Copy, Default)]
pub struct ReplayOptions {
    /// Abort on the first malformed line instead of skipping it
    pub strict: bool,

    /// Report every frame, not only published changes
    pub all_frames: bool,
}

/// Counters collected during a replay
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Frames processed
    pub frames: usize,

    /// Malformed lines skipped
    pub skipped: usize,

    /// Label changes published
    pub events: usize,
}

/// Parse one line of a recording
///
/// # Errors
///
/// Returns `Error::ReplayError` if the line is not a valid frame record.
pub fn parse_record(line: &str, line_number: usize) -> Result<FrameRecord> {
    serde_json::from_str(line).map_err(|e| Error::ReplayError {
        line: line_number,
        message: e.to_string(),
    })
}

/// Feed a recording through `classifier`, passing updates to `sink`.
///
/// Frames are processed at their recorded timestamps, independent of the
/// classifier's clock.
///
/// # Errors
///
/// Returns an error on I/O failure, on a malformed line in strict mode, or
/// when `sink` fails.
pub fn replay<R, C, F>(
    reader: R,
    classifier: &mut GestureClassifier<C>,
    options: &ReplayOptions,
    mut sink: F,
) -> Result<ReplaySummary>
where
    R: BufRead,
    C: Clock,
    F: FnMut(&GestureUpdate) -> Result<()>,
{
    let mut summary = ReplaySummary::default();
    let mut last_timestamp: Option<u64> = None;

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_number = index + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let parsed = parse_record(trimmed, line_number).and_then(|record| {
            if last_timestamp.is_some_and(|last| record.timestamp_ms < last) {
                return Err(Error::ReplayError {
                    line: line_number,
                    message: format!("timestamp {} goes backwards", record.timestamp_ms),
                });
            }
            let hand = record.hand_frame().map_err(|e| Error::ReplayError {
                line: line_number,
                message: e.to_string(),
            })?;
            Ok((record, hand))
        });

        let (record, hand) = match parsed {
            Ok(frame) => frame,
            Err(e) if options.strict => return Err(e),
            Err(e) => {
                warn!("Skipping frame: {e}");
                summary.skipped += 1;
                continue;
            }
        };

        // Disabling clears the label, which counts as a change
        let mut toggled = false;
        if let Some(enabled) = record.enabled {
            let before = classifier.gesture();
            classifier.set_enabled(enabled);
            toggled = classifier.gesture() != before;
        }
        last_timestamp = Some(record.timestamp_ms);

        let mut update = classifier.update_at(hand.as_ref(), record.timestamp_ms);
        update.changed |= toggled;
        summary.frames += 1;
        if update.changed {
            summary.events += 1;
        }
        if options.all_frames || update.changed {
            sink(&update)?;
        }
    }

    debug!(
        "Replay finished: {} frames, {} events, {} skipped",
        summary.frames, summary.events, summary.skipped
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{clock::ManualClock, gesture::Gesture, landmarks::test_support};

    fn line(timestamp_ms: u64, hand: &HandFrame) -> String {
        serde_json::to_string(&FrameRecord::from_hand(timestamp_ms, hand)).unwrap()
    }

    #[test]
    fn test_record_round_trip() {
        let hand = test_support::thumbs_up();
        let record = FrameRecord::from_hand(42, &hand);
        let restored = record.hand_frame().unwrap().unwrap();
        assert_eq!(restored, hand);
    }

    #[test]
    fn test_record_keeps_missing_points() {
        let mut raw: Vec<Option<Vec<f64>>> = vec![Some(vec![0.5, 0.5]); NUM_HAND_LANDMARKS];
        raw[3] = None;
        let record = FrameRecord {
            timestamp_ms: 0,
            landmarks: Some(raw),
            handedness: None,
            enabled: None,
        };
        let hand = record.hand_frame().unwrap().unwrap();
        assert_eq!(hand.landmarks().present_count(), NUM_HAND_LANDMARKS - 1);
        assert_eq!(hand.handedness(), Handedness::Unknown);
    }

    #[test]
    fn test_null_landmarks_is_no_hand() {
        let record = parse_record(r#"{"timestamp_ms": 5, "landmarks": null}"#, 1).unwrap();
        assert!(record.hand_frame().unwrap().is_none());
        let record = parse_record(r#"{"timestamp_ms": 5}"#, 1).unwrap();
        assert!(record.hand_frame().unwrap().is_none());
    }

    #[test]
    fn test_replay_reports_changes() {
        let input = [
            line(0, &test_support::fist()),
            line(100, &test_support::fist()),
            "# comment".to_string(),
            String::new(),
            line(300, &test_support::open_palm()),
            r#"{"timestamp_ms": 400, "landmarks": null}"#.to_string(),
        ]
        .join("\n");

        let mut classifier = GestureClassifier::with_clock(ManualClock::new(0));
        let mut seen = Vec::new();
        let summary = replay(input.as_bytes(), &mut classifier, &ReplayOptions::default(), |u| {
            seen.push(u.gesture);
            Ok(())
        })
        .unwrap();

        assert_eq!(seen, vec![Some(Gesture::Fist), Some(Gesture::PalmFromFist), None]);
        assert_eq!(summary, ReplaySummary { frames: 4, skipped: 0, events: 3 });
    }

    #[test]
    fn test_malformed_lines_skipped_or_fatal() {
        let input = format!(
            "{}\nnot json\n{{\"timestamp_ms\": 10, \"landmarks\": [[0.1, 0.2]]}}\n",
            line(0, &test_support::open_palm())
        );

        let mut classifier = GestureClassifier::with_clock(ManualClock::new(0));
        let summary = replay(input.as_bytes(), &mut classifier, &ReplayOptions::default(), |_| Ok(())).unwrap();
        assert_eq!(summary.frames, 1);
        assert_eq!(summary.skipped, 2);

        let mut classifier = GestureClassifier::with_clock(ManualClock::new(0));
        let strict = ReplayOptions { strict: true, all_frames: false };
        let err = replay(input.as_bytes(), &mut classifier, &strict, |_| Ok(())).unwrap_err();
        assert!(matches!(err, Error::ReplayError { line: 2, .. }));
    }

    #[test]
    fn test_backwards_timestamp_rejected() {
        let input = format!("{}\n{}\n", line(500, &test_support::fist()), line(100, &test_support::fist()));
        let mut classifier = GestureClassifier::with_clock(ManualClock::new(0));
        let summary = replay(input.as_bytes(), &mut classifier, &ReplayOptions::default(), |_| Ok(())).unwrap();
        assert_eq!(summary.skipped, 1);
    }

    #[test]
    fn test_enabled_flag_toggles_classifier() {
        let input = format!(
            "{}\n{{\"timestamp_ms\": 50, \"enabled\": false}}\n",
            line(0, &test_support::open_palm())
        );
        let mut classifier = GestureClassifier::with_clock(ManualClock::new(0));
        let options = ReplayOptions { strict: true, all_frames: true };
        let mut updates = Vec::new();
        replay(input.as_bytes(), &mut classifier, &options, |u| {
            updates.push(*u);
            Ok(())
        })
        .unwrap();
        assert_eq!(updates.len(), 2);
        assert_eq!(updates[1].gesture, None);
        assert!(!classifier.is_enabled());
    }
}
