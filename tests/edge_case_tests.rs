//! Edge case tests for degraded tracker input and unusual timing


use hand_gesture::{
    classifier::Position,
    constants::{INDEX_TIP, MIDDLE_MCP, NUM_HAND_LANDMARKS, PINKY_TIP, RING_TIP, THUMB_TIP, WRIST},
    landmarks::{HandFrame, Handedness, LandmarkFrame, Point3},
    Gesture,
};
use test_helpers::{fist, hand_at, hand_points, open_palm, pointing_index, test_classifier, THUMB_TUCKED};

fn without(hand: &HandFrame, missing: &[usize]) -> HandFrame {
    let points = (0..NUM_HAND_LANDMARKS).map(|i| {
        if missing.contains(&i) {
            None
        } else {
            hand.landmarks().get(i)
        }
    });
    HandFrame::new(LandmarkFrame::from_partial(points), hand.handedness())
}

#[test]
fn test_nan_wrist_means_no_hand() {
    let mut points = hand_points([true; 4], THUMB_TUCKED);
    points[WRIST] = Point3::new(f64::NAN, 0.8, 0.0);
    let hand = hand_at(points, 0.0, 0.0);
    assert!(hand.palm_center().is_none());

    let mut classifier = test_classifier();
    let update = classifier.update_at(Some(&hand), 0);
    assert_eq!(update.gesture, None);
    assert_eq!(update.position, Position::CENTER);
    assert_eq!(classifier.history_len(), 0);
}

#[test]
fn test_missing_middle_base_means_no_hand() {
    let mut classifier = test_classifier();
    classifier.update_at(Some(&open_palm()), 0);
    let update = classifier.update_at(Some(&without(&open_palm(), &[MIDDLE_MCP])), 300);
    assert!(update.changed);
    assert_eq!(update.gesture, None);
}

#[test]
fn test_missing_finger_tip_reads_as_curled() {
    let cases = [
        (without(&fist(), &[PINKY_TIP]), Gesture::Fist),
        (without(&pointing_index(), &[RING_TIP]), Gesture::PointingIndex),
        (without(&open_palm(), &[PINKY_TIP]), Gesture::Pointing),
        (without(&open_palm(), &[INDEX_TIP]), Gesture::Pointing),
    ];
    for (hand, expected) in cases {
        let mut classifier = test_classifier();
        let update = classifier.update_at(Some(&hand), 0);
        assert_eq!(update.gesture, Some(expected));
    }

    // Without an index tip there is nothing to pinch
    let mut classifier = test_classifier();
    let update = classifier.update_at(Some(&without(&open_palm(), &[INDEX_TIP])), 0);
    assert_eq!(update.pinch_distance, 1.0);
}

#[test]
fn test_missing_thumb_tip_still_reads_fist() {
    let mut classifier = test_classifier();
    let update = classifier.update_at(Some(&without(&fist(), &[THUMB_TIP])), 0);
    assert_eq!(update.gesture, Some(Gesture::Fist));
    assert_eq!(update.pinch_distance, 1.0);
}

#[test]
fn test_short_landmark_slice_rejected() {
    let points = vec![Point3::new(0.5, 0.5, 0.0); 20];
    assert!(LandmarkFrame::try_from_slice(&points).is_err());
}

#[test]
fn test_repeated_absence_reports_once() {
    let mut classifier = test_classifier();
    classifier.update_at(Some(&fist()), 0);
    assert!(classifier.update_at(None, 33).changed);
    for t in [66, 99, 500, 1000] {
        let update = classifier.update_at(None, t);
        assert!(!update.changed);
        assert_eq!(update.gesture, None);
    }
}

#[test]
fn test_absent_hand_keeps_stable_pose() {
    let mut classifier = test_classifier();
    classifier.update_at(Some(&fist()), 0);
    classifier.update_at(None, 100);
    // Hand comes back open: the fist is still remembered
    let update = classifier.update_at(Some(&open_palm()), 400);
    assert_eq!(update.event(), Some(Gesture::PalmFromFist));
}

#[test]
fn test_identical_timestamps() {
    let mut classifier = test_classifier();
    let shape = hand_points([true; 4], THUMB_TUCKED);
    classifier.update_at(Some(&hand_at(shape, 0.0, 0.0)), 0);
    for i in 0..10u32 {
        let hand = hand_at(shape, 0.03 * f64::from(i), 0.0);
        let update = classifier.update_at(Some(&hand), 300);
        // Zero elapsed time gives no velocity, so no swipe
        assert!(!update.changed);
    }
    assert_eq!(classifier.gesture(), Some(Gesture::Palm));
}

#[test]
fn test_timestamps_going_backwards() {
    let mut classifier = test_classifier();
    classifier.update_at(Some(&open_palm()), 5000);
    let update = classifier.update_at(Some(&fist()), 1000);
    assert!(!update.changed);
    assert_eq!(update.gesture, Some(Gesture::Palm));

    let update = classifier.update_at(Some(&fist()), 5200);
    assert_eq!(update.event(), Some(Gesture::FistFromPalm));
}

#[test]
fn test_history_stays_bounded() {
    let mut classifier = test_classifier();
    let shape = hand_points([true, true, false, false], THUMB_TUCKED);
    for i in 0..1000u32 {
        let hand = hand_at(shape, 0.0001 * f64::from(i % 7), 0.0);
        classifier.update_at(Some(&hand), 33 * u64::from(i));
        assert!(classifier.history_len() <= 10);
    }
    assert_eq!(classifier.history_len(), 10);
}

#[test]
fn test_disabled_classifier_ignores_frames() {
    let mut classifier = test_classifier();
    classifier.disable();
    for t in 0..5 {
        let update = classifier.update_at(Some(&open_palm()), t * 100);
        assert!(!update.changed);
        assert_eq!(update.gesture, None);
        assert_eq!(update.position, Position::CENTER);
    }
    assert_eq!(classifier.history_len(), 0);

    classifier.enable();
    let update = classifier.update_at(Some(&open_palm()), 600);
    assert_eq!(update.event(), Some(Gesture::Palm));
}

#[test]
fn test_handedness_does_not_affect_labels() {
    let right = fist();
    let left = HandFrame::new(right.landmarks().clone(), Handedness::Left);
    let mut a = test_classifier();
    let mut b = test_classifier();
    assert_eq!(a.update_at(Some(&right), 0), b.update_at(Some(&left), 0));
}
