//! Edge case tests for degenerate landmarks, labels and timestamps

use hand_gesture_control::{
    classifier::GestureClassifier,
    config::Config,
    controller::GestureController,
    events::GestureEvent,
    geometry::{is_one_finger_up, is_two_finger_up, pinch_distance, PoseAnalyzer},
    landmarks::{HandFrame, HandLandmark, Landmark},
    synthetic::{HandPose, SyntheticHand},
};

#[test]
fn test_extreme_coordinates_do_not_panic() {
    let extreme_values = vec![
        f32::INFINITY,
        f32::NEG_INFINITY,
        f32::NAN,
        f32::MAX,
        f32::MIN,
        1e30,
        0.0,
    ];

    for value in extreme_values {
        let marks = vec![Landmark::new(value, value); 21];
        let _ = is_one_finger_up(&marks);
        let _ = is_two_finger_up(&marks);
        let _ = pinch_distance(&marks);

        let mut controller = GestureController::new(&Config::default()).unwrap();
        let _ = controller.handle_frame(&HandFrame::with_hand(0, marks));
    }
}

#[test]
fn test_infinite_palm_falls_back() {
    let analyzer = PoseAnalyzer::default();
    let mut marks = SyntheticHand::new(HandPose::OneFinger).landmarks();
    marks[HandLandmark::IndexMcp.index()].x = f32::INFINITY;
    assert_eq!(analyzer.palm_size(&marks, HandLandmark::IndexMcp), Some(0.2));
}

#[test]
fn test_label_without_hand_never_switches_mode() {
    let mut controller = GestureController::new(&Config::default()).unwrap();
    for i in 0..10 {
        let frame = HandFrame::empty(i * 33).with_category("Closed_Fist", 0.99);
        assert!(controller.handle_frame(&frame).events.is_empty());
    }
}

#[test]
fn test_unknown_and_low_score_labels() {
    let classifier = GestureClassifier::default();
    let hand = SyntheticHand::new(HandPose::Fist);

    for (label, score) in [("Thumb_Up", 0.99), ("closed_fist", 0.99), ("Closed_Fist", 0.1), ("", 1.0)] {
        let frame = hand.frame(0, 0.0).with_category(label, score);
        let facts = classifier.classify(&frame);
        assert_eq!(facts.hand().unwrap().mode_gesture, None, "{label} {score}");
    }
}

#[test]
fn test_single_landmark_frame_is_a_hand_without_facts() {
    let mut controller = GestureController::new(&Config::default()).unwrap();
    let report = controller.handle_frame(&HandFrame::with_hand(0, vec![Landmark::new(0.5, 0.5)]));
    let hand = report.facts.hand().unwrap();
    assert_eq!(hand.pinch_distance, None);
    assert!(!hand.is_pinching);
    assert!(report.events.is_empty());
}

#[test]
fn test_pinch_at_timestamp_extremes() {
    let mut controller = GestureController::new(&Config::default()).unwrap();
    let pinch = SyntheticHand::new(HandPose::Pinch);

    let first = controller.handle_frame(&pinch.frame(u64::MAX - 1000, 0.0));
    assert_eq!(first.events, vec![GestureEvent::Pinch]);

    let second = controller.handle_frame(&pinch.frame(u64::MAX, 0.0));
    assert!(second.events.is_empty());

    let earlier = controller.handle_frame(&pinch.frame(0, 0.0));
    assert!(earlier.events.is_empty());
}

#[test]
fn test_controller_reset() {
    let mut controller = GestureController::new(&Config::default()).unwrap();
    controller.handle_frame(&SyntheticHand::new(HandPose::OneFinger).frame(0, 0.0));
    assert!(controller.state().one_finger_active);

    controller.reset();
    assert!(!controller.state().one_finger_active);

    let report = controller.handle_frame(&SyntheticHand::new(HandPose::OneFinger).frame(10, 0.0));
    assert_eq!(report.events, vec![GestureEvent::OneFingerStart]);
}
