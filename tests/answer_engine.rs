use nalgebra as na;

use quizmark::orientation::Classifier;
use quizmark::{
    Answer, Config, ConfirmationKind, Frame, MarkerObservation, QuizTracker, Tracking,
};

fn marker(id: u32, deg: f32) -> MarkerObservation {
    let rot = na::Rotation2::new(deg.to_radians());
    let center = na::Vector2::new(320.0f32, 240.0);
    let corners = [(-30.0, -30.0), (30.0, -30.0), (30.0, 30.0), (-30.0, 30.0)]
        .iter()
        .map(|&(x, y)| {
            let p = rot * na::Vector2::new(x, y) + center;
            [p.x, p.y]
        })
        .collect();

    MarkerObservation::new(id, corners)
}

fn frames(from: u64, to: u64, markers: &[(u32, f32)]) -> Vec<Frame> {
    (from..=to)
        .step_by(100)
        .map(|ts| Frame::new(ts, markers.iter().map(|&(id, deg)| marker(id, deg)).collect()))
        .collect()
}

#[test]
fn confirms_once_after_dwell() {
    let mut tracker = QuizTracker::default();

    assert!(tracker.update(&frames(0, 2400, &[(1, 0.0)])).is_empty());
    assert_eq!(tracker.progress(1, 2400), Some(96));

    let events = tracker.update(&frames(2500, 10_000, &[(1, 0.0)]));
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, ConfirmationKind::New);
    assert_eq!(events[0].timestamp, 2500);
    assert_eq!(tracker.progress(1, 10_000), None);
}

#[test]
fn answer_change_needs_full_dwell() {
    let mut tracker = QuizTracker::default();

    tracker.update(&frames(0, 3000, &[(1, 0.0)]));
    assert!(tracker.update(&frames(3100, 5500, &[(1, 270.0)])).is_empty());

    let events = tracker.update(&frames(5600, 5600, &[(1, 270.0)]));
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].answer, Answer::B);
    assert_eq!(
        events[0].kind,
        ConfirmationKind::Changed {
            previous: Answer::A
        }
    );
}

#[test]
fn wobble_near_boundary_does_not_restart_dwell() {
    let mut tracker = QuizTracker::default();

    // card held at ~40° wobbling across the 45° line
    let wobble: Vec<Frame> = (0..=25u64)
        .map(|i| {
            let deg = if i % 2 == 0 { 40.0 } else { 52.0 };
            Frame::new(i * 100, vec![marker(2, deg)])
        })
        .collect();

    let events = tracker.update(&wobble);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].answer, Answer::A);
}

#[test]
fn board_survives_absence_and_is_sorted() {
    let mut tracker = QuizTracker::default();

    tracker.update(&frames(0, 2500, &[(9, 180.0), (3, 90.0)]));
    tracker.update(&frames(2600, 4000, &[]));

    assert_eq!(tracker.scene().tracked_count(), 0);

    let board = tracker.board();
    assert_eq!(board.len(), 2);
    assert_eq!((board[0].id, board[0].answer), (3, Answer::D));
    assert_eq!((board[1].id, board[1].answer), (9, Answer::C));
}

#[test]
fn absence_over_grace_restarts_dwell() {
    let mut tracker = QuizTracker::default();

    tracker.update(&frames(0, 2000, &[(4, 0.0)]));
    tracker.update(&frames(2100, 2600, &[]));

    assert!(tracker.update(&frames(2700, 5100, &[(4, 0.0)])).is_empty());
    assert_eq!(tracker.update(&frames(5200, 5200, &[(4, 0.0)])).len(), 1);
}

#[test]
fn short_dropout_keeps_dwell() {
    let mut tracker = QuizTracker::default();

    tracker.update(&frames(0, 1000, &[(4, 0.0)]));
    tracker.update(&frames(1100, 1400, &[]));

    let events = tracker.update(&frames(1500, 2500, &[(4, 0.0)]));
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].timestamp, 2500);
}

#[test]
fn reset_clears_everything() {
    let mut tracker = QuizTracker::default();

    tracker.update(&frames(0, 3000, &[(1, 0.0), (2, 90.0)]));
    assert_eq!(tracker.confirmed_count(), 2);

    assert!(tracker.reset());
    assert!(!tracker.reset());
    assert!(tracker.board().is_empty());
    assert_eq!(tracker.progress(1, 3000), None);

    let events = tracker.update(&frames(3100, 5600, &[(1, 0.0)]));
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, ConfirmationKind::New);
}

#[test]
fn configure_shortens_dwell() {
    let mut tracker = QuizTracker::default();
    tracker.configure(1000, 200, 5.0);

    let events = tracker.update(&frames(0, 1000, &[(1, 0.0)]));
    assert_eq!(events.len(), 1);
    assert_eq!(Classifier::new(tracker.config().hysteresis_margin_deg).margin(), 5.0);
}

#[test]
fn demo_log_replays() {
    let config = Config::load(concat!(env!("CARGO_MANIFEST_DIR"), "/demos/quizmark.yaml")).unwrap();
    let log = std::fs::read_to_string(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/demos/two_students.log"
    ))
    .unwrap();

    let mut grouped: std::collections::BTreeMap<u64, Vec<MarkerObservation>> = Default::default();
    for line in log.lines().filter(|l| !l.starts_with('#') && !l.trim().is_empty()) {
        let v: Vec<&str> = line.split_whitespace().collect();
        let ts: u64 = v[0].parse().unwrap();
        let id: u32 = v[1].parse().unwrap();
        let c: Vec<f32> = v[2..].iter().map(|x| x.parse().unwrap()).collect();
        let corners = c.chunks(2).map(|p| [p[0], p[1]]).collect();
        grouped.entry(ts).or_default().push(MarkerObservation::new(id, corners));
    }

    let frames: Vec<Frame> = grouped
        .into_iter()
        .map(|(ts, obs)| Frame::new(ts, obs))
        .collect();

    let mut tracker = QuizTracker::new(config.engine);
    let events = tracker.update(&frames);

    let summary: Vec<(u32, Answer, u64)> = events.iter().map(|e| (e.id, e.answer, e.timestamp)).collect();
    assert_eq!(
        summary,
        vec![(7, Answer::A, 2500), (12, Answer::D, 2500), (12, Answer::C, 5800)]
    );
}
