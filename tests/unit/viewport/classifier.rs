use std::{cell::RefCell, rc::Rc};

use super::*;

fn classifier() -> ScreenSizeClassifier {
    ScreenSizeClassifier::new(&SequenceConfig::default())
}

#[test]
fn defaults_to_large_before_measurement() {
    let c = classifier();
    assert_eq!(c.current().width, 1440);
    assert_eq!(c.category(), ScreenCategory::Large);
    assert!(!c.current().is_mobile);
}

#[test]
fn measure_applies_immediately_and_reports_transitions_only() {
    let mut c = classifier();
    assert_eq!(c.measure(1920), None);
    assert_eq!(c.current().width, 1920);

    let change = c.measure(400).unwrap();
    assert_eq!(change.category, ScreenCategory::Small);
    assert!(change.is_mobile);

    assert_eq!(c.measure(700), None);
    assert!(!c.current().is_mobile);
}

#[test]
fn observe_waits_for_quiet_period() {
    let mut c = classifier();
    let t0 = Instant::now();
    c.observe(500, t0);
    assert_eq!(c.poll(t0 + Duration::from_millis(149)), None);
    assert_eq!(c.category(), ScreenCategory::Large);

    // A later width restarts the quiet period and wins.
    c.observe(600, t0 + Duration::from_millis(100));
    assert_eq!(c.poll(t0 + Duration::from_millis(200)), None);
    assert_eq!(
        c.next_deadline(),
        Some(t0 + Duration::from_millis(250))
    );

    let change = c.poll(t0 + Duration::from_millis(250)).unwrap();
    assert_eq!(change.width, 600);
    assert_eq!(change.category, ScreenCategory::Small);
    assert_eq!(c.next_deadline(), None);
    assert_eq!(c.poll(t0 + Duration::from_secs(5)), None);
}

#[test]
fn subscribers_hear_each_transition_once() {
    let mut c = classifier();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    c.subscribe(move |s| sink.borrow_mut().push(s.category));

    let t0 = Instant::now();
    for (i, w) in [1200, 1100, 700, 650, 720, 1300].into_iter().enumerate() {
        c.observe(w, t0 + Duration::from_secs(i as u64));
        c.poll(t0 + Duration::from_secs(i as u64) + Duration::from_millis(150));
    }

    assert_eq!(
        *seen.borrow(),
        vec![ScreenCategory::Small, ScreenCategory::Large]
    );
}

#[test]
fn measure_discards_pending_width() {
    let mut c = classifier();
    let t0 = Instant::now();
    c.observe(300, t0);
    c.measure(1600);
    assert_eq!(c.poll(t0 + Duration::from_secs(1)), None);
    assert_eq!(c.category(), ScreenCategory::Large);
}
