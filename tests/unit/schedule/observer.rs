use super::*;
use crate::foundation::core::Size;
use crate::platform::headless::HeadlessDocument;

fn setup() -> (HeadlessDocument, TaskScheduler, Rc<RefCell<Vec<IntersectionEntry>>>, OptimizedObserver) {
    let doc = HeadlessDocument::new(Size::new(1000.0, 800.0));
    let scheduler = TaskScheduler::new(5);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let obs = OptimizedObserver::new(scheduler.clone(), ObserverOptions::default(), move |e| {
        sink.borrow_mut().push(*e)
    });
    (doc, scheduler, seen, obs)
}

#[test]
fn entries_are_delivered_through_the_scheduler() {
    let (mut doc, scheduler, seen, obs) = setup();
    let near = doc.insert(".painting", Rect::new(0.0, 900.0, 200.0, 1000.0));
    let far = doc.insert(".painting", Rect::new(0.0, 5000.0, 200.0, 5100.0));
    obs.observe(near);
    obs.observe(far);

    assert_eq!(obs.check(&doc, Millis(0)), 2);
    assert!(seen.borrow().is_empty(), "nothing runs until the frame");
    assert!(scheduler.frame_pending());
    scheduler.run_frame();

    let seen = seen.borrow();
    assert_eq!(seen.len(), 2);
    let near_entry = seen.iter().find(|e| e.element == near).unwrap();
    assert!(near_entry.is_intersecting, "within the 300px root margin");
    let far_entry = seen.iter().find(|e| e.element == far).unwrap();
    assert!(!far_entry.is_intersecting);
}

#[test]
fn only_state_changes_are_reported() {
    let (mut doc, scheduler, seen, obs) = setup();
    let el = doc.insert(".painting", Rect::new(0.0, 5000.0, 200.0, 5100.0));
    obs.observe(el);
    obs.check(&doc, Millis(0));
    scheduler.run_frame();
    assert_eq!(obs.check(&doc, Millis(16)), 0);

    doc.set_rect(el, Rect::new(0.0, 100.0, 200.0, 200.0));
    assert_eq!(obs.check(&doc, Millis(32)), 1);
    scheduler.run_frame();
    assert_eq!(seen.borrow().len(), 2);
    assert!(seen.borrow()[1].is_intersecting);
}

#[test]
fn observe_is_idempotent_and_disconnect_stops_checks() {
    let (mut doc, _scheduler, _seen, obs) = setup();
    let el = doc.insert(".painting", Rect::new(0.0, 0.0, 10.0, 10.0));
    obs.observe(el);
    obs.observe(el);
    assert_eq!(obs.observed_count(), 1);

    obs.disconnect();
    obs.disconnect();
    assert!(!obs.is_connected());
    assert_eq!(obs.check(&doc, Millis(0)), 0);
}

#[test]
fn ratio_below_threshold_is_not_intersecting() {
    let r = visible_ratio(
        Rect::new(0.0, 0.0, 100.0, 1000.0),
        Rect::new(-10.0, -10.0, 200.0, 5.0),
    );
    assert!(r < 0.01);
    assert_eq!(
        visible_ratio(Rect::new(0.0, 0.0, 10.0, 10.0), Rect::new(0.0, 0.0, 100.0, 100.0)),
        1.0
    );
}
