use std::cell::RefCell;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

use super::*;

#[test]
fn high_runs_before_low_scheduled_earlier_in_same_tick() {
    let s = TaskScheduler::new(5);
    let log = Rc::new(RefCell::new(Vec::new()));

    let l = Rc::clone(&log);
    let low = s.schedule(move || Ok(l.borrow_mut().push("low")), Priority::Low);
    let l = Rc::clone(&log);
    let high = s.schedule(move || Ok(l.borrow_mut().push("high")), Priority::High);

    assert_eq!(s.run_frame(), 2);
    assert_eq!(*log.borrow(), vec!["high", "low"]);
    assert_eq!(low.try_take(), Some(Some(())));
    assert_eq!(high.try_take(), Some(Some(())));
}

#[test]
fn equal_priorities_keep_fifo_order() {
    let s = TaskScheduler::new(10);
    let log = Rc::new(RefCell::new(Vec::new()));
    for i in 0..4 {
        let l = Rc::clone(&log);
        s.schedule(move || Ok(l.borrow_mut().push(i)), Priority::Normal);
    }
    s.run_frame();
    assert_eq!(*log.borrow(), vec![0, 1, 2, 3]);
}

#[test]
fn batches_are_bounded_and_request_follow_up_frames() {
    let s = TaskScheduler::new(5);
    let handles: Vec<_> = (0..12)
        .map(|i| s.schedule(move || Ok(i), Priority::Normal))
        .collect();
    assert_eq!(s.frames_requested(), 1);

    assert_eq!(s.run_frame(), 5);
    assert!(s.frame_pending());
    assert_eq!(s.run_frame(), 5);
    assert_eq!(s.run_frame(), 2);
    assert!(!s.frame_pending());
    assert_eq!(s.frames_requested(), 3);
    assert_eq!(s.run_frame(), 0, "idle scheduler does nothing");

    let values: Vec<_> = handles.iter().map(|h| h.try_take().flatten()).collect();
    assert_eq!(values, (0..12).map(Some).collect::<Vec<_>>());
}

#[test]
fn failing_task_resolves_to_none_without_blocking_batch() {
    let s = TaskScheduler::new(5);
    let bad = s.schedule(|| -> anyhow::Result<u32> { anyhow::bail!("boom") }, Priority::High);
    let good = s.schedule(|| Ok(7u32), Priority::Low);
    s.run_frame();
    assert_eq!(bad.try_take(), Some(None));
    assert_eq!(good.try_take(), Some(Some(7)));
}

#[test]
fn tasks_may_schedule_more_work() {
    let s = TaskScheduler::new(5);
    let inner = Rc::new(RefCell::new(None));
    let s2 = s.clone();
    let slot = Rc::clone(&inner);
    s.schedule(
        move || {
            *slot.borrow_mut() = Some(s2.schedule(|| Ok("nested"), Priority::Normal));
            Ok(())
        },
        Priority::Normal,
    );
    s.run_frame();
    assert!(s.frame_pending());
    s.run_frame();
    let handle = inner.borrow_mut().take().unwrap();
    assert_eq!(handle.try_take(), Some(Some("nested")));
}

#[test]
fn cleanup_resolves_pending_handles_to_none() {
    let s = TaskScheduler::new(5);
    let h = s.schedule(|| Ok(1), Priority::Normal);
    s.cleanup();
    assert!(!s.frame_pending());
    assert_eq!(s.queued(), 0);
    assert_eq!(h.try_take(), Some(None));
    assert_eq!(s.run_frame(), 0);
}

#[test]
fn handle_is_a_future() {
    let s = TaskScheduler::new(5);
    let mut h = s.schedule(|| Ok(41 + 1), Priority::Normal);
    let mut cx = Context::from_waker(Waker::noop());

    assert!(Pin::new(&mut h).poll(&mut cx).is_pending());
    s.run_frame();
    assert_eq!(Pin::new(&mut h).poll(&mut cx), Poll::Ready(Some(42)));
}

#[test]
fn panicking_task_does_not_stop_its_batch() {
    let s = TaskScheduler::new(5);
    let bad = s.schedule(
        || -> anyhow::Result<i32> { panic!("layout read on a detached node") },
        Priority::High,
    );
    let good = s.schedule(|| Ok(7), Priority::Normal);

    assert_eq!(s.run_frame(), 2);
    assert_eq!(bad.try_take(), Some(None));
    assert_eq!(good.try_take(), Some(Some(7)));
    assert!(!s.frame_pending());
    assert_eq!(s.queued(), 0);
}

#[test]
fn task_failures_surface_as_task_errors() {
    let err = run_isolated(|| -> anyhow::Result<()> { anyhow::bail!("decode failed") }).unwrap_err();
    assert!(matches!(&err, MotionError::Task(msg) if msg == "decode failed"));

    let err = run_isolated(|| -> anyhow::Result<()> { panic!("boom") }).unwrap_err();
    assert!(matches!(&err, MotionError::Task(msg) if msg == "panicked: boom"));
    assert_eq!(run_isolated(|| Ok(3)).unwrap(), 3);
}
