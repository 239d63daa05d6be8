use std::cell::RefCell;
use std::rc::Rc;

use super::*;

#[test]
fn throttle_gate_opens_once_per_window() {
    let mut t = Throttle::new(16);
    assert!(t.ready(Millis(100)));
    assert!(!t.ready(Millis(110)));
    assert!(!t.ready(Millis(115)));
    assert!(t.ready(Millis(116)));
    t.reset();
    assert!(t.ready(Millis(117)));
}

#[test]
fn throttled_runs_leading_edge_only() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let s = Rc::clone(&seen);
    let mut f = throttle(move |v: u32| s.borrow_mut().push(v), 50);
    assert!(f.call(Millis(0), 1));
    assert!(!f.call(Millis(20), 2));
    assert!(f.call(Millis(50), 3));
    assert_eq!(*seen.borrow(), vec![1, 3]);
}

#[test]
fn debounced_runs_trailing_edge_with_latest_argument() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let s = Rc::clone(&seen);
    let mut f = debounce(move |v: &str| s.borrow_mut().push(v), 100);

    f.call(Millis(0), "a");
    f.call(Millis(60), "b");
    assert!(!f.flush(Millis(120)), "second call restarted the wait");
    assert!(f.is_pending());
    assert!(f.flush(Millis(160)));
    assert!(!f.is_pending());
    assert!(!f.flush(Millis(500)));
    assert_eq!(*seen.borrow(), vec!["b"]);
}

#[test]
fn cancelled_debounce_never_fires() {
    let mut fired = false;
    {
        let mut f = debounce(|_: ()| fired = true, 10);
        f.call(Millis(0), ());
        f.cancel();
        assert!(!f.flush(Millis(100)));
    }
    assert!(!fired);
}
