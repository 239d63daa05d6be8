use super::*;
use crate::animation::ease::Ease;
use crate::animation::tween::{TweenStep, TweenTarget};
use crate::foundation::core::{Millis, Rect, Size};
use crate::platform::headless::HeadlessDocument;

const EL: ElementId = ElementId(7);

fn follow(x: f64) -> impl FnOnce(&mut Animator) -> TweenId {
    move |a: &mut Animator| {
        a.to(
            EL,
            TweenStep::new(TweenTarget::xy(x, x), 100, Ease::OutCubic),
            Millis(0),
        )
    }
}

#[test]
fn replacing_current_kills_previous_current() {
    let mut a = Animator::new();
    let mut pool = AnimationPool::new();
    let first = pool.replace_current(&mut a, EL, follow(1.0));
    let second = pool.replace_current(&mut a, EL, follow(2.0));
    assert!(!a.is_active(first));
    assert!(a.is_active(second));
    assert_eq!(pool.current(EL), Some(second));
    assert_eq!(pool.current_count(), 1);
}

#[test]
fn leave_and_current_are_mutually_exclusive() {
    let mut a = Animator::new();
    let mut pool = AnimationPool::new();
    let cur = pool.replace_current(&mut a, EL, follow(1.0));
    let leave = pool.replace_leave(&mut a, EL, follow(0.0));
    assert!(!a.is_active(cur));
    assert_eq!(pool.current(EL), None);
    assert_eq!(pool.leave(EL), Some(leave));

    pool.replace_current(&mut a, EL, follow(3.0));
    assert_eq!(pool.leave(EL), None);
    assert!(!a.is_active(leave));
    assert_eq!(a.active_count(), 1);
}

#[test]
fn click_gestures_do_not_stack() {
    let mut a = Animator::new();
    let mut pool = AnimationPool::new();
    let pulse = |a: &mut Animator| {
        a.to(
            EL,
            TweenStep::new(TweenTarget::scale(0.97), 200, Ease::OutCubic),
            Millis(0),
        )
    };
    assert!(pool.begin_click(&mut a, EL, pulse).is_some());
    assert!(pool.begin_click(&mut a, EL, pulse).is_none());
    assert!(pool.is_clicking(EL));
    assert_eq!(a.active_count(), 1);
}

#[test]
fn retire_removes_only_matching_entries() {
    let mut d = HeadlessDocument::new(Size::new(800.0, 600.0));
    let el = d.insert(".magnetic", Rect::new(0.0, 0.0, 10.0, 10.0));
    let mut a = Animator::new();
    let mut pool = AnimationPool::new();
    let id = pool.replace_leave(&mut a, el, |a| {
        a.to(el, TweenStep::new(TweenTarget::xy(0.0, 0.0), 50, Ease::Linear), Millis(0))
    });
    pool.retire(&[FinishedTween {
        id: TweenId(id.0 + 100),
        element: el,
    }]);
    assert_eq!(pool.leave(el), Some(id));

    let finished = a.advance(&mut d, Millis(50));
    pool.retire(&finished);
    assert!(pool.is_empty());
}

#[test]
fn clear_kills_everything() {
    let mut a = Animator::new();
    let mut pool = AnimationPool::new();
    pool.replace_current(&mut a, EL, follow(1.0));
    pool.begin_click(&mut a, ElementId(8), |a| {
        a.to(
            ElementId(8),
            TweenStep::new(TweenTarget::scale(0.97), 200, Ease::OutCubic),
            Millis(0),
        )
    });
    pool.clear(&mut a);
    assert!(pool.is_empty());
    assert_eq!(a.active_count(), 0);
}
