use super::*;
use crate::animation::pool::AnimationPool;
use crate::animation::tween::Animator;
use crate::foundation::core::{Millis, Rect};
use crate::platform::headless::HeadlessDocument;
use crate::schedule::frames::FrameLoop;

struct Harness {
    doc: HeadlessDocument,
    frames: FrameLoop,
    animator: Animator,
    pool: AnimationPool,
}

impl Harness {
    fn new() -> Self {
        Self {
            doc: HeadlessDocument::new(Size::new(1200.0, 800.0)),
            frames: FrameLoop::new(),
            animator: Animator::new(),
            pool: AnimationPool::new(),
        }
    }

    fn ctx(&mut self) -> PointerCtx<'_> {
        PointerCtx {
            surface: &mut self.doc,
            frames: &mut self.frames,
            animator: &mut self.animator,
            pool: &mut self.pool,
            now: Millis(0),
        }
    }
}

fn env(route: &str) -> SetupEnv<'_> {
    SetupEnv {
        is_desktop: true,
        is_mobile: false,
        route,
    }
}

fn move_to(x: f64, y: f64) -> InputEvent {
    InputEvent::pointer(EventKind::PointerMove, None, x, y, Millis(0))
}

#[test]
fn offsets_follow_divisors() {
    let cfg = ParallaxConfig::default();
    let o = offsets(Size::new(1200.0, 800.0), Point::new(300.0, 200.0), &cfg);
    assert_eq!(o.plain, Vec2::new(10.0, 20.0));
    assert_eq!(o.strong, Vec2::new(15.0, 20.0));
    assert_eq!(o.reverse, Vec2::new(-10.0, -20.0));
}

#[test]
fn setup_requires_route_device_and_layers() {
    let mut h = Harness::new();
    let mut p = Parallax::new(ParallaxConfig::default());
    assert_eq!(p.setup(&mut h.ctx(), env("/qui-suis-je")), 0);

    let layer = h.doc.insert(".parallax", Rect::new(0.0, 0.0, 10.0, 10.0));
    p.register(layer, ParallaxLayer::Plain);
    assert_eq!(p.setup(&mut h.ctx(), env("/galerie")), 0);
    assert_eq!(p.setup(&mut h.ctx(), env("/qui-suis-je")), 1);
    assert_eq!(p.setup(&mut h.ctx(), env("/qui-suis-je")), 1);
    assert_eq!(h.doc.listener_count(), 1);

    let mobile = SetupEnv {
        is_desktop: false,
        is_mobile: true,
        route: "/qui-suis-je",
    };
    assert_eq!(p.setup(&mut h.ctx(), mobile), 0);
    assert_eq!(h.doc.listener_count(), 0);
}

#[test]
fn moves_coalesce_into_one_frame() {
    let mut h = Harness::new();
    let plain = h.doc.insert(".parallax", Rect::new(0.0, 0.0, 10.0, 10.0));
    let reverse = h.doc.insert(".parallax-reverse", Rect::new(0.0, 0.0, 10.0, 10.0));
    let mut p = Parallax::new(ParallaxConfig::default());
    p.register(plain, ParallaxLayer::Plain);
    p.register(reverse, ParallaxLayer::Reverse);
    p.setup(&mut h.ctx(), env("/qui-suis-je"));

    for x in [100.0, 200.0, 300.0] {
        assert!(p.handle(&mut h.ctx(), &move_to(x, 200.0)));
    }
    assert_eq!(h.doc.transform_of(plain), None);

    let clients = h.frames.begin_frame();
    assert_eq!(clients, vec![FrameClient::Parallax]);
    for c in clients {
        p.frame(&mut h.ctx(), c);
    }
    assert_eq!(h.doc.transform_of(plain), Some(Transform::translate(10.0, 20.0)));
    assert_eq!(h.doc.transform_of(reverse), Some(Transform::translate(-10.0, -20.0)));
}

#[test]
fn cleanup_cancels_pending_tick() {
    let mut h = Harness::new();
    let layer = h.doc.insert(".parallax-strong", Rect::new(0.0, 0.0, 10.0, 10.0));
    let mut p = Parallax::new(ParallaxConfig::default());
    p.register(layer, ParallaxLayer::Strong);
    p.setup(&mut h.ctx(), env("/qui-suis-je"));
    p.handle(&mut h.ctx(), &move_to(0.0, 0.0));

    p.cleanup(&mut h.ctx());
    p.cleanup(&mut h.ctx());
    assert!(h.frames.begin_frame().is_empty());
    assert!(!p.handle(&mut h.ctx(), &move_to(0.0, 0.0)));
    assert_eq!(h.doc.transform_of(layer), None);
    assert_eq!(h.doc.listener_count(), 0);
}
