use super::*;
use crate::foundation::core::{Rect, Size};
use crate::platform::headless::HeadlessDocument;

fn page() -> (HeadlessDocument, ElementId, ElementId) {
    let mut d = HeadlessDocument::new(Size::new(1280.0, 800.0));
    let wrapper = d.insert("#smooth-wrapper", Rect::new(0.0, 0.0, 1280.0, 4000.5));
    let content = d.insert("section", Rect::new(0.0, 0.0, 1280.0, 4000.0));
    (d, wrapper, content)
}

fn drive(engine: &mut SmoothScroll, frames: &mut FrameLoop, d: &mut HeadlessDocument, n: u64) {
    for i in 0..n {
        for client in frames.begin_frame() {
            if client == FrameClient::Scroll {
                engine.frame(d, Millis(i * 16));
            }
        }
    }
}

#[test]
fn init_fails_softly_without_wrapper() {
    let mut d = HeadlessDocument::new(Size::new(1280.0, 800.0));
    d.insert("section", Rect::new(0.0, 0.0, 10.0, 10.0));
    let mut frames = FrameLoop::new();
    let mut engine = SmoothScroll::new(ScrollConfig::default());
    assert!(!engine.init(&mut d, &mut frames, Millis(0)));
    assert_eq!(engine.state(), EngineState::Uninitialized);
    assert_eq!(frames.recurring_for(FrameClient::Scroll), 0);
    assert_eq!(d.body_height(), None);
}

#[test]
fn running_engine_writes_transforms_and_body_height() {
    let (mut d, wrapper, content) = page();
    let mut frames = FrameLoop::new();
    let mut engine = SmoothScroll::new(ScrollConfig::default());
    assert!(engine.init(&mut d, &mut frames, Millis(0)));
    assert_eq!(d.body_height(), Some(4000.0));

    d.set_scroll(200.0);
    drive(&mut engine, &mut frames, &mut d, 1);
    let w = d.transform_of(wrapper).unwrap();
    assert!((w.translate.y + 10.0).abs() < 1e-9);
    let c = d.transform_of(content).unwrap();
    assert_eq!(c.perspective, Some(1000.0));
    assert!(c.skew_y_deg > 0.0);
}

#[test]
fn destroy_then_init_keeps_a_single_loop() {
    let (mut d, _, _) = page();
    let mut frames = FrameLoop::new();
    let mut engine = SmoothScroll::new(ScrollConfig::default());
    assert!(engine.init(&mut d, &mut frames, Millis(0)));
    engine.destroy(&mut d, &mut frames);
    engine.destroy(&mut d, &mut frames);
    assert_eq!(engine.state(), EngineState::Destroyed);
    assert!(engine.init(&mut d, &mut frames, Millis(0)));
    assert!(engine.init(&mut d, &mut frames, Millis(0)));

    assert_eq!(frames.recurring_for(FrameClient::Scroll), 1);
    let before = engine.frames_rendered();
    drive(&mut engine, &mut frames, &mut d, 10);
    assert_eq!(engine.frames_rendered() - before, 10);
}

#[test]
fn destroy_clears_inline_styles() {
    let (mut d, wrapper, content) = page();
    let layer = d.insert(".parallax", Rect::new(0.0, 0.0, 10.0, 10.0));
    let mut frames = FrameLoop::new();
    let mut engine = SmoothScroll::new(ScrollConfig::default());
    engine.init(&mut d, &mut frames, Millis(0));
    engine.apply_inverse_parallax(&[layer], 0.2);
    d.set_scroll(100.0);
    drive(&mut engine, &mut frames, &mut d, 3);
    assert!(d.transform_of(layer).is_some());

    engine.destroy(&mut d, &mut frames);
    assert_eq!(d.transform_of(wrapper), None);
    assert_eq!(d.transform_of(content), None);
    assert_eq!(d.transform_of(layer), None);
    assert_eq!(d.body_height(), None);
}

#[test]
fn pause_stops_frames_and_resume_restarts_them() {
    let (mut d, _, _) = page();
    let mut frames = FrameLoop::new();
    let mut engine = SmoothScroll::new(ScrollConfig::default());
    engine.init(&mut d, &mut frames, Millis(0));
    engine.pause(&mut frames);
    engine.pause(&mut frames);
    drive(&mut engine, &mut frames, &mut d, 5);
    assert_eq!(engine.frames_rendered(), 0);

    engine.resume(&mut frames);
    engine.resume(&mut frames);
    assert_eq!(frames.recurring_for(FrameClient::Scroll), 1);
    drive(&mut engine, &mut frames, &mut d, 5);
    assert_eq!(engine.frames_rendered(), 5);
}

#[test]
fn unmounted_wrapper_skips_writes() {
    let (mut d, _, _) = page();
    let mut frames = FrameLoop::new();
    let mut engine = SmoothScroll::new(ScrollConfig::default());
    engine.init(&mut d, &mut frames, Millis(0));
    d.clear_page();
    let writes = d.transform_writes();
    drive(&mut engine, &mut frames, &mut d, 3);
    assert_eq!(d.transform_writes(), writes);
}
