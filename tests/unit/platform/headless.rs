use super::*;

fn doc() -> HeadlessDocument {
    HeadlessDocument::new(Size::new(1280.0, 800.0))
}

#[test]
fn query_matches_inserted_selector() {
    let mut d = doc();
    let w = d.insert("#smooth-wrapper", Rect::new(0.0, 0.0, 1280.0, 3000.0));
    assert_eq!(d.query("#smooth-wrapper"), Some(w));
    assert_eq!(d.query("section"), None);
    assert_eq!(d.content_height(w), Some(3000.0));
}

#[test]
fn removing_unknown_listener_is_ignored() {
    let mut d = doc();
    let id = d.add_listener(EventTarget::Window, EventKind::Resize, ListenerOptions::PASSIVE);
    d.remove_listener(EventTarget::Window, EventKind::Scroll, id);
    assert_eq!(d.listener_count(), 1);
    d.remove_listener(EventTarget::Window, EventKind::Resize, id);
    d.remove_listener(EventTarget::Window, EventKind::Resize, id);
    assert_eq!(d.listener_count(), 0);
}

#[test]
fn scroll_is_clamped_to_body_height() {
    let mut d = doc();
    d.set_body_height(Some(1000.0));
    d.scroll_to(5000.0);
    assert_eq!(d.scroll_y(), 200.0);
    d.scroll_to(-3.0);
    assert_eq!(d.scroll_y(), 0.0);
}

#[test]
fn clear_page_keeps_overlay() {
    let mut d = doc();
    d.insert("section", Rect::new(0.0, 0.0, 10.0, 10.0));
    let overlay = WaveOverlay::new(Size::new(1280.0, 800.0), ColorScheme::Light);
    let o = d.append_overlay(&overlay);
    d.clear_page();
    assert_eq!(d.query("section"), None);
    assert!(d.contains(o));
    assert!(d.has_class(ClassTarget::Element(o), CONTAINER_CLASS));
}

#[test]
fn detached_document_has_no_viewport() {
    let d = HeadlessDocument::detached();
    assert_eq!(d.viewport_width(), None);
    assert_eq!(d.viewport_reads(), 1);
}

#[test]
fn pointer_events_bubble_to_document_and_window() {
    use crate::foundation::core::Millis;
    use crate::platform::surface::InputEvent;

    let el = ElementId(3);
    let down = InputEvent::pointer(EventKind::PointerDown, Some(el), 1.0, 2.0, Millis(0));
    assert_eq!(
        down.propagation_path(),
        vec![
            EventTarget::Element(el),
            EventTarget::Document,
            EventTarget::Window
        ]
    );
    let resize = InputEvent::window(EventKind::Resize, Millis(0));
    assert_eq!(resize.propagation_path(), vec![EventTarget::Window]);
}
