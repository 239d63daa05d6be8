use super::*;
use crate::foundation::core::{ElementId, Size};
use crate::platform::headless::HeadlessDocument;

fn doc() -> HeadlessDocument {
    HeadlessDocument::new(Size::new(1280.0, 800.0))
}

#[test]
fn re_adding_same_key_replaces_without_leaking() {
    let mut d = doc();
    let mut reg = ListenerRegistry::new();
    let el = EventTarget::Element(ElementId(1));

    reg.add(&mut d, el, EventKind::PointerDown, "first", ListenerOptions::default());
    reg.add(&mut d, el, EventKind::PointerDown, "second", ListenerOptions::default());

    assert_eq!(reg.len(), 1);
    assert_eq!(d.listener_count(), 1);
    assert_eq!(reg.handler(el, EventKind::PointerDown), Some(&"second"));
}

#[test]
fn distinct_kinds_coexist() {
    let mut d = doc();
    let mut reg = ListenerRegistry::new();
    let el = EventTarget::Element(ElementId(1));
    reg.add(&mut d, el, EventKind::PointerEnter, 1, ListenerOptions::PASSIVE);
    reg.add(&mut d, el, EventKind::PointerLeave, 2, ListenerOptions::PASSIVE);
    reg.add(&mut d, EventTarget::Window, EventKind::Resize, 3, ListenerOptions::PASSIVE);
    assert_eq!(reg.len(), 3);
    assert_eq!(d.listener_count(), 3);
}

#[test]
fn remove_absent_is_silent() {
    let mut d = doc();
    let mut reg: ListenerRegistry<()> = ListenerRegistry::new();
    assert!(!reg.remove(&mut d, EventTarget::Window, EventKind::Scroll));
}

#[test]
fn remove_all_detaches_everything_and_is_idempotent() {
    let mut d = doc();
    let mut reg = ListenerRegistry::new();
    for i in 0..4 {
        reg.add(
            &mut d,
            EventTarget::Element(ElementId(i)),
            EventKind::PointerMove,
            i,
            ListenerOptions::PASSIVE,
        );
    }
    assert_eq!(d.listener_count(), 4);
    reg.remove_all(&mut d);
    reg.remove_all(&mut d);
    assert!(reg.is_empty());
    assert_eq!(d.listener_count(), 0);
}
