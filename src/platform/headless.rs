//! In-memory [`Surface`] used by tests and the CLI simulator.
//!
//! Selectors are matched literally against the strings an element was inserted with, so
//! `"#smooth-wrapper"` matches an element inserted with that exact selector.

use std::cell::Cell;
use std::collections::{BTreeMap, BTreeSet};

use crate::device::detector::DeviceInfo;
use crate::device::theme::ColorScheme;
use crate::foundation::core::{ElementId, Rect, Size, Transform};
use crate::platform::surface::{
    ClassTarget, EventKind, EventTarget, ListenerId, ListenerOptions, Surface,
};
use crate::transition::overlay::{CONTAINER_CLASS, WaveOverlay};

#[derive(Clone, Debug, Default)]
struct Node {
    selectors: Vec<String>,
    rect: Rect,
    content_height: f64,
    transform: Option<Transform>,
    classes: BTreeSet<String>,
    disabled: bool,
    overlay_svg: Option<String>,
}

#[derive(Debug)]
pub struct HeadlessDocument {
    viewport: Option<Size>,
    touch: bool,
    scroll_y: f64,
    body_height: Option<f64>,
    nodes: BTreeMap<ElementId, Node>,
    next_element: u64,
    listeners: BTreeMap<ListenerId, (EventTarget, EventKind)>,
    next_listener: u64,
    root_classes: BTreeSet<String>,
    body_classes: BTreeSet<String>,
    scheme: ColorScheme,
    pending_images: usize,
    vibration: bool,
    vibrations: Vec<Vec<u64>>,
    viewport_reads: Cell<usize>,
    transform_writes: usize,
}

impl HeadlessDocument {
    pub fn new(viewport: Size) -> Self {
        Self {
            viewport: Some(viewport),
            touch: false,
            scroll_y: 0.0,
            body_height: None,
            nodes: BTreeMap::new(),
            next_element: 1,
            listeners: BTreeMap::new(),
            next_listener: 1,
            root_classes: BTreeSet::new(),
            body_classes: BTreeSet::new(),
            scheme: ColorScheme::Light,
            pending_images: 0,
            vibration: false,
            vibrations: Vec::new(),
            viewport_reads: Cell::new(0),
            transform_writes: 0,
        }
    }

    /// A document with no presentation surface (server-side render).
    pub fn detached() -> Self {
        let mut doc = Self::new(Size::ZERO);
        doc.viewport = None;
        doc
    }

    pub fn with_touch(mut self, touch: bool) -> Self {
        self.touch = touch;
        self
    }

    pub fn with_vibration(mut self, supported: bool) -> Self {
        self.vibration = supported;
        self
    }

    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = Some(viewport);
    }

    pub fn set_touch(&mut self, touch: bool) {
        self.touch = touch;
    }

    /// Mount an element matched by `selector` with the given viewport-relative box.
    pub fn insert(&mut self, selector: &str, rect: Rect) -> ElementId {
        let id = ElementId(self.next_element);
        self.next_element += 1;
        self.nodes.insert(
            id,
            Node {
                selectors: vec![selector.to_string()],
                rect,
                content_height: rect.height(),
                ..Node::default()
            },
        );
        id
    }

    /// Unmount every non-overlay element, as a page swap does.
    pub fn clear_page(&mut self) {
        self.nodes.retain(|_, n| n.overlay_svg.is_some());
    }

    pub fn set_rect(&mut self, element: ElementId, rect: Rect) {
        if let Some(n) = self.nodes.get_mut(&element) {
            n.rect = rect;
        }
    }

    pub fn set_content_height(&mut self, element: ElementId, height: f64) {
        if let Some(n) = self.nodes.get_mut(&element) {
            n.content_height = height;
        }
    }

    pub fn set_disabled(&mut self, element: ElementId, disabled: bool) {
        if let Some(n) = self.nodes.get_mut(&element) {
            n.disabled = disabled;
        }
    }

    pub fn set_scroll(&mut self, y: f64) {
        self.scroll_y = y;
    }

    pub fn set_pending_images(&mut self, n: usize) {
        self.pending_images = n;
    }

    pub fn transform_of(&self, element: ElementId) -> Option<Transform> {
        self.nodes.get(&element).and_then(|n| n.transform)
    }

    pub fn body_height(&self) -> Option<f64> {
        self.body_height
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn listeners_on(&self, target: EventTarget) -> usize {
        self.listeners.values().filter(|(t, _)| *t == target).count()
    }

    pub fn overlay_count(&self) -> usize {
        self.nodes.values().filter(|n| n.overlay_svg.is_some()).count()
    }

    pub fn overlay_svg(&self) -> Option<&str> {
        self.nodes.values().find_map(|n| n.overlay_svg.as_deref())
    }

    pub fn has_class(&self, target: ClassTarget, class: &str) -> bool {
        match target {
            ClassTarget::Root => self.root_classes.contains(class),
            ClassTarget::Body => self.body_classes.contains(class),
            ClassTarget::Element(el) => self
                .nodes
                .get(&el)
                .is_some_and(|n| n.classes.contains(class)),
        }
    }

    pub fn vibrations(&self) -> &[Vec<u64>] {
        &self.vibrations
    }

    /// How many times the viewport width has been read.
    pub fn viewport_reads(&self) -> usize {
        self.viewport_reads.get()
    }

    pub fn transform_writes(&self) -> usize {
        self.transform_writes
    }
}

impl DeviceInfo for HeadlessDocument {
    fn has_touch(&self) -> bool {
        self.touch
    }

    fn viewport_width(&self) -> Option<f64> {
        self.viewport_reads.set(self.viewport_reads.get() + 1);
        self.viewport.map(|v| v.width)
    }
}

impl Surface for HeadlessDocument {
    fn viewport(&self) -> Option<Size> {
        self.viewport
    }

    fn query(&self, selector: &str) -> Option<ElementId> {
        self.nodes
            .iter()
            .find(|(_, n)| n.selectors.iter().any(|s| s == selector))
            .map(|(id, _)| *id)
    }

    fn contains(&self, element: ElementId) -> bool {
        self.nodes.contains_key(&element)
    }

    fn bounding_rect(&self, element: ElementId) -> Option<Rect> {
        self.nodes.get(&element).map(|n| n.rect)
    }

    fn content_height(&self, element: ElementId) -> Option<f64> {
        self.nodes.get(&element).map(|n| n.content_height)
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn scroll_to(&mut self, y: f64) {
        let max = self
            .body_height
            .zip(self.viewport)
            .map(|(h, v)| (h - v.height).max(0.0));
        self.scroll_y = match max {
            Some(max) => y.clamp(0.0, max),
            None => y.max(0.0),
        };
    }

    fn set_transform(&mut self, element: ElementId, transform: Option<Transform>) {
        if let Some(n) = self.nodes.get_mut(&element) {
            n.transform = transform;
            self.transform_writes += 1;
        }
    }

    fn set_body_height(&mut self, height: Option<f64>) {
        self.body_height = height;
    }

    fn add_listener(
        &mut self,
        target: EventTarget,
        kind: EventKind,
        _options: ListenerOptions,
    ) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.insert(id, (target, kind));
        id
    }

    fn remove_listener(&mut self, target: EventTarget, kind: EventKind, id: ListenerId) {
        if self.listeners.get(&id) == Some(&(target, kind)) {
            self.listeners.remove(&id);
        }
    }

    fn add_class(&mut self, target: ClassTarget, class: &str) {
        match target {
            ClassTarget::Root => {
                self.root_classes.insert(class.to_string());
            }
            ClassTarget::Body => {
                self.body_classes.insert(class.to_string());
            }
            ClassTarget::Element(el) => {
                if let Some(n) = self.nodes.get_mut(&el) {
                    n.classes.insert(class.to_string());
                }
            }
        }
    }

    fn remove_class(&mut self, target: ClassTarget, class: &str) {
        match target {
            ClassTarget::Root => {
                self.root_classes.remove(class);
            }
            ClassTarget::Body => {
                self.body_classes.remove(class);
            }
            ClassTarget::Element(el) => {
                if let Some(n) = self.nodes.get_mut(&el) {
                    n.classes.remove(class);
                }
            }
        }
    }

    fn append_overlay(&mut self, overlay: &WaveOverlay) -> ElementId {
        let id = ElementId(self.next_element);
        self.next_element += 1;
        let viewport = self.viewport.unwrap_or(Size::ZERO);
        let mut classes = BTreeSet::new();
        classes.insert(CONTAINER_CLASS.to_string());
        self.nodes.insert(
            id,
            Node {
                rect: Rect::from_origin_size((0.0, 0.0), viewport),
                classes,
                overlay_svg: Some(overlay.to_svg()),
                ..Node::default()
            },
        );
        id
    }

    fn remove_element(&mut self, element: ElementId) {
        self.nodes.remove(&element);
    }

    fn color_scheme(&self) -> ColorScheme {
        self.scheme
    }

    fn set_color_scheme(&mut self, scheme: ColorScheme) {
        self.scheme = scheme;
    }

    fn pending_images(&self) -> usize {
        self.pending_images
    }

    fn is_disabled(&self, element: ElementId) -> bool {
        self.nodes.get(&element).is_some_and(|n| n.disabled)
    }

    fn vibrate(&mut self, pattern: &[u64]) -> bool {
        if !self.vibration {
            return false;
        }
        self.vibrations.push(pattern.to_vec());
        true
    }

    fn supports_vibration(&self) -> bool {
        self.vibration
    }
}

#[cfg(test)]
#[path = "../../tests/unit/platform/headless.rs"]
mod tests;
