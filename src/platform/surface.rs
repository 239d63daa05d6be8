//! The presentation boundary.
//!
//! Everything the motion layer reads from or writes to the document goes through [`Surface`].
//! Hosts implement it over their real document; [`HeadlessDocument`](crate::HeadlessDocument)
//! implements it in memory.

use crate::device::detector::DeviceInfo;
use crate::device::theme::ColorScheme;
use crate::foundation::core::{ElementId, Millis, Point, Rect, Size, Transform};
use crate::transition::overlay::WaveOverlay;

/// Where a listener is attached.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum EventTarget {
    Window,
    Document,
    Element(ElementId),
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    PointerDown,
    PointerMove,
    PointerEnter,
    PointerLeave,
    TouchStart,
    Click,
    Resize,
    Scroll,
}

impl EventKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::PointerDown => "pointerdown",
            Self::PointerMove => "pointermove",
            Self::PointerEnter => "pointerenter",
            Self::PointerLeave => "pointerleave",
            Self::TouchStart => "touchstart",
            Self::Click => "click",
            Self::Resize => "resize",
            Self::Scroll => "scroll",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ListenerOptions {
    pub passive: bool,
    pub capture: bool,
}

impl ListenerOptions {
    pub const PASSIVE: Self = Self {
        passive: true,
        capture: false,
    };
}

/// Surface-assigned identity of one attached listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(pub u64);

/// An input event delivered by the host.
///
/// `element` is the element under the pointer (the event's origin), if any. Window-level
/// events such as resize carry `None`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct InputEvent {
    pub kind: EventKind,
    pub element: Option<ElementId>,
    pub position: Point,
    pub time: Millis,
}

impl InputEvent {
    pub fn pointer(kind: EventKind, element: Option<ElementId>, x: f64, y: f64, time: Millis) -> Self {
        Self {
            kind,
            element,
            position: Point::new(x, y),
            time,
        }
    }

    pub fn window(kind: EventKind, time: Millis) -> Self {
        Self {
            kind,
            element: None,
            position: Point::ZERO,
            time,
        }
    }

    /// Targets the event reaches, innermost first.
    pub fn propagation_path(&self) -> Vec<EventTarget> {
        match self.kind {
            EventKind::Resize | EventKind::Scroll => vec![EventTarget::Window],
            _ => self
                .element
                .map(EventTarget::Element)
                .into_iter()
                .chain([EventTarget::Document, EventTarget::Window])
                .collect(),
        }
    }
}

/// Nodes that can carry state classes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ClassTarget {
    /// The document root (`<html>`).
    Root,
    Body,
    Element(ElementId),
}

pub trait Surface: DeviceInfo {
    /// Viewport size, or `None` when nothing is being presented.
    fn viewport(&self) -> Option<Size>;

    /// First element matching `selector`.
    fn query(&self, selector: &str) -> Option<ElementId>;

    /// Whether `element` is still mounted.
    fn contains(&self, element: ElementId) -> bool;

    /// Viewport-relative bounding box.
    fn bounding_rect(&self, element: ElementId) -> Option<Rect>;

    /// Laid-out content height of `element`, as a resize observer would report it.
    fn content_height(&self, element: ElementId) -> Option<f64>;

    /// Native (platform) vertical scroll offset.
    fn scroll_y(&self) -> f64;

    fn scroll_to(&mut self, y: f64);

    /// Write (`Some`) or clear (`None`) the inline transform of `element`.
    fn set_transform(&mut self, element: ElementId, transform: Option<Transform>);

    /// Write (`Some`) or clear (`None`) the inline height of the document body.
    fn set_body_height(&mut self, height: Option<f64>);

    fn add_listener(
        &mut self,
        target: EventTarget,
        kind: EventKind,
        options: ListenerOptions,
    ) -> ListenerId;

    /// Detach a listener. Unknown ids are ignored.
    fn remove_listener(&mut self, target: EventTarget, kind: EventKind, id: ListenerId);

    fn add_class(&mut self, target: ClassTarget, class: &str);

    fn remove_class(&mut self, target: ClassTarget, class: &str);

    /// Append the transition overlay to the body and return its element.
    fn append_overlay(&mut self, overlay: &WaveOverlay) -> ElementId;

    /// Detach an element. Unknown ids are ignored.
    fn remove_element(&mut self, element: ElementId);

    fn color_scheme(&self) -> ColorScheme;

    fn set_color_scheme(&mut self, scheme: ColorScheme);

    /// Images in the document that have not finished loading.
    fn pending_images(&self) -> usize;

    fn is_disabled(&self, element: ElementId) -> bool;

    /// Fire a vibration pattern (ms on/off). Returns false when unsupported.
    fn vibrate(&mut self, pattern: &[u64]) -> bool;

    fn supports_vibration(&self) -> bool;
}
