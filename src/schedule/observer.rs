//! Intersection observer whose callbacks run on the scheduler's high-priority path.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::foundation::core::{ElementId, Millis, Rect};
use crate::platform::surface::Surface;
use crate::schedule::tasks::{Priority, TaskScheduler};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ObserverOptions {
    /// Grow the viewport by this many pixels on every side before testing.
    pub root_margin: f64,
    /// Minimum visible fraction of the element to count as intersecting.
    pub threshold: f64,
}

impl Default for ObserverOptions {
    fn default() -> Self {
        Self {
            root_margin: 300.0,
            threshold: 0.01,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct IntersectionEntry {
    pub element: ElementId,
    pub is_intersecting: bool,
    pub ratio: f64,
    pub time: Millis,
}

type Callback = Rc<RefCell<dyn FnMut(&IntersectionEntry)>>;

struct Inner {
    callback: Callback,
    options: ObserverOptions,
    // Last reported state; `None` until the first check.
    observed: BTreeMap<ElementId, Option<bool>>,
    connected: bool,
    scheduler: TaskScheduler,
}

/// Cloneable handle; every clone observes the same set.
#[derive(Clone)]
pub struct OptimizedObserver {
    inner: Rc<RefCell<Inner>>,
}

impl OptimizedObserver {
    pub fn new(
        scheduler: TaskScheduler,
        options: ObserverOptions,
        callback: impl FnMut(&IntersectionEntry) + 'static,
    ) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                callback: Rc::new(RefCell::new(callback)),
                options,
                observed: BTreeMap::new(),
                connected: false,
                scheduler,
            })),
        }
    }

    /// Start observing `element`. Observing twice is a no-op.
    pub fn observe(&self, element: ElementId) {
        let mut inner = self.inner.borrow_mut();
        inner.connected = true;
        inner.observed.entry(element).or_insert(None);
    }

    pub fn unobserve(&self, element: ElementId) {
        self.inner.borrow_mut().observed.remove(&element);
    }

    /// Stop observing everything. Idempotent.
    pub fn disconnect(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.observed.clear();
        inner.connected = false;
    }

    pub fn observed_count(&self) -> usize {
        self.inner.borrow().observed.len()
    }

    pub fn is_connected(&self) -> bool {
        self.inner.borrow().connected
    }

    /// Compare every observed element against the viewport and queue one high-priority task
    /// delivering the entries whose state changed. Returns how many entries were queued.
    pub fn check(&self, surface: &dyn Surface, now: Millis) -> usize {
        let mut inner = self.inner.borrow_mut();
        if !inner.connected {
            return 0;
        }
        let Some(viewport) = surface.viewport() else {
            return 0;
        };
        let root = Rect::from_origin_size((0.0, 0.0), viewport).inflate(
            inner.options.root_margin,
            inner.options.root_margin,
        );
        let threshold = inner.options.threshold;

        let mut entries = Vec::new();
        for (element, last) in inner.observed.iter_mut() {
            let ratio = surface
                .bounding_rect(*element)
                .map(|r| visible_ratio(r, root))
                .unwrap_or(0.0);
            let is_intersecting = ratio > 0.0 && ratio >= threshold;
            if *last != Some(is_intersecting) {
                *last = Some(is_intersecting);
                entries.push(IntersectionEntry {
                    element: *element,
                    is_intersecting,
                    ratio,
                    time: now,
                });
            }
        }

        let n = entries.len();
        if n > 0 {
            let callback = Rc::clone(&inner.callback);
            // The handle is not needed: delivery is fire-and-forget.
            let _ = inner.scheduler.schedule(
                move || {
                    let mut cb = callback.borrow_mut();
                    for e in &entries {
                        cb(e);
                    }
                    Ok(())
                },
                Priority::High,
            );
        }
        n
    }
}

fn visible_ratio(element: Rect, root: Rect) -> f64 {
    let area = element.area();
    if area <= 0.0 {
        // Zero-size elements count as visible when they sit inside the root.
        return if root.contains(element.origin()) { 1.0 } else { 0.0 };
    }
    let clipped = element.intersect(root);
    (clipped.area() / area).clamp(0.0, 1.0)
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/observer.rs"]
mod tests;
