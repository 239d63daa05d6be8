//! Listener bookkeeping with guaranteed attach/detach symmetry.
//!
//! A registry owns every listener its component attached. Handlers are plain values (usually
//! a small action enum) that the owning component interprets when an event arrives.

use std::collections::BTreeMap;

use crate::platform::surface::{EventKind, EventTarget, ListenerId, ListenerOptions, Surface};

#[derive(Debug)]
struct Attached<H> {
    id: ListenerId,
    handler: H,
}

/// At most one handler per `(target, kind)` key.
#[derive(Debug)]
pub struct ListenerRegistry<H> {
    entries: BTreeMap<(EventTarget, EventKind), Attached<H>>,
}

impl<H> Default for ListenerRegistry<H> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<H> ListenerRegistry<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `handler`. An existing handler under the same key is detached first.
    pub fn add(
        &mut self,
        surface: &mut dyn Surface,
        target: EventTarget,
        kind: EventKind,
        handler: H,
        options: ListenerOptions,
    ) {
        self.remove(surface, target, kind);
        let id = surface.add_listener(target, kind, options);
        self.entries.insert((target, kind), Attached { id, handler });
    }

    /// Detach the handler under `(target, kind)`. Returns false when none was attached.
    pub fn remove(&mut self, surface: &mut dyn Surface, target: EventTarget, kind: EventKind) -> bool {
        match self.entries.remove(&(target, kind)) {
            Some(a) => {
                surface.remove_listener(target, kind, a.id);
                true
            }
            None => false,
        }
    }

    /// Detach everything. Safe to call repeatedly and on a partially populated registry.
    pub fn remove_all(&mut self, surface: &mut dyn Surface) {
        for ((target, kind), a) in std::mem::take(&mut self.entries) {
            surface.remove_listener(target, kind, a.id);
        }
    }

    pub fn handler(&self, target: EventTarget, kind: EventKind) -> Option<&H> {
        self.entries.get(&(target, kind)).map(|a| &a.handler)
    }

    pub fn contains(&self, target: EventTarget, kind: EventKind) -> bool {
        self.entries.contains_key(&(target, kind))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/events/listeners.rs"]
mod tests;
