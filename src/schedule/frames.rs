//! Registry of frame callbacks.
//!
//! Components never call back into themselves on a frame; they hold a [`FrameHandle`] and the
//! runtime asks the loop which clients to drive each tick. Recurring requests model a
//! self-rescheduling animation loop, one-shot requests model a single deferred read or write.

use std::collections::BTreeMap;

/// Who a frame callback belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameClient {
    Scroll,
    Parallax,
    PointerGeometry,
    TransitionNudge,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameHandle(u64);

#[derive(Debug, Default)]
pub struct FrameLoop {
    next: u64,
    recurring: BTreeMap<u64, FrameClient>,
    once: BTreeMap<u64, FrameClient>,
    ticks: u64,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `client` on every frame until cancelled.
    pub fn request_recurring(&mut self, client: FrameClient) -> FrameHandle {
        let id = self.alloc();
        self.recurring.insert(id, client);
        FrameHandle(id)
    }

    /// Run `client` on the next frame only.
    pub fn request_once(&mut self, client: FrameClient) -> FrameHandle {
        let id = self.alloc();
        self.once.insert(id, client);
        FrameHandle(id)
    }

    /// Returns false if the handle already ran (one-shot) or was cancelled.
    pub fn cancel(&mut self, handle: FrameHandle) -> bool {
        self.recurring.remove(&handle.0).is_some() || self.once.remove(&handle.0).is_some()
    }

    pub fn is_scheduled(&self, handle: FrameHandle) -> bool {
        self.recurring.contains_key(&handle.0) || self.once.contains_key(&handle.0)
    }

    /// Clients to drive this tick, in request order. One-shot requests are consumed.
    pub fn begin_frame(&mut self) -> Vec<FrameClient> {
        self.ticks += 1;
        let mut ids: Vec<(u64, FrameClient)> = self
            .recurring
            .iter()
            .map(|(id, c)| (*id, *c))
            .chain(std::mem::take(&mut self.once))
            .collect();
        ids.sort_by_key(|(id, _)| *id);
        ids.into_iter().map(|(_, c)| c).collect()
    }

    /// Live recurring loops owned by `client`.
    pub fn recurring_for(&self, client: FrameClient) -> usize {
        self.recurring.values().filter(|c| **c == client).count()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn clear(&mut self) {
        self.recurring.clear();
        self.once.clear();
    }

    fn alloc(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }
}
