//! Pointer parallax for layered page art.
//!
//! Active only on the configured route and only when at least one layer is mounted. Pointer
//! moves are coalesced: the latest position is kept and applied on the next frame.

use std::collections::BTreeMap;

use crate::config::ParallaxConfig;
use crate::events::listeners::ListenerRegistry;
use crate::foundation::core::{ElementId, Point, Size, Transform, Vec2};
use crate::platform::surface::{EventKind, EventTarget, InputEvent, ListenerOptions};
use crate::pointer::{PointerCtx, PointerEffect, SetupEnv};
use crate::schedule::frames::{FrameClient, FrameHandle};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParallaxLayer {
    Plain,
    Strong,
    Reverse,
}

impl ParallaxLayer {
    /// Class the page puts on elements of this layer.
    pub fn class(self) -> &'static str {
        match self {
            Self::Plain => "parallax",
            Self::Strong => "parallax-strong",
            Self::Reverse => "parallax-reverse",
        }
    }
}

/// Offsets of the three layers for one pointer position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParallaxOffsets {
    pub plain: Vec2,
    pub strong: Vec2,
    pub reverse: Vec2,
}

impl ParallaxOffsets {
    pub fn for_layer(&self, layer: ParallaxLayer) -> Vec2 {
        match layer {
            ParallaxLayer::Plain => self.plain,
            ParallaxLayer::Strong => self.strong,
            ParallaxLayer::Reverse => self.reverse,
        }
    }
}

/// Layer offsets from the pointer's distance to the viewport center.
pub fn offsets(viewport: Size, pointer: Point, config: &ParallaxConfig) -> ParallaxOffsets {
    let d = Point::new(viewport.width / 2.0, viewport.height / 2.0) - pointer;
    let plain = Vec2::new(d.x / config.plain_divisor.x, d.y / config.plain_divisor.y);
    let strong = Vec2::new(d.x / config.strong_divisor.x, d.y / config.strong_divisor.y);
    ParallaxOffsets {
        plain,
        strong,
        reverse: -plain,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ParallaxAction {
    Track,
}

#[derive(Debug)]
pub struct Parallax {
    config: ParallaxConfig,
    layers: BTreeMap<ElementId, ParallaxLayer>,
    listeners: ListenerRegistry<ParallaxAction>,
    pending: Option<Point>,
    tick: Option<FrameHandle>,
}

impl Parallax {
    pub fn new(config: ParallaxConfig) -> Self {
        Self {
            config,
            layers: BTreeMap::new(),
            listeners: ListenerRegistry::new(),
            pending: None,
            tick: None,
        }
    }

    pub fn register(&mut self, element: ElementId, layer: ParallaxLayer) {
        self.layers.insert(element, layer);
    }

    pub fn unregister(&mut self, element: ElementId) {
        self.layers.remove(&element);
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    fn apply(&self, ctx: &mut PointerCtx<'_>, pointer: Point) {
        let Some(viewport) = ctx.surface.viewport() else {
            return;
        };
        let o = offsets(viewport, pointer, &self.config);
        for (el, layer) in &self.layers {
            let v = o.for_layer(*layer);
            ctx.surface
                .set_transform(*el, Some(Transform::translate(v.x, v.y)));
        }
    }
}

impl PointerEffect for Parallax {
    fn name(&self) -> &'static str {
        "parallax"
    }

    fn setup(&mut self, ctx: &mut PointerCtx<'_>, env: SetupEnv<'_>) -> usize {
        self.cleanup(ctx);
        self.layers.retain(|el, _| ctx.surface.contains(*el));
        if !self.config.gate.allows(env.is_desktop, env.is_mobile)
            || env.route != self.config.route
            || self.layers.is_empty()
        {
            return 0;
        }
        self.listeners.add(
            ctx.surface,
            EventTarget::Window,
            EventKind::PointerMove,
            ParallaxAction::Track,
            ListenerOptions::PASSIVE,
        );
        tracing::debug!(layers = self.layers.len(), "parallax set up");
        self.listeners.len()
    }

    fn cleanup(&mut self, ctx: &mut PointerCtx<'_>) {
        self.listeners.remove_all(ctx.surface);
        if let Some(handle) = self.tick.take() {
            ctx.frames.cancel(handle);
        }
        self.pending = None;
    }

    fn handle(&mut self, ctx: &mut PointerCtx<'_>, event: &InputEvent) -> bool {
        if self.listeners.handler(EventTarget::Window, event.kind) != Some(&ParallaxAction::Track)
        {
            return false;
        }
        self.pending = Some(event.position);
        if self.tick.is_none() {
            self.tick = Some(ctx.frames.request_once(FrameClient::Parallax));
        }
        true
    }

    fn frame(&mut self, ctx: &mut PointerCtx<'_>, client: FrameClient) {
        if client != FrameClient::Parallax || self.tick.take().is_none() {
            return;
        }
        if let Some(pointer) = self.pending.take() {
            self.apply(ctx, pointer);
        }
    }

    fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pointer/parallax.rs"]
mod tests;
