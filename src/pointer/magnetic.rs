use std::collections::BTreeMap;

use crate::animation::ease::Ease;
use crate::animation::tween::{Channel, TweenStep, TweenTarget};
use crate::config::MagneticConfig;
use crate::events::listeners::ListenerRegistry;
use crate::foundation::core::{ElementId, Point, Rect, Vec2};
use crate::platform::surface::{EventKind, EventTarget, InputEvent, ListenerOptions};
use crate::pointer::{PointerCtx, PointerEffect, SetupEnv};
use crate::schedule::frames::{FrameClient, FrameHandle};
use crate::schedule::timing::Throttle;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MagneticAction {
    Enter,
    Move,
    Leave,
    /// Window resize or scroll: element geometry is stale.
    Relayout,
}

#[derive(Debug)]
struct Tracked {
    rect: Rect,
    hovering: bool,
    throttle: Throttle,
}

/// Elements drift toward the pointer while hovered and spring back on leave.
#[derive(Debug)]
pub struct MagneticHover {
    config: MagneticConfig,
    registered: Vec<ElementId>,
    tracked: BTreeMap<ElementId, Tracked>,
    listeners: ListenerRegistry<MagneticAction>,
    relayout: Option<FrameHandle>,
}

impl MagneticHover {
    pub fn new(config: MagneticConfig) -> Self {
        Self {
            config,
            registered: Vec::new(),
            tracked: BTreeMap::new(),
            listeners: ListenerRegistry::new(),
            relayout: None,
        }
    }

    pub fn register(&mut self, element: ElementId) {
        if !self.registered.contains(&element) {
            self.registered.push(element);
        }
    }

    pub fn unregister(&mut self, element: ElementId) {
        self.registered.retain(|e| *e != element);
    }

    pub fn registered(&self) -> &[ElementId] {
        &self.registered
    }

    /// Offset an element is pulled toward for a pointer at `pointer`.
    pub fn offset(&self, rect: Rect, pointer: Point) -> Vec2 {
        (pointer - rect.center()) * self.config.intensity
    }

    /// Re-read the bounding box of every tracked element.
    pub fn refresh_geometry(&mut self, ctx: &mut PointerCtx<'_>) {
        self.relayout = None;
        for (el, t) in &mut self.tracked {
            if let Some(rect) = ctx.surface.bounding_rect(*el) {
                t.rect = rect;
            }
        }
    }

    fn request_relayout(&mut self, ctx: &mut PointerCtx<'_>) {
        if self.relayout.is_none() {
            self.relayout = Some(ctx.frames.request_once(FrameClient::PointerGeometry));
        }
    }

    fn enter(&mut self, ctx: &mut PointerCtx<'_>, el: ElementId) {
        let Some(t) = self.tracked.get_mut(&el) else {
            return;
        };
        t.hovering = true;
        ctx.pool.evict(ctx.animator, el);
        ctx.animator.kill_tweens_of(el, &[Channel::X, Channel::Y]);
        ctx.animator.set(ctx.surface, el, TweenTarget::xy(0.0, 0.0));
        if let Some(rect) = ctx.surface.bounding_rect(el) {
            t.rect = rect;
        }
    }

    fn follow(&mut self, ctx: &mut PointerCtx<'_>, el: ElementId, pointer: Point) {
        let Some(t) = self.tracked.get_mut(&el) else {
            return;
        };
        if !t.hovering || !t.throttle.ready(ctx.now) {
            return;
        }
        let rect = t.rect;
        let offset = self.offset(rect, pointer);
        let step = TweenStep::new(
            TweenTarget::xy(offset.x, offset.y),
            self.config.follow_ms,
            Ease::OutCubic,
        );
        let now = ctx.now;
        ctx.pool
            .replace_current(ctx.animator, el, |a| a.to(el, step, now));
    }

    fn leave(&mut self, ctx: &mut PointerCtx<'_>, el: ElementId) {
        let Some(t) = self.tracked.get_mut(&el) else {
            return;
        };
        t.hovering = false;
        let e = self.config.return_elasticity;
        let step = TweenStep::new(
            TweenTarget::xy(0.0, 0.0),
            self.config.return_ms,
            Ease::elastic(e.amplitude, e.period),
        );
        let now = ctx.now;
        ctx.pool
            .replace_leave(ctx.animator, el, |a| a.to(el, step, now));
    }
}

impl PointerEffect for MagneticHover {
    fn name(&self) -> &'static str {
        "magnetic"
    }

    fn setup(&mut self, ctx: &mut PointerCtx<'_>, env: SetupEnv<'_>) -> usize {
        self.cleanup(ctx);
        if !self.config.gate.allows(env.is_desktop, env.is_mobile) {
            return 0;
        }

        self.registered.retain(|el| ctx.surface.contains(*el));
        for el in self.registered.clone() {
            let target = EventTarget::Element(el);
            for (kind, action) in [
                (EventKind::PointerEnter, MagneticAction::Enter),
                (EventKind::PointerMove, MagneticAction::Move),
                (EventKind::PointerLeave, MagneticAction::Leave),
            ] {
                self.listeners
                    .add(ctx.surface, target, kind, action, ListenerOptions::PASSIVE);
            }
            let rect = ctx.surface.bounding_rect(el).unwrap_or_default();
            self.tracked.insert(
                el,
                Tracked {
                    rect,
                    hovering: false,
                    throttle: Throttle::new(self.config.move_throttle_ms),
                },
            );
            ctx.animator.set(
                ctx.surface,
                el,
                TweenTarget {
                    x: Some(0.0),
                    y: Some(0.0),
                    scale: Some(1.0),
                },
            );
        }

        if !self.tracked.is_empty() {
            for kind in [EventKind::Resize, EventKind::Scroll] {
                self.listeners.add(
                    ctx.surface,
                    EventTarget::Window,
                    kind,
                    MagneticAction::Relayout,
                    ListenerOptions::PASSIVE,
                );
            }
        }
        tracing::debug!(elements = self.tracked.len(), "magnetic hover set up");
        self.listeners.len()
    }

    fn cleanup(&mut self, ctx: &mut PointerCtx<'_>) {
        self.listeners.remove_all(ctx.surface);
        if let Some(handle) = self.relayout.take() {
            ctx.frames.cancel(handle);
        }
        for el in std::mem::take(&mut self.tracked).into_keys() {
            ctx.pool.evict(ctx.animator, el);
            ctx.animator.kill_tweens_of(el, &[Channel::X, Channel::Y]);
            if ctx.surface.contains(el) {
                ctx.animator.set(ctx.surface, el, TweenTarget::xy(0.0, 0.0));
            } else {
                ctx.animator.forget(el);
            }
        }
    }

    fn handle(&mut self, ctx: &mut PointerCtx<'_>, event: &InputEvent) -> bool {
        let mut handled = false;
        for target in event.propagation_path() {
            let Some(action) = self.listeners.handler(target, event.kind).copied() else {
                continue;
            };
            handled = true;
            match (action, target) {
                (MagneticAction::Enter, EventTarget::Element(el)) => self.enter(ctx, el),
                (MagneticAction::Move, EventTarget::Element(el)) => {
                    self.follow(ctx, el, event.position)
                }
                (MagneticAction::Leave, EventTarget::Element(el)) => self.leave(ctx, el),
                (MagneticAction::Relayout, _) => self.request_relayout(ctx),
                _ => {}
            }
        }
        handled
    }

    fn frame(&mut self, ctx: &mut PointerCtx<'_>, client: FrameClient) {
        if client == FrameClient::PointerGeometry && self.relayout.is_some() {
            self.refresh_geometry(ctx);
        }
    }

    fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pointer/magnetic.rs"]
mod tests;
