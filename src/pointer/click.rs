use crate::animation::ease::Ease;
use crate::animation::tween::{TweenStep, TweenTarget};
use crate::config::ClickConfig;
use crate::events::listeners::ListenerRegistry;
use crate::foundation::core::ElementId;
use crate::platform::surface::{EventKind, EventTarget, InputEvent, ListenerOptions};
use crate::pointer::{PointerCtx, PointerEffect, SetupEnv};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ClickAction {
    Press,
}

/// Press feedback: a quick scale-down followed by an elastic release.
#[derive(Debug)]
pub struct ClickPulse {
    config: ClickConfig,
    registered: Vec<ElementId>,
    listeners: ListenerRegistry<ClickAction>,
}

impl ClickPulse {
    pub fn new(config: ClickConfig) -> Self {
        Self {
            config,
            registered: Vec::new(),
            listeners: ListenerRegistry::new(),
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

    fn timeline(&self) -> Vec<TweenStep> {
        let e = self.config.release_elasticity;
        vec![
            TweenStep::new(
                TweenTarget::scale(self.config.press_scale),
                self.config.press_ms,
                Ease::OutCubic,
            ),
            TweenStep::new(
                TweenTarget::scale(1.0),
                self.config.release_ms,
                Ease::elastic(e.amplitude, e.period),
            ),
        ]
    }

    fn press(&mut self, ctx: &mut PointerCtx<'_>, el: ElementId) {
        let steps = self.timeline();
        let now = ctx.now;
        let started = ctx
            .pool
            .begin_click(ctx.animator, el, |a| a.timeline(el, steps, now));
        if started.is_none() {
            tracing::trace!(?el, "press ignored, gesture already running");
        }
    }
}

impl PointerEffect for ClickPulse {
    fn name(&self) -> &'static str {
        "click"
    }

    fn setup(&mut self, ctx: &mut PointerCtx<'_>, env: SetupEnv<'_>) -> usize {
        self.cleanup(ctx);
        if !self.config.gate.allows(env.is_desktop, env.is_mobile) {
            return 0;
        }
        self.registered.retain(|el| ctx.surface.contains(*el));
        for el in &self.registered {
            self.listeners.add(
                ctx.surface,
                EventTarget::Element(*el),
                EventKind::PointerDown,
                ClickAction::Press,
                ListenerOptions::default(),
            );
        }
        self.listeners.len()
    }

    fn cleanup(&mut self, ctx: &mut PointerCtx<'_>) {
        self.listeners.remove_all(ctx.surface);
        for el in &self.registered {
            if ctx.pool.cancel_click(ctx.animator, *el) && ctx.surface.contains(*el) {
                ctx.animator.set(ctx.surface, *el, TweenTarget::scale(1.0));
            }
        }
    }

    fn handle(&mut self, ctx: &mut PointerCtx<'_>, event: &InputEvent) -> bool {
        let Some(el) = event.element else {
            return false;
        };
        let target = EventTarget::Element(el);
        match self.listeners.handler(target, event.kind).copied() {
            Some(ClickAction::Press) => {
                self.press(ctx, el);
                true
            }
            None => false,
        }
    }

    fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pointer/click.rs"]
mod tests;
