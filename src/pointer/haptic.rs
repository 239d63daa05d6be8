use std::collections::BTreeMap;

use crate::config::HapticConfig;
use crate::events::listeners::ListenerRegistry;
use crate::foundation::core::{ElementId, Millis};
use crate::platform::surface::{EventKind, EventTarget, InputEvent, ListenerOptions, Surface};
use crate::pointer::{PointerCtx, PointerEffect, SetupEnv};
use crate::schedule::timing::Throttle;

/// Strength of a vibration pulse.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HapticKind {
    #[default]
    Light,
    Medium,
    Heavy,
    Click,
}

impl HapticKind {
    /// Vibration pattern in milliseconds.
    pub fn pattern(self) -> &'static [u64] {
        match self {
            Self::Light => &[10],
            Self::Medium => &[20],
            Self::Heavy => &[30],
            Self::Click => &[5],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum HapticAction {
    Pulse,
}

/// Vibration feedback on touch for registered interactive elements.
///
/// Listens once at the document level (capture phase) rather than per element.
#[derive(Debug)]
pub struct HapticFeedback {
    config: HapticConfig,
    elements: BTreeMap<ElementId, HapticKind>,
    listeners: ListenerRegistry<HapticAction>,
    throttle: Throttle,
}

impl HapticFeedback {
    pub fn new(config: HapticConfig) -> Self {
        let throttle = Throttle::new(config.throttle_ms);
        Self {
            config,
            elements: BTreeMap::new(),
            listeners: ListenerRegistry::new(),
            throttle,
        }
    }

    pub fn register(&mut self, element: ElementId, kind: HapticKind) {
        self.elements.insert(element, kind);
    }

    pub fn unregister(&mut self, element: ElementId) {
        self.elements.remove(&element);
    }

    /// Fire a pulse directly. Returns true if the device vibrated.
    pub fn trigger(&mut self, surface: &mut dyn Surface, kind: HapticKind, now: Millis) -> bool {
        if !self.throttle.ready(now) {
            return false;
        }
        surface.vibrate(kind.pattern())
    }
}

impl PointerEffect for HapticFeedback {
    fn name(&self) -> &'static str {
        "haptic"
    }

    fn setup(&mut self, ctx: &mut PointerCtx<'_>, env: SetupEnv<'_>) -> usize {
        self.cleanup(ctx);
        if !self.config.gate.allows(env.is_desktop, env.is_mobile)
            || !ctx.surface.supports_vibration()
        {
            return 0;
        }
        let options = ListenerOptions {
            passive: true,
            capture: true,
        };
        for kind in [EventKind::TouchStart, EventKind::Click] {
            self.listeners.add(
                ctx.surface,
                EventTarget::Document,
                kind,
                HapticAction::Pulse,
                options,
            );
        }
        self.listeners.len()
    }

    fn cleanup(&mut self, ctx: &mut PointerCtx<'_>) {
        self.listeners.remove_all(ctx.surface);
        self.throttle.reset();
    }

    fn handle(&mut self, ctx: &mut PointerCtx<'_>, event: &InputEvent) -> bool {
        if self.listeners.handler(EventTarget::Document, event.kind).is_none() {
            return false;
        }
        let Some(el) = event.element else {
            return true;
        };
        let Some(kind) = self.elements.get(&el).copied() else {
            return true;
        };
        if ctx.surface.is_disabled(el) {
            return true;
        }
        self.trigger(ctx.surface, kind, ctx.now);
        true
    }

    fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}
