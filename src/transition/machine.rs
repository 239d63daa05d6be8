//! Page-transition state machine.
//!
//! A route change runs `Idle -> Entering -> Holding -> Navigating -> Leaving -> Idle`:
//!
//! 1. `request` publishes [`TransitionSignal::Started`], marks the document and nudges the
//!    native scroll offset for `nudge_ms`.
//! 2. When the nudge window closes the wave overlay is appended and starts its enter animation.
//!    Every later step is scheduled at this point, relative to the reveal, including the
//!    overlay's removal. Removal never depends on navigation succeeding.
//! 3. At the enter midpoint (plus `hold_ms`) the navigator swaps the content, then
//!    [`TransitionSignal::AlmostComplete`] is published and the overlay switches to its leave
//!    animation.
//! 4. The overlay and state classes are removed and [`TransitionSignal::Complete`] is
//!    published.
//!
//! A request arriving mid-transition replaces the single queued slot and runs after
//! `Complete`.

use crate::animation::ease::Ease;
use crate::config::TransitionConfig;
use crate::events::bus::{EventBus, TransitionSignal};
use crate::foundation::core::{ElementId, Millis};
use crate::foundation::error::MotionResult;
use crate::platform::surface::{ClassTarget, Surface};
use crate::schedule::frames::{FrameClient, FrameHandle, FrameLoop};
use crate::schedule::timers::TimerQueue;
use crate::transition::overlay::{ENTER_CLASS, LEAVE_CLASS, WaveOverlay};

/// Class on the body for the whole transition.
pub const BODY_CLASS: &str = "page-transitioning";
/// Class on the document root for the whole transition.
pub const ROOT_CLASS: &str = "page-transition-leave-to";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionPhase {
    #[default]
    Idle,
    Entering,
    Holding,
    Navigating,
    Leaving,
}

/// The routing layer: swaps the page content for `to`.
pub trait Navigator {
    fn navigate(&mut self, to: &str, surface: &mut dyn Surface) -> MotionResult<()>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestOutcome {
    Started,
    /// A transition is running; this route runs after it completes.
    Queued,
    Ignored,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TransitionStep {
    Reveal,
    Hold,
    Navigate,
    Remove,
}

#[derive(Clone, Copy, Debug)]
struct Nudge {
    from: f64,
    start: Millis,
    handle: FrameHandle,
}

pub struct PageTransition {
    config: TransitionConfig,
    bus: EventBus<TransitionSignal>,
    phase: TransitionPhase,
    route: String,
    target: Option<String>,
    queued: Option<String>,
    timers: TimerQueue<TransitionStep>,
    reveal_at: Millis,
    overlay: Option<ElementId>,
    nudge: Option<Nudge>,
    completed: u64,
}

impl PageTransition {
    pub fn new(
        config: TransitionConfig,
        bus: EventBus<TransitionSignal>,
        route: impl Into<String>,
    ) -> Self {
        Self {
            config,
            bus,
            phase: TransitionPhase::Idle,
            route: route.into(),
            target: None,
            queued: None,
            timers: TimerQueue::new(),
            reveal_at: Millis::default(),
            overlay: None,
            nudge: None,
            completed: 0,
        }
    }

    pub fn phase(&self) -> TransitionPhase {
        self.phase
    }

    /// Route of the page currently presented.
    pub fn route(&self) -> &str {
        &self.route
    }

    /// Route of the in-flight transition, if any.
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    pub fn queued(&self) -> Option<&str> {
        self.queued.as_deref()
    }

    pub fn overlay(&self) -> Option<ElementId> {
        self.overlay
    }

    /// Transitions that reached `Complete`.
    pub fn completed(&self) -> u64 {
        self.completed
    }

    pub fn next_deadline(&self) -> Option<Millis> {
        self.timers.next_deadline()
    }

    #[tracing::instrument(skip(self, surface, frames), fields(from = %self.route))]
    pub fn request(
        &mut self,
        to: &str,
        surface: &mut dyn Surface,
        frames: &mut FrameLoop,
        now: Millis,
    ) -> RequestOutcome {
        if self.phase != TransitionPhase::Idle {
            if self.target.as_deref() == Some(to) && self.queued.is_none() {
                return RequestOutcome::Ignored;
            }
            tracing::debug!(phase = ?self.phase, "transition running, queueing route");
            self.queued = Some(to.to_string());
            return RequestOutcome::Queued;
        }
        if to == self.route {
            return RequestOutcome::Ignored;
        }

        self.phase = TransitionPhase::Entering;
        self.target = Some(to.to_string());
        self.bus.publish(TransitionSignal::Started);
        surface.add_class(ClassTarget::Body, BODY_CLASS);

        self.nudge = Some(Nudge {
            from: surface.scroll_y(),
            start: now,
            handle: frames.request_recurring(FrameClient::TransitionNudge),
        });
        self.reveal_at = now.after(self.config.nudge_ms);
        self.timers
            .set_timeout(now, self.config.nudge_ms, TransitionStep::Reveal);
        RequestOutcome::Started
    }

    /// Drive the scroll nudge. Called on `TransitionNudge` frames.
    pub fn frame(&mut self, surface: &mut dyn Surface, frames: &mut FrameLoop, now: Millis) {
        let Some(nudge) = self.nudge else {
            return;
        };
        let t = if self.config.nudge_ms == 0 {
            1.0
        } else {
            now.since(nudge.start) as f64 / self.config.nudge_ms as f64
        };
        let k = Ease::OutQuad.apply(t);
        surface.scroll_to(nudge.from + self.config.nudge_distance * k);
        if t >= 1.0 {
            frames.cancel(nudge.handle);
            self.nudge = None;
        }
    }

    /// Fire every step due at `now`.
    pub fn advance(
        &mut self,
        surface: &mut dyn Surface,
        frames: &mut FrameLoop,
        navigator: &mut dyn Navigator,
        now: Millis,
    ) {
        loop {
            let due = self.timers.due(now);
            if due.is_empty() {
                break;
            }
            for step in due {
                match step {
                    TransitionStep::Reveal => self.reveal(surface, frames),
                    TransitionStep::Hold => self.phase = TransitionPhase::Holding,
                    TransitionStep::Navigate => self.navigate(surface, navigator),
                    TransitionStep::Remove => self.remove(surface, frames, now),
                }
            }
        }
    }

    /// Tear down any in-flight transition without publishing. Safe to call when idle.
    pub fn abort(&mut self, surface: &mut dyn Surface, frames: &mut FrameLoop) {
        self.timers.clear_all();
        if let Some(nudge) = self.nudge.take() {
            frames.cancel(nudge.handle);
        }
        self.clear_document(surface);
        self.target = None;
        self.queued = None;
        self.phase = TransitionPhase::Idle;
    }

    fn reveal(&mut self, surface: &mut dyn Surface, frames: &mut FrameLoop) {
        if let Some(nudge) = self.nudge.take() {
            frames.cancel(nudge.handle);
        }
        match surface.viewport() {
            Some(viewport) => {
                let overlay = WaveOverlay::new(viewport, surface.color_scheme());
                let el = surface.append_overlay(&overlay);
                surface.add_class(ClassTarget::Element(el), ENTER_CLASS);
                self.overlay = Some(el);
            }
            None => tracing::warn!("no viewport, navigating without overlay"),
        }
        surface.add_class(ClassTarget::Root, ROOT_CLASS);

        let base = self.reveal_at;
        let midpoint = self.config.midpoint_ms();
        self.timers.set_timeout(base, midpoint, TransitionStep::Hold);
        self.timers.set_timeout(
            base,
            midpoint + self.config.hold_ms,
            TransitionStep::Navigate,
        );
        self.timers.set_timeout(
            base,
            self.config.reveal_to_removal_ms(),
            TransitionStep::Remove,
        );
    }

    fn navigate(&mut self, surface: &mut dyn Surface, navigator: &mut dyn Navigator) {
        self.phase = TransitionPhase::Navigating;
        if let Some(to) = self.target.clone() {
            match navigator.navigate(&to, surface) {
                Ok(()) => self.route = to,
                Err(e) => tracing::warn!(error = %e, route = %to, "navigation failed"),
            }
        }
        self.bus.publish(TransitionSignal::AlmostComplete);
        if let Some(el) = self.overlay {
            surface.remove_class(ClassTarget::Element(el), ENTER_CLASS);
            surface.add_class(ClassTarget::Element(el), LEAVE_CLASS);
        }
        self.phase = TransitionPhase::Leaving;
    }

    fn remove(&mut self, surface: &mut dyn Surface, frames: &mut FrameLoop, now: Millis) {
        self.clear_document(surface);
        self.target = None;
        self.phase = TransitionPhase::Idle;
        self.completed += 1;
        self.bus.publish(TransitionSignal::Complete);

        if let Some(next) = self.queued.take() {
            self.request(&next, surface, frames, now);
        }
    }

    fn clear_document(&mut self, surface: &mut dyn Surface) {
        if let Some(el) = self.overlay.take() {
            surface.remove_element(el);
        }
        surface.remove_class(ClassTarget::Body, BODY_CLASS);
        surface.remove_class(ClassTarget::Root, ROOT_CLASS);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transition/machine.rs"]
mod tests;
