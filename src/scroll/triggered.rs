//! Trigger-offset scroll driver.
//!
//! Scroll-linked triggers compute their offsets from the laid-out page, so the first refresh
//! after `init` waits for images to finish loading, up to `preload_timeout_ms`. Past that it
//! refreshes anyway against whatever layout exists.

use crate::animation::ease::Ease;
use crate::config::ScrollConfig;
use crate::foundation::core::{ElementId, Millis, Transform};
use crate::foundation::math::lerp;
use crate::platform::surface::Surface;
use crate::schedule::frames::{FrameClient, FrameHandle, FrameLoop};
use crate::scroll::state::POSITION_EPSILON;
use crate::scroll::{
    BodyHeightSync, EngineState, InverseParallax, RefreshOutcome, ScrollDriver, ScrollTargets,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Preload {
    Pending,
    Waiting { since: Millis },
    Done,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct ScrollAnimation {
    from: f64,
    to: f64,
    start: Millis,
    duration_ms: u64,
}

#[derive(Debug)]
pub struct TriggeredScroll {
    config: ScrollConfig,
    state: EngineState,
    targets: Option<ScrollTargets>,
    position: f64,
    animation: Option<ScrollAnimation>,
    frame: Option<FrameHandle>,
    body: BodyHeightSync,
    inverse: InverseParallax,
    preload: Preload,
    frames_rendered: u64,
    refreshes: u64,
}

impl TriggeredScroll {
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            config,
            state: EngineState::Uninitialized,
            targets: None,
            position: 0.0,
            animation: None,
            frame: None,
            body: BodyHeightSync::default(),
            inverse: InverseParallax::default(),
            preload: Preload::Pending,
            frames_rendered: 0,
            refreshes: 0,
        }
    }

    fn drive_animation(&mut self, surface: &mut dyn Surface, now: Millis) {
        let Some(anim) = self.animation else {
            return;
        };
        let t = if anim.duration_ms == 0 {
            1.0
        } else {
            now.since(anim.start) as f64 / anim.duration_ms as f64
        };
        let k = Ease::OutCubic.apply(t);
        surface.scroll_to(anim.from + (anim.to - anim.from) * k);
        if t >= 1.0 {
            self.animation = None;
        }
    }
}

impl ScrollDriver for TriggeredScroll {
    fn init(&mut self, surface: &mut dyn Surface, frames: &mut FrameLoop, _now: Millis) -> bool {
        let targets = match ScrollTargets::resolve(surface, &self.config) {
            Ok(t) => t,
            Err(e) => {
                tracing::warn!(error = %e, "triggered scroll: required elements not found");
                return false;
            }
        };
        if let Some(handle) = self.frame.take() {
            frames.cancel(handle);
        }
        self.targets = Some(targets);
        self.body = BodyHeightSync::default();
        self.body.sync(surface, targets.wrapper);
        self.position = surface.scroll_y();
        self.animation = None;
        self.preload = Preload::Pending;
        self.frame = Some(frames.request_recurring(FrameClient::Scroll));
        self.state = EngineState::Running;
        true
    }

    fn frame(&mut self, surface: &mut dyn Surface, now: Millis) {
        if self.state != EngineState::Running {
            return;
        }
        let Some(targets) = self.targets else {
            return;
        };
        if !targets.mounted(surface) {
            return;
        }
        self.drive_animation(surface, now);

        let actual = surface.scroll_y();
        self.position = lerp(self.position, actual, self.config.triggered_smoothing);
        if (self.position - actual).abs() < POSITION_EPSILON {
            self.position = actual;
        }
        surface.set_transform(
            targets.wrapper,
            Some(Transform::translate(0.0, -self.position)),
        );
        self.inverse.apply(surface, self.position);
        self.frames_rendered += 1;
    }

    fn scroll_to(&mut self, surface: &mut dyn Surface, y: f64, now: Millis) {
        self.animation = Some(ScrollAnimation {
            from: surface.scroll_y(),
            to: y,
            start: now,
            duration_ms: self.config.scroll_to_ms,
        });
    }

    fn refresh(&mut self, surface: &mut dyn Surface, now: Millis) -> RefreshOutcome {
        let pending = surface.pending_images();
        match self.preload {
            Preload::Done => {}
            _ if pending == 0 => self.preload = Preload::Done,
            Preload::Pending => {
                self.preload = Preload::Waiting { since: now };
                return RefreshOutcome::Deferred {
                    retry_after_ms: self.config.preload_timeout_ms,
                };
            }
            Preload::Waiting { since } => {
                let waited = now.since(since);
                if waited < self.config.preload_timeout_ms {
                    return RefreshOutcome::Deferred {
                        retry_after_ms: self.config.preload_timeout_ms - waited,
                    };
                }
                tracing::warn!(pending, waited, "image preload timed out, refreshing anyway");
                self.preload = Preload::Done;
            }
        }

        if let Some(targets) = self.targets {
            self.body = BodyHeightSync::default();
            self.body.sync(surface, targets.wrapper);
        }
        self.refreshes += 1;
        RefreshOutcome::Refreshed
    }

    fn pause(&mut self, frames: &mut FrameLoop) {
        if self.state != EngineState::Running {
            return;
        }
        if let Some(handle) = self.frame.take() {
            frames.cancel(handle);
        }
        self.animation = None;
        self.state = EngineState::Paused;
    }

    fn resume(&mut self, frames: &mut FrameLoop) {
        if self.state != EngineState::Paused {
            return;
        }
        self.frame = Some(frames.request_recurring(FrameClient::Scroll));
        self.state = EngineState::Running;
    }

    fn apply_inverse_parallax(&mut self, elements: &[ElementId], speed: f64) {
        self.inverse.set(elements, speed);
    }

    fn destroy(&mut self, surface: &mut dyn Surface, frames: &mut FrameLoop) {
        if let Some(handle) = self.frame.take() {
            frames.cancel(handle);
        }
        if let Some(targets) = self.targets.take() {
            targets.clear(surface);
        }
        self.body.disconnect(surface);
        self.inverse.clear(surface);
        self.animation = None;
        if self.state != EngineState::Uninitialized {
            self.state = EngineState::Destroyed;
        }
    }

    fn state(&self) -> EngineState {
        self.state
    }

    fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    fn refreshes(&self) -> u64 {
        self.refreshes
    }

    fn rendered_position(&self) -> f64 {
        self.position
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/triggered.rs"]
mod tests;
