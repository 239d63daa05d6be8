use crate::config::ScrollConfig;
use crate::foundation::core::{ElementId, Millis, Transform};
use crate::platform::surface::Surface;
use crate::schedule::frames::{FrameClient, FrameHandle, FrameLoop};
use crate::scroll::state::ScrollState;
use crate::scroll::{
    BodyHeightSync, EngineState, InverseParallax, RefreshOutcome, ScrollDriver, ScrollTargets,
};

/// Lerp-driven smooth scroll with velocity skew.
#[derive(Debug)]
pub struct SmoothScroll {
    config: ScrollConfig,
    state: EngineState,
    targets: Option<ScrollTargets>,
    scroll: ScrollState,
    frame: Option<FrameHandle>,
    body: BodyHeightSync,
    inverse: InverseParallax,
    frames_rendered: u64,
    refreshes: u64,
}

impl SmoothScroll {
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            config,
            state: EngineState::Uninitialized,
            targets: None,
            scroll: ScrollState::default(),
            frame: None,
            body: BodyHeightSync::default(),
            inverse: InverseParallax::default(),
            frames_rendered: 0,
            refreshes: 0,
        }
    }

    pub fn scroll_state(&self) -> &ScrollState {
        &self.scroll
    }

    fn content_transform(&self, skew: f64) -> Transform {
        Transform {
            skew_y_deg: skew,
            perspective: Some(self.config.perspective_px),
            ..Transform::default()
        }
    }
}

impl ScrollDriver for SmoothScroll {
    fn init(&mut self, surface: &mut dyn Surface, frames: &mut FrameLoop, _now: Millis) -> bool {
        let targets = match ScrollTargets::resolve(surface, &self.config) {
            Ok(t) => t,
            Err(e) => {
                tracing::warn!(error = %e, "smooth scroll: required elements not found");
                return false;
            }
        };

        if let Some(handle) = self.frame.take() {
            frames.cancel(handle);
        }
        self.targets = Some(targets);
        self.body = BodyHeightSync::default();
        self.body.sync(surface, targets.wrapper);

        surface.scroll_to(0.0);
        self.scroll = ScrollState::at(surface.scroll_y());
        self.frame = Some(frames.request_recurring(FrameClient::Scroll));
        self.state = EngineState::Running;
        tracing::debug!(?targets, "smooth scroll running");
        true
    }

    fn frame(&mut self, surface: &mut dyn Surface, _now: Millis) {
        if self.state != EngineState::Running {
            return;
        }
        let Some(targets) = self.targets else {
            return;
        };
        if !targets.mounted(surface) {
            return;
        }

        self.body.sync(surface, targets.wrapper);
        let out = self.scroll.step(surface.scroll_y(), &self.config);
        surface.set_transform(
            targets.wrapper,
            Some(Transform::translate(0.0, -out.position)),
        );
        surface.set_transform(targets.content, Some(self.content_transform(out.skew)));
        self.inverse.apply(surface, out.position);
        self.frames_rendered += 1;
    }

    fn scroll_to(&mut self, surface: &mut dyn Surface, y: f64, _now: Millis) {
        // The loop already smooths toward the native offset.
        surface.scroll_to(y);
    }

    fn refresh(&mut self, surface: &mut dyn Surface, _now: Millis) -> RefreshOutcome {
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
        self.scroll = ScrollState::default();
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
        self.scroll.rendered_position
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/engine.rs"]
mod tests;
