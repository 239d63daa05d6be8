//! Smooth-scroll drivers.
//!
//! Two drivers share one contract: [`SmoothScroll`](engine::SmoothScroll) low-pass-filters the
//! native scroll offset and derives a velocity skew, [`TriggeredScroll`](triggered::TriggeredScroll)
//! smooths without skew and holds its first refresh until page images have loaded.

pub(crate) mod engine;
pub(crate) mod state;
pub(crate) mod triggered;

use crate::config::ScrollConfig;
use crate::foundation::core::{ElementId, Millis, Transform};
use crate::foundation::error::{MotionError, MotionResult};
use crate::platform::surface::Surface;
use crate::schedule::frames::FrameLoop;

/// Lifecycle of a scroll driver. `Destroyed -> Running` through `init` is legal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineState {
    #[default]
    Uninitialized,
    Running,
    Paused,
    Destroyed,
}

/// Result of a geometry refresh request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefreshOutcome {
    Refreshed,
    /// Layout is not final yet; ask again after the given delay.
    Deferred { retry_after_ms: u64 },
}

pub trait ScrollDriver {
    /// Resolve the wrapper/content pair and start the frame loop.
    ///
    /// Returns false, without side effects, when either element is missing so the caller can
    /// retry once the page has mounted.
    fn init(&mut self, surface: &mut dyn Surface, frames: &mut FrameLoop, now: Millis) -> bool;

    /// One tick of the recurring frame loop.
    fn frame(&mut self, surface: &mut dyn Surface, now: Millis);

    fn scroll_to(&mut self, surface: &mut dyn Surface, y: f64, now: Millis);

    fn refresh(&mut self, surface: &mut dyn Surface, now: Millis) -> RefreshOutcome;

    /// Stop driving frames while keeping the current transforms.
    fn pause(&mut self, frames: &mut FrameLoop);

    fn resume(&mut self, frames: &mut FrameLoop);

    /// Counter-translate `elements` by `speed` times the rendered offset on every frame.
    fn apply_inverse_parallax(&mut self, elements: &[ElementId], speed: f64);

    /// Cancel the loop and clear every inline style the driver wrote. Safe to call twice.
    fn destroy(&mut self, surface: &mut dyn Surface, frames: &mut FrameLoop);

    fn state(&self) -> EngineState;

    fn is_running(&self) -> bool {
        self.state() == EngineState::Running
    }

    /// Frames actually rendered since construction.
    fn frames_rendered(&self) -> u64;

    /// Refreshes that re-synced the layout, not counting deferred ones.
    fn refreshes(&self) -> u64;

    /// Last offset written to the wrapper.
    fn rendered_position(&self) -> f64;
}

/// The element pair a driver transforms.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct ScrollTargets {
    pub(crate) wrapper: ElementId,
    pub(crate) content: ElementId,
}

impl ScrollTargets {
    pub(crate) fn resolve(surface: &dyn Surface, config: &ScrollConfig) -> MotionResult<Self> {
        let wrapper = surface
            .query(&config.wrapper_selector)
            .ok_or_else(|| MotionError::missing_element(config.wrapper_selector.clone()))?;
        let content = surface
            .query(&config.content_selector)
            .ok_or_else(|| MotionError::missing_element(config.content_selector.clone()))?;
        Ok(Self { wrapper, content })
    }

    pub(crate) fn mounted(&self, surface: &dyn Surface) -> bool {
        surface.contains(self.wrapper) && surface.contains(self.content)
    }

    pub(crate) fn clear(&self, surface: &mut dyn Surface) {
        surface.set_transform(self.wrapper, None);
        surface.set_transform(self.content, None);
    }
}

/// Keeps the body as tall as the out-of-flow wrapper, the way a resize observer on the
/// wrapper would.
#[derive(Debug, Default)]
pub(crate) struct BodyHeightSync {
    observed: Option<f64>,
}

impl BodyHeightSync {
    /// Write the body height if the wrapper's content height changed. Returns true on write.
    pub(crate) fn sync(&mut self, surface: &mut dyn Surface, wrapper: ElementId) -> bool {
        let Some(height) = surface.content_height(wrapper) else {
            return false;
        };
        let height = height.floor();
        if self.observed == Some(height) {
            return false;
        }
        self.observed = Some(height);
        surface.set_body_height(Some(height));
        true
    }

    pub(crate) fn disconnect(&mut self, surface: &mut dyn Surface) {
        self.observed = None;
        surface.set_body_height(None);
    }
}

/// Elements counter-moved against the rendered scroll offset.
#[derive(Debug, Default)]
pub(crate) struct InverseParallax {
    layers: Vec<(ElementId, f64)>,
}

impl InverseParallax {
    pub(crate) fn set(&mut self, elements: &[ElementId], speed: f64) {
        self.layers.retain(|(el, _)| !elements.contains(el));
        self.layers.extend(elements.iter().map(|el| (*el, speed)));
    }

    pub(crate) fn apply(&self, surface: &mut dyn Surface, rendered: f64) {
        for (el, speed) in &self.layers {
            surface.set_transform(*el, Some(Transform::translate(0.0, rendered * speed)));
        }
    }

    pub(crate) fn clear(&mut self, surface: &mut dyn Surface) {
        for (el, _) in self.layers.drain(..) {
            surface.set_transform(el, None);
        }
    }
}
