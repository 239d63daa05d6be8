use crate::config::ScrollConfig;
use crate::foundation::math::lerp;

/// Below this per-frame scroll delta the page is considered at rest.
pub const JITTER_THRESHOLD: f64 = 0.1;

/// Extra per-frame decay pulling skew to zero while at rest.
pub const SETTLE_FACTOR: f64 = 0.1;

/// Rendered values closer than this to their target snap onto it.
pub const SKEW_EPSILON: f64 = 1e-4;
pub const POSITION_EPSILON: f64 = 0.01;

/// Values written to the wrapper and content for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollFrame {
    pub position: f64,
    pub skew: f64,
}

/// Smoothed scroll physics. Only `rendered_position` and `rendered_skew` reach the document.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct ScrollState {
    pub actual_position: f64,
    pub rendered_position: f64,
    /// Native scroll delta of the last frame.
    pub velocity: f64,
    pub rendered_skew: f64,
}

impl ScrollState {
    /// State at rest on `position`.
    pub fn at(position: f64) -> Self {
        Self {
            actual_position: position,
            rendered_position: position,
            velocity: 0.0,
            rendered_skew: 0.0,
        }
    }

    pub fn is_at_rest(&self) -> bool {
        self.velocity.abs() < JITTER_THRESHOLD
            && self.rendered_skew == 0.0
            && self.rendered_position == self.actual_position
    }

    pub fn step(&mut self, actual: f64, config: &ScrollConfig) -> ScrollFrame {
        self.velocity = actual - self.actual_position;
        self.actual_position = actual;

        let at_rest = self.velocity.abs() < JITTER_THRESHOLD;
        let target_skew = if at_rest {
            0.0
        } else {
            (self.velocity / config.skew_reducer) * config.skew_speed
        };
        self.rendered_position = lerp(self.rendered_position, actual, config.scroll_speed);
        if (self.rendered_position - actual).abs() < POSITION_EPSILON {
            self.rendered_position = actual;
        }

        self.rendered_skew = lerp(self.rendered_skew, target_skew, config.ease);
        if at_rest {
            self.rendered_skew = lerp(self.rendered_skew, 0.0, SETTLE_FACTOR);
            if self.rendered_skew.abs() < SKEW_EPSILON {
                self.rendered_skew = 0.0;
            }
        }

        ScrollFrame {
            position: self.rendered_position,
            skew: self.rendered_skew,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/state.rs"]
mod tests;
