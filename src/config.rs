//! Configuration tree for the motion layer.
//!
//! Every section defaults to the values the gallery site ships with, so an empty JSON object
//! is a valid configuration.

use std::path::Path;

use crate::foundation::error::{MotionError, MotionResult};
use crate::foundation::math::is_smoothing_factor;

/// Which scroll driver the runtime installs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollMode {
    /// Hand-rolled lerp loop with velocity skew.
    #[default]
    Lerp,
    /// Trigger-offset driver with image preloading before refresh.
    Triggered,
}

/// Device class an effect is allowed to run on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceGate {
    Any,
    Desktop,
    Mobile,
}

impl DeviceGate {
    pub fn allows(self, is_desktop: bool, is_mobile: bool) -> bool {
        match self {
            Self::Any => true,
            Self::Desktop => is_desktop,
            Self::Mobile => is_mobile,
        }
    }
}

/// Parameters of an elastic ease-out.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Elasticity {
    pub amplitude: f64,
    pub period: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    pub mode: ScrollMode,
    pub wrapper_selector: String,
    pub content_selector: String,
    pub scroll_speed: f64,
    pub skew_speed: f64,
    pub skew_reducer: f64,
    pub ease: f64,
    pub perspective_px: f64,
    pub init_delay_ms: u64,
    pub init_retry_ms: u64,
    pub triggered_smoothing: f64,
    pub preload_timeout_ms: u64,
    pub scroll_to_ms: u64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            mode: ScrollMode::Lerp,
            wrapper_selector: "#smooth-wrapper".to_string(),
            content_selector: "section".to_string(),
            scroll_speed: 0.05,
            skew_speed: 0.5,
            skew_reducer: 3.0,
            ease: 0.075,
            perspective_px: 1000.0,
            init_delay_ms: 50,
            init_retry_ms: 100,
            triggered_smoothing: 0.1,
            preload_timeout_ms: 500,
            scroll_to_ms: 800,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    pub desktop_min_width: f64,
    pub mobile_max_width: f64,
    pub cache_ms: u64,
    pub recheck_debounce_ms: u64,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            desktop_min_width: 1024.0,
            mobile_max_width: 768.0,
            cache_ms: 1000,
            recheck_debounce_ms: 100,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    pub batch_size: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self { batch_size: 5 }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MagneticConfig {
    pub gate: DeviceGate,
    pub intensity: f64,
    pub move_throttle_ms: u64,
    pub follow_ms: u64,
    pub return_ms: u64,
    pub return_elasticity: Elasticity,
}

impl Default for MagneticConfig {
    fn default() -> Self {
        Self {
            gate: DeviceGate::Desktop,
            intensity: 0.15,
            move_throttle_ms: 16,
            follow_ms: 1200,
            return_ms: 1600,
            return_elasticity: Elasticity {
                amplitude: 1.0,
                period: 0.3,
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ClickConfig {
    pub gate: DeviceGate,
    pub press_scale: f64,
    pub press_ms: u64,
    pub release_ms: u64,
    pub release_elasticity: Elasticity,
}

impl Default for ClickConfig {
    fn default() -> Self {
        Self {
            gate: DeviceGate::Any,
            press_scale: 0.97,
            press_ms: 200,
            release_ms: 800,
            release_elasticity: Elasticity {
                amplitude: 1.0,
                period: 0.25,
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ParallaxConfig {
    pub gate: DeviceGate,
    pub route: String,
    pub plain_divisor: Vec2Divisor,
    pub strong_divisor: Vec2Divisor,
}

/// Per-axis divisors applied to the pointer's distance from the viewport center.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Vec2Divisor {
    pub x: f64,
    pub y: f64,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            gate: DeviceGate::Desktop,
            route: "/qui-suis-je".to_string(),
            plain_divisor: Vec2Divisor { x: 30.0, y: 10.0 },
            strong_divisor: Vec2Divisor { x: 20.0, y: 10.0 },
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct HapticConfig {
    pub gate: DeviceGate,
    pub throttle_ms: u64,
}

impl Default for HapticConfig {
    fn default() -> Self {
        Self {
            gate: DeviceGate::Mobile,
            throttle_ms: 50,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TransitionConfig {
    pub nudge_distance: f64,
    pub nudge_ms: u64,
    pub duration_ms: u64,
    pub hold_ms: u64,
    pub removal_slack_ms: u64,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            nudge_distance: 1000.0,
            nudge_ms: 100,
            duration_ms: 2000,
            hold_ms: 0,
            removal_slack_ms: 100,
        }
    }
}

impl TransitionConfig {
    /// Time from overlay reveal until the navigation runs.
    pub fn midpoint_ms(&self) -> u64 {
        self.duration_ms / 2
    }

    /// Time from overlay reveal until the overlay is removed, independent of navigation.
    pub fn reveal_to_removal_ms(&self) -> u64 {
        self.midpoint_ms() + self.hold_ms + self.duration_ms + self.removal_slack_ms
    }

    /// Total time from the route-change request until `transition-complete`.
    pub fn total_ms(&self) -> u64 {
        self.nudge_ms + self.reveal_to_removal_ms()
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub dark_routes: Vec<String>,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            dark_routes: vec!["/qui-suis-je".to_string(), "/contact".to_string()],
        }
    }
}

/// Root configuration.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    pub scroll: ScrollConfig,
    pub device: DeviceConfig,
    pub scheduler: SchedulerConfig,
    pub magnetic: MagneticConfig,
    pub click: ClickConfig,
    pub parallax: ParallaxConfig,
    pub haptic: HapticConfig,
    pub transition: TransitionConfig,
    pub theme: ThemeConfig,
}

impl MotionConfig {
    pub fn from_json_str(s: &str) -> MotionResult<Self> {
        let config: Self =
            serde_json::from_str(s).map_err(|e| MotionError::serde(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> MotionResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            MotionError::Other(anyhow::Error::new(e).context(format!(
                "read motion config '{}'",
                path.display()
            )))
        })?;
        Self::from_json_str(&raw)
    }

    pub fn to_json_pretty(&self) -> MotionResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| MotionError::serde(e.to_string()))
    }

    pub fn validate(&self) -> MotionResult<()> {
        let s = &self.scroll;
        if s.wrapper_selector.trim().is_empty() || s.content_selector.trim().is_empty() {
            return Err(MotionError::validation("scroll selectors must be non-empty"));
        }
        for (name, v) in [
            ("scroll.scroll_speed", s.scroll_speed),
            ("scroll.ease", s.ease),
            ("scroll.triggered_smoothing", s.triggered_smoothing),
        ] {
            if !is_smoothing_factor(v) {
                return Err(MotionError::validation(format!(
                    "{name} must be in (0, 1], got {v}"
                )));
            }
        }
        if !(s.skew_reducer.is_finite() && s.skew_reducer > 0.0) {
            return Err(MotionError::validation("scroll.skew_reducer must be > 0"));
        }
        if !s.skew_speed.is_finite() {
            return Err(MotionError::validation("scroll.skew_speed must be finite"));
        }

        let d = &self.device;
        if d.desktop_min_width < d.mobile_max_width {
            return Err(MotionError::validation(
                "device.desktop_min_width must be >= device.mobile_max_width",
            ));
        }

        if self.scheduler.batch_size == 0 {
            return Err(MotionError::validation("scheduler.batch_size must be >= 1"));
        }

        let p = &self.parallax;
        for (name, v) in [
            ("parallax.plain_divisor.x", p.plain_divisor.x),
            ("parallax.plain_divisor.y", p.plain_divisor.y),
            ("parallax.strong_divisor.x", p.strong_divisor.x),
            ("parallax.strong_divisor.y", p.strong_divisor.y),
        ] {
            if !(v.is_finite() && v != 0.0) {
                return Err(MotionError::validation(format!(
                    "{name} must be finite and non-zero"
                )));
            }
        }

        for (name, e) in [
            ("magnetic.return_elasticity", self.magnetic.return_elasticity),
            ("click.release_elasticity", self.click.release_elasticity),
        ] {
            if !(e.amplitude > 0.0 && e.period > 0.0) {
                return Err(MotionError::validation(format!(
                    "{name} amplitude and period must be > 0"
                )));
            }
        }

        if self.transition.duration_ms == 0 {
            return Err(MotionError::validation("transition.duration_ms must be > 0"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
