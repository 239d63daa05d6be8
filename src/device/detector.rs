//! Device classification with a short-lived cache.
//!
//! Classification reads the touch capability and the viewport width from a [`DeviceInfo`].
//! Those reads can force a synchronous layout on real hosts, so answers are cached per
//! predicate for `cache_ms`. The cache must be cleared on navigation: input mode can change
//! between pages of a single-page app without the viewport changing.

use std::collections::HashMap;

use crate::config::DeviceConfig;
use crate::foundation::core::Millis;

/// Read-only view of the capabilities a device reports.
pub trait DeviceInfo {
    /// Whether a coarse pointer / touch input is present.
    fn has_touch(&self) -> bool;

    /// Current viewport width in CSS pixels, or `None` when no presentation surface exists.
    fn viewport_width(&self) -> Option<f64>;
}

/// Snapshot of both predicates at one instant.
///
/// The two flags are not mutually exclusive complements: a wide touch laptop is neither.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct DeviceProfile {
    pub is_desktop: bool,
    pub is_mobile: bool,
    pub sampled_at: Millis,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Predicate {
    Desktop,
    Mobile,
}

#[derive(Debug)]
pub struct CapabilityDetector {
    config: DeviceConfig,
    cache: HashMap<Predicate, (bool, Millis)>,
}

impl CapabilityDetector {
    pub fn new(config: DeviceConfig) -> Self {
        Self {
            config,
            cache: HashMap::new(),
        }
    }

    /// No touch capability and a viewport at least `desktop_min_width` wide.
    pub fn is_desktop(&mut self, device: &dyn DeviceInfo, now: Millis) -> bool {
        let min_width = self.config.desktop_min_width;
        self.cached(Predicate::Desktop, now, || {
            let Some(width) = device.viewport_width() else {
                return false;
            };
            !device.has_touch() && width >= min_width
        })
    }

    /// Touch capability present, or a viewport narrower than `mobile_max_width`.
    pub fn is_mobile(&mut self, device: &dyn DeviceInfo, now: Millis) -> bool {
        let max_width = self.config.mobile_max_width;
        self.cached(Predicate::Mobile, now, || {
            let Some(width) = device.viewport_width() else {
                return false;
            };
            device.has_touch() || width < max_width
        })
    }

    pub fn profile(&mut self, device: &dyn DeviceInfo, now: Millis) -> DeviceProfile {
        DeviceProfile {
            is_desktop: self.is_desktop(device, now),
            is_mobile: self.is_mobile(device, now),
            sampled_at: now,
        }
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    fn cached(&mut self, key: Predicate, now: Millis, compute: impl FnOnce() -> bool) -> bool {
        if let Some(&(value, at)) = self.cache.get(&key)
            && now >= at
            && now.since(at) < self.config.cache_ms
        {
            return value;
        }
        let value = compute();
        self.cache.insert(key, (value, now));
        value
    }
}

#[cfg(test)]
#[path = "../../tests/unit/device/detector.rs"]
mod tests;
