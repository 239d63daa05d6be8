/// Blend `start` toward `end` by `factor` (0 keeps `start`, 1 lands on `end`).
pub fn lerp(start: f64, end: f64, factor: f64) -> f64 {
    (1.0 - factor) * start + factor * end
}

/// Returns true when `factor` is a usable per-frame smoothing factor.
pub(crate) fn is_smoothing_factor(factor: f64) -> bool {
    factor.is_finite() && factor > 0.0 && factor <= 1.0
}
