use std::f64::consts::TAU;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    Linear,
    OutQuad,
    OutCubic,
    /// Overshooting spring-like settle. `amplitude >= 1`, `period` in progress units.
    OutElastic { amplitude: f64, period: f64 },
}

impl Ease {
    pub fn elastic(amplitude: f64, period: f64) -> Self {
        Self::OutElastic { amplitude, period }
    }

    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::OutElastic { amplitude, period } => out_elastic(t, amplitude, period),
        }
    }
}

fn out_elastic(t: f64, amplitude: f64, period: f64) -> f64 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }
    let a = amplitude.max(1.0);
    // Amplitudes below 1 stretch the period instead of shrinking the swing.
    let p = period.max(f64::EPSILON) / amplitude.clamp(f64::EPSILON, 1.0);
    let phase = p / TAU * (1.0 / a).asin();
    a * 2f64.powf(-10.0 * t) * ((t - phase) * TAU / p).sin() + 1.0
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
