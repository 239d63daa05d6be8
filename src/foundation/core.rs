pub use kurbo::{BezPath, Point, Rect, Size, Vec2};

/// Opaque identity of an element on the presentation surface.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct ElementId(pub u64);

/// Host clock reading in whole milliseconds.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct Millis(pub u64);

impl Millis {
    /// Milliseconds elapsed since `earlier`, saturating at zero.
    pub fn since(self, earlier: Millis) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    /// The instant `ms` milliseconds after `self`.
    pub fn after(self, ms: u64) -> Millis {
        Millis(self.0.saturating_add(ms))
    }
}

/// Inline transform written to an element.
///
/// `perspective` and `skew_y_deg` are only used by the scroll content layer; pointer effects
/// drive `translate` and `scale`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Transform {
    pub translate: Vec2,
    pub scale: f64, // default 1
    pub skew_y_deg: f64,
    pub perspective: Option<f64>,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translate: Vec2::ZERO,
            scale: 1.0,
            skew_y_deg: 0.0,
            perspective: None,
        }
    }
}

impl Transform {
    pub fn translate(x: f64, y: f64) -> Self {
        Self {
            translate: Vec2::new(x, y),
            ..Self::default()
        }
    }

    pub fn is_identity(&self) -> bool {
        self.translate == Vec2::ZERO
            && self.scale == 1.0
            && self.skew_y_deg == 0.0
            && self.perspective.is_none()
    }

    /// Render as a CSS `transform` value.
    pub fn to_css(&self) -> String {
        let mut parts = Vec::with_capacity(4);
        if let Some(p) = self.perspective {
            parts.push(format!("perspective({}px)", css_num(p)));
        }
        parts.push(format!(
            "translate3d({}px, {}px, 0)",
            css_num(self.translate.x),
            css_num(self.translate.y)
        ));
        if self.perspective.is_some() || self.skew_y_deg != 0.0 {
            parts.push(format!("skewY({}deg)", css_num(self.skew_y_deg)));
        }
        if self.scale != 1.0 {
            parts.push(format!("scale({})", css_num(self.scale)));
        }
        parts.join(" ")
    }
}

// Normalizes -0.0 so it prints as "0".
fn css_num(v: f64) -> f64 {
    v + 0.0
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
