use crate::device::theme::ColorScheme;
use crate::foundation::core::{BezPath, Point, Size};

pub const CONTAINER_CLASS: &str = "wave-container";
pub const SHAPE_CLASS: &str = "wave-shape";
pub const ENTER_CLASS: &str = "wave-enter";
pub const LEAVE_CLASS: &str = "wave-leave";

/// Full-viewport wave overlay used to mask a page swap.
///
/// The shape is twice the viewport height so that it can slide fully across the screen.
#[derive(Clone, Debug, PartialEq)]
pub struct WaveOverlay {
    pub view_box: Size,
    pub path: BezPath,
    pub fill: &'static str,
}

impl WaveOverlay {
    pub fn new(viewport: Size, scheme: ColorScheme) -> Self {
        let view_box = Size::new(viewport.width, viewport.height * 2.0);
        Self {
            path: wave_path(view_box),
            view_box,
            fill: scheme.overlay_fill(),
        }
    }

    pub fn to_svg(&self) -> String {
        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}" class="{SHAPE_CLASS}"><path d="{}" fill="{}"/></svg>"#,
            self.view_box.width,
            self.view_box.height,
            self.path.to_svg(),
            self.fill
        )
    }
}

/// Closed wave: convex bottom edge at 85%..95% of the height, concave top edge.
pub fn wave_path(size: Size) -> BezPath {
    let (w, h) = (size.width, size.height);
    let mut path = BezPath::new();
    path.move_to(Point::ZERO);
    path.line_to((0.0, h * 0.85));
    path.curve_to((w * 0.25, h * 0.95), (w * 0.75, h * 0.95), (w, h * 0.85));
    path.line_to((w, 0.0));
    path.curve_to((w * 0.75, h * 0.15), (w * 0.25, h * 0.15), (0.0, 0.0));
    path.close_path();
    path
}

#[cfg(test)]
#[path = "../../tests/unit/transition/overlay.rs"]
mod tests;
