use kurbo::{PathEl, Shape};

use super::*;

#[test]
fn view_box_is_twice_viewport_height() {
    let o = WaveOverlay::new(Size::new(1280.0, 800.0), ColorScheme::Light);
    assert_eq!(o.view_box, Size::new(1280.0, 1600.0));
}

#[test]
fn path_spans_the_full_width_and_stays_in_bounds() {
    let size = Size::new(1000.0, 2000.0);
    let path = wave_path(size);
    let bbox = path.bounding_box();
    assert_eq!(bbox.x0, 0.0);
    assert_eq!(bbox.x1, 1000.0);
    assert_eq!(bbox.y0, 0.0);
    assert!(bbox.y1 <= 2000.0 * 0.95);

    let els: Vec<PathEl> = path.elements().to_vec();
    assert_eq!(els.len(), 6);
    assert!(matches!(els.last(), Some(PathEl::ClosePath)));
}

#[test]
fn fill_follows_color_scheme() {
    let dark = WaveOverlay::new(Size::new(10.0, 10.0), ColorScheme::Dark);
    assert_eq!(dark.fill, "var(--color-white)");
    let light = WaveOverlay::new(Size::new(10.0, 10.0), ColorScheme::Light);
    assert_eq!(light.fill, "var(--color-black)");
}

#[test]
fn svg_markup_carries_shape_class_and_fill() {
    let svg = WaveOverlay::new(Size::new(100.0, 50.0), ColorScheme::Light).to_svg();
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains(r#"viewBox="0 0 100 100""#));
    assert!(svg.contains(r#"class="wave-shape""#));
    assert!(svg.contains(r#"fill="var(--color-black)""#));
}
