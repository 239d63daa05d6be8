use super::*;

#[test]
fn millis_arithmetic_saturates() {
    assert_eq!(Millis(10).since(Millis(4)), 6);
    assert_eq!(Millis(4).since(Millis(10)), 0);
    assert_eq!(Millis(u64::MAX).after(5), Millis(u64::MAX));
    assert_eq!(Millis(7).after(3), Millis(10));
}

#[test]
fn identity_transform_renders_plain_translate() {
    let t = Transform::default();
    assert!(t.is_identity());
    assert_eq!(t.to_css(), "translate3d(0px, 0px, 0)");
}

#[test]
fn negative_zero_is_normalized() {
    let t = Transform::translate(0.0, -0.0);
    assert_eq!(t.to_css(), "translate3d(0px, 0px, 0)");
}

#[test]
fn content_transform_carries_perspective_and_skew() {
    let t = Transform {
        perspective: Some(1000.0),
        skew_y_deg: 0.5,
        ..Transform::default()
    };
    assert_eq!(
        t.to_css(),
        "perspective(1000px) translate3d(0px, 0px, 0) skewY(0.5deg)"
    );
}

#[test]
fn scale_is_emitted_only_when_not_unit() {
    let t = Transform {
        scale: 0.97,
        ..Transform::translate(3.0, -2.0)
    };
    assert_eq!(t.to_css(), "translate3d(3px, -2px, 0) scale(0.97)");
}
