use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        MotionError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        MotionError::missing_element("#smooth-wrapper")
            .to_string()
            .contains("missing element: #smooth-wrapper")
    );
    assert!(
        MotionError::navigation("x")
            .to_string()
            .contains("navigation error:")
    );
    assert!(MotionError::task("x").to_string().contains("task error:"));
    assert!(
        MotionError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = MotionError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
