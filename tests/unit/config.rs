use super::*;

#[test]
fn empty_object_yields_defaults() {
    let cfg = MotionConfig::from_json_str("{}").unwrap();
    assert_eq!(cfg, MotionConfig::default());
    assert_eq!(cfg.scroll.wrapper_selector, "#smooth-wrapper");
    assert_eq!(cfg.scheduler.batch_size, 5);
    assert_eq!(cfg.device.cache_ms, 1000);
}

#[test]
fn partial_sections_merge_with_defaults() {
    let cfg =
        MotionConfig::from_json_str(r#"{ "scroll": { "mode": "triggered", "ease": 0.2 } }"#)
            .unwrap();
    assert_eq!(cfg.scroll.mode, ScrollMode::Triggered);
    assert_eq!(cfg.scroll.ease, 0.2);
    assert_eq!(cfg.scroll.scroll_speed, 0.05);
}

#[test]
fn smoothing_factor_out_of_range_is_rejected() {
    let err = MotionConfig::from_json_str(r#"{ "scroll": { "scroll_speed": 0.0 } }"#)
        .unwrap_err()
        .to_string();
    assert!(err.contains("scroll.scroll_speed"), "{err}");

    let mut cfg = MotionConfig::default();
    cfg.scroll.ease = 1.5;
    assert!(cfg.validate().is_err());
}

#[test]
fn zero_batch_is_rejected() {
    let mut cfg = MotionConfig::default();
    cfg.scheduler.batch_size = 0;
    assert!(cfg.validate().is_err());
}

#[test]
fn inverted_breakpoints_are_rejected() {
    let mut cfg = MotionConfig::default();
    cfg.device.desktop_min_width = 600.0;
    assert!(cfg.validate().is_err());
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = MotionConfig::from_json_str("{ nope").unwrap_err();
    assert!(matches!(err, MotionError::Serde(_)));
}

#[test]
fn transition_timing_derivations() {
    let t = TransitionConfig::default();
    assert_eq!(t.midpoint_ms(), 1000);
    assert_eq!(t.reveal_to_removal_ms(), 1000 + 2000 + 100);
    assert_eq!(t.total_ms(), 100 + 3100);
}

#[test]
fn device_gate_predicates() {
    assert!(DeviceGate::Any.allows(false, false));
    assert!(DeviceGate::Desktop.allows(true, false));
    assert!(!DeviceGate::Desktop.allows(false, true));
    assert!(DeviceGate::Mobile.allows(false, true));
    assert!(!DeviceGate::Mobile.allows(true, false));
}

#[test]
fn json_round_trip_is_lossless() {
    let cfg = MotionConfig::default();
    let json = cfg.to_json_pretty().unwrap();
    assert_eq!(MotionConfig::from_json_str(&json).unwrap(), cfg);
}
