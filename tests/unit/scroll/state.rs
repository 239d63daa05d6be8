use super::*;

#[test]
fn rendered_position_trails_actual() {
    let cfg = ScrollConfig::default();
    let mut s = ScrollState::at(0.0);
    let f = s.step(100.0, &cfg);
    assert!((f.position - 5.0).abs() < 1e-9);
    assert_eq!(s.velocity, 100.0);
    assert!(f.skew > 0.0);
}

#[test]
fn downward_scroll_skews_positive_upward_negative() {
    let cfg = ScrollConfig::default();
    let mut down = ScrollState::at(500.0);
    let mut up = ScrollState::at(500.0);
    assert!(down.step(520.0, &cfg).skew > 0.0);
    assert!(up.step(480.0, &cfg).skew < 0.0);
}

#[test]
fn skew_converges_to_zero_at_rest() {
    let cfg = ScrollConfig::default();
    let mut s = ScrollState::at(0.0);
    for y in (1..=20).map(|i| f64::from(i) * 40.0) {
        s.step(y, &cfg);
    }
    assert!(s.rendered_skew.abs() > 1.0);

    let rest = s.actual_position;
    let mut frames = 0;
    while s.rendered_skew != 0.0 {
        s.step(rest, &cfg);
        frames += 1;
        assert!(frames <= 120, "skew did not settle: {}", s.rendered_skew);
    }
}

#[test]
fn sub_threshold_jitter_counts_as_rest() {
    let cfg = ScrollConfig::default();
    let mut s = ScrollState::at(0.0);
    s.rendered_skew = 2.0;
    let mut y = 0.0;
    for i in 0..200 {
        y += if i % 2 == 0 { 0.05 } else { -0.05 };
        s.step(y, &cfg);
    }
    assert_eq!(s.rendered_skew, 0.0);
}

#[test]
fn position_snaps_when_close() {
    let cfg = ScrollConfig::default();
    let mut s = ScrollState::at(0.0);
    for _ in 0..1000 {
        s.step(300.0, &cfg);
    }
    assert_eq!(s.rendered_position, 300.0);
    assert!(s.is_at_rest());
}
