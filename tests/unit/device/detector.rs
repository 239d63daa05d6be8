use std::cell::Cell;

use super::*;

struct CountingDevice {
    touch: bool,
    width: Option<f64>,
    width_reads: Cell<usize>,
}

impl CountingDevice {
    fn new(touch: bool, width: Option<f64>) -> Self {
        Self {
            touch,
            width,
            width_reads: Cell::new(0),
        }
    }
}

impl DeviceInfo for CountingDevice {
    fn has_touch(&self) -> bool {
        self.touch
    }

    fn viewport_width(&self) -> Option<f64> {
        self.width_reads.set(self.width_reads.get() + 1);
        self.width
    }
}

fn detector() -> CapabilityDetector {
    CapabilityDetector::new(DeviceConfig::default())
}

#[test]
fn wide_mouse_device_is_desktop_and_cached() {
    let device = CountingDevice::new(false, Some(1280.0));
    let mut d = detector();

    assert!(d.is_desktop(&device, Millis(0)));
    assert_eq!(device.width_reads.get(), 1);

    assert!(d.is_desktop(&device, Millis(999)));
    assert_eq!(device.width_reads.get(), 1, "answer within the window is cached");

    assert!(d.is_desktop(&device, Millis(1000)));
    assert_eq!(device.width_reads.get(), 2, "cache expires after 1000ms");
}

#[test]
fn clear_cache_forces_requery() {
    let device = CountingDevice::new(false, Some(1280.0));
    let mut d = detector();
    d.is_desktop(&device, Millis(0));
    d.clear_cache();
    d.is_desktop(&device, Millis(10));
    assert_eq!(device.width_reads.get(), 2);
}

#[test]
fn touch_or_narrow_is_mobile() {
    let mut d = detector();
    assert!(d.is_mobile(&CountingDevice::new(true, Some(1400.0)), Millis(0)));

    let mut d = detector();
    assert!(d.is_mobile(&CountingDevice::new(false, Some(500.0)), Millis(0)));

    let mut d = detector();
    assert!(!d.is_mobile(&CountingDevice::new(false, Some(900.0)), Millis(0)));
}

#[test]
fn wide_touch_laptop_is_neither_desktop_nor_small_screen() {
    let device = CountingDevice::new(true, Some(1440.0));
    let mut d = detector();
    let profile = d.profile(&device, Millis(0));
    assert!(!profile.is_desktop);
    // Touch alone makes it mobile; callers must not infer one flag from the other.
    assert!(profile.is_mobile);

    let mid = CountingDevice::new(false, Some(900.0));
    let mut d = detector();
    let profile = d.profile(&mid, Millis(0));
    assert!(!profile.is_desktop);
    assert!(!profile.is_mobile);
}

#[test]
fn missing_surface_answers_false_everywhere() {
    let device = CountingDevice::new(true, None);
    let mut d = detector();
    assert!(!d.is_desktop(&device, Millis(0)));
    assert!(!d.is_mobile(&device, Millis(0)));
}

#[test]
fn predicates_are_cached_independently() {
    let device = CountingDevice::new(false, Some(1280.0));
    let mut d = detector();
    d.is_desktop(&device, Millis(0));
    d.is_mobile(&device, Millis(0));
    assert_eq!(device.width_reads.get(), 2);
    d.is_desktop(&device, Millis(5));
    d.is_mobile(&device, Millis(5));
    assert_eq!(device.width_reads.get(), 2);
}
