//! Unit tests for self-clearing trigger fields

use crate::common::MockDevice;
use x3n_crypto::registers::ctrl;
use x3n_crypto::Error;

#[test]
fn test_trigger_performs_exactly_two_writes() {
    let mut dev = MockDevice::new();
    let handle = dev.clone();

    ctrl::EVENT_TRIG.trigger(&mut dev).unwrap();

    let writes = handle.writes_to(ctrl::GLB_CONFIG0.addr());
    assert_eq!(writes.len(), 2, "a pulse is exactly two writes");
    assert_eq!(writes[0], vec![0x20], "set half raises bit 5");
    assert_eq!(writes[1], vec![0x00], "clear half always writes 0");
}

#[test]
fn test_trigger_clears_regardless_of_pulse_value() {
    let mut dev = MockDevice::new();
    let handle = dev.clone();

    // Any nonzero pulse value truncates into the single-bit range; the
    // second write still clears it.
    ctrl::GEOM_UPDATE.trigger_with(&mut dev, 0x3).unwrap();

    let writes = handle.writes_to(ctrl::GLB_CONFIG0.addr());
    assert_eq!(writes.len(), 2);
    assert_eq!(writes[0], vec![0x10]);
    assert_eq!(writes[1], vec![0x00]);
    assert_eq!(handle.bytes(ctrl::GLB_CONFIG0.addr(), 1), vec![0x00]);
}

#[test]
fn test_trigger_preserves_neighbouring_bits() {
    let mut dev = MockDevice::new();
    let handle = dev.clone();
    handle.set_bytes(ctrl::GLB_CONFIG0.addr(), &[0x83]);

    ctrl::SECURE_KEY_USAGE_TRIG.trigger(&mut dev).unwrap();

    let writes = handle.writes_to(ctrl::GLB_CONFIG0.addr());
    assert_eq!(writes[0], vec![0x8B], "set half keeps the other bits");
    assert_eq!(writes[1], vec![0x83], "clear half keeps the other bits");
}

#[test]
fn test_failed_pulse_leaves_bit_set() {
    let mut dev = MockDevice::new();
    let handle = dev.clone();

    // First write (the set half) succeeds, the clearing write fails: the
    // trigger bit stays set until corrected externally.
    handle.fail_write_at(1);
    let result = ctrl::EVENT_TRIG.trigger(&mut dev);

    assert!(matches!(result, Err(Error::Bus(_))));
    assert_eq!(handle.bytes(ctrl::GLB_CONFIG0.addr(), 1), vec![0x20]);
}

#[test]
fn test_failed_set_half_aborts_pulse() {
    let mut dev = MockDevice::new();
    let handle = dev.clone();

    handle.fail_write_at(0);
    let result = ctrl::EVENT_TRIG.trigger(&mut dev);

    assert!(matches!(result, Err(Error::Bus(_))));
    // Only the failed first attempt happened; nothing was stored.
    assert_eq!(handle.writes_to(ctrl::GLB_CONFIG0.addr()).len(), 0);
    assert_eq!(handle.bytes(ctrl::GLB_CONFIG0.addr(), 1), vec![0x00]);
}
