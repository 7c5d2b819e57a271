//! Test utilities and helper functions

use crate::common::mock_interface::MockDevice;
use x3n_crypto::X3nDriver;

/// Mock delay implementation for testing
///
/// This is a no-op delay that implements the embedded-hal DelayNs trait
/// for use in tests where actual delays are not needed.
#[derive(Debug, Clone, Copy)]
pub struct MockDelay;

impl embedded_hal::delay::DelayNs for MockDelay {
    fn delay_ns(&mut self, _ns: u32) {
        // No-op for testing
    }

    fn delay_us(&mut self, _us: u32) {
        // No-op for testing
    }

    fn delay_ms(&mut self, _ms: u32) {
        // No-op for testing
    }
}

/// Create a mock driver for testing
/// Returns (driver, device) where the device handle shares state with the driver
pub fn create_mock_driver() -> (X3nDriver<MockDevice>, MockDevice) {
    let device = MockDevice::new();
    let handle = device.clone();
    (X3nDriver::new(device), handle)
}
