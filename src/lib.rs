#![no_std]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

#[cfg(feature = "std")]
extern crate std;

pub mod access;
pub mod device;
pub mod endian;
pub mod field;
pub mod interface;
pub mod mask;
pub mod reg;
pub mod registers;

// Re-export main types
pub use access::Access;
pub use device::X3nDriver;
pub use endian::Endian;
pub use field::{BitField, BoolField, EnumField, Reserved, Trigger};
#[cfg(feature = "std")]
pub use interface::FileDevice;
pub use interface::{Device, I2cDevice, SinkDevice};
pub use mask::{BitRange, Mask};
pub use reg::{Check, FlagsReg, Reg};
pub use registers::{CryptoEvent, CryptoState};

/// X3N I2C address on GAIA boards
pub const I2C_ADDRESS_GAIA: u8 = 0x64;

/// X3N I2C address on VENUS boards (the common configuration)
pub const I2C_ADDRESS_VENUS: u8 = 0x6C;

/// Driver errors
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Communication error with the device
    Bus(E),
    /// Operation forbidden by the register's access mode
    AccessViolation,
    /// Bit range or byte payload outside the register width
    RangeOverflow,
    /// Enumerated field read a value outside its domain (contains the raw value)
    UnknownVariant(u8),
    /// An event completed with the hardware's error flag raised
    HardwareFault(CryptoEvent),
    /// Polling budget exhausted before the hardware reported completion
    Timeout,
}

impl<E> From<E> for Error<E> {
    fn from(error: E) -> Self {
        Self::Bus(error)
    }
}

/// Error type of device-free codec operations.
pub type CodecError = Error<core::convert::Infallible>;
