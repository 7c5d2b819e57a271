//! Register descriptors and the read/modify/write protocol
//!
//! A [`Reg`] binds an address, a byte width, an access mode, a byte order and
//! a default value. It is a pure descriptor: all mutable state lives behind
//! the [`Device`], which is passed explicitly into every operation. The
//! descriptors in [`crate::registers`] are built in `const` context and
//! shared freely.

use core::marker::PhantomData;

use bitflags::Flags;

use crate::access::Access;
use crate::endian::{self, Endian};
use crate::interface::Device;
use crate::mask::{BitRange, Mask};
use crate::Error;

/// A register descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reg {
    addr: u32,
    size: usize,
    mode: Access,
    endian: Endian,
    default: u64,
}

impl Reg {
    /// A read/write register of the default 4-byte width.
    pub const fn rw(addr: u32) -> Self {
        Self::with_mode(addr, Access::RW)
    }

    /// A read-only register.
    pub const fn ro(addr: u32) -> Self {
        Self::with_mode(addr, Access::READ)
    }

    /// A write-only register.
    pub const fn wo(addr: u32) -> Self {
        Self::with_mode(addr, Access::WRITE)
    }

    /// A reserved register: every operation fails with
    /// [`Error::AccessViolation`].
    pub const fn reserved(addr: u32) -> Self {
        Self::with_mode(addr, Access::empty())
    }

    const fn with_mode(addr: u32, mode: Access) -> Self {
        Self {
            addr,
            size: 4,
            mode,
            endian: Endian::Little,
            default: 0,
        }
    }

    /// Override the byte width.
    pub const fn size(mut self, size: usize) -> Self {
        assert!(size >= 1);
        self.size = size;
        self
    }

    /// Override the byte order.
    pub const fn endian(mut self, endian: Endian) -> Self {
        self.endian = endian;
        self
    }

    /// Set the power-on default value, written back by [`Reg::reset`].
    pub const fn default_value(mut self, default: u64) -> Self {
        self.default = default;
        self
    }

    /// Byte address of the register.
    pub const fn addr(&self) -> u32 {
        self.addr
    }

    /// Width in bytes.
    pub const fn len(&self) -> usize {
        self.size
    }

    /// Always false; registers are at least one byte wide.
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Width in bits.
    pub const fn bits(&self) -> u32 {
        (self.size * 8) as u32
    }

    /// Access mode.
    pub const fn mode(&self) -> Access {
        self.mode
    }

    /// Byte order on the wire.
    pub const fn byte_order(&self) -> Endian {
        self.endian
    }

    /// Power-on default value.
    pub const fn default(&self) -> u64 {
        self.default
    }

    /// Read the register value.
    ///
    /// # Errors
    ///
    /// [`Error::AccessViolation`] if the mode lacks read permission (no
    /// transfer is attempted), [`Error::RangeOverflow`] for registers wider
    /// than 8 bytes (use [`Reg::read_bytes`]), or the propagated device
    /// failure.
    pub fn read<D: Device>(&self, dev: &mut D) -> Result<u64, Error<D::Error>> {
        if !self.mode.is_readable() {
            return Err(Error::AccessViolation);
        }
        if self.size > 8 {
            return Err(Error::RangeOverflow);
        }
        let mut buf = [0u8; 8];
        dev.read(self.addr, &mut buf[..self.size])?;
        let value = self.endian.decode(&buf[..self.size]);
        #[cfg(feature = "defmt")]
        defmt::trace!("read reg {:#x}: {:#x}", self.addr, value);
        Ok(value)
    }

    /// Read the register and extract the given bit range.
    ///
    /// # Errors
    ///
    /// As [`Reg::read`], plus [`Error::RangeOverflow`] if the range does not
    /// fit the register width.
    pub fn read_field<D: Device>(
        &self,
        dev: &mut D,
        range: BitRange,
    ) -> Result<u64, Error<D::Error>> {
        if !range.fits(self.bits()) {
            return Err(Error::RangeOverflow);
        }
        Ok(range.extract(self.read(dev)?))
    }

    /// Overwrite the whole register.
    ///
    /// Callers wanting a partial update must use [`Reg::modify`].
    ///
    /// # Errors
    ///
    /// [`Error::AccessViolation`] if the mode lacks write permission (no
    /// transfer is attempted), [`Error::RangeOverflow`] for registers wider
    /// than 8 bytes, or the propagated device failure.
    pub fn write<D: Device>(&self, dev: &mut D, value: u64) -> Result<(), Error<D::Error>> {
        if !self.mode.is_writable() {
            return Err(Error::AccessViolation);
        }
        if self.size > 8 {
            return Err(Error::RangeOverflow);
        }
        let mut buf = [0u8; 8];
        self.endian.encode(value, &mut buf[..self.size]);
        #[cfg(feature = "defmt")]
        defmt::trace!("write reg {:#x}: {:#x}", self.addr, value);
        dev.write(self.addr, &buf[..self.size])?;
        Ok(())
    }

    /// Read, apply `f`, write back; returns the written value.
    ///
    /// Field inserts and set/clear masks compose inside `f`; by convention
    /// the field overlay is applied first, then set bits, then cleared bits.
    /// The two transfers are not atomic: a concurrent writer between them is
    /// race-overwritten. The transport is expected to serialize bus access;
    /// this layer adds no locking.
    ///
    /// # Errors
    ///
    /// [`Error::AccessViolation`] unless the mode grants both read and write
    /// permission, or any failure from the underlying transfers.
    pub fn modify<D, F>(&self, dev: &mut D, f: F) -> Result<u64, Error<D::Error>>
    where
        D: Device,
        F: FnOnce(u64) -> u64,
    {
        if !self.mode.contains(Access::RW) {
            return Err(Error::AccessViolation);
        }
        let value = f(self.read(dev)?);
        self.write(dev, value)?;
        Ok(value)
    }

    /// Sample the register and report mask conditions without failing.
    ///
    /// `set` holds when every bit of the `set` mask is set, `clear` when no
    /// bit of the `clear` mask is set. [`Mask::NONE`] makes either condition
    /// trivially true. Polling loops use this to inspect transient mismatches
    /// without turning them into errors.
    pub fn check<D: Device>(
        &self,
        dev: &mut D,
        set: Mask,
        clear: Mask,
    ) -> Result<Check, Error<D::Error>> {
        let value = self.read(dev)?;
        Ok(Check {
            value,
            set: set.is_set(value),
            clear: clear.is_clear(value),
        })
    }

    /// Write the power-on default back to the register.
    pub fn reset<D: Device>(&self, dev: &mut D) -> Result<(), Error<D::Error>> {
        self.write(dev, self.default)
    }

    /// Burst-read raw bytes, bypassing integer decoding.
    ///
    /// Fills `buf`, which may be shorter than the register for a partial
    /// read. Big-endian registers get the whole burst byte-reversed, not
    /// per-word.
    ///
    /// # Errors
    ///
    /// [`Error::AccessViolation`] without read permission,
    /// [`Error::RangeOverflow`] if `buf` exceeds the register width, or the
    /// propagated device failure.
    pub fn read_bytes<D: Device>(&self, dev: &mut D, buf: &mut [u8]) -> Result<(), Error<D::Error>> {
        if !self.mode.is_readable() {
            return Err(Error::AccessViolation);
        }
        if buf.len() > self.size {
            return Err(Error::RangeOverflow);
        }
        dev.burst_read(self.addr, buf)?;
        if self.endian.is_big() {
            endian::swap(buf);
        }
        Ok(())
    }

    /// Burst-write raw bytes, bypassing integer encoding.
    ///
    /// A payload shorter than the register is permitted and logged as a
    /// partial write; bytes past the payload keep their previous contents.
    ///
    /// # Errors
    ///
    /// [`Error::AccessViolation`] without write permission,
    /// [`Error::RangeOverflow`] if `data` exceeds the register width, or the
    /// propagated device failure.
    pub fn write_bytes<D: Device>(&self, dev: &mut D, data: &[u8]) -> Result<(), Error<D::Error>> {
        if !self.mode.is_writable() {
            return Err(Error::AccessViolation);
        }
        if data.len() > self.size {
            return Err(Error::RangeOverflow);
        }
        #[cfg(feature = "defmt")]
        if data.len() < self.size {
            defmt::warn!(
                "partial write of {} bytes to reg {:#x} ({} wide)",
                data.len(),
                self.addr,
                self.size
            );
        }
        dev.burst_write(self.addr, data)?;
        Ok(())
    }
}

/// Result of a [`Reg::check`] sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Check {
    /// The sampled register value.
    pub value: u64,
    /// All bits of the `set` mask were set.
    pub set: bool,
    /// No bit of the `clear` mask was set.
    pub clear: bool,
}

/// A read-only register whose value is a named bit-flag set.
///
/// Membership queries always decode a fresh read — two calls in sequence may
/// observe different hardware states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagsReg<F> {
    reg: Reg,
    _flags: PhantomData<F>,
}

impl<F> FlagsReg<F> {
    /// A 4-byte read-only flags register at `addr`.
    pub const fn new(addr: u32) -> Self {
        Self {
            reg: Reg::ro(addr),
            _flags: PhantomData,
        }
    }

    /// The underlying register descriptor.
    pub const fn reg(&self) -> Reg {
        self.reg
    }
}

impl<F: Flags<Bits = u32>> FlagsReg<F> {
    /// Decode the current register value into the flag set. Hardware bits
    /// without a named flag are retained.
    pub fn flags<D: Device>(&self, dev: &mut D) -> Result<F, Error<D::Error>> {
        let value = self.reg.read(dev)?;
        Ok(F::from_bits_retain(value as u32))
    }

    /// True if every bit of `flag` is set in a fresh read.
    pub fn is_set<D: Device>(&self, dev: &mut D, flag: F) -> Result<bool, Error<D::Error>> {
        Ok(self.flags(dev)?.contains(flag))
    }

    /// True if no bit of `flag` is set in a fresh read.
    pub fn is_clear<D: Device>(&self, dev: &mut D, flag: F) -> Result<bool, Error<D::Error>> {
        Ok(!self.flags(dev)?.intersects(flag))
    }
}
