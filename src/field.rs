//! Typed field descriptors
//!
//! A field is a named view over a bit range of its owning register. Fields
//! are plain `Copy` accessor objects built in `const` context; every access
//! goes back through the register, so a field never caches device state.
//!
//! Variants: [`BitField`] (plain unsigned), [`BoolField`], [`EnumField`]
//! (closed domain via `num_enum`), [`Trigger`] (self-clearing pulse, no read
//! accessor) and [`Reserved`] (inert, any access fails).

use core::marker::PhantomData;

use num_enum::TryFromPrimitive;

use crate::interface::Device;
use crate::mask::{BitRange, Mask};
use crate::reg::Reg;
use crate::Error;

/// A plain unsigned integer field.
#[derive(Debug, Clone, Copy)]
pub struct BitField {
    name: &'static str,
    reg: Reg,
    range: BitRange,
}

impl BitField {
    /// A field over `range` of `reg`.
    ///
    /// Panics (at compile time for `const` tables) if the range does not fit
    /// the register width.
    pub const fn new(name: &'static str, reg: Reg, range: BitRange) -> Self {
        assert!(range.fits(reg.bits()));
        Self { name, reg, range }
    }

    /// Field name, as it appears in the datasheet.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The owning register.
    pub const fn reg(&self) -> Reg {
        self.reg
    }

    /// The field's bit range.
    pub const fn range(&self) -> BitRange {
        self.range
    }

    /// The field's positioned mask.
    pub const fn mask(&self) -> Mask {
        self.range.mask()
    }

    /// Read the register and extract this field.
    pub fn get<D: Device>(&self, dev: &mut D) -> Result<u64, Error<D::Error>> {
        #[cfg(feature = "defmt")]
        defmt::trace!("read field {}", self.name);
        self.reg.read_field(dev, self.range)
    }

    /// Insert `value` into this field via read-modify-write; returns the
    /// full register value written. Values wider than the field are silently
    /// truncated.
    pub fn set<D: Device>(&self, dev: &mut D, value: u64) -> Result<u64, Error<D::Error>> {
        #[cfg(feature = "defmt")]
        defmt::trace!("write field {}: {:#x}", self.name, value);
        self.reg.modify(dev, |v| self.range.insert(v, value))
    }
}

/// A single-bit boolean field.
#[derive(Debug, Clone, Copy)]
pub struct BoolField {
    field: BitField,
}

impl BoolField {
    /// A boolean view of bit `bit` of `reg`.
    pub const fn new(name: &'static str, reg: Reg, bit: u32) -> Self {
        Self {
            field: BitField::new(name, reg, BitRange::bit(bit)),
        }
    }

    /// Field name.
    pub const fn name(&self) -> &'static str {
        self.field.name()
    }

    /// The field's bit range.
    pub const fn range(&self) -> BitRange {
        self.field.range()
    }

    /// Read the bit.
    pub fn get<D: Device>(&self, dev: &mut D) -> Result<bool, Error<D::Error>> {
        Ok(self.field.get(dev)? != 0)
    }

    /// Write the bit; returns the full register value written.
    pub fn set<D: Device>(&self, dev: &mut D, on: bool) -> Result<u64, Error<D::Error>> {
        self.field.set(dev, on as u64)
    }
}

/// A field interpreted through a closed enumeration.
///
/// Writes take the enum type, so an out-of-domain write is unrepresentable;
/// reads fail with [`Error::UnknownVariant`] when the hardware reports a
/// value outside the domain.
#[derive(Debug, Clone, Copy)]
pub struct EnumField<T> {
    field: BitField,
    _value: PhantomData<T>,
}

impl<T> EnumField<T> {
    /// An enumerated field over `range` of `reg`.
    pub const fn new(name: &'static str, reg: Reg, range: BitRange) -> Self {
        Self {
            field: BitField::new(name, reg, range),
            _value: PhantomData,
        }
    }

    /// Field name.
    pub const fn name(&self) -> &'static str {
        self.field.name()
    }

    /// The field's bit range.
    pub const fn range(&self) -> BitRange {
        self.field.range()
    }
}

impl<T> EnumField<T>
where
    T: TryFromPrimitive<Primitive = u8> + Copy,
    u8: From<T>,
{
    /// Read the field and decode it into the enumeration.
    pub fn get<D: Device>(&self, dev: &mut D) -> Result<T, Error<D::Error>> {
        let raw = self.field.get(dev)?;
        T::try_from_primitive(raw as u8).map_err(|_| Error::UnknownVariant(raw as u8))
    }

    /// Write an enumeration member; returns the full register value written.
    pub fn set<D: Device>(&self, dev: &mut D, value: T) -> Result<u64, Error<D::Error>> {
        self.field.set(dev, u64::from(u8::from(value)))
    }
}

/// A self-clearing trigger bit.
///
/// Triggers are pulse-only: there is no read accessor. A pulse is two
/// read-modify-write sequences, the second always writing 0 into the bit. A
/// device failure on the first transfer aborts the pulse and leaves the bit
/// set until corrected externally; no rollback is attempted.
#[derive(Debug, Clone, Copy)]
pub struct Trigger {
    field: BitField,
    pulse: u64,
}

impl Trigger {
    /// A trigger on bit `bit` of `reg`, pulsing with value 1.
    pub const fn new(name: &'static str, reg: Reg, bit: u32) -> Self {
        Self {
            field: BitField::new(name, reg, BitRange::bit(bit)),
            pulse: 1,
        }
    }

    /// Override the value written by the set half of the pulse.
    pub const fn pulse_value(mut self, pulse: u64) -> Self {
        self.pulse = pulse;
        self
    }

    /// Field name.
    pub const fn name(&self) -> &'static str {
        self.field.name()
    }

    /// The trigger's bit range.
    pub const fn range(&self) -> BitRange {
        self.field.range()
    }

    /// The trigger's positioned mask.
    pub const fn mask(&self) -> Mask {
        self.field.mask()
    }

    /// Pulse the trigger: write the pulse value, then write 0.
    pub fn trigger<D: Device>(&self, dev: &mut D) -> Result<(), Error<D::Error>> {
        self.trigger_with(dev, self.pulse)
    }

    /// Pulse the trigger with an explicit set value.
    pub fn trigger_with<D: Device>(&self, dev: &mut D, value: u64) -> Result<(), Error<D::Error>> {
        #[cfg(feature = "defmt")]
        defmt::trace!("trigger {}", self.field.name());
        self.field.set(dev, value)?;
        self.field.set(dev, 0)?;
        Ok(())
    }
}

/// A reserved bit range.
///
/// Exists to document and reserve bit positions; both accessors fail with
/// [`Error::AccessViolation`] without touching the device.
#[derive(Debug, Clone, Copy)]
pub struct Reserved {
    name: &'static str,
    range: BitRange,
}

impl Reserved {
    /// A reserved range of `reg`.
    pub const fn new(name: &'static str, reg: Reg, range: BitRange) -> Self {
        assert!(range.fits(reg.bits()));
        Self { name, range }
    }

    /// Field name.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The reserved bit range.
    pub const fn range(&self) -> BitRange {
        self.range
    }

    /// Always fails; reserved fields cannot be read.
    pub fn get<D: Device>(&self, _dev: &mut D) -> Result<u64, Error<D::Error>> {
        Err(Error::AccessViolation)
    }

    /// Always fails; reserved fields cannot be written.
    pub fn set<D: Device>(&self, _dev: &mut D, _value: u64) -> Result<u64, Error<D::Error>> {
        Err(Error::AccessViolation)
    }
}
