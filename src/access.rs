//! Register access modes.

use bitflags::bitflags;

bitflags! {
    /// Which operations a register permits.
    ///
    /// A reserved register carries [`Access::empty()`]: neither readable nor
    /// writable.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Access: u8 {
        /// The register may be read.
        const READ = 1 << 0;
        /// The register may be written.
        const WRITE = 1 << 1;
    }
}

impl Access {
    /// Full read/write access.
    pub const RW: Self = Self::READ.union(Self::WRITE);

    /// True if reads are permitted.
    pub const fn is_readable(self) -> bool {
        self.contains(Self::READ)
    }

    /// True if writes are permitted.
    pub const fn is_writable(self) -> bool {
        self.contains(Self::WRITE)
    }
}
