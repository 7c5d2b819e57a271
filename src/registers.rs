//! Register map for the X3N crypto coprocessor
//!
//! Three windows share the byte-addressed space:
//! - **Control** ([`ctrl`], 0x1A00..): configuration, trigger and status
//!   registers of the security engine.
//! - **RAM** ([`ram`], 0x1A90..): certificate and ECDH key exchange areas,
//!   accessed as byte bursts.
//! - **OTP** ([`otp`], 0x5000..): fused provisioning data, read-only.
//!
//! Registers are little-endian unless marked otherwise. All descriptors are
//! `const` and carry no state; pass a [`Device`](crate::Device) into each
//! operation.

use bitflags::bitflags;
use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Events the host can ask the security engine to run, written into
/// [`ctrl::EVENT_ID`] before pulsing [`ctrl::EVENT_TRIG`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum CryptoEvent {
    /// Sensor verifies the host certificate: host-side decode step.
    HostDecodeCert = 0,
    /// Sensor verifies the host certificate: sensor-side decode step.
    SnrDecodeCert = 1,
    /// Generate the sensor's ECDH key pair.
    SnrGenEcdh = 2,
    /// The host's ECDH public key has been staged in RAM.
    HostEcdhRdy = 3,
}

bitflags! {
    /// The `CRYPTO_STATE` status word.
    ///
    /// Bit names follow the datasheet. `EVENT_DONE` and `EVENT_STATUS`
    /// together report event completion: done with status clear is success,
    /// done with status set is a hardware-reported failure.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct CryptoState: u32 {
        /// GMAC engine busy.
        const GMAC_STATE = 1 << 0;
        /// GMAC output registers hold a fresh tag.
        const GMAC_READY_FLAG = 1 << 1;
        /// A new session key has been installed.
        const NEW_KEY_FLAG = 1 << 2;
        /// Geometry update has been applied.
        const GEOM_UPDATE_DONE = 1 << 3;
        /// Geometry update landed on a start-of-frame boundary.
        const GEOM_UPDATE_ENCOUNTER_SOF = 1 << 4;
        /// Reserved.
        const RESERVED = 1 << 5;
        /// Fault state machine engaged.
        const FAULT_FSM_STATE = 1 << 6;
        /// Secure SRAM initialization finished.
        const SRAM_INIT_DONE = 1 << 7;
        /// The last triggered event has finished.
        const EVENT_DONE = 1 << 8;
        /// The last triggered event finished with an error.
        const EVENT_STATUS = 1 << 9;
        /// Public RAM window is open to the host.
        const HOST_ACCESS_PUB_RAM_READY = 1 << 10;
        /// OTP contents have been shadowed.
        const OTP_LOAD_DONE_FLAG = 1 << 11;
        /// OTP controller ready.
        const OTP_READY = 1 << 12;
        /// Sensor requests a session key change.
        const SSK_CHANGE_REQ = 1 << 13;
        /// Embedded-line FIFO overflowed.
        const FIFO_OVERFLOW = 1 << 14;
        /// OTP field lock fuse blown.
        const OV_OTP_FIELD_LOCK = 1 << 15;
        /// Session key generation failed.
        const SSK_GEN_ERR_FLAG = 1 << 16;
        /// Host ECDH public key accepted.
        const HOST_ECDH_KEY_READY_FLAG = 1 << 17;
        /// Sensor has signed its ECDH public key.
        const SENSOR_SIGN_ECDH_KEY_FLAG = 1 << 18;
        /// Sensor has generated its ECDH key pair.
        const SENSOR_GEN_ECDH_KEY_FLAG = 1 << 19;
        /// Host certificate verification passed.
        const HOST_CERT_VERF_PASS_FLAG = 1 << 20;
        /// Host OTP area locked.
        const HOST_OTP_LOCK = 1 << 21;
        /// One-way authentication completed.
        const ONE_WAY_AUTHEN = 1 << 22;
        /// Two-way authentication completed.
        const TWO_WAY_AUTHEN = 1 << 23;
    }
}

/// Control window of the security engine.
pub mod ctrl {
    use super::{CryptoEvent, CryptoState};
    use crate::endian::Endian;
    use crate::field::{BitField, BoolField, EnumField, Reserved, Trigger};
    use crate::mask::BitRange;
    use crate::reg::{FlagsReg, Reg};

    // ---- configuration ----

    /// GLB_CONFIG0 - Global Configuration 0 (0x1A00, 1 byte)
    pub const GLB_CONFIG0: Reg = Reg::rw(0x1A00).size(1);

    /// Re-randomize the TRNG trigger parameters.
    pub const TRNG_TRIG_PARAM_TRIG: BitField =
        BitField::new("trng_trig_param_trig", GLB_CONFIG0, BitRange::bit(0));
    /// Full-frame protection mode for the output stream.
    pub const FULL_FRAME_MODE_O: BitField =
        BitField::new("full_frame_mode_o", GLB_CONFIG0, BitRange::bit(1));
    /// Use the session key instead of the provisioned key.
    pub const SSK_USAGE: BoolField = BoolField::new("ssk_usage", GLB_CONFIG0, 2);
    /// Latch the secure-key usage configuration.
    pub const SECURE_KEY_USAGE_TRIG: Trigger =
        Trigger::new("secure_key_usage_trig", GLB_CONFIG0, 3);
    /// Apply a staged geometry update.
    pub const GEOM_UPDATE: Trigger = Trigger::new("geom_update", GLB_CONFIG0, 4);
    /// Kick off the event selected by [`EVENT_ID`].
    pub const EVENT_TRIG: Trigger = Trigger::new("event_trig", GLB_CONFIG0, 5);
    /// Which event [`EVENT_TRIG`] starts.
    pub const EVENT_ID: EnumField<CryptoEvent> =
        EnumField::new("event_id", GLB_CONFIG0, BitRange::span(6, 7));

    /// GLB_CONFIG1 - Global Configuration 1 (0x1A01, 1 byte)
    pub const GLB_CONFIG1: Reg = Reg::rw(0x1A01).size(1);

    /// Reserved bit 0.
    pub const GLB_CONFIG1_RESERVED: Reserved =
        Reserved::new("reserved", GLB_CONFIG1, BitRange::bit(0));
    /// Emit per-line embedded data.
    pub const EMBLINE_DATA_EN: BitField =
        BitField::new("embline_data_en", GLB_CONFIG1, BitRange::bit(1));
    /// Encoding of the ECC-256 ECDH public key.
    pub const ECC256_ECDH_PUBK_FORMAT: BitField =
        BitField::new("ecc256_ecdh_pubk_format", GLB_CONFIG1, BitRange::span(2, 3));

    /// HOST_ADDR - Host certificate staging addresses (0x1A04)
    pub const HOST_ADDR: Reg = Reg::rw(0x1A04);

    /// RAM offset of the host certificate signatures.
    pub const HOST_CERTSIGNS_ADDR: BitField =
        BitField::new("host_certsigns_addr", HOST_ADDR, BitRange::new(0, 16));
    /// RAM offset of the host certificate public key.
    pub const HOST_CERTPUBK_ADDR: BitField =
        BitField::new("host_certpubk_addr", HOST_ADDR, BitRange::new(16, 16));

    /// TRNG_PARAM0 (0x1A08)
    pub const TRNG_PARAM0: Reg = Reg::rw(0x1A08);
    /// TRNG_PARAM1 (0x1A0C)
    pub const TRNG_PARAM1: Reg = Reg::rw(0x1A0C);
    /// Reserved (0x1A10)
    pub const RSV: Reg = Reg::reserved(0x1A10);
    /// PIXEL_PARAM (0x1A14)
    pub const PIXEL_PARAM: Reg = Reg::rw(0x1A14);
    /// NONCE - session nonce (0x1A18, 16 bytes, byte access only)
    pub const NONCE: Reg = Reg::rw(0x1A18).size(16);
    /// GEOM0_ROWS_PARAM (0x1A28)
    pub const GEOM0_ROWS_PARAM: Reg = Reg::rw(0x1A28);
    /// GEOM0_B2H (0x1A2C)
    pub const GEOM0_B2H: Reg = Reg::rw(0x1A2C);
    /// Reserved (0x1A30, 12 bytes)
    pub const RSV_1: Reg = Reg::reserved(0x1A30).size(0x0C);
    /// FAULT_PARAM (0x1A3C)
    pub const FAULT_PARAM: Reg = Reg::rw(0x1A3C);
    /// IV0 - AES-GCM initialization vector (0x1A40, 12 bytes, byte access only)
    pub const IV0: Reg = Reg::rw(0x1A40).size(12);
    /// DUMMY_REQ (0x1A4C)
    pub const DUMMY_REQ: Reg = Reg::rw(0x1A4C);
    /// FAULT_LATCH (0x1A50)
    pub const FAULT_LATCH: Reg = Reg::rw(0x1A50);
    /// STICKY_FAULT (0x1A54)
    pub const STICKY_FAULT: Reg = Reg::rw(0x1A54);
    /// Reserved (0x1A58)
    pub const RSV_2: Reg = Reg::reserved(0x1A58);

    // ---- status ----

    /// GMAC0 - authentication tag word 0 (0x1A5C, read-only)
    pub const GMAC0: Reg = Reg::ro(0x1A5C);
    /// GMAC1 - authentication tag word 1 (0x1A60, read-only)
    pub const GMAC1: Reg = Reg::ro(0x1A60);
    /// GMAC2 - authentication tag word 2 (0x1A64, read-only)
    pub const GMAC2: Reg = Reg::ro(0x1A64);
    /// GMAC3 - authentication tag word 3 (0x1A68, read-only)
    pub const GMAC3: Reg = Reg::ro(0x1A68);

    /// CRYPTO_STATE - engine status flags (0x1A6C, read-only)
    pub const CRYPTO_STATE: FlagsReg<CryptoState> = FlagsReg::new(0x1A6C);

    /// OTP_OPEN_CRC (0x1A70, read-only)
    pub const OTP_OPEN_CRC: Reg = Reg::ro(0x1A70);
    /// OTP_DEFINE_MAX_FN (0x1A74, read-only)
    pub const OTP_DEFINE_MAX_FN: Reg = Reg::ro(0x1A74);
    /// UID - unique sensor id (0x1A78, 6 bytes, big-endian, read-only)
    pub const UID: Reg = Reg::ro(0x1A78).size(6).endian(Endian::Big);
    /// FRAME_COUNTER (0x1A80, read-only)
    pub const FRAME_COUNTER: Reg = Reg::ro(0x1A80);
    /// SSK_FRAME_COUNTER (0x1A84, read-only)
    pub const SSK_FRAME_COUNTER: Reg = Reg::ro(0x1A84);
    /// TRNG_HEALTH_TEST_FLAG (0x1A88, read-only)
    pub const TRNG_HEALTH_TEST_FLAG: Reg = Reg::ro(0x1A88);
    /// HOST_CERT_PUBK - first word of the staged host public key (0x1A90, read-only)
    pub const HOST_CERT_PUBK: Reg = Reg::ro(0x1A90);
}

/// Certificate and key-exchange RAM window. Byte-burst regions; sizes come
/// from the security engine's memory layout.
pub mod ram {
    use crate::endian::Endian;
    use crate::reg::Reg;

    /// Staged host certificate public key, debug view (0x1A90, 68 bytes).
    pub const HOST_CERT_PUBK_DEBUG: Reg = Reg::ro(0x1A90).size(68);
    /// Signature over the staged host public key (0x1AD4, 64 bytes).
    pub const HOST_CERT_PUBK_SIGN_DEBUG: Reg = Reg::ro(0x1AD4).size(64);
    /// Sensor ECDH public key (0x1B17, 65 bytes).
    pub const SNR_ECDH_PUBK: Reg = Reg::ro(0x1B17).size(65);
    /// Signature over the sensor ECDH public key (0x1B58, 64 bytes).
    pub const SNR_ECDH_PUBK_SIGN: Reg = Reg::ro(0x1B58).size(64);
    /// Sensor certificate length in bytes (0x1B98, big-endian).
    pub const SNR_CERT_LEN: Reg = Reg::ro(0x1B98).endian(Endian::Big);
    /// Sensor certificate (0x1B9C, up to 348 bytes).
    pub const SNR_CERT: Reg = Reg::ro(0x1B9C).size(348);
    /// Host ECDH public key staging area (0x1CFB, 65 bytes).
    pub const HOST_ECDH_PUBK: Reg = Reg::rw(0x1CFB).size(65);
    /// Signature over the host ECDH public key (0x1D3C, 64 bytes).
    pub const HOST_ECDH_PUBK_SIGN: Reg = Reg::rw(0x1D3C).size(64);
    /// Host certificate staging area (0x1D7C, up to 852 bytes).
    pub const HOST_CERT: Reg = Reg::rw(0x1D7C).size(852);
}

/// OTP provisioning window. Fused at manufacturing, read-only.
pub mod otp {
    use crate::endian::Endian;
    use crate::reg::Reg;

    /// Sensor OTP lock word (0x5000).
    pub const SNR_OTP_LOCK: Reg = Reg::ro(0x5000);
    /// Platform public key (0x5004, 32 bytes).
    pub const PPK: Reg = Reg::ro(0x5004).size(32);
    /// Sensor private key (0x5024, 32 bytes).
    pub const SNR_PRVK: Reg = Reg::ro(0x5024).size(32);
    /// CRC over the first OTP segment (0x5044).
    pub const CRC0: Reg = Reg::ro(0x5044);
    /// Unique sensor id (0x5048, 6 bytes).
    pub const UID: Reg = Reg::ro(0x5048).size(6);
    /// Sensor certificate length (0x504E, big-endian).
    pub const SNR_CERT_LEN: Reg = Reg::ro(0x504E).endian(Endian::Big);
    /// Sensor certificate (0x5050, up to 344 bytes).
    pub const SNR_CERT: Reg = Reg::ro(0x5050).size(344);
    /// Provisioned frame number (0x51A8).
    pub const FRAME_NUMBER: Reg = Reg::ro(0x51A8);
    /// CRC over the second OTP segment (0x51AC).
    pub const CRC1: Reg = Reg::ro(0x51AC);
    /// User public key lock word (0x51B0).
    pub const USER_PUBK_LOCK: Reg = Reg::ro(0x51B0);
    /// Host authentication mode (0x51B4).
    pub const HOST_AUTH_MODE: Reg = Reg::ro(0x51B4);
    /// User global public key (0x51B8, 68 bytes).
    pub const USER_GLB_PUBK: Reg = Reg::ro(0x51B8).size(68);
    /// CRC over the user segment (0x51FC).
    pub const CRC2: Reg = Reg::ro(0x51FC);
}
