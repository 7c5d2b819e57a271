//! High-level driver API for the X3N crypto coprocessor
//!
//! [`X3nDriver`] owns the transport and wires the register map to it:
//! status queries, provisioning reads, key-exchange staging, and the
//! event-trigger handshake against `CRYPTO_STATE`.

use embedded_hal::delay::DelayNs;

use crate::interface::Device;
use crate::registers::{ctrl, ram, CryptoEvent, CryptoState};
use crate::Error;

/// Poll attempts before an event is declared timed out.
pub const EVENT_POLL_ATTEMPTS: u32 = 100;

/// Delay between event poll attempts, in milliseconds. Together with
/// [`EVENT_POLL_ATTEMPTS`] this bounds an event wait at five seconds.
pub const EVENT_POLL_INTERVAL_MS: u32 = 50;

/// Longest wait for secure SRAM initialization, in milliseconds.
const SRAM_INIT_WAIT_MS: u32 = 100;
const SRAM_INIT_POLL_MS: u32 = 1;

/// Driver for the X3N security engine.
///
/// The driver owns its device; use [`X3nDriver::release`] to get it back.
/// Every operation is a direct blocking call into the transport — there is
/// no caching, and no locking around read-modify-write sequences.
pub struct X3nDriver<D> {
    device: D,
}

impl<D: Device> X3nDriver<D> {
    /// Create a driver over `device`.
    pub fn new(device: D) -> Self {
        Self { device }
    }

    /// Access the underlying device, e.g. for raw register pokes.
    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    /// Consume the driver and return the device.
    pub fn release(self) -> D {
        self.device
    }

    /// Current `CRYPTO_STATE` flags, decoded from a fresh read.
    pub fn crypto_state(&mut self) -> Result<CryptoState, Error<D::Error>> {
        ctrl::CRYPTO_STATE.flags(&mut self.device)
    }

    /// Wait for secure SRAM initialization after power-up.
    ///
    /// Polls `SRAM_INIT_DONE` once per millisecond for up to 100 ms.
    ///
    /// # Errors
    ///
    /// [`Error::Timeout`] if the flag never rises, or the propagated device
    /// failure.
    pub fn wait_sram_init<T: DelayNs>(&mut self, delay: &mut T) -> Result<(), Error<D::Error>> {
        for _ in 0..(SRAM_INIT_WAIT_MS / SRAM_INIT_POLL_MS) {
            if self.crypto_state()?.contains(CryptoState::SRAM_INIT_DONE) {
                return Ok(());
            }
            delay.delay_ms(SRAM_INIT_POLL_MS);
        }
        #[cfg(feature = "defmt")]
        defmt::error!("SRAM init timed out");
        Err(Error::Timeout)
    }

    /// Run a security engine event and wait for completion.
    ///
    /// Writes the event id into `EVENT_ID` while raising `EVENT_TRIG`, then
    /// clears the trigger — two control-register writes in total. The
    /// handshake then polls `CRYPTO_STATE` up to [`EVENT_POLL_ATTEMPTS`]
    /// times, [`EVENT_POLL_INTERVAL_MS`] apart:
    ///
    /// - done clear: still running, keep polling;
    /// - done set, status clear: success;
    /// - done set, status set: the hardware reported a failure.
    ///
    /// Only the explicit done-and-status combination is an error — a
    /// not-yet-done poll is never confused with a failure.
    ///
    /// # Errors
    ///
    /// [`Error::HardwareFault`] when the engine reports done with its error
    /// flag raised (the remaining poll budget is not consumed),
    /// [`Error::Timeout`] when the budget runs out, or the propagated device
    /// failure.
    pub fn run_event<T: DelayNs>(
        &mut self,
        event: CryptoEvent,
        delay: &mut T,
    ) -> Result<(), Error<D::Error>> {
        let id = u64::from(u8::from(event));
        let selector = ctrl::EVENT_ID.range();
        let trig = ctrl::EVENT_TRIG.mask();

        ctrl::GLB_CONFIG0.modify(&mut self.device, |v| trig.set(selector.insert(v, id)))?;
        ctrl::GLB_CONFIG0.modify(&mut self.device, |v| trig.clear(v))?;

        for _ in 0..EVENT_POLL_ATTEMPTS {
            let state = self.crypto_state()?;
            if state.contains(CryptoState::EVENT_DONE) {
                if state.contains(CryptoState::EVENT_STATUS) {
                    #[cfg(feature = "defmt")]
                    defmt::error!("event {} reported an error", event);
                    return Err(Error::HardwareFault(event));
                }
                #[cfg(feature = "defmt")]
                defmt::debug!("event {} done", event);
                return Ok(());
            }
            delay.delay_ms(EVENT_POLL_INTERVAL_MS);
        }

        #[cfg(feature = "defmt")]
        defmt::error!("event {} timed out", event);
        Err(Error::Timeout)
    }

    /// Read the 6-byte big-endian unique sensor id.
    pub fn read_uid(&mut self) -> Result<u64, Error<D::Error>> {
        ctrl::UID.read(&mut self.device)
    }

    /// Read the four GMAC authentication tag words.
    pub fn read_gmac(&mut self) -> Result<[u32; 4], Error<D::Error>> {
        let mut tag = [0u32; 4];
        for (word, reg) in tag
            .iter_mut()
            .zip([ctrl::GMAC0, ctrl::GMAC1, ctrl::GMAC2, ctrl::GMAC3])
        {
            *word = reg.read(&mut self.device)? as u32;
        }
        Ok(tag)
    }

    /// Read the rolling frame counter.
    pub fn frame_counter(&mut self) -> Result<u32, Error<D::Error>> {
        Ok(ctrl::FRAME_COUNTER.read(&mut self.device)? as u32)
    }

    /// Read the session-key frame counter.
    pub fn ssk_frame_counter(&mut self) -> Result<u32, Error<D::Error>> {
        Ok(ctrl::SSK_FRAME_COUNTER.read(&mut self.device)? as u32)
    }

    /// Stage a 16-byte session nonce.
    pub fn write_nonce(&mut self, nonce: &[u8; 16]) -> Result<(), Error<D::Error>> {
        ctrl::NONCE.write_bytes(&mut self.device, nonce)
    }

    /// Stage a 12-byte AES-GCM initialization vector.
    pub fn write_iv(&mut self, iv: &[u8; 12]) -> Result<(), Error<D::Error>> {
        ctrl::IV0.write_bytes(&mut self.device, iv)
    }

    /// Length of the sensor certificate, from its length-prefix register.
    pub fn sensor_cert_len(&mut self) -> Result<usize, Error<D::Error>> {
        Ok(ram::SNR_CERT_LEN.read(&mut self.device)? as usize)
    }

    /// Read the sensor certificate into `buf`, returning the filled prefix.
    ///
    /// # Errors
    ///
    /// [`Error::RangeOverflow`] if the reported length exceeds `buf` or the
    /// certificate window, or the propagated device failure.
    pub fn read_sensor_cert<'a>(
        &mut self,
        buf: &'a mut [u8],
    ) -> Result<&'a [u8], Error<D::Error>> {
        let len = self.sensor_cert_len()?;
        if len > buf.len() || len > ram::SNR_CERT.len() {
            return Err(Error::RangeOverflow);
        }
        ram::SNR_CERT.read_bytes(&mut self.device, &mut buf[..len])?;
        Ok(&buf[..len])
    }

    /// Read the sensor's ECDH public key.
    pub fn read_sensor_ecdh_pubk(&mut self, key: &mut [u8; 65]) -> Result<(), Error<D::Error>> {
        ram::SNR_ECDH_PUBK.read_bytes(&mut self.device, key)
    }

    /// Stage the host's ECDH public key, then run [`CryptoEvent::HostEcdhRdy`]
    /// separately to hand it to the engine.
    pub fn write_host_ecdh_pubk(&mut self, key: &[u8; 65]) -> Result<(), Error<D::Error>> {
        ram::HOST_ECDH_PUBK.write_bytes(&mut self.device, key)
    }
}
