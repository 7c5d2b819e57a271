//! Integration tests for basic workflow scenarios

use crate::common::{create_mock_driver, MockDelay};
use x3n_crypto::registers::{ctrl, otp, ram};
use x3n_crypto::{CryptoEvent, CryptoState, Error};

#[test]
fn test_bring_up_and_key_exchange() {
    let (mut driver, handle) = create_mock_driver();

    // Power-up: SRAM init completes on the second poll, then the ECDH key
    // generation event runs and completes on the second status poll.
    handle.schedule_states(&[
        CryptoState::empty(),
        CryptoState::SRAM_INIT_DONE,
        CryptoState::SRAM_INIT_DONE,
        CryptoState::SRAM_INIT_DONE | CryptoState::EVENT_DONE,
    ]);
    handle.set_bytes(ctrl::UID.addr(), &[0xAB, 0xCD, 0xEF, 0x01, 0x23, 0x45]);

    driver.wait_sram_init(&mut MockDelay).unwrap();
    assert_eq!(driver.read_uid().unwrap(), 0xABCD_EF01_2345);

    handle.clear_operations();
    driver
        .run_event(CryptoEvent::SnrGenEcdh, &mut MockDelay)
        .unwrap();

    // Selector+pulse used exactly two control writes.
    assert_eq!(handle.writes_to(ctrl::GLB_CONFIG0.addr()).len(), 2);
}

#[test]
fn test_sram_init_timeout() {
    let (mut driver, _handle) = create_mock_driver();

    // CRYPTO_STATE stays zero: the bounded poll gives up.
    let result = driver.wait_sram_init(&mut MockDelay);
    assert!(matches!(result, Err(Error::Timeout)));
}

#[test]
fn test_nonce_and_iv_staging() {
    let (mut driver, handle) = create_mock_driver();

    let nonce = [0x11u8; 16];
    driver.write_nonce(&nonce).unwrap();
    assert_eq!(handle.bytes(ctrl::NONCE.addr(), 16), nonce.to_vec());

    let iv = *b"\x01\x02\x03\x04\x05\x06\x07\x08\x09\x0A\x0B\x0C";
    driver.write_iv(&iv).unwrap();
    assert_eq!(handle.bytes(ctrl::IV0.addr(), 12), iv.to_vec());
}

#[test]
fn test_sensor_certificate_read() {
    let (mut driver, handle) = create_mock_driver();

    let cert: Vec<u8> = (0u8..32).collect();
    // Length prefix is big-endian.
    handle.set_bytes(ram::SNR_CERT_LEN.addr(), &(cert.len() as u32).to_be_bytes());
    handle.set_bytes(ram::SNR_CERT.addr(), &cert);

    let mut buf = [0u8; 348];
    let read = driver.read_sensor_cert(&mut buf).unwrap();
    assert_eq!(read, &cert[..]);
}

#[test]
fn test_sensor_certificate_length_exceeding_buffer() {
    let (mut driver, handle) = create_mock_driver();
    handle.set_bytes(ram::SNR_CERT_LEN.addr(), &1000u32.to_be_bytes());

    let mut buf = [0u8; 348];
    let result = driver.read_sensor_cert(&mut buf);
    assert!(matches!(result, Err(Error::RangeOverflow)));
}

#[test]
fn test_ecdh_key_staging_round_trip() {
    let (mut driver, handle) = create_mock_driver();

    let mut sensor_key = [0u8; 65];
    handle.set_bytes(ram::SNR_ECDH_PUBK.addr(), &[0x04; 65]);
    driver.read_sensor_ecdh_pubk(&mut sensor_key).unwrap();
    assert_eq!(sensor_key, [0x04; 65]);

    let host_key = [0x37u8; 65];
    driver.write_host_ecdh_pubk(&host_key).unwrap();
    assert_eq!(
        handle.bytes(ram::HOST_ECDH_PUBK.addr(), 65),
        host_key.to_vec()
    );
}

#[test]
fn test_gmac_tag_read() {
    let (mut driver, handle) = create_mock_driver();
    handle.set_u32(ctrl::GMAC0.addr(), 0x0101_0101);
    handle.set_u32(ctrl::GMAC1.addr(), 0x0202_0202);
    handle.set_u32(ctrl::GMAC2.addr(), 0x0303_0303);
    handle.set_u32(ctrl::GMAC3.addr(), 0x0404_0404);

    let tag = driver.read_gmac().unwrap();
    assert_eq!(tag, [0x0101_0101, 0x0202_0202, 0x0303_0303, 0x0404_0404]);
}

#[test]
fn test_frame_counters() {
    let (mut driver, handle) = create_mock_driver();
    handle.set_u32(ctrl::FRAME_COUNTER.addr(), 1234);
    handle.set_u32(ctrl::SSK_FRAME_COUNTER.addr(), 56);

    assert_eq!(driver.frame_counter().unwrap(), 1234);
    assert_eq!(driver.ssk_frame_counter().unwrap(), 56);
}

#[test]
fn test_otp_provisioning_window() {
    let (mut driver, handle) = create_mock_driver();
    handle.set_bytes(otp::UID.addr(), &[0x45, 0x23, 0x01, 0xEF, 0xCD, 0xAB]);
    handle.set_u32(otp::SNR_OTP_LOCK.addr(), 1);
    handle.set_bytes(otp::PPK.addr(), &[0x5A; 32]);

    let dev = driver.device_mut();
    // The fused UID is little-endian, unlike its live mirror in ctrl.
    assert_eq!(otp::UID.read(dev).unwrap(), 0xABCD_EF01_2345);
    assert_eq!(otp::SNR_OTP_LOCK.read(dev).unwrap(), 1);

    let mut ppk = [0u8; 32];
    otp::PPK.read_bytes(dev, &mut ppk).unwrap();
    assert_eq!(ppk, [0x5A; 32]);

    // The whole window is fused: writes are rejected.
    assert!(matches!(
        otp::SNR_OTP_LOCK.write(dev, 0),
        Err(Error::AccessViolation)
    ));
}

#[test]
fn test_release_returns_the_device() {
    let (driver, handle) = create_mock_driver();
    handle.set_u32(0x2000, 7);

    let device = driver.release();
    // Same shared state as the handle.
    drop(device);
    assert_eq!(handle.u32_at(0x2000), 7);
}
