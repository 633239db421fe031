mod common;

use std::ffi::CString;
use std::io::Read;
use std::os::fd::AsRawFd;

use modem_port_lib::ffi::{modem_port_close, modem_port_open};
use modem_port_lib::serial::{self, SerialError, SUPPORTED_BAUD_RATES};

#[test]
fn test_open_applies_raw_modem_settings() {
    let modem = common::virtual_modem();
    let handle = serial::open(&modem.path, 115200).expect("open should succeed");
    assert!(handle.raw_fd() >= 0);

    let settings = handle.line_settings().unwrap();
    assert!(!settings.canonical, "canonical mode should be off");
    assert!(!settings.echo, "echo should be off");
    assert!(!settings.signals);
    assert_eq!(settings.input_baud, Some(115200));
    assert_eq!(settings.output_baud, Some(115200));
    assert_eq!(settings.local_flags, 0);
    handle.close();
}

#[test]
fn test_open_at_every_supported_rate() {
    for baud in SUPPORTED_BAUD_RATES.iter().copied().filter(|b| *b > 0) {
        let modem = common::virtual_modem();
        let handle = serial::open(&modem.path, baud)
            .unwrap_or_else(|e| panic!("open at {} failed: {}", baud, e));
        assert_eq!(handle.line_settings().unwrap().output_baud, Some(baud as u32));
        handle.close();
    }
}

#[test]
fn test_unsupported_rate_fails_without_touching_device() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ttyUSB0");
    for baud in [9601, 100, -1] {
        match serial::open(&path, baud) {
            Err(SerialError::InvalidBaudRate(b)) => assert_eq!(b, baud),
            other => panic!("unexpected result: {:?}", other),
        }
    }
    assert!(!path.exists());
}

#[test]
fn test_missing_device_fails_to_open() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nonexistent");
    match serial::open(&path, 9600) {
        Err(SerialError::DeviceOpenFailed { path: p, source }) => {
            assert_eq!(p, path);
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_independent_handles() {
    let first_modem = common::virtual_modem();
    let second_modem = common::virtual_modem();

    let first = serial::open(&first_modem.path, 9600).unwrap();
    let second = serial::open(&second_modem.path, 230400).unwrap();
    assert_ne!(first.raw_fd(), second.raw_fd());

    first.close();
    let settings = second.line_settings().expect("second handle should still be valid");
    assert_eq!(settings.output_baud, Some(230400));
    second.close();
}

#[test]
fn test_stale_input_is_flushed() {
    let modem = common::virtual_modem();
    // Park a byte on the slave side before it is opened.
    nix::unistd::write(&modem.master, b"stale").unwrap();
    std::thread::sleep(std::time::Duration::from_millis(50));

    let handle = serial::open(&modem.path, 9600).unwrap();
    let mut file = std::fs::File::from(std::os::fd::OwnedFd::from(handle));
    let mut buf = [0u8; 16];
    match file.read(&mut buf) {
        Err(e) => assert_eq!(e.kind(), std::io::ErrorKind::WouldBlock),
        Ok(n) => panic!("expected no pending input, read {} bytes", n),
    }
}

#[test]
fn test_configure_leaves_settings_on_device() {
    let modem = common::virtual_modem();
    assert!(serial::port_exists(&modem.path));
    serial::configure(&modem.path, 57600).unwrap();

    let termios = nix::sys::termios::tcgetattr(&modem.master).unwrap();
    let settings = modem_port_lib::serial::LineSettings::from_termios(&termios);
    assert_eq!(settings.output_baud, Some(57600));
}

#[test]
fn test_configure_missing_device() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ttyACM0");
    assert!(!serial::port_exists(&path));
    assert!(matches!(
        serial::configure(&path, 9600),
        Err(SerialError::DeviceOpenFailed { .. })
    ));
}

#[test]
fn test_c_abi_round_trip() {
    let modem = common::virtual_modem();
    let path = CString::new(modem.path.clone()).unwrap();

    let fd = unsafe { modem_port_open(path.as_ptr(), 115200) };
    assert!(fd >= 0, "expected a descriptor, got {}", fd);
    assert_ne!(fd, modem.master.as_raw_fd());
    modem_port_close(fd);
}
