//! C ABI exposed to the managed runtime that owns the modem.
//!
//! `modem_port_open` returns the native descriptor number, which the host
//! wraps in its own file object for reading and writing. Negative return
//! values are the codes from [`SerialError::code`].
use std::ffi::{c_char, CStr};
use std::os::fd::IntoRawFd;

use crate::logging;
use crate::serial::{self, SerialError};

/// Open and configure the device at `path`.
///
/// # Safety
///
/// `path` must be null or point to a NUL-terminated string that stays
/// valid for the duration of the call. Null and non-UTF-8 paths are
/// rejected with the invalid-path code.
#[no_mangle]
pub unsafe extern "C" fn modem_port_open(path: *const c_char, baud_rate: i32) -> i32 {
    logging::init();

    let path = match (!path.is_null()).then(|| CStr::from_ptr(path).to_str()) {
        Some(Ok(path)) => path,
        _ => {
            log::error!(target: logging::LOG_TAG, "{}", SerialError::InvalidPath);
            return SerialError::InvalidPath.code();
        }
    };

    match serial::open(path, baud_rate) {
        Ok(handle) => handle.into_raw_fd(),
        Err(e) => e.code(),
    }
}

/// Close a descriptor returned by [`modem_port_open`].
#[no_mangle]
pub extern "C" fn modem_port_close(fd: i32) {
    serial::close_raw_fd(fd);
}
