pub mod logging;

#[cfg(any(target_os = "linux", target_os = "android"))]
pub mod serial;
#[cfg(any(target_os = "linux", target_os = "android"))]
pub mod ffi;

#[cfg(any(target_os = "linux", target_os = "android"))]
pub use serial::{close_raw_fd, configure, open, PortHandle, SerialError};
