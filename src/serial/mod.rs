pub mod baud;
pub mod config;
pub mod discovery;
pub mod port;

pub use baud::{resolve_baud_rate, SUPPORTED_BAUD_RATES};
pub use config::{LineSettings, PortConfig};
pub use discovery::{discover_ports, SerialDeviceInfo};
pub use port::{close_raw_fd, configure, open, port_exists, PortHandle};

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum SerialError {
    #[error("Invalid baud rate: {0}")]
    InvalidBaudRate(i32),

    #[error("Cannot open port {}: {source}", path.display())]
    DeviceOpenFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("tcgetattr() failed on {}: {source}", path.display())]
    ConfigurationReadFailed {
        path: PathBuf,
        #[source]
        source: nix::Error,
    },

    #[error("tcsetattr() failed on {}: {source}", path.display())]
    ConfigurationWriteFailed {
        path: PathBuf,
        #[source]
        source: nix::Error,
    },

    #[error("Invalid device path")]
    InvalidPath,

    #[error("Port enumeration failed: {0}")]
    Enumeration(#[from] serialport::Error),
}

impl SerialError {
    /// Stable negative code reported across the C boundary
    pub fn code(&self) -> i32 {
        match self {
            SerialError::InvalidBaudRate(_) => -1,
            SerialError::DeviceOpenFailed { .. } => -2,
            SerialError::ConfigurationReadFailed { .. } => -3,
            SerialError::ConfigurationWriteFailed { .. } => -4,
            SerialError::InvalidPath => -5,
            SerialError::Enumeration(_) => -6,
        }
    }
}

pub type Result<T> = std::result::Result<T, SerialError>;
