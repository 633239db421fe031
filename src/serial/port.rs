use std::fs::OpenOptions;
use std::os::fd::{AsFd, AsRawFd, BorrowedFd, IntoRawFd, OwnedFd, RawFd};
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};

use nix::fcntl::OFlag;
use nix::sys::termios::{tcflush, tcgetattr, tcsetattr, FlushArg, SetArg};

use super::config::{LineSettings, PortConfig};
use super::{Result, SerialError};
use crate::logging::LOG_TAG;

/// An open, configured modem port.
///
/// Owns the native descriptor exclusively. It is released by [`close`],
/// or when the handle is dropped. [`IntoRawFd`] hands ownership to a
/// foreign caller, which then becomes responsible for closing it.
///
/// [`close`]: PortHandle::close
#[derive(Debug)]
pub struct PortHandle {
    fd: OwnedFd,
    path: PathBuf,
}

impl PortHandle {
    pub fn raw_fd(&self) -> RawFd {
        self.fd.as_raw_fd()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read back the line discipline the device currently reports
    pub fn line_settings(&self) -> Result<LineSettings> {
        let termios = tcgetattr(&self.fd).map_err(|source| SerialError::ConfigurationReadFailed {
            path: self.path.clone(),
            source,
        })?;
        Ok(LineSettings::from_termios(&termios))
    }

    /// Release the descriptor. Failures are logged, never returned.
    pub fn close(self) {
        close_raw_fd(self.fd.into_raw_fd());
    }
}

impl AsFd for PortHandle {
    fn as_fd(&self) -> BorrowedFd<'_> {
        self.fd.as_fd()
    }
}

impl AsRawFd for PortHandle {
    fn as_raw_fd(&self) -> RawFd {
        self.fd.as_raw_fd()
    }
}

impl IntoRawFd for PortHandle {
    fn into_raw_fd(self) -> RawFd {
        self.fd.into_raw_fd()
    }
}

impl From<PortHandle> for OwnedFd {
    fn from(handle: PortHandle) -> Self {
        handle.fd
    }
}

/// Open the device at `path` and configure it for modem traffic at `baud`.
///
/// The baud rate is validated before the filesystem is touched. Any
/// failure after the device has been opened closes it again before the
/// error is returned.
pub fn open(path: impl AsRef<Path>, baud: i32) -> Result<PortHandle> {
    let path = path.as_ref();

    let config = match PortConfig::for_baud(baud) {
        Ok(config) => config,
        Err(e) => {
            log::error!(target: LOG_TAG, "Invalid baudrate {}", baud);
            return Err(e);
        }
    };

    log::info!(target: LOG_TAG, "Opening serial port {}", path.display());
    let fd: OwnedFd = OpenOptions::new()
        .read(true)
        .write(true)
        .custom_flags((OFlag::O_NOCTTY | OFlag::O_NONBLOCK).bits())
        .open(path)
        .map_err(|source| {
            log::error!(target: LOG_TAG, "Cannot open port {}: {}", path.display(), source);
            SerialError::DeviceOpenFailed {
                path: path.to_path_buf(),
                source,
            }
        })?
        .into();
    log::info!(target: LOG_TAG, "open() fd = {}", fd.as_raw_fd());

    log::info!(target: LOG_TAG, "Configuring serial port");
    let mut termios = tcgetattr(&fd).map_err(|source| {
        log::error!(target: LOG_TAG, "tcgetattr() failed: {}", source);
        SerialError::ConfigurationReadFailed {
            path: path.to_path_buf(),
            source,
        }
    })?;

    config
        .apply(&mut termios)
        .and_then(|()| tcsetattr(&fd, SetArg::TCSANOW, &termios))
        .map_err(|source| {
            log::error!(target: LOG_TAG, "tcsetattr() failed: {}", source);
            SerialError::ConfigurationWriteFailed {
                path: path.to_path_buf(),
                source,
            }
        })?;

    if let Err(e) = tcflush(&fd, FlushArg::TCIOFLUSH) {
        log::warn!(target: LOG_TAG, "tcflush() failed on fd {}: {}", fd.as_raw_fd(), e);
    }

    Ok(PortHandle {
        fd,
        path: path.to_path_buf(),
    })
}

/// Close a descriptor number previously handed out by [`open`].
///
/// Unchecked: closing a stale or foreign number is the caller's problem,
/// the OS error is only logged.
pub fn close_raw_fd(fd: RawFd) {
    log::info!(target: LOG_TAG, "close(fd = {})", fd);
    if let Err(e) = nix::unistd::close(fd) {
        log::warn!(target: LOG_TAG, "close(fd = {}) failed: {}", fd, e);
    }
}

pub fn port_exists(path: impl AsRef<Path>) -> bool {
    path.as_ref().exists()
}

/// Apply the modem line settings to `path` and release it straight away.
///
/// The settings stay on the device, so the caller can then use ordinary
/// file streams on the node.
pub fn configure(path: impl AsRef<Path>, baud: i32) -> Result<()> {
    let path = path.as_ref();
    let handle = open(path, baud)?;
    handle.close();
    log::info!(
        target: LOG_TAG,
        "Applied modem line settings to {} at {} baud",
        path.display(),
        baud
    );
    Ok(())
}
