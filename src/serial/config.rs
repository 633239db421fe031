//! Line-discipline settings applied to every modem port
use nix::libc::tcflag_t;
use nix::sys::termios::{
    cfgetispeed, cfgetospeed, cfmakeraw, cfsetispeed, cfsetospeed, BaudRate, ControlFlags,
    InputFlags, LocalFlags, OutputFlags, Termios,
};
use serde::{Deserialize, Serialize};

use super::baud::{baud_rate_value, resolve_baud_rate};
use super::{Result, SerialError};

/// Hardware flow control, 8-bit characters, receiver on, modem lines honoured
pub const MODEM_CONTROL_FLAGS: ControlFlags = ControlFlags::CLOCAL
    .union(ControlFlags::CRTSCTS)
    .union(ControlFlags::CREAD)
    .union(ControlFlags::CS8)
    .union(ControlFlags::HUPCL);

pub const MODEM_INPUT_FLAGS: InputFlags = InputFlags::ICRNL.union(InputFlags::IXON);

pub const MODEM_OUTPUT_FLAGS: OutputFlags = OutputFlags::ONLCR
    .union(OutputFlags::NL0)
    .union(OutputFlags::CR0)
    .union(OutputFlags::TAB0)
    .union(OutputFlags::BS0)
    .union(OutputFlags::VT0)
    .union(OutputFlags::FF0);

/// No echo, no canonical processing, no signals
pub const MODEM_LOCAL_FLAGS: LocalFlags = LocalFlags::empty();

// Linux keeps the line speed inside c_cflag, so the control override must
// carry those bits across or the speed set just before it is lost.
#[cfg(any(target_os = "linux", target_os = "android"))]
const SPEED_BITS: ControlFlags = ControlFlags::CBAUD;
#[cfg(not(any(target_os = "linux", target_os = "android")))]
const SPEED_BITS: ControlFlags = ControlFlags::empty();

/// Resolved configuration for one `open` call. Only the speed varies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortConfig {
    pub speed: BaudRate,
}

impl PortConfig {
    pub fn for_baud(baud: i32) -> Result<Self> {
        resolve_baud_rate(baud)
            .map(|speed| Self { speed })
            .ok_or(SerialError::InvalidBaudRate(baud))
    }

    /// Derive raw mode from `termios`, set both speeds, then override the
    /// four flag words with the fixed modem settings.
    ///
    /// The override deliberately runs after `cfmakeraw` and re-enables
    /// some input/output processing that raw mode had cleared.
    pub fn apply(&self, termios: &mut Termios) -> nix::Result<()> {
        cfmakeraw(termios);
        cfsetispeed(termios, self.speed)?;
        cfsetospeed(termios, self.speed)?;

        let speed_bits = termios.control_flags & SPEED_BITS;
        termios.control_flags = MODEM_CONTROL_FLAGS | speed_bits;
        termios.input_flags = MODEM_INPUT_FLAGS;
        termios.output_flags = MODEM_OUTPUT_FLAGS;
        termios.local_flags = MODEM_LOCAL_FLAGS;
        Ok(())
    }
}

/// Snapshot of the line discipline a descriptor currently reports
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineSettings {
    pub input_baud: Option<u32>,
    pub output_baud: Option<u32>,
    pub canonical: bool,
    pub echo: bool,
    pub signals: bool,
    pub hardware_flow_control: bool,
    pub control_flags: tcflag_t,
    pub input_flags: tcflag_t,
    pub output_flags: tcflag_t,
    pub local_flags: tcflag_t,
}

impl LineSettings {
    pub fn from_termios(termios: &Termios) -> Self {
        Self {
            input_baud: baud_rate_value(cfgetispeed(termios)),
            output_baud: baud_rate_value(cfgetospeed(termios)),
            canonical: termios.local_flags.contains(LocalFlags::ICANON),
            echo: termios.local_flags.contains(LocalFlags::ECHO),
            signals: termios.local_flags.contains(LocalFlags::ISIG),
            hardware_flow_control: termios.control_flags.contains(ControlFlags::CRTSCTS),
            control_flags: termios.control_flags.bits(),
            input_flags: termios.input_flags.bits(),
            output_flags: termios.output_flags.bits(),
            local_flags: termios.local_flags.bits(),
        }
    }
}
