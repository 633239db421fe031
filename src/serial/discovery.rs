use serde::{Deserialize, Serialize};
use serialport::SerialPortType;

use super::Result;
use crate::logging::LOG_TAG;

/// A serial device node the OS currently knows about
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerialDeviceInfo {
    pub port_name: String,
    pub vid: Option<u16>,
    pub pid: Option<u16>,
    pub serial_number: Option<String>,
    pub manufacturer: Option<String>,
    pub product: Option<String>,
}

impl From<serialport::SerialPortInfo> for SerialDeviceInfo {
    fn from(port: serialport::SerialPortInfo) -> Self {
        match port.port_type {
            SerialPortType::UsbPort(usb_info) => Self {
                port_name: port.port_name,
                vid: Some(usb_info.vid),
                pid: Some(usb_info.pid),
                serial_number: usb_info.serial_number,
                manufacturer: usb_info.manufacturer,
                product: usb_info.product,
            },
            _ => Self {
                port_name: port.port_name,
                vid: None,
                pid: None,
                serial_number: None,
                manufacturer: None,
                product: None,
            },
        }
    }
}

/// List serial ports present on the system, e.g. to locate a modem node
/// before calling [`open`](super::open).
pub fn discover_ports() -> Result<Vec<SerialDeviceInfo>> {
    let ports = serialport::available_ports()?;
    log::info!(target: LOG_TAG, "Found {} serial port(s)", ports.len());

    Ok(ports.into_iter().map(SerialDeviceInfo::from).collect())
}
