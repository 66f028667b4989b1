//! Serial port backend, for hosts with `std`.
//!
//! Bridges a [serialport] port to the [embedded_io] traits the driver is written against.

use std::time::Duration;

use serialport::SerialPort;
use tracing::info;

use crate::{
    config::PsuConfig,
    error::{Error, Result},
    psu::GwPsu,
};

/// A system serial port usable as a PSU interface.
pub struct SerialTransport(Box<dyn SerialPort>);

impl SerialTransport {
    /// Open `port_name` with the baud rate and timeout from `config`.
    pub fn open(port_name: &str, config: &PsuConfig) -> Result<Self, IoError> {
        let port = serialport::new(port_name, config.baud_rate)
            .timeout(Duration::from_millis(config.timeout.to_millis().into()))
            .open()
            .map_err(Error::Connection)?;
        info!(port = port_name, baud_rate = config.baud_rate, "opened serial port");
        Ok(Self(port))
    }
}

impl From<Box<dyn SerialPort>> for SerialTransport {
    fn from(port: Box<dyn SerialPort>) -> Self {
        Self(port)
    }
}

#[derive(Debug)]
pub struct IoError(pub std::io::Error);

impl core::fmt::Display for IoError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for IoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

impl embedded_io::Error for IoError {
    fn kind(&self) -> embedded_io::ErrorKind {
        use embedded_io::ErrorKind as EK;
        use std::io::ErrorKind as SK;
        match self.0.kind() {
            SK::NotFound => EK::NotFound,
            SK::PermissionDenied => EK::PermissionDenied,
            SK::ConnectionRefused => EK::ConnectionRefused,
            SK::ConnectionReset => EK::ConnectionReset,
            SK::ConnectionAborted => EK::ConnectionAborted,
            SK::NotConnected => EK::NotConnected,
            SK::AddrInUse => EK::AddrInUse,
            SK::AddrNotAvailable => EK::AddrNotAvailable,
            SK::BrokenPipe => EK::BrokenPipe,
            SK::AlreadyExists => EK::AlreadyExists,
            SK::InvalidInput => EK::InvalidInput,
            SK::InvalidData => EK::InvalidData,
            SK::TimedOut => EK::TimedOut,
            SK::Interrupted => EK::Interrupted,
            SK::Unsupported => EK::Unsupported,
            SK::OutOfMemory => EK::OutOfMemory,
            _ => EK::Other,
        }
    }
}

impl embedded_io::ErrorType for SerialTransport {
    type Error = IoError;
}

impl embedded_io::Read for SerialTransport {
    fn read(&mut self, buf: &mut [u8]) -> core::result::Result<usize, Self::Error> {
        std::io::Read::read(&mut self.0, buf).map_err(IoError)
    }
}

impl embedded_io::Write for SerialTransport {
    fn write(&mut self, buf: &[u8]) -> core::result::Result<usize, Self::Error> {
        std::io::Write::write(&mut self.0, buf).map_err(IoError)
    }

    fn flush(&mut self) -> core::result::Result<(), Self::Error> {
        std::io::Write::flush(&mut self.0).map_err(IoError)
    }
}

impl<const L: usize> GwPsu<SerialTransport, L> {
    /// Open a PSB-2800L on the named serial port, e.g. `/dev/ttyUSB0` or `COM3`.
    ///
    /// The port is opened straight away at 57600 baud.
    pub fn open(port_name: &str) -> Result<Self, IoError> {
        Self::open_with(port_name, PsuConfig::default())
    }

    /// Open a PSU on the named serial port using `config`.
    pub fn open_with(port_name: &str, config: PsuConfig) -> Result<Self, IoError> {
        let transport = SerialTransport::open(port_name, &config)?;
        Ok(Self::new(transport, config))
    }
}
