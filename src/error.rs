//! Our error types for the GW Instek PSUs.

use thiserror::Error;

pub type Result<T, I> = core::result::Result<T, Error<I>>;

/// Custom error type for GW Instek PSU communications.
#[derive(Error, Debug)]
pub enum Error<I: embedded_io::Error> {
    /// The serial port could not be opened.
    #[cfg(feature = "std")]
    #[error("Unable to open serial port: {0}")]
    Connection(serialport::Error),
    #[error("Serial communication error")]
    SerialError(I),
    #[error("Communication timeout")]
    Timeout,
    /// A command or reply did not fit in the fixed size buffer.
    #[error("Buffer capacity exceeded")]
    BufferError,
    #[error("Invalid response received")]
    InvalidResponse,
    #[error("Unable to parse numeric response: {0}")]
    ParseError(#[from] core::num::ParseFloatError),
}

impl<I: embedded_io::Error> Error<I> {
    /// Whether this error came from the link to the PSU rather than from the content of a reply.
    pub fn is_transport(&self) -> bool {
        match self {
            Error::SerialError(_) | Error::Timeout | Error::BufferError => true,
            #[cfg(feature = "std")]
            Error::Connection(_) => false,
            Error::InvalidResponse | Error::ParseError(_) => false,
        }
    }

    /// Sort a raw transport error, splitting out timeouts.
    pub(crate) fn from_io(err: I) -> Self {
        match embedded_io::Error::kind(&err) {
            embedded_io::ErrorKind::TimedOut => Error::Timeout,
            _ => Error::SerialError(err),
        }
    }
}
