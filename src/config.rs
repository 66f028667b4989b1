//! Connection and identity settings for a PSU.
//!
//! The defaults describe the GW Instek PSB-2800L this driver was written against. Other models or
//! firmware revisions in the same family can be used by overriding the fields which differ.

use fugit::MillisDurationU32;

/// Exact `*IDN?` reply of the PSB-2800L, terminator included.
pub const PSB2800L_IDENTITY: &str = "GW ,PSB-2800L , GEX132567,1.01/V2.05A\n";

/// Baud rate used by the PSB-2800L serial interface.
pub const DEFAULT_BAUD_RATE: u32 = 57600;

/// Settings used when talking to a PSU.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PsuConfig {
    /// The reply expected from `*IDN?`, compared byte for byte.
    pub identity: &'static str,
    /// Serial baud rate.
    pub baud_rate: u32,
    /// Read timeout for the serial port. Only used when the driver opens the port itself.
    pub timeout: MillisDurationU32,
    /// Appended to every command written.
    pub write_termination: &'static str,
    /// Marks the end of a reply.
    pub read_termination: u8,
}

impl Default for PsuConfig {
    fn default() -> Self {
        Self::new(PSB2800L_IDENTITY)
    }
}

impl PsuConfig {
    /// Create a config for a device with the given identity and otherwise default settings.
    pub const fn new(identity: &'static str) -> Self {
        Self {
            identity,
            baud_rate: DEFAULT_BAUD_RATE,
            timeout: MillisDurationU32::millis(2000),
            write_termination: "\n",
            read_termination: b'\n',
        }
    }

    pub const fn with_identity(mut self, identity: &'static str) -> Self {
        self.identity = identity;
        self
    }

    pub const fn with_baud_rate(mut self, baud_rate: u32) -> Self {
        self.baud_rate = baud_rate;
        self
    }

    pub const fn with_timeout(mut self, timeout: MillisDurationU32) -> Self {
        self.timeout = timeout;
        self
    }

    pub const fn with_write_termination(mut self, termination: &'static str) -> Self {
        self.write_termination = termination;
        self
    }

    pub const fn with_read_termination(mut self, termination: u8) -> Self {
        self.read_termination = termination;
        self
    }
}
