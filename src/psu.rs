use crate::{
    command::{IDENTITY_QUERY, OUTPUT_OFF, OUTPUT_ON, OUTPUT_QUERY, Setting},
    config::PsuConfig,
    error::{Error, Result},
    types::{IdentityStatus, State},
};
use tracing::{debug, warn};

/// You can create a GwPsu using any interface which implements [embedded_io::Read] & [embedded_io::Write].
///
/// Setters are written without any read back, and every getter queries the device again. Nothing is
/// cached. `L` is the capacity of the command and reply buffers.
///
/// All methods take `&mut self`, so only one request is ever in flight. Share a PSU between
/// threads by wrapping it in a lock.
pub struct GwPsu<S: embedded_io::Read + embedded_io::Write, const L: usize = 128> {
    interface: S,
    config: PsuConfig,
}

impl<S: embedded_io::Read + embedded_io::Write, const L: usize> GwPsu<S, L> {
    /// Create a new GwPsu instance with the given interface and config.
    pub fn new(interface: S, config: PsuConfig) -> Self {
        Self { interface, config }
    }

    /// Create a new GwPsu instance for a PSB-2800L with default settings.
    pub fn psb2800l(interface: S) -> Self {
        Self::new(interface, PsuConfig::default())
    }

    pub fn config(&self) -> &PsuConfig {
        &self.config
    }

    /// Flush any pending output and release the interface.
    ///
    /// The interface is dropped even when the flush fails. Dropping a GwPsu without calling this
    /// also releases the interface, just without the flush.
    pub fn close(mut self) -> Result<(), S::Error> {
        debug!("closing PSU connection");
        self.interface.flush().map_err(Error::from_io)
    }

    /// Hand back the interface without closing it.
    pub fn into_inner(self) -> S {
        self.interface
    }

    /// Query `*IDN?` and compare the reply with the configured identity.
    ///
    /// Errors on the link to the device are reported as [IdentityStatus::Unreachable]. Anything
    /// else is returned as an error.
    pub fn check_identity(&mut self) -> Result<IdentityStatus<S::Error, L>, S::Error> {
        let reply = self
            .write_command(IDENTITY_QUERY)
            .and_then(|()| self.read_line_truncated());
        match reply {
            Ok((reply, false)) if reply.as_slice() == self.config.identity.as_bytes() => {
                Ok(IdentityStatus::Matched)
            }
            // An overlong reply is still an answer, just not the one expected.
            Ok((reply, _)) => {
                warn!(
                    expected = self.config.identity,
                    reply = core::str::from_utf8(&reply).unwrap_or("<non utf-8>"),
                    "PSU identity mismatch"
                );
                Ok(IdentityStatus::Mismatch(reply))
            }
            Err(err) if err.is_transport() => {
                warn!("PSU did not answer identity query");
                Ok(IdentityStatus::Unreachable(err))
            }
            Err(err) => Err(err),
        }
    }

    /// Returns true only if the device answered `*IDN?` with exactly the configured identity.
    ///
    /// Never fails. See [Self::check_identity] for why a check returned false.
    pub fn identity_check(&mut self) -> bool {
        matches!(self.check_identity(), Ok(IdentityStatus::Matched))
    }

    /// Turn the output on.
    pub fn on(&mut self) -> Result<(), S::Error> {
        self.write_command(OUTPUT_ON)
    }

    /// Turn the output off.
    pub fn off(&mut self) -> Result<(), S::Error> {
        self.write_command(OUTPUT_OFF)
    }

    /// Enable/disable the output.
    pub fn set_output_state(&mut self, state: impl Into<State>) -> Result<(), S::Error> {
        match state.into() {
            State::On => self.on(),
            State::Off => self.off(),
        }
    }

    /// Read whether the output is enabled or disabled.
    pub fn get_output_state(&mut self) -> Result<State, S::Error> {
        let reply = self.query_raw(OUTPUT_QUERY)?;
        State::from_reply(&reply).ok_or(Error::InvalidResponse)
    }

    /// Returns true if the output is on.
    pub fn output_status(&mut self) -> Result<bool, S::Error> {
        Ok(self.get_output_state()?.into())
    }

    /// Set the output voltage, in volts.
    pub fn set_voltage(&mut self, volts: f64) -> Result<(), S::Error> {
        self.set(Setting::Voltage, volts)
    }

    /// Read the output voltage, in volts.
    pub fn read_voltage(&mut self) -> Result<f64, S::Error> {
        self.read(Setting::Voltage)
    }

    /// Set the output current, in amps.
    pub fn set_current(&mut self, amps: f64) -> Result<(), S::Error> {
        self.set(Setting::Current, amps)
    }

    /// Read the output current, in amps.
    pub fn read_current(&mut self) -> Result<f64, S::Error> {
        self.read(Setting::Current)
    }

    /// Set the over voltage protection level, in volts.
    pub fn set_ovp(&mut self, volts: f64) -> Result<(), S::Error> {
        self.set(Setting::OverVoltageProtection, volts)
    }

    /// Read the over voltage protection level, in volts.
    pub fn read_ovp(&mut self) -> Result<f64, S::Error> {
        self.read(Setting::OverVoltageProtection)
    }

    /// Set the over current protection level, in amps.
    pub fn set_ocp(&mut self, amps: f64) -> Result<(), S::Error> {
        self.set(Setting::OverCurrentProtection, amps)
    }

    /// Read the over current protection level, in amps.
    pub fn read_ocp(&mut self) -> Result<f64, S::Error> {
        self.read(Setting::OverCurrentProtection)
    }

    /// Set the output power, in watts.
    pub fn set_power(&mut self, watts: f64) -> Result<(), S::Error> {
        self.set(Setting::Power, watts)
    }

    /// Read the output power, in watts.
    pub fn read_power(&mut self) -> Result<f64, S::Error> {
        self.read(Setting::Power)
    }

    /// Write a numeric setting. The value is sent as given, with no range checks.
    pub fn set(&mut self, setting: Setting, value: f64) -> Result<(), S::Error> {
        let command = setting
            .set_command::<L>(value)
            .map_err(|_| Error::BufferError)?;
        self.write_command(&command)
    }

    /// Query a numeric setting.
    pub fn read(&mut self, setting: Setting) -> Result<f64, S::Error> {
        let command = setting
            .query_command::<L>()
            .map_err(|_| Error::BufferError)?;
        let reply = self.query_raw(&command)?;
        let text = core::str::from_utf8(&reply).map_err(|_| Error::InvalidResponse)?;
        Ok(text.trim().parse::<f64>()?)
    }

    /// Write a single command. The configured write termination is appended.
    pub fn write_command(&mut self, command: &str) -> Result<(), S::Error> {
        debug!(command, "PSU write");
        self.interface
            .write_all(command.as_bytes())
            .map_err(Error::from_io)?;
        self.interface
            .write_all(self.config.write_termination.as_bytes())
            .map_err(Error::from_io)?;
        self.interface.flush().map_err(Error::from_io)
    }

    /// Write a command and read back one reply line, terminator included.
    pub fn query_raw(&mut self, command: &str) -> Result<heapless::Vec<u8, L>, S::Error> {
        self.write_command(command)?;
        let reply = self.read_line()?;
        debug!(
            command,
            reply = core::str::from_utf8(&reply).unwrap_or("<non utf-8>"),
            "PSU reply"
        );
        Ok(reply)
    }

    /// Read up to and including the read termination.
    ///
    /// A line longer than `L` is still consumed up to its terminator before [Error::BufferError]
    /// is returned, so the next reply starts on a line boundary.
    fn read_line(&mut self) -> Result<heapless::Vec<u8, L>, S::Error> {
        match self.read_line_truncated()? {
            (reply, false) => Ok(reply),
            (_, true) => Err(Error::BufferError),
        }
    }

    /// Read one line, keeping the first `L` bytes. Also returns whether any bytes were dropped.
    ///
    /// Bytes are taken one at a time so nothing past the terminator is consumed.
    fn read_line_truncated(&mut self) -> Result<(heapless::Vec<u8, L>, bool), S::Error> {
        let mut reply: heapless::Vec<u8, L> = heapless::Vec::new();
        let mut overflowed = false;
        let mut byte = [0u8; 1];
        loop {
            match self.interface.read(&mut byte) {
                // End of stream, return whatever arrived.
                Ok(0) => break,
                Ok(_) => {
                    if reply.push(byte[0]).is_err() {
                        overflowed = true;
                    }
                    if byte[0] == self.config.read_termination {
                        break;
                    }
                }
                Err(e) => return Err(Error::from_io(e)),
            }
        }
        if overflowed {
            warn!(capacity = L, "PSU reply exceeded buffer, remainder discarded");
        }
        Ok((reply, overflowed))
    }
}
