//! SCPI commands understood by the GW Instek PSB series.

use core::fmt::Write;

use strum_macros::{EnumIter, IntoStaticStr};

/// Identity query. Replies with manufacturer, model, serial number and firmware version.
pub const IDENTITY_QUERY: &str = "*IDN?";
/// Close the output relay.
pub const OUTPUT_ON: &str = ":OUTP 1";
/// Open the output relay.
pub const OUTPUT_OFF: &str = ":OUTP 0";
/// Query the output relay state.
pub const OUTPUT_QUERY: &str = ":OUTP?";

/// Numeric settings which share the `HEADER value` / `HEADER?` set and query pattern.
#[derive(Debug, Copy, Clone, PartialEq, Eq, EnumIter, IntoStaticStr)]
pub enum Setting {
    /// Output voltage, in volts.
    #[strum(serialize = ":VOLT")]
    Voltage,
    /// Output current, in amps.
    #[strum(serialize = ":CURR")]
    Current,
    /// Over voltage protection level, in volts.
    #[strum(serialize = ":VOLT:PROT")]
    OverVoltageProtection,
    /// Over current protection level, in amps.
    #[strum(serialize = ":CURR:PROT")]
    OverCurrentProtection,
    /// Output power, in watts.
    #[strum(serialize = ":POW")]
    Power,
}

impl Setting {
    /// The SCPI header for this setting, e.g. `:VOLT:PROT`.
    pub fn header(self) -> &'static str {
        self.into()
    }

    /// Build the set command, e.g. `:VOLT 5.0`.
    pub fn set_command<const L: usize>(
        self,
        value: f64,
    ) -> Result<heapless::String<L>, core::fmt::Error> {
        let mut command = heapless::String::new();
        command.push_str(self.header()).map_err(|_| core::fmt::Error)?;
        command.push(' ').map_err(|_| core::fmt::Error)?;
        write_value(&mut command, value)?;
        Ok(command)
    }

    /// Build the query command, e.g. `:VOLT?`.
    pub fn query_command<const L: usize>(self) -> Result<heapless::String<L>, core::fmt::Error> {
        let mut command = heapless::String::new();
        command.push_str(self.header()).map_err(|_| core::fmt::Error)?;
        command.push('?').map_err(|_| core::fmt::Error)?;
        Ok(command)
    }
}

/// Write a value as plain decimal text.
///
/// `Debug` for floats gives the shortest text which parses back to the same value, and keeps the
/// `.0` on integral values, so `5.0` is sent as `5.0` rather than `5`.
pub fn write_value(out: &mut impl Write, value: f64) -> core::fmt::Result {
    write!(out, "{value:?}")
}
