//! This crate provides an interface for communicating with and controlling GW Instek PSB series
//! programmable DC power supplies over SCPI.
//!
//! It was written against the PSB-2800L, but should work with other GW Instek supplies which accept
//! the same commands. Set the expected identity string in [config::PsuConfig] for other models.
//!
//! It supports `no_std` environments when the default `std` feature is disabled. In that case
//! bring your own interface implementing [embedded_io::Read] & [embedded_io::Write].
//!
//! The serial port used for PSU comms should be configured like so:
//! * Baud rate: 57600
//! * Data bits: 8
//! * Stop bits: 1
//! * Parity: None
//!
//! ```no_run
//! use gw_instek_psu::{psu::GwPsu, serial::SerialTransport};
//!
//! let mut psu: GwPsu<SerialTransport> = GwPsu::open("/dev/ttyUSB0")?;
//! if psu.identity_check() {
//!     psu.set_voltage(5.0)?;
//!     psu.set_current(0.5)?;
//!     psu.on()?;
//!     println!("{} V", psu.read_voltage()?);
//! }
//! psu.close()?;
//! # Ok::<(), gw_instek_psu::error::Error<gw_instek_psu::serial::IoError>>(())
//! ```

#![cfg_attr(not(any(test, feature = "std")), no_std)]

pub mod command;
pub mod config;
pub mod error;
pub mod psu;
#[cfg(feature = "std")]
pub mod serial;
pub mod types;
