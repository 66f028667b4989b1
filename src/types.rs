//! This module contains the value types returned by the PSU.

use crate::error::Error;

/// Used to be less ambiguous about whether something is on or off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Disabled.
    Off,
    /// Enabled.
    On,
}

impl State {
    /// Interpret an `:OUTP?` reply.
    ///
    /// The PSU answers `1` or `0`. `ON` and `OFF` (any case) are accepted too, as used by other
    /// SCPI supplies. Surrounding whitespace, including the terminator, is ignored.
    pub fn from_reply(reply: &[u8]) -> Option<Self> {
        let token = reply.trim_ascii();
        if token == b"1" || token.eq_ignore_ascii_case(b"ON") {
            Some(State::On)
        } else if token == b"0" || token.eq_ignore_ascii_case(b"OFF") {
            Some(State::Off)
        } else {
            None
        }
    }
}

impl From<State> for bool {
    fn from(value: State) -> Self {
        match value {
            State::Off => false,
            State::On => true,
        }
    }
}

impl From<bool> for State {
    fn from(value: bool) -> Self {
        match value {
            true => State::On,
            false => State::Off,
        }
    }
}

impl core::ops::Not for State {
    type Output = State;

    fn not(self) -> Self::Output {
        match self {
            State::Off => State::On,
            State::On => State::Off,
        }
    }
}

/// Outcome of comparing the `*IDN?` reply with the configured identity.
#[derive(Debug)]
pub enum IdentityStatus<I: embedded_io::Error, const L: usize> {
    /// The reply matched exactly.
    Matched,
    /// A device answered, but with a different identity. Holds the raw reply.
    Mismatch(heapless::Vec<u8, L>),
    /// The device could not be reached.
    Unreachable(Error<I>),
}

impl<I: embedded_io::Error, const L: usize> IdentityStatus<I, L> {
    pub fn is_match(&self) -> bool {
        matches!(self, IdentityStatus::Matched)
    }
}
