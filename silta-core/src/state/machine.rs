//! Transfer state definition
//!
//! `Idle → StartSent → AddrSent → {WritingBytes | ReadingBytes} → StopSent →
//! Terminal`. A write phase followed by a read phase passes through
//! `StartSent` a second time (repeated START). `StopIssued` is accepted from
//! every non-terminal state because STOP goes out on every exit path.

use super::events::Event;

/// Final classification of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    /// All requested phases completed
    Success,
    /// No device acknowledged the address
    AddressNack,
    /// Device rejected a data byte
    DataNack,
    /// Shared deadline expired
    Timeout,
    /// Bus error, arbitration loss or overrun latched
    BusFault,
}

/// Transfer states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// No transaction on the wire
    #[default]
    Idle,
    /// START generated, address not yet sent
    StartSent,
    /// Address acknowledged, no data moved yet
    AddrSent,
    /// Transmitting data bytes
    WritingBytes,
    /// Receiving data bytes
    ReadingBytes,
    /// STOP issued, bus being released
    StopSent(Outcome),
    /// Transaction finished
    Terminal(Outcome),
}

impl State {
    /// Check if this state has a transaction on the wire
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            State::StartSent | State::AddrSent | State::WritingBytes | State::ReadingBytes
        )
    }

    /// Check if this is a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, State::Terminal(_))
    }

    /// Outcome of a finished transaction
    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            State::StopSent(outcome) | State::Terminal(outcome) => Some(*outcome),
            _ => None,
        }
    }

    /// Process an event and return the next state
    ///
    /// Events that make no sense in the current state leave it unchanged.
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use State::*;

        match (self, event) {
            // A new START begins a transaction or turns the bus around
            (Idle, StartGenerated) => StartSent,
            (AddrSent, StartGenerated) => StartSent,
            (WritingBytes, StartGenerated) => StartSent,

            (StartSent, AddressAcked) => AddrSent,

            (AddrSent, ByteWritten) => WritingBytes,
            (WritingBytes, ByteWritten) => WritingBytes,

            (AddrSent, ByteRead) => ReadingBytes,
            (ReadingBytes, ByteRead) => ReadingBytes,

            // STOP from anywhere that has not already stopped
            (Idle | StartSent | AddrSent | WritingBytes | ReadingBytes, StopIssued(outcome)) => {
                StopSent(outcome)
            }

            (StopSent(outcome), Released) => Terminal(outcome),

            // Default: stay in current state
            _ => self,
        }
    }
}
