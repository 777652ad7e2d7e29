//! Events that drive the transfer state machine

use super::machine::Outcome;

/// Bus phase completions observed by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// START (or repeated START) generated
    StartGenerated,
    /// Address byte acknowledged by the target
    AddressAcked,
    /// Data byte written and acknowledged
    ByteWritten,
    /// Data byte received
    ByteRead,
    /// STOP issued; carries the classification of the transaction
    StopIssued(Outcome),
    /// Bus released after STOP
    Released,
}
