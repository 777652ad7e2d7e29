//! I2C and bus configuration errors

use embedded_hal::i2c::{ErrorKind, NoAcknowledgeSource};

use crate::state::Outcome;

/// Classified failure of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum I2cError {
    /// Bus stayed busy or a phase did not complete before the deadline
    Timeout,
    /// No device acknowledged the address
    AddressNack,
    /// Device rejected a data byte
    DataNack,
    /// Bus error, arbitration loss or overrun reported by the peripheral
    BusFault,
    /// Another transaction is already in flight
    Busy,
    /// Address, write length or read length out of range
    InvalidRequest,
}

impl I2cError {
    /// Numeric code reported on the console (`ERR <code>`)
    pub fn code(self) -> i8 {
        match self {
            I2cError::AddressNack => -1,
            I2cError::DataNack => -2,
            I2cError::Timeout => -3,
            I2cError::BusFault => -4,
            I2cError::Busy => -5,
            I2cError::InvalidRequest => -6,
        }
    }

    /// Transfer outcome for errors that happen on the wire
    ///
    /// `Busy` and `InvalidRequest` are returned before the bus is touched
    /// and never reach the state machine.
    pub(crate) fn outcome(self) -> Outcome {
        match self {
            I2cError::AddressNack => Outcome::AddressNack,
            I2cError::DataNack => Outcome::DataNack,
            I2cError::Timeout => Outcome::Timeout,
            I2cError::BusFault | I2cError::Busy | I2cError::InvalidRequest => Outcome::BusFault,
        }
    }
}

impl embedded_hal::i2c::Error for I2cError {
    fn kind(&self) -> ErrorKind {
        match self {
            I2cError::AddressNack => ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address),
            I2cError::DataNack => ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data),
            I2cError::BusFault => ErrorKind::Bus,
            I2cError::Timeout | I2cError::Busy | I2cError::InvalidRequest => ErrorKind::Other,
        }
    }
}

/// Rejected bus configuration change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Requested clock is zero or above the 400 kHz hardware ceiling
    SpeedOutOfRange(u32),
}
