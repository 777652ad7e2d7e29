//! I2C register-level abstractions
//!
//! The transaction engine drives the peripheral one flag at a time, so the
//! port trait mirrors the status/control/data register model of the
//! STM32F4 I2C block rather than offering whole-transfer operations.

/// Maximum SCL frequency supported by the peripheral (fast mode)
pub const MAX_CLOCK_HZ: u32 = 400_000;

/// Combined snapshot of the two status registers
///
/// Encoded as `SR1 | SR2 << 16`, which is also the format stored in the
/// bus-error latch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Status(pub u32);

impl Status {
    /// Start condition generated (SR1.SB)
    pub const START: u32 = 1 << 0;
    /// Address sent and acknowledged (SR1.ADDR)
    pub const ADDR: u32 = 1 << 1;
    /// Byte transfer finished (SR1.BTF)
    pub const BTF: u32 = 1 << 2;
    /// Receive data register not empty (SR1.RXNE)
    pub const RXNE: u32 = 1 << 6;
    /// Transmit data register empty (SR1.TXE)
    pub const TXE: u32 = 1 << 7;
    /// Misplaced start/stop detected (SR1.BERR)
    pub const BUS_ERROR: u32 = 1 << 8;
    /// Arbitration lost (SR1.ARLO)
    pub const ARBITRATION_LOST: u32 = 1 << 9;
    /// Acknowledge failure (SR1.AF)
    pub const ACK_FAILURE: u32 = 1 << 10;
    /// Overrun/underrun (SR1.OVR)
    pub const OVERRUN: u32 = 1 << 11;
    /// Master mode (SR2.MSL)
    pub const MASTER: u32 = 1 << 16;
    /// Bus busy (SR2.BUSY)
    pub const BUSY: u32 = 1 << 17;

    /// Error bits that can raise the error interrupt
    pub const ERRORS: u32 =
        Self::BUS_ERROR | Self::ARBITRATION_LOST | Self::ACK_FAILURE | Self::OVERRUN;

    /// Build a snapshot from raw register values
    pub const fn from_registers(sr1: u16, sr2: u16) -> Self {
        Self(sr1 as u32 | (sr2 as u32) << 16)
    }

    /// Check whether any of `bits` is set
    pub const fn any(self, bits: u32) -> bool {
        self.0 & bits != 0
    }

    /// Check for an acknowledge failure
    pub const fn is_nack(self) -> bool {
        self.any(Self::ACK_FAILURE)
    }

    /// Check for any error flag
    pub const fn has_error(self) -> bool {
        self.any(Self::ERRORS)
    }

    /// Check whether the status is all zeros
    pub const fn is_clear(self) -> bool {
        self.0 == 0
    }
}

/// Register port of an I2C master peripheral
///
/// Reads of `SR1` followed by `SR2` have side effects on real hardware
/// (they clear the ADDR flag), so implementations must perform exactly one
/// register access per call.
pub trait I2cRegisters {
    /// Read status register 1
    fn read_sr1(&mut self) -> u16;

    /// Read status register 2
    fn read_sr2(&mut self) -> u16;

    /// Write a byte to the data register
    fn write_data(&mut self, byte: u8);

    /// Read a byte from the data register
    fn read_data(&mut self) -> u8;

    /// Request a (repeated) START condition
    fn generate_start(&mut self);

    /// Request a STOP condition
    fn generate_stop(&mut self);

    /// Enable or disable automatic ACK of received bytes
    fn set_ack(&mut self, enabled: bool);

    /// Clear the SR1 error flags that are set in `status`
    ///
    /// Error flags are write-zero-to-clear; other bits are left untouched.
    fn clear_errors(&mut self, status: Status);

    /// Enable or disable the bus-error interrupt source
    fn set_error_interrupt(&mut self, enabled: bool);
}

/// Duty cycle of SCL in fast mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DutyCycle {
    /// Tlow/Thigh = 2
    Ratio2To1,
    /// Tlow/Thigh = 16/9
    #[default]
    Ratio16To9,
}

/// Bus clock configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockConfig {
    /// SCL frequency in Hz
    pub frequency: u32,
    /// Duty cycle used when `frequency` is above standard mode
    pub duty: DutyCycle,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl ClockConfig {
    /// Standard mode (100 kHz)
    pub const STANDARD: Self = Self {
        frequency: 100_000,
        duty: DutyCycle::Ratio16To9,
    };

    /// Fast mode (400 kHz)
    pub const FAST: Self = Self {
        frequency: MAX_CLOCK_HZ,
        duty: DutyCycle::Ratio16To9,
    };

    /// Check whether the frequency lies in the range the bus allows
    ///
    /// A peripheral may narrow this further, see
    /// [`I2cPeripheral::supports`].
    pub fn is_supported(&self) -> bool {
        self.frequency > 0 && self.frequency <= MAX_CLOCK_HZ
    }
}

/// Lifecycle control of the I2C peripheral
///
/// Pin multiplexing and peripheral configuration are coupled on the target
/// hardware, so any change to either goes through a full
/// `deinit` → `init` → `enable` cycle.
pub trait I2cPeripheral {
    /// Reset the peripheral to its power-on state
    fn deinit(&mut self);

    /// Program clock and timing registers; leaves the peripheral disabled
    fn init(&mut self, config: &ClockConfig);

    /// Enable the peripheral
    fn enable(&mut self);

    /// Check whether `config` can be generated from the peripheral's input
    /// clock without saturating its dividers
    fn supports(&self, config: &ClockConfig) -> bool {
        config.is_supported()
    }
}
