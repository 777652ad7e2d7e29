//! Engine plus bus configuration
//!
//! The console owns a single [`I2cBridge`]. Because every method takes
//! `&mut self`, reconfiguration can never overlap a transaction issued
//! through the same bridge.

use silta_hal::{ClockConfig, I2cPeripheral, I2cRegisters, MillisClock, PinMapping, PinMux};

use super::engine::I2cMaster;
use super::error::{ConfigError, I2cError};
use super::request::ReadBuffer;
use crate::bus::BusShared;
use crate::config::BusConfigurator;
use crate::state::State;

/// I2C master with pin pair and clock control
pub struct I2cBridge<'s, P, C, M> {
    master: I2cMaster<'s, P, C>,
    config: BusConfigurator<M>,
}

impl<'s, P, C, M> I2cBridge<'s, P, C, M>
where
    P: I2cRegisters + I2cPeripheral,
    C: MillisClock,
    M: PinMux,
{
    /// Assemble a bridge; call [`init`](Self::init) before the first transaction
    pub fn new(port: P, clock: C, mux: M, shared: &'s BusShared) -> Self {
        Self {
            master: I2cMaster::new(port, clock, shared),
            config: BusConfigurator::new(mux),
        }
    }

    /// Apply the boot configuration: PairA at 100 kHz
    pub fn init(&mut self) -> Result<(), ConfigError> {
        self.select_pins(PinMapping::default());
        self.set_speed(ClockConfig::default().frequency)
    }

    /// Run one write-then-read transaction
    pub fn execute(
        &mut self,
        address: u8,
        write: &[u8],
        read_len: u8,
    ) -> Result<ReadBuffer, I2cError> {
        self.master.execute(address, write, read_len)
    }

    /// Route the bus to `pair`
    pub fn select_pins(&mut self, pair: PinMapping) {
        self.config.select_pins(pair, self.master.port_mut());
    }

    /// Change the bus clock
    pub fn set_speed(&mut self, hz: u32) -> Result<(), ConfigError> {
        self.config.set_speed(hz, self.master.port_mut())
    }

    pub fn pins(&self) -> PinMapping {
        self.config.pins()
    }

    pub fn clock_config(&self) -> ClockConfig {
        self.config.clock()
    }

    /// State reached by the last transaction
    pub fn state(&self) -> State {
        self.master.state()
    }

    pub fn master(&self) -> &I2cMaster<'s, P, C> {
        &self.master
    }

    pub fn master_mut(&mut self) -> &mut I2cMaster<'s, P, C> {
        &mut self.master
    }
}
