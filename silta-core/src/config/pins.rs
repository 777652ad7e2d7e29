//! Pin/speed configuration manager
//!
//! Owns the pin multiplexer and the current [`ClockConfig`]. Every change
//! ends with a full peripheral reinit; callers must only reconfigure while
//! no transaction is in flight.

use silta_hal::{ClockConfig, I2cPeripheral, I2cRegisters, PinMapping, PinMode, PinMux};

use crate::i2c::ConfigError;

/// Selects the bus pin pair and clock speed
pub struct BusConfigurator<M> {
    mux: M,
    pins: PinMapping,
    clock: ClockConfig,
}

impl<M: PinMux> BusConfigurator<M> {
    /// Create a configurator with boot defaults (PairA, 100 kHz)
    ///
    /// Nothing is written to the hardware until [`select_pins`] or
    /// [`set_speed`] is called.
    ///
    /// [`select_pins`]: Self::select_pins
    /// [`set_speed`]: Self::set_speed
    pub fn new(mux: M) -> Self {
        Self {
            mux,
            pins: PinMapping::default(),
            clock: ClockConfig::default(),
        }
    }

    /// Route `pair` to the peripheral and release the other pair
    pub fn select_pins<P>(&mut self, pair: PinMapping, periph: &mut P)
    where
        P: I2cPeripheral + I2cRegisters,
    {
        self.mux.configure(pair, PinMode::AlternateOpenDrain);
        self.mux.configure(pair.other(), PinMode::Input);
        self.pins = pair;
        self.reinit(periph);
    }

    /// Change the bus clock
    ///
    /// A speed outside the bus range, or one the peripheral cannot derive
    /// from its input clock, leaves both the stored configuration and the
    /// peripheral untouched.
    pub fn set_speed<P>(&mut self, hz: u32, periph: &mut P) -> Result<(), ConfigError>
    where
        P: I2cPeripheral + I2cRegisters,
    {
        let clock = ClockConfig {
            frequency: hz,
            ..self.clock
        };
        if !periph.supports(&clock) {
            return Err(ConfigError::SpeedOutOfRange(hz));
        }

        self.clock = clock;
        self.reinit(periph);
        Ok(())
    }

    /// Pin pair currently routed to the peripheral
    pub fn pins(&self) -> PinMapping {
        self.pins
    }

    /// Clock configuration currently in effect
    pub fn clock(&self) -> ClockConfig {
        self.clock
    }

    /// The pin multiplexer
    pub fn mux(&self) -> &M {
        &self.mux
    }

    fn reinit<P>(&self, periph: &mut P)
    where
        P: I2cPeripheral + I2cRegisters,
    {
        periph.deinit();
        periph.init(&self.clock);
        periph.set_error_interrupt(true);
        periph.enable();
    }
}
