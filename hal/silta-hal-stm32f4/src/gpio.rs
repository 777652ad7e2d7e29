//! I2C1 bus pins on GPIOB
//!
//! | Pair   | SCL | SDA |
//! |--------|-----|-----|
//! | PairA  | PB6 | PB7 |
//! | PairB  | PB8 | PB9 |

use embassy_stm32::pac;
use embassy_stm32::pac::gpio::vals;
use silta_hal::{PinMapping, PinMode, PinMux};

/// Alternate function number of I2C1 on PB6-PB9
const AF_I2C1: u8 = 4;

/// Pin multiplexer for the two I2C1 pin pairs
#[derive(Debug)]
pub struct I2c1Pins {
    _private: (),
}

impl I2c1Pins {
    /// Take over PB6-PB9 and enable the GPIOB clock
    ///
    /// The pins must not be handed to any other driver.
    pub fn new() -> Self {
        pac::RCC.ahb1enr().modify(|w| w.set_gpioben(true));
        Self { _private: () }
    }

    /// Pin numbers (SCL, SDA) of a pair
    pub const fn pins(pair: PinMapping) -> [usize; 2] {
        match pair {
            PinMapping::PairA => [6, 7],
            PinMapping::PairB => [8, 9],
        }
    }
}

impl PinMux for I2c1Pins {
    fn configure(&mut self, pair: PinMapping, mode: PinMode) {
        let port = pac::GPIOB;

        for pin in Self::pins(pair) {
            port.pupdr().modify(|w| w.set_pupdr(pin, vals::Pupdr::FLOATING));
            port.otyper().modify(|w| w.set_ot(pin, vals::Ot::OPEN_DRAIN));

            match mode {
                PinMode::AlternateOpenDrain => {
                    port.ospeedr()
                        .modify(|w| w.set_ospeedr(pin, vals::Ospeedr::HIGH_SPEED));
                    port.afr(pin / 8).modify(|w| w.set_afr(pin % 8, AF_I2C1));
                    port.moder().modify(|w| w.set_moder(pin, vals::Moder::ALTERNATE));
                }
                PinMode::Input => {
                    port.moder().modify(|w| w.set_moder(pin, vals::Moder::INPUT));
                }
            }
        }
    }
}
