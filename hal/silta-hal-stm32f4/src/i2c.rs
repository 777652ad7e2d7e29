//! I2C1 register port
//!
//! Thin wrapper over the I2C v1 registers. All sequencing lives in the
//! engine; this module only moves bits.

use embassy_stm32::pac;
use embassy_stm32::pac::i2c::vals;
use silta_hal::{ClockConfig, DutyCycle, I2cPeripheral, I2cRegisters, Status};

use crate::timing::Timings;

/// Register access to I2C1
///
/// Holds no state besides the APB1 clock used to derive timings. The
/// bus-error interrupt handler builds its own instance to read the status
/// registers; everything else goes through the single engine-owned port.
#[derive(Debug, Clone, Copy)]
pub struct I2c1Port {
    pclk1_hz: u32,
}

impl I2c1Port {
    /// Create a port for I2C1 clocked from an APB1 bus at `pclk1_hz`
    pub const fn new(pclk1_hz: u32) -> Self {
        Self { pclk1_hz }
    }

    fn regs(&self) -> pac::i2c::I2c {
        pac::I2C1
    }
}

impl I2cRegisters for I2c1Port {
    fn read_sr1(&mut self) -> u16 {
        self.regs().sr1().read().0 as u16
    }

    fn read_sr2(&mut self) -> u16 {
        self.regs().sr2().read().0 as u16
    }

    fn write_data(&mut self, byte: u8) {
        self.regs().dr().write(|w| w.set_dr(byte));
    }

    fn read_data(&mut self) -> u8 {
        self.regs().dr().read().dr()
    }

    fn generate_start(&mut self) {
        self.regs().cr1().modify(|w| w.set_start(true));
    }

    fn generate_stop(&mut self) {
        self.regs().cr1().modify(|w| w.set_stop(true));
    }

    fn set_ack(&mut self, enabled: bool) {
        self.regs().cr1().modify(|w| w.set_ack(enabled));
    }

    fn clear_errors(&mut self, status: Status) {
        // Error flags are rc_w0; writing 1 leaves the other bits alone
        let bits = (status.0 & Status::ERRORS) as u16;
        self.regs()
            .sr1()
            .write_value(pac::i2c::regs::Sr1(0xFFFF & !u32::from(bits)));
    }

    fn set_error_interrupt(&mut self, enabled: bool) {
        self.regs().cr2().modify(|w| w.set_iterren(enabled));
    }
}

impl I2cPeripheral for I2c1Port {
    fn deinit(&mut self) {
        pac::RCC.apb1enr().modify(|w| w.set_i2c1en(true));
        pac::RCC.apb1rstr().modify(|w| w.set_i2c1rst(true));
        pac::RCC.apb1rstr().modify(|w| w.set_i2c1rst(false));
    }

    fn init(&mut self, config: &ClockConfig) {
        let timings = Timings::new(self.pclk1_hz, config);
        let regs = self.regs();

        regs.cr1().modify(|w| w.set_pe(false));
        regs.cr2().modify(|w| w.set_freq(timings.freq_mhz));
        regs.ccr().modify(|w| {
            w.set_f_s(if timings.fast {
                vals::FS::FAST
            } else {
                vals::FS::STANDARD
            });
            w.set_duty(match timings.duty {
                DutyCycle::Ratio2To1 => vals::Duty::DUTY2_1,
                DutyCycle::Ratio16To9 => vals::Duty::DUTY16_9,
            });
            w.set_ccr(timings.ccr);
        });
        regs.trise().write(|w| w.set_trise(timings.trise));
        regs.cr1().modify(|w| w.set_ack(false));
    }

    fn enable(&mut self) {
        self.regs().cr1().modify(|w| w.set_pe(true));
    }

    fn supports(&self, config: &ClockConfig) -> bool {
        Timings::fits(self.pclk1_hz, config)
    }
}
