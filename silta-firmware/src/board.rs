//! STM32F4-Discovery board setup
//!
//! Clock tree, USB identity and the millisecond clock handed to the engine.

use core::fmt::Write;

use embassy_stm32::Config;
use embassy_time::Instant;
use heapless::String;
use silta_hal::MillisClock;

/// APB1 clock feeding I2C1 (168 MHz / 4)
pub const PCLK1_HZ: u32 = 42_000_000;

/// USB vendor ID (test range)
pub const USB_VID: u16 = 0xC0DE;
/// USB product ID (test range)
pub const USB_PID: u16 = 0xCAFE;
pub const USB_MANUFACTURER: &str = "Silta";
pub const USB_PRODUCT: &str = "Silta I2C bridge";

/// Heartbeat LED timing
pub const LED_ON_MS: u64 = 10;
pub const LED_OFF_MS: u64 = 990;

/// Hex rendering of the 96-bit device UID
pub type SerialNumber = String<24>;

/// 8 MHz HSE, 168 MHz system clock, 48 MHz for USB
pub fn clock_config() -> Config {
    use embassy_stm32::rcc::*;
    use embassy_stm32::time::Hertz;

    let mut config = Config::default();
    config.rcc.hse = Some(Hse {
        freq: Hertz(8_000_000),
        mode: HseMode::Oscillator,
    });
    config.rcc.pll_src = PllSource::HSE;
    config.rcc.pll = Some(Pll {
        prediv: PllPreDiv::DIV4,
        mul: PllMul::MUL168,
        divp: Some(PllPDiv::DIV2),
        divq: Some(PllQDiv::DIV7),
        divr: None,
    });
    config.rcc.ahb_pre = AHBPrescaler::DIV1;
    config.rcc.apb1_pre = APBPrescaler::DIV4;
    config.rcc.apb2_pre = APBPrescaler::DIV2;
    config.rcc.sys = Sysclk::PLL1_P;
    config.rcc.mux.clk48sel = mux::Clk48sel::PLL1_Q;
    config
}

/// USB serial number, so each board shows up distinctly on the host
pub fn serial_number() -> SerialNumber {
    let mut serial = SerialNumber::new();
    for byte in embassy_stm32::uid::uid() {
        // 12 bytes always fit in 24 characters
        let _ = write!(serial, "{byte:02X}");
    }
    serial
}

/// Engine time base on top of the embassy monotonic clock
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl MillisClock for EmbassyClock {
    fn now_ms(&self) -> u32 {
        // Truncation gives the wrapping 32-bit counter the engine expects
        Instant::now().as_millis() as u32
    }
}
