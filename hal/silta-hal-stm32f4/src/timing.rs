//! I2C v1 clock control register values

use silta_hal::{ClockConfig, DutyCycle};

/// Highest frequency of standard mode
const STANDARD_MODE_MAX_HZ: u32 = 100_000;

/// Width of CCR.CCR
const CCR_MAX: u32 = 0xFFF;

/// Register values derived from the APB1 clock and a bus speed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timings {
    /// CR2.FREQ: APB1 clock in MHz
    pub freq_mhz: u8,
    /// CCR.CCR
    pub ccr: u16,
    /// CCR.F/S: fast mode
    pub fast: bool,
    /// CCR.DUTY, only meaningful in fast mode
    pub duty: DutyCycle,
    /// TRISE
    pub trise: u8,
}

impl Timings {
    /// Compute register values for `config` with APB1 running at `pclk1_hz`
    ///
    /// `config` must pass [`Timings::fits`]; CCR saturates otherwise.
    pub fn new(pclk1_hz: u32, config: &ClockConfig) -> Self {
        let freq_mhz = (pclk1_hz / 1_000_000).clamp(2, 50);
        let ccr = ccr_for(pclk1_hz, config).min(CCR_MAX) as u16;

        if is_fast(config) {
            Self {
                freq_mhz: freq_mhz as u8,
                ccr,
                fast: true,
                duty: config.duty,
                trise: (freq_mhz * 300 / 1000 + 1) as u8,
            }
        } else {
            Self {
                freq_mhz: freq_mhz as u8,
                ccr,
                fast: false,
                duty: config.duty,
                trise: (freq_mhz + 1) as u8,
            }
        }
    }

    /// Check whether `config` is reachable from `pclk1_hz`
    ///
    /// Slow standard-mode clocks need a CCR wider than 12 bits.
    pub fn fits(pclk1_hz: u32, config: &ClockConfig) -> bool {
        config.is_supported() && ccr_for(pclk1_hz, config) <= CCR_MAX
    }
}

fn is_fast(config: &ClockConfig) -> bool {
    config.frequency > STANDARD_MODE_MAX_HZ
}

/// Unclamped CCR.CCR for `config`
fn ccr_for(pclk1_hz: u32, config: &ClockConfig) -> u32 {
    let hz = config.frequency.max(1);
    if is_fast(config) {
        let divider = match config.duty {
            DutyCycle::Ratio2To1 => 3,
            DutyCycle::Ratio16To9 => 25,
        };
        (pclk1_hz / (hz * divider)).max(1)
    } else {
        // Thigh = Tlow = CCR * Tpclk1
        (pclk1_hz / (hz * 2)).max(4)
    }
}
