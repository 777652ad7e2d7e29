//! Bus pin multiplexing abstractions
//!
//! The bridge exposes two candidate pin pairs for the I2C bus. Exactly one
//! pair is routed to the peripheral at a time; the other is left as a plain
//! tri-stated input so it does not load the lines it shares a header with.

/// Which physical pin pair carries the bus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinMapping {
    /// First pin pair (selected at boot)
    #[default]
    PairA,
    /// Second pin pair
    PairB,
}

impl PinMapping {
    /// Both mappings, in console index order
    pub const ALL: [PinMapping; 2] = [PinMapping::PairA, PinMapping::PairB];

    /// Look up a mapping by its console index (`0` or `1`)
    pub fn from_index(index: u32) -> Option<Self> {
        match index {
            0 => Some(PinMapping::PairA),
            1 => Some(PinMapping::PairB),
            _ => None,
        }
    }

    /// Console index of this mapping
    pub fn index(self) -> u8 {
        match self {
            PinMapping::PairA => 0,
            PinMapping::PairB => 1,
        }
    }

    /// The pair that is not selected when this one is
    pub fn other(self) -> Self {
        match self {
            PinMapping::PairA => PinMapping::PairB,
            PinMapping::PairB => PinMapping::PairA,
        }
    }
}

/// Electrical configuration of a bus pin pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinMode {
    /// Plain digital input, no pull (tri-stated)
    Input,
    /// Routed to the I2C peripheral, open-drain, no pull
    AlternateOpenDrain,
}

/// Pin multiplexer for the bus pin pairs
///
/// Implementations map a [`PinMapping`] onto board pins and program the
/// mode and alternate-function registers.
pub trait PinMux {
    /// Put both pins of `pair` into `mode`
    ///
    /// For [`PinMode::AlternateOpenDrain`] this also selects the I2C
    /// alternate function for the pins.
    fn configure(&mut self, pair: PinMapping, mode: PinMode);
}
