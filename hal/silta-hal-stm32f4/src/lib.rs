//! STM32F4-specific HAL for the Silta firmware
//!
//! Implements the `silta-hal` traits on top of the `embassy-stm32`
//! peripheral access crate. Supported chips:
//!
//! - STM32F407VG (STM32F4-Discovery)
//!
//! # Features
//!
//! - `stm32f407vg` - Enable support for STM32F407VG
//! - `defmt` - Enable debug formatting support
//!
//! # Usage
//!
//! The I2C1 peripheral is driven through raw registers rather than the
//! embassy I2C driver: the transaction engine needs to observe every status
//! flag and classify failures itself.

#![no_std]

pub mod gpio;
pub mod i2c;
pub mod timing;

pub use gpio::I2c1Pins;
pub use i2c::I2c1Port;
pub use timing::Timings;
