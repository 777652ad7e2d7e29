//! Silta Hardware Abstraction Layer
//!
//! This crate defines the register-level seams between the bridge logic
//! and a specific microcontroller. The transaction engine in `silta-core`
//! only ever talks to these traits, so the same engine runs against real
//! STM32F4 registers or against a simulated bus on the host.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  silta-firmware (console, USB)          │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  silta-core (engine, latch, config)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  silta-hal (this crate - traits)        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │  silta-hal-   │
//!             │   stm32f4     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`i2c::I2cRegisters`] - Status/control/data register access
//! - [`i2c::I2cPeripheral`] - Peripheral de-init/init/enable
//! - [`gpio::PinMux`] - Routing a pin pair onto the bus
//! - [`time::MillisClock`] - Wrapping millisecond time base

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod i2c;
pub mod time;

// Re-export key traits at crate root for convenience
pub use gpio::{PinMapping, PinMode, PinMux};
pub use i2c::{ClockConfig, DutyCycle, I2cPeripheral, I2cRegisters, Status};
pub use time::MillisClock;
