//! Board-agnostic core logic for the Silta bridge firmware
//!
//! This crate contains everything between the console byte stream and the
//! peripheral registers that does not depend on a specific chip:
//!
//! - Bus-error latch and busy flag shared with interrupt handlers
//! - Wrap-tolerant millisecond deadlines
//! - Transfer state machine
//! - I2C master transaction engine (register polling, bounded deadline)
//! - Pin/speed configuration manager
//! - Console command dispatch

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod bus;
pub mod config;
pub mod console;
pub mod i2c;
pub mod state;

#[cfg(test)]
pub(crate) mod sim;
