//! Silta console protocol
//!
//! The bridge is driven over a USB serial port with one text command per
//! line. Every command produces at least one response line.
//!
//! ```text
//! host                         bridge
//!  │  i2c A0 2 00\n              │
//!  │ ──────────────────────────▶ │  LineAssembler → tokenize → Command
//!  │                  OK AA BB\n │
//!  │ ◀────────────────────────── │  response::write_*
//! ```
//!
//! | Command                         | Response                       |
//! |---------------------------------|--------------------------------|
//! | `i2c <addr> <rlen> [byte ...]`  | `OK [XX ...]` or `ERR <code>`  |
//! | `config i2cspeed <hz>`          | `OK` or `ERR`                  |
//! | `config i2cpins <0\|1>`         | `OK` or `ERR`                  |
//! | `help [command]`                | `<name> - <description>` lines |
//!
//! Addresses and data bytes are hexadecimal, lengths and values decimal.
//! The address is the 8-bit form with the R/W bit in bit 0 (`A0` for an
//! EEPROM at 0x50); the bit is ignored.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod command;
pub mod line;
pub mod response;
pub mod token;

pub use command::{parse_line, Command, ConfigKey, ConfigSetting, I2cCommand, ParseError};
pub use command::{MAX_READ_BYTES, MAX_WRITE_BYTES};
pub use line::{Line, LineAssembler, LineTooLong, MAX_LINE_LEN};
pub use response::{Response, HELP, MAX_RESPONSE_LEN};
pub use token::{tokenize, Tokens, MAX_TOKENS};
