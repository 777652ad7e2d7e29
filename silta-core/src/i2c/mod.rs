//! I2C master transaction engine
//!
//! - [`engine::I2cMaster`] - one write-then-read transaction per call,
//!   polling the register port under a single 50 ms deadline
//! - [`bridge::I2cBridge`] - engine plus pin/speed configuration, the
//!   object the console talks to

pub mod bridge;
pub mod engine;
pub mod error;
pub mod request;

pub use bridge::I2cBridge;
pub use engine::{I2cMaster, TRANSACTION_TIMEOUT_MS};
pub use error::{ConfigError, I2cError};
pub use request::{ReadBuffer, TransactionRequest, MAX_ADDRESS, MAX_READ_LEN, MAX_WRITE_LEN};
