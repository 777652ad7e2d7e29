//! State shared between the transaction engine and interrupt handlers
//!
//! Everything here is written from one execution context and read from
//! another, so all access goes through atomics.

pub mod latch;
pub mod shared;
pub mod tick;

pub use latch::ErrorLatch;
pub use shared::{BusClaim, BusShared};
pub use tick::Deadline;
