//! Transfer state machine
//!
//! Tracks where a transaction is on the wire. The engine drives the
//! machine with one event per observed bus phase; the transition function
//! is pure so every path can be checked without a bus.

pub mod events;
pub mod machine;

pub use events::Event;
pub use machine::{Outcome, State};
