//! Bus-error latch
//!
//! Single producer (the bus-error interrupt), single consumer (the engine's
//! polling loop). The interrupt captures the status registers and masks
//! itself so a stuck bus cannot turn into an interrupt storm; the engine
//! clears the latch and unmasks the source at the start of each transaction.

use portable_atomic::{AtomicU32, Ordering};
use silta_hal::{I2cRegisters, Status};

/// Latched status bits of the last bus-error event
#[derive(Debug)]
pub struct ErrorLatch {
    bits: AtomicU32,
}

impl Default for ErrorLatch {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorLatch {
    /// Create an empty latch
    pub const fn new() -> Self {
        Self {
            bits: AtomicU32::new(0),
        }
    }

    /// Interrupt-side entry point
    ///
    /// Reads SR1 and SR2 (in that order), stores them in the latch and
    /// disables the error interrupt source.
    pub fn capture<P: I2cRegisters + ?Sized>(&self, port: &mut P) {
        let sr1 = port.read_sr1();
        let sr2 = port.read_sr2();
        self.record(Status::from_registers(sr1, sr2));
        port.set_error_interrupt(false);
    }

    /// Store a status snapshot
    pub fn record(&self, status: Status) {
        self.bits.store(status.0, Ordering::Release);
    }

    /// Forget any latched error
    pub fn clear(&self) {
        self.bits.store(0, Ordering::Release);
    }

    /// Latched status (all zeros when no error was captured)
    pub fn get(&self) -> Status {
        Status(self.bits.load(Ordering::Acquire))
    }

    /// Check whether an error has been captured
    pub fn is_set(&self) -> bool {
        !self.get().is_clear()
    }
}
