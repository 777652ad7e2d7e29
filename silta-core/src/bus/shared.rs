//! Shared bus state and the in-flight guard

use portable_atomic::{AtomicBool, Ordering};

use super::latch::ErrorLatch;

/// State shared by the engine and the bus-error interrupt
///
/// Lives in a `static` on the target and is handed by reference to both
/// sides. Besides the error latch it carries the flag that marks a
/// transaction as in flight, which turns a reentrant call into a reported
/// error instead of corrupting the bus sequence.
#[derive(Debug)]
pub struct BusShared {
    latch: ErrorLatch,
    in_flight: AtomicBool,
}

impl Default for BusShared {
    fn default() -> Self {
        Self::new()
    }
}

impl BusShared {
    /// Create idle shared state
    pub const fn new() -> Self {
        Self {
            latch: ErrorLatch::new(),
            in_flight: AtomicBool::new(false),
        }
    }

    /// The bus-error latch
    pub fn latch(&self) -> &ErrorLatch {
        &self.latch
    }

    /// Try to take ownership of the bus for one transaction
    ///
    /// Returns `None` while another claim is alive.
    pub fn claim(&self) -> Option<BusClaim<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .ok()
            .map(|_| BusClaim { shared: self })
    }

    /// Check whether a transaction is currently in flight
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }
}

/// Ownership of the bus; released on drop
#[derive(Debug)]
pub struct BusClaim<'a> {
    shared: &'a BusShared,
}

impl Drop for BusClaim<'_> {
    fn drop(&mut self) {
        self.shared.in_flight.store(false, Ordering::Release);
    }
}
