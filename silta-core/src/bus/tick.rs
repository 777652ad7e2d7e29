//! Wrap-tolerant deadlines

use silta_hal::MillisClock;

/// Point in time after which a wait gives up
///
/// Comparisons use wrapping arithmetic, so a deadline stays correct when
/// the counter rolls over, as long as it lies less than 2^31 ms ahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Deadline {
    at: u32,
}

impl Deadline {
    /// Deadline `timeout_ms` after the current time of `clock`
    pub fn after<C: MillisClock + ?Sized>(clock: &C, timeout_ms: u32) -> Self {
        Self {
            at: clock.now_ms().wrapping_add(timeout_ms),
        }
    }

    /// Check whether `now` has reached the deadline
    pub fn has_passed(&self, now: u32) -> bool {
        (now.wrapping_sub(self.at) as i32) >= 0
    }
}
