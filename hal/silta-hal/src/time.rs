//! Time base abstraction

/// Free-running millisecond counter
///
/// The value wraps to zero after `u32::MAX` milliseconds (about 49 days).
/// Consumers must compare readings with wrapping arithmetic.
pub trait MillisClock {
    /// Current counter value in milliseconds
    fn now_ms(&self) -> u32;
}

impl<T: MillisClock + ?Sized> MillisClock for &T {
    fn now_ms(&self) -> u32 {
        (**self).now_ms()
    }
}
