//! Monotonic time source

/// Monotonic microsecond clock
///
/// Used for step scheduling and the homing timeout. Implementations must
/// never go backwards.
pub trait Clock {
    /// Microseconds since an arbitrary fixed origin
    fn now_us(&self) -> u64;

    /// Milliseconds since the same origin
    fn now_ms(&self) -> u64 {
        self.now_us() / 1000
    }
}

impl<T: Clock + ?Sized> Clock for &T {
    fn now_us(&self) -> u64 {
        (**self).now_us()
    }
}
