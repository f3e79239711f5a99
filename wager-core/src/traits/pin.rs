//! Digital level input abstraction

/// Digital input that can be sampled without side effects
///
/// Takes `&self` so the same physical pin can be observed by more than one
/// consumer (the shared IR/button line is read by both the IR decoder and
/// the long-press detector).
pub trait LevelInput {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

impl<T: LevelInput + ?Sized> LevelInput for &T {
    fn is_high(&self) -> bool {
        (**self).is_high()
    }
}
