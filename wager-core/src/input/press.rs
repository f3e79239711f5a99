//! Long-press detection by iteration counting

/// Counts consecutive low samples of the shared pin
///
/// A release after more than `threshold` low samples is a deliberate
/// button hold. Shorter low stretches are treated as IR protocol activity
/// and dropped. The count measures loop iterations, not wall-clock time, so
/// the threshold is tied to the loop rate of the board.
#[derive(Debug, Clone)]
pub struct PressDetector {
    /// Low samples needed before a release counts
    threshold: u32,
    /// Consecutive low samples so far
    low_count: u32,
}

impl PressDetector {
    /// Create a detector with the given threshold (in samples)
    pub const fn new(threshold: u32) -> Self {
        Self {
            threshold,
            low_count: 0,
        }
    }

    /// Feed one sample of the pin
    ///
    /// Returns `true` exactly once per qualifying hold, on the first high
    /// sample after it. The counter is cleared by every high sample.
    pub fn sample(&mut self, is_low: bool) -> bool {
        if is_low {
            self.low_count = self.low_count.saturating_add(1);
            return false;
        }

        let pressed = self.low_count > self.threshold;
        self.low_count = 0;
        pressed
    }

    /// Consecutive low samples so far
    pub fn low_count(&self) -> u32 {
        self.low_count
    }


    /// Check if the current hold already qualifies (release pending)
    pub fn is_armed(&self) -> bool {
        self.low_count > self.threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn hold(detector: &mut PressDetector, samples: u32) -> bool {
        for _ in 0..samples {
            assert!(!detector.sample(true));
        }
        detector.sample(false)
    }

    #[test]
    fn test_short_hold_is_noise() {
        let mut detector = PressDetector::new(10);
        assert!(!hold(&mut detector, 10));
        assert_eq!(detector.low_count(), 0);
    }

    #[test]
    fn test_long_hold_fires_once_on_release() {
        let mut detector = PressDetector::new(10);
        assert!(hold(&mut detector, 11));

        // Idle high samples afterwards never fire again
        for _ in 0..100 {
            assert!(!detector.sample(false));
        }
    }

    #[test]
    fn test_never_fires_while_low() {
        let mut detector = PressDetector::new(3);
        for _ in 0..1000 {
            assert!(!detector.sample(true));
        }
        assert!(detector.is_armed());
        assert!(detector.sample(false));
        assert!(!detector.is_armed());
    }

    #[test]
    fn test_count_saturates() {
        let mut detector = PressDetector::new(1);
        detector.low_count = u32::MAX;
        assert!(!detector.sample(true));
        assert_eq!(detector.low_count(), u32::MAX);
        assert!(detector.sample(false));
    }

    proptest! {
        #[test]
        fn prop_counter_tracks_low_run(samples in proptest::collection::vec(any::<bool>(), 0..500)) {
            let mut detector = PressDetector::new(5);
            let mut run = 0u32;

            for is_low in samples {
                let before = detector.low_count();
                let fired = detector.sample(is_low);

                if is_low {
                    run += 1;
                    prop_assert_eq!(detector.low_count(), before + 1);
                    prop_assert!(!fired);
                } else {
                    prop_assert_eq!(fired, run > 5);
                    prop_assert_eq!(detector.low_count(), 0);
                    run = 0;
                }
            }
        }
    }
}
