//! Monotonic clock backed by the embassy time driver

use embassy_time::Instant;
use wager_core::traits::Clock;

/// Clock reading the embassy-time timer
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now_us(&self) -> u64 {
        Instant::now().as_micros()
    }

    fn now_ms(&self) -> u64 {
        Instant::now().as_millis()
    }
}
