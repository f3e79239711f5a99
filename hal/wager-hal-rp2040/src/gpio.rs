//! Digital inputs
//!
//! The shared IR/button line is owned by the IR edge task, which waits on
//! its edges and publishes the current level. The control loop reads that
//! published level instead of the pin, so both consumers observe the same
//! electrical signal.

use embassy_rp::gpio::Input;
use portable_atomic::{AtomicBool, Ordering};
use wager_core::traits::LevelInput;

/// Level of a pin owned by another task
#[derive(Clone, Copy)]
pub struct SharedLevel {
    level: &'static AtomicBool,
}

impl SharedLevel {
    /// Observe a published level
    pub const fn new(level: &'static AtomicBool) -> Self {
        Self { level }
    }

    /// Publish a new level (called by the owning task)
    pub fn publish(level: &AtomicBool, high: bool) {
        level.store(high, Ordering::Release);
    }
}

impl LevelInput for SharedLevel {
    fn is_high(&self) -> bool {
        self.level.load(Ordering::Acquire)
    }
}

/// Actuator limit switch
///
/// Wired normally closed to ground with the pull-up enabled, so the input
/// reads high when the switch is triggered or the wire is broken.
pub struct LimitSwitch<'d> {
    input: Input<'d>,
}

impl<'d> LimitSwitch<'d> {
    /// Wrap a pulled-up input
    pub fn new(input: Input<'d>) -> Self {
        Self { input }
    }
}

impl LevelInput for LimitSwitch<'_> {
    fn is_high(&self) -> bool {
        self.input.is_high()
    }
}
