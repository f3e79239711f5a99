//! Stepper motion driver trait
//!
//! This trait abstracts over the step/direction pulse generator that moves
//! the actuator. Positions are absolute step counts.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Motor travel direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    /// Increasing step count
    Forward,
    /// Decreasing step count
    Reverse,
}

impl Direction {
    /// Direction needed to cover a signed distance (`None` for zero)
    pub fn of(distance: i32) -> Option<Self> {
        match distance {
            d if d > 0 => Some(Direction::Forward),
            d if d < 0 => Some(Direction::Reverse),
            _ => None,
        }
    }
}

/// Speed and acceleration limits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MotionLimits {
    /// Maximum speed in steps per second
    pub max_speed: u32,
    /// Acceleration in steps per second squared
    pub acceleration: u32,
}

impl MotionLimits {
    /// Create a new set of limits
    pub const fn new(max_speed: u32, acceleration: u32) -> Self {
        Self {
            max_speed,
            acceleration,
        }
    }
}

/// Trait for position-controlled stepper drivers
///
/// All commands are non-blocking. The driver only emits steps from
/// [`service`](MotionDriver::service), which must be called far more often
/// than the maximum step rate.
pub trait MotionDriver {
    /// Set speed and acceleration limits for subsequent motion
    fn set_limits(&mut self, limits: MotionLimits);

    /// Set an absolute target position
    fn move_to(&mut self, position: i32);

    /// Set a target relative to the current position
    fn move_by(&mut self, distance: i32) {
        let target = self.position().saturating_add(distance);
        self.move_to(target);
    }

    /// Emit at most one step if one is due
    ///
    /// Returns `true` while motion is still in progress.
    fn service(&mut self) -> bool;

    /// Redefine the current position without moving
    ///
    /// Also stops any motion in progress: the target becomes the new
    /// position and the speed drops to zero.
    fn set_current_position(&mut self, position: i32);

    /// Current position in steps
    fn position(&self) -> i32;

    /// Current target in steps
    fn target(&self) -> i32;

    /// Steps remaining to the target
    fn distance_to_go(&self) -> i32 {
        self.target() - self.position()
    }

    /// Check if a move is in progress
    fn is_moving(&self) -> bool;
}
