//! Prop calibration
//!
//! Every constant the controller depends on lives here: the long-press
//! threshold, homing and operating motion limits, the per-mode actuator
//! targets, and the strip layout and animation cadence.

use heapless::String;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::traits::MotionLimits;

/// Number of LED strips on the prop
pub const STRIP_COUNT: usize = 3;

/// Longest supported strip (cells)
pub const MAX_STRIP_LEN: usize = 300;

/// Maximum label length for named config entries
pub const MAX_LABEL_LEN: usize = 16;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Long-press threshold must be non-zero
    ZeroPressThreshold,
    /// Motion limits must be non-zero
    ZeroMotionLimit,
    /// Homing needs at least one attempt and a non-zero timeout
    InvalidHoming,
    /// Homing travel must be non-zero
    ZeroHomingTravel,
    /// Strip length is zero or exceeds [`MAX_STRIP_LEN`]
    InvalidStripLength(u8),
    /// Dot spacing must be non-zero
    ZeroDotSpacing,
    /// Frame interval must be non-zero
    ZeroFrameInterval,
}

/// Shared-pin input classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InputConfig {
    /// Consecutive low iterations that count as a deliberate button hold
    ///
    /// Must exceed the longest low stretch an IR transmission produces at
    /// the board's loop rate.
    pub long_press_iterations: u32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            long_press_iterations: 3000,
        }
    }
}

/// Startup reference search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HomingConfig {
    /// Relative travel commanded toward the limit switch (steps)
    pub travel_steps: i32,
    /// Conservative limits used while searching
    pub limits: MotionLimits,
    /// Position assigned once the switch triggers (kept off zero so the
    /// actuator does not rest on the switch)
    pub home_offset: i32,
    /// Time allowed for one search attempt
    pub timeout_ms: u32,
    /// Number of search attempts before giving up
    pub attempts: u8,
    /// Switch reads high when triggered (normally-closed switch to ground)
    pub limit_active_high: bool,
}

impl Default for HomingConfig {
    fn default() -> Self {
        Self {
            travel_steps: 15_000,
            limits: MotionLimits::new(1_000, 200),
            home_offset: 100,
            timeout_ms: 30_000,
            attempts: 2,
            limit_active_high: true,
        }
    }
}

/// Actuator positioning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ActuatorConfig {
    /// Homing search parameters
    pub homing: HomingConfig,
    /// Limits for normal operation after homing
    pub run_limits: MotionLimits,
    /// Absolute target for Standby (steps)
    pub standby_position: i32,
    /// Absolute target for Bet (steps)
    pub bet_position: i32,
}

impl Default for ActuatorConfig {
    fn default() -> Self {
        Self {
            homing: HomingConfig::default(),
            run_limits: MotionLimits::new(10_000, 1_000),
            standby_position: -10_000,
            bet_position: 0,
        }
    }
}

/// One physical LED strip
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StripConfig {
    /// Strip name (e.g. "left", "right", "box")
    pub name: String<MAX_LABEL_LEN>,
    /// Data pin
    pub pin: u8,
    /// Number of cells
    pub len: u16,
}

impl StripConfig {
    /// Create a strip entry
    pub fn new(name: &str, pin: u8, len: u16) -> Self {
        let mut label = String::new();
        for c in name.chars() {
            if label.push(c).is_err() {
                break;
            }
        }
        Self {
            name: label,
            pin,
            len,
        }
    }
}

/// Strip layout and animation
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LightsConfig {
    /// `tick()` calls between two rotations
    pub frame_interval_ticks: u32,
    /// Distance between lit cells in the base pattern
    pub dot_spacing: u8,
    /// Strips in buffer order: two display faces, then the box indicator
    pub strips: [StripConfig; STRIP_COUNT],
}

impl Default for LightsConfig {
    fn default() -> Self {
        Self {
            frame_interval_ticks: 5_000,
            dot_spacing: 3,
            strips: [
                StripConfig::new("left", 12, 300),
                StripConfig::new("right", 14, 300),
                StripConfig::new("box", 13, 20),
            ],
        }
    }
}

/// Complete prop configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PropConfig {
    /// Input classification
    pub input: InputConfig,
    /// Actuator positioning
    pub actuator: ActuatorConfig,
    /// Lighting
    pub lights: LightsConfig,
}

impl PropConfig {
    /// Check the configuration for values the controller cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.input.long_press_iterations == 0 {
            return Err(ConfigError::ZeroPressThreshold);
        }

        let homing = &self.actuator.homing;
        for limits in [homing.limits, self.actuator.run_limits] {
            if limits.max_speed == 0 || limits.acceleration == 0 {
                return Err(ConfigError::ZeroMotionLimit);
            }
        }
        if homing.attempts == 0 || homing.timeout_ms == 0 {
            return Err(ConfigError::InvalidHoming);
        }
        if homing.travel_steps == 0 {
            return Err(ConfigError::ZeroHomingTravel);
        }

        if self.lights.dot_spacing == 0 {
            return Err(ConfigError::ZeroDotSpacing);
        }
        if self.lights.frame_interval_ticks == 0 {
            return Err(ConfigError::ZeroFrameInterval);
        }
        for (index, strip) in self.lights.strips.iter().enumerate() {
            if strip.len == 0 || strip.len as usize > MAX_STRIP_LEN {
                return Err(ConfigError::InvalidStripLength(index as u8));
            }
        }

        Ok(())
    }
}
