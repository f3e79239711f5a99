//! Mode color pattern and rotation cadence
//!
//! The animator owns one buffer per strip. [`LightAnimator::apply_mode`]
//! only rewrites buffers; nothing reaches the hardware until the next
//! rotation, so a mode change becomes visible on the following frame.
//! [`LightAnimator::tick`] is called every loop iteration and transmits
//! once every `frame_interval_ticks` calls.

use smart_leds::RGB8;

use crate::config::{LightsConfig, STRIP_COUNT};
use crate::state::Mode;
use crate::traits::{LedDriver, LedError};

use super::strip::LightStrip;

/// Light animator for the three strips
pub struct LightAnimator {
    strips: [LightStrip; STRIP_COUNT],
    /// Calls to `tick()` since the last rotation
    ticks: u32,
    frame_interval: u32,
    dot_spacing: usize,
    /// Color of the active pattern, `None` while dark
    color: Option<RGB8>,
}

impl LightAnimator {
    /// Create an animator with every strip dark
    pub fn new(config: &LightsConfig) -> Self {
        Self {
            strips: config.strips.each_ref().map(LightStrip::from_config),
            ticks: 0,
            frame_interval: config.frame_interval_ticks.max(1),
            dot_spacing: config.dot_spacing.max(1) as usize,
            color: None,
        }
    }

    /// Reset every strip to the pattern for `mode`
    ///
    /// Homing has no color and leaves the buffers untouched. Returns `true`
    /// when the buffers were rewritten.
    pub fn apply_mode(&mut self, mode: Mode) -> bool {
        let Some(color) = mode.color() else {
            return false;
        };

        for strip in self.strips.iter_mut() {
            strip.fill_pattern(color, self.dot_spacing);
        }
        self.ticks = 0;
        self.color = Some(color);
        true
    }

    /// Advance the cadence counter, rotating and transmitting when due
    ///
    /// Returns `Ok(true)` when a frame was sent. The counter is reset even
    /// when the transmission fails.
    pub async fn tick<L: LedDriver>(&mut self, leds: &mut L) -> Result<bool, LedError> {
        self.ticks += 1;
        if self.ticks < self.frame_interval {
            return Ok(false);
        }
        self.ticks = 0;

        for strip in self.strips.iter_mut() {
            strip.rotate();
        }
        leds.transmit(&self.strips).await?;
        Ok(true)
    }

    /// Turn every strip off
    ///
    /// With `immediate` the dark buffers are transmitted right away,
    /// otherwise they go out with the next frame.
    pub async fn clear<L: LedDriver>(&mut self, leds: &mut L, immediate: bool) -> Result<(), LedError> {
        for strip in self.strips.iter_mut() {
            strip.clear();
        }
        self.color = None;

        if immediate {
            leds.transmit(&self.strips).await?;
        }
        Ok(())
    }

    /// Strip buffers in driver order
    pub fn strips(&self) -> &[LightStrip] {
        &self.strips
    }

    /// Color of the active pattern
    pub fn color(&self) -> Option<RGB8> {
        self.color
    }

    /// Calls since the last rotation
    pub fn ticks(&self) -> u32 {
        self.ticks
    }
}
