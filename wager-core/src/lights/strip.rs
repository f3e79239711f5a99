//! Color buffer for one addressable strip

use heapless::Vec;
use smart_leds::RGB8;

use crate::config::{StripConfig, MAX_STRIP_LEN};

/// Unlit cell
pub const OFF: RGB8 = RGB8 { r: 0, g: 0, b: 0 };

/// Color buffer bound to one physical strip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightStrip {
    pin: u8,
    cells: Vec<RGB8, MAX_STRIP_LEN>,
}

impl LightStrip {
    /// Create an unlit strip of `len` cells (clamped to [`MAX_STRIP_LEN`])
    pub fn new(pin: u8, len: u16) -> Self {
        let len = (len as usize).min(MAX_STRIP_LEN);
        let mut cells = Vec::new();
        // Cannot fail, length is clamped to capacity
        let _ = cells.resize(len, OFF);
        Self { pin, cells }
    }

    /// Create a strip from its configuration entry
    pub fn from_config(config: &StripConfig) -> Self {
        Self::new(config.pin, config.len)
    }

    /// Data pin the strip is wired to
    pub fn pin(&self) -> u8 {
        self.pin
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if the strip has no cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Current cell colors
    pub fn cells(&self) -> &[RGB8] {
        &self.cells
    }

    /// Turn every cell off
    pub fn clear(&mut self) {
        self.cells.fill(OFF);
    }

    /// Reset to the sparse dot pattern
    ///
    /// Every `spacing`-th cell from index 0 takes `color`, all others are
    /// turned off. The last cell is never lit.
    pub fn fill_pattern(&mut self, color: RGB8, spacing: usize) {
        self.clear();
        let end = self.cells.len().saturating_sub(1);
        for index in (0..end).step_by(spacing.max(1)) {
            self.cells[index] = color;
        }
    }

    /// Circular shift by one cell toward index 0
    ///
    /// The first cell reappears at the far end. An empty strip is left
    /// as is.
    pub fn rotate(&mut self) {
        if !self.cells.is_empty() {
            self.cells.rotate_left(1);
        }
    }
}
