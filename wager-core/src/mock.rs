//! Host-side test doubles for the hardware traits

use core::cell::Cell;
use std::collections::VecDeque;
use std::vec::Vec;

use smart_leds::RGB8;

use crate::lights::LightStrip;
use crate::traits::{Clock, IrDecoder, LedDriver, LedError, LevelInput, MotionDriver, MotionLimits};

/// Input pin with a settable level
pub struct MockPin {
    high: Cell<bool>,
}

impl MockPin {
    pub fn new(high: bool) -> Self {
        Self {
            high: Cell::new(high),
        }
    }

    pub fn set_high(&self, high: bool) {
        self.high.set(high);
    }
}

impl LevelInput for MockPin {
    fn is_high(&self) -> bool {
        self.high.get()
    }
}

/// Limit switch that triggers after a number of reads
pub struct MockLimit {
    remaining: Cell<Option<u32>>,
    inverted: bool,
}

impl MockLimit {
    pub fn triggers_after(reads: u32) -> Self {
        Self {
            remaining: Cell::new(Some(reads)),
            inverted: false,
        }
    }

    pub fn never() -> Self {
        Self {
            remaining: Cell::new(None),
            inverted: false,
        }
    }

    /// Report the triggered state as low instead of high
    pub fn inverted(mut self) -> Self {
        self.inverted = true;
        self
    }
}

impl LevelInput for MockLimit {
    fn is_high(&self) -> bool {
        let triggered = match self.remaining.get() {
            Some(0) => true,
            Some(n) => {
                self.remaining.set(Some(n - 1));
                false
            }
            None => false,
        };
        triggered != self.inverted
    }
}

/// Decoder fed with codes by the test
#[derive(Default)]
pub struct MockDecoder {
    queue: VecDeque<u64>,
    pending: Option<u64>,
    pub acknowledged: u32,
}

impl MockDecoder {
    pub fn push(&mut self, code: u64) {
        self.queue.push_back(code);
    }
}

impl IrDecoder for MockDecoder {
    fn try_decode(&mut self) -> Option<u64> {
        if self.pending.is_none() {
            self.pending = self.queue.pop_front();
        }
        self.pending
    }

    fn acknowledge(&mut self) {
        self.pending = None;
        self.acknowledged += 1;
    }
}

/// Clock that advances by a fixed step on every read
#[derive(Default)]
pub struct MockClock {
    now_us: Cell<u64>,
    step_us: u64,
}

impl MockClock {
    pub fn auto_advance(step_ms: u64) -> Self {
        Self {
            now_us: Cell::new(0),
            step_us: step_ms * 1_000,
        }
    }
}

impl Clock for MockClock {
    fn now_us(&self) -> u64 {
        let now = self.now_us.get();
        self.now_us.set(now + self.step_us);
        now
    }
}

/// Command received by [`MockMotion`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionCommand {
    SetLimits(MotionLimits),
    MoveTo(i32),
    MoveBy(i32),
    SetCurrentPosition(i32),
}

/// Motion driver that records commands and moves one step per service
pub struct MockMotion {
    pub commands: Vec<MotionCommand>,
    pub limits: MotionLimits,
    pub position: i32,
    pub target: i32,
}

impl Default for MockMotion {
    fn default() -> Self {
        Self {
            commands: Vec::new(),
            limits: MotionLimits::new(1, 1),
            position: 0,
            target: 0,
        }
    }
}

impl MotionDriver for MockMotion {
    fn set_limits(&mut self, limits: MotionLimits) {
        self.commands.push(MotionCommand::SetLimits(limits));
        self.limits = limits;
    }

    fn move_to(&mut self, position: i32) {
        self.commands.push(MotionCommand::MoveTo(position));
        self.target = position;
    }

    fn move_by(&mut self, distance: i32) {
        self.commands.push(MotionCommand::MoveBy(distance));
        self.target = self.position + distance;
    }

    fn service(&mut self) -> bool {
        self.position += (self.target - self.position).signum();
        self.position != self.target
    }

    fn set_current_position(&mut self, position: i32) {
        self.commands.push(MotionCommand::SetCurrentPosition(position));
        self.position = position;
        self.target = position;
    }

    fn position(&self) -> i32 {
        self.position
    }

    fn target(&self) -> i32 {
        self.target
    }

    fn is_moving(&self) -> bool {
        self.position != self.target
    }
}

/// LED driver that keeps a copy of every transmitted frame
#[derive(Default)]
pub struct MockLeds {
    pub frames: Vec<Vec<Vec<RGB8>>>,
    pub fail: bool,
}

impl MockLeds {
    pub fn last_frame(&self) -> Option<&Vec<Vec<RGB8>>> {
        self.frames.last()
    }
}

impl LedDriver for MockLeds {
    async fn transmit(&mut self, strips: &[LightStrip]) -> Result<(), LedError> {
        if self.fail {
            return Err(LedError::WriteFailed);
        }
        self.frames
            .push(strips.iter().map(|strip| strip.cells().to_vec()).collect());
        Ok(())
    }
}
