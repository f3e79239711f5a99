//! Step/direction stepper driver with trapezoidal acceleration
//!
//! Drives any STEP/DIR stepper driver (A4988, DRV8825, TMC in standalone
//! mode) from two GPIOs. Motion is generated one step at a time from
//! [`MotionDriver::service`], which must be polled much faster than the
//! maximum step rate.
//!
//! # Ramp
//!
//! Step intervals follow the Austin recurrence `c(n) = c(n-1) - 2c(n-1)/(4n+1)`,
//! starting from `c0 = 0.676 * sqrt(2/a)`. A negative `n` walks the same
//! curve backwards to decelerate. Braking starts once the stopping distance
//! `v² / 2a` reaches the remaining distance, or when the target lies behind
//! the direction of travel. Direction only reverses once the motor has
//! ramped down to rest.
//!
//! Intervals are kept in nanoseconds so the recurrence stays precise
//! without floating point.

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{OutputPin, PinState};
use wager_core::traits::{Clock, Direction, MotionDriver, MotionLimits};

const NS_PER_S: u64 = 1_000_000_000;

/// Step/dir driver configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepDirConfig {
    /// STEP pulse high time, also used as DIR setup time
    pub pulse_width_us: u32,
    /// Swap the DIR level for forward travel
    pub invert_direction: bool,
}

impl Default for StepDirConfig {
    fn default() -> Self {
        Self {
            pulse_width_us: 2,
            invert_direction: false,
        }
    }
}

/// Integer square root
fn isqrt(n: u64) -> u64 {
    if n < 2 {
        return n;
    }
    let mut x = n;
    let mut y = (x + 1) / 2;
    while y < x {
        x = y;
        y = (x + n / x) / 2;
    }
    x
}

/// Step/dir stepper driver
pub struct StepDirStepper<STEP, DIR, D, C> {
    step: STEP,
    dir: DIR,
    delay: D,
    clock: C,
    config: StepDirConfig,
    limits: MotionLimits,
    position: i32,
    target: i32,
    direction: Direction,
    /// Ramp step counter, negative while decelerating
    ramp_step: i32,
    /// First interval from rest (ns)
    initial_interval: u64,
    /// Interval at max speed (ns)
    min_interval: u64,
    /// Current step interval (ns), 0 at rest
    interval: u64,
    last_step_us: Option<u64>,
    enabled: bool,
}

impl<STEP, DIR, D, C> StepDirStepper<STEP, DIR, D, C>
where
    STEP: OutputPin<Error = Infallible>,
    DIR: OutputPin<Error = Infallible>,
    D: DelayNs,
    C: Clock,
{
    /// Create a driver at position 0 with both pins low
    pub fn new(step: STEP, dir: DIR, delay: D, clock: C, config: StepDirConfig) -> Self {
        let mut stepper = Self {
            step,
            dir,
            delay,
            clock,
            config,
            limits: MotionLimits::new(1, 1),
            position: 0,
            target: 0,
            direction: Direction::Forward,
            ramp_step: 0,
            initial_interval: 0,
            min_interval: 0,
            interval: 0,
            last_step_us: None,
            enabled: true,
        };
        let _ = stepper.step.set_low();
        let _ = stepper.dir.set_low();
        stepper.set_limits(MotionLimits::new(1, 1));
        stepper
    }

    /// Enable or disable step generation
    ///
    /// Disabling stops immediately without deceleration and discards the
    /// target.
    pub fn set_enabled(&mut self, enabled: bool) {
        if !enabled {
            self.target = self.position;
            self.halt();
        }
        self.enabled = enabled;
    }

    /// Check if step generation is enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Current speed in steps per second
    pub fn speed(&self) -> u32 {
        match self.interval {
            0 => 0,
            interval => (NS_PER_S / interval) as u32,
        }
    }

    /// Steps needed to stop from the current speed
    fn stopping_distance(&self) -> u64 {
        if self.interval == 0 {
            return 0;
        }
        // Millisteps per second
        let speed = NS_PER_S * 1_000 / self.interval;
        speed * speed / (2 * self.limits.acceleration as u64 * 1_000_000)
    }

    fn halt(&mut self) {
        self.interval = 0;
        self.ramp_step = 0;
    }

    fn write_direction(&mut self, direction: Direction) {
        self.direction = direction;
        let forward = direction == Direction::Forward;
        let _ = self
            .dir
            .set_state(PinState::from(forward != self.config.invert_direction));
        self.delay.delay_us(self.config.pulse_width_us);
    }

    fn pulse(&mut self) {
        let _ = self.step.set_high();
        self.delay.delay_us(self.config.pulse_width_us);
        let _ = self.step.set_low();
    }

    /// Work out the interval to the next step
    fn compute_interval(&mut self) {
        let distance = self.distance_to_go();
        let stopping = self.stopping_distance();

        if distance == 0 && stopping <= 1 {
            self.halt();
            return;
        }

        let remaining = distance.unsigned_abs() as u64;
        let heading = Direction::of(distance);
        let wrong_way = heading.is_some_and(|h| h != self.direction);

        if heading.is_some() {
            if self.ramp_step > 0 && (stopping >= remaining || wrong_way) {
                self.ramp_step = -(stopping.min(i32::MAX as u64) as i32);
            } else if self.ramp_step < 0 && stopping < remaining && !wrong_way {
                self.ramp_step = -self.ramp_step;
            }
        }

        if self.ramp_step == 0 {
            self.interval = self.initial_interval;
            if let Some(heading) = heading {
                self.write_direction(heading);
            }
        } else {
            let interval = self.interval as i64;
            let delta = 2 * interval / (4 * self.ramp_step as i64 + 1);
            self.interval = ((interval - delta) as u64).max(self.min_interval);
        }
        self.ramp_step += 1;
    }
}

impl<STEP, DIR, D, C> MotionDriver for StepDirStepper<STEP, DIR, D, C>
where
    STEP: OutputPin<Error = Infallible>,
    DIR: OutputPin<Error = Infallible>,
    D: DelayNs,
    C: Clock,
{
    fn set_limits(&mut self, limits: MotionLimits) {
        let limits = MotionLimits::new(limits.max_speed.max(1), limits.acceleration.max(1));
        self.limits = limits;
        self.initial_interval = 676 * isqrt(2_000_000_000_000 / limits.acceleration as u64);
        self.min_interval = NS_PER_S / limits.max_speed as u64;

        if self.ramp_step > 0 {
            self.ramp_step = self.stopping_distance().min(i32::MAX as u64) as i32;
            self.compute_interval();
        }
    }

    fn move_to(&mut self, position: i32) {
        if position != self.target {
            self.target = position;
            if self.interval != 0 {
                self.compute_interval();
            }
        }
    }

    fn service(&mut self) -> bool {
        if !self.enabled {
            return false;
        }

        if self.interval == 0 {
            if self.target == self.position {
                return false;
            }
            self.compute_interval();
            self.last_step_us = None;
        }

        let now = self.clock.now_us();
        let due = match self.last_step_us {
            Some(last) => now.saturating_sub(last) >= self.interval / 1_000,
            None => true,
        };

        if due {
            self.pulse();
            self.position += match self.direction {
                Direction::Forward => 1,
                Direction::Reverse => -1,
            };
            self.last_step_us = Some(now);
            self.compute_interval();
        }

        self.is_moving()
    }

    fn set_current_position(&mut self, position: i32) {
        self.position = position;
        self.target = position;
        self.halt();
    }

    fn position(&self) -> i32 {
        self.position
    }

    fn target(&self) -> i32 {
        self.target
    }

    fn is_moving(&self) -> bool {
        self.interval != 0 || self.target != self.position
    }
}
