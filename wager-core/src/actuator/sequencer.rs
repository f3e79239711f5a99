//! Homing and per-mode positioning of the linear actuator
//!
//! The sequencer starts `Unhomed`. [`ActuatorSequencer::home`] blocks while
//! it drives toward the limit switch; nothing else may run until the
//! position is known. Each search attempt is bounded by a timeout and the
//! number of attempts is bounded, so a broken switch surfaces as a
//! [`HomingError`] instead of a hang.

use crate::config::{ActuatorConfig, HomingConfig};
use crate::state::Mode;
use crate::traits::{Clock, LevelInput, MotionDriver};

/// Actuator reference state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActuatorState {
    /// Position unknown, motion commands are refused
    Unhomed,
    /// Reference established, operating limits in effect
    Homed,
    /// Homing gave up; the actuator must not be moved
    Faulted,
}

/// Homing failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HomingError {
    /// The switch did not trigger within the attempt timeout
    Timeout {
        /// Attempts made
        attempts: u8,
    },
    /// The full homing travel completed without triggering the switch
    TravelExhausted {
        /// Attempts made
        attempts: u8,
    },
}

impl HomingError {
    /// Number of attempts made before giving up
    pub fn attempts(&self) -> u8 {
        match self {
            HomingError::Timeout { attempts } | HomingError::TravelExhausted { attempts } => {
                *attempts
            }
        }
    }
}

/// Outcome of a successful homing run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HomingReport {
    /// Attempt that found the switch (1-based)
    pub attempt: u8,
    /// Duration of that attempt in milliseconds
    pub elapsed_ms: u64,
    /// Steps travelled during that attempt
    pub travel_steps: i32,
}

/// Failure of a single search attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SeekFailure {
    Timeout,
    TravelExhausted,
}

/// Actuator sequencer
pub struct ActuatorSequencer<M> {
    motion: M,
    config: ActuatorConfig,
    state: ActuatorState,
}

impl<M: MotionDriver> ActuatorSequencer<M> {
    /// Create an unhomed sequencer
    pub fn new(motion: M, config: ActuatorConfig) -> Self {
        Self {
            motion,
            config,
            state: ActuatorState::Unhomed,
        }
    }

    /// Current reference state
    pub fn state(&self) -> ActuatorState {
        self.state
    }

    /// Check if the reference position is established
    pub fn is_homed(&self) -> bool {
        self.state == ActuatorState::Homed
    }

    /// Search for the limit switch and establish the reference position
    ///
    /// Blocks until the switch triggers or every attempt has failed. On
    /// success the position is redefined to the configured home offset and
    /// the operating motion limits replace the homing limits.
    pub fn home<L, C>(&mut self, limit: &L, clock: &C) -> Result<HomingReport, HomingError>
    where
        L: LevelInput,
        C: Clock,
    {
        let homing = self.config.homing;
        self.motion.set_limits(homing.limits);

        let mut failure = SeekFailure::Timeout;
        let mut attempts = 0;

        while attempts < homing.attempts {
            attempts += 1;
            let start_position = self.motion.position();
            let start_ms = clock.now_ms();

            match self.seek(limit, clock, &homing) {
                Ok(()) => {
                    let report = HomingReport {
                        attempt: attempts,
                        elapsed_ms: clock.now_ms().saturating_sub(start_ms),
                        travel_steps: self.motion.position() - start_position,
                    };
                    self.motion.set_current_position(homing.home_offset);
                    self.motion.set_limits(self.config.run_limits);
                    self.state = ActuatorState::Homed;
                    return Ok(report);
                }
                Err(kind) => failure = kind,
            }
        }

        self.state = ActuatorState::Faulted;
        Err(match failure {
            SeekFailure::Timeout => HomingError::Timeout { attempts },
            SeekFailure::TravelExhausted => HomingError::TravelExhausted { attempts },
        })
    }

    /// One bounded search attempt
    fn seek<L, C>(&mut self, limit: &L, clock: &C, homing: &HomingConfig) -> Result<(), SeekFailure>
    where
        L: LevelInput,
        C: Clock,
    {
        let deadline = clock.now_ms() + homing.timeout_ms as u64;
        self.motion.move_by(homing.travel_steps);

        let mut moving = true;
        loop {
            if Self::limit_triggered(limit, homing) {
                return Ok(());
            }
            if !moving {
                return Err(SeekFailure::TravelExhausted);
            }
            moving = self.motion.service();

            if clock.now_ms() > deadline {
                // Stop where we are
                let position = self.motion.position();
                self.motion.set_current_position(position);
                return Err(SeekFailure::Timeout);
            }
        }
    }

    fn limit_triggered<L: LevelInput>(limit: &L, homing: &HomingConfig) -> bool {
        limit.is_high() == homing.limit_active_high
    }

    /// Target position for a mode (`None` means hold position)
    pub fn target_for(&self, mode: Mode) -> Option<i32> {
        match mode {
            Mode::Standby => Some(self.config.standby_position),
            Mode::Bet => Some(self.config.bet_position),
            Mode::Homing | Mode::Win => None,
        }
    }

    /// Issue the motion command for a mode
    ///
    /// Non-blocking. Returns the commanded target, or `None` when the mode
    /// holds position or the actuator is not homed.
    pub fn apply_mode(&mut self, mode: Mode) -> Option<i32> {
        if !self.is_homed() {
            return None;
        }

        let target = self.target_for(mode)?;
        self.motion.move_to(target);
        Some(target)
    }

    /// Service the motion driver; call every loop iteration
    ///
    /// Returns `true` while a move is in progress.
    pub fn service(&mut self) -> bool {
        self.motion.service()
    }

    /// Current actuator position in steps
    pub fn position(&self) -> i32 {
        self.motion.position()
    }

    /// Get the motion driver
    pub fn motion(&self) -> &M {
        &self.motion
    }

    /// Get the motion driver mutably
    pub fn motion_mut(&mut self) -> &mut M {
        &mut self.motion
    }
}
