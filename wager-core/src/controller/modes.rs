//! Mode controller
//!
//! Owns the current [`Mode`] and applies each transition's side effects
//! exactly once. Requesting the mode that is already active is a no-op:
//! lights are not reset and no motion command is issued.

use crate::actuator::ActuatorSequencer;
use crate::lights::LightAnimator;
use crate::state::{InputEvent, Mode};
use crate::traits::MotionDriver;

/// A completed mode change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Transition {
    /// Mode before the change
    pub from: Mode,
    /// Mode after the change
    pub to: Mode,
    /// Actuator target commanded by the change, if any
    pub target: Option<i32>,
}

/// Mode controller
#[derive(Debug, Default)]
pub struct ModeController {
    mode: Mode,
}

impl ModeController {
    /// Create a controller in [`Mode::Homing`]
    pub fn new() -> Self {
        Self::default()
    }

    /// Active mode
    pub fn current_mode(&self) -> Mode {
        self.mode
    }

    /// Switch to `requested`
    ///
    /// Lights are reset before the actuator is commanded. Returns `None`
    /// when `requested` is already active.
    pub fn transition<M: MotionDriver>(
        &mut self,
        requested: Mode,
        lights: &mut LightAnimator,
        actuator: &mut ActuatorSequencer<M>,
    ) -> Option<Transition> {
        if requested == self.mode {
            return None;
        }

        lights.apply_mode(requested);
        let target = actuator.apply_mode(requested);

        let from = self.mode;
        self.mode = requested;
        Some(Transition {
            from,
            to: requested,
            target,
        })
    }

    /// Apply the transition an input event asks for, if any
    pub fn handle_event<M: MotionDriver>(
        &mut self,
        event: InputEvent,
        lights: &mut LightAnimator,
        actuator: &mut ActuatorSequencer<M>,
    ) -> Option<Transition> {
        let requested = event.requested_mode()?;
        self.transition(requested, lights, actuator)
    }
}
