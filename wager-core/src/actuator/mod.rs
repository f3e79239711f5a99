//! Actuator sequencing
//!
//! Owns the startup reference search and the per-mode target positions.

pub mod sequencer;

pub use sequencer::{ActuatorSequencer, ActuatorState, HomingError, HomingReport};
