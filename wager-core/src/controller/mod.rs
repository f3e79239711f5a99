//! Mode machine and the control loop aggregate

pub mod modes;
pub mod prop;

pub use modes::{ModeController, Transition};
pub use prop::{Prop, StepOutcome};
