//! Collaborator traits
//!
//! These traits define the interface between the prop logic and the
//! hardware-specific implementations (GPIO, IR receiver, stepper driver,
//! LED strip output).

pub mod clock;
pub mod ir;
pub mod led;
pub mod pin;
pub mod stepper;

pub use clock::Clock;
pub use ir::IrDecoder;
pub use led::{LedDriver, LedError};
pub use pin::LevelInput;
pub use stepper::{Direction, MotionDriver, MotionLimits};
