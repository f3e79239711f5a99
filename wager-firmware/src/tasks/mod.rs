//! Embassy async tasks
//!
//! Each task runs independently and communicates through the statics in
//! `channels`.

pub mod control;
pub mod ir;

pub use control::{control_task, BoardProp, PropStepper};
pub use ir::ir_task;
