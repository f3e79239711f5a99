//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in wager-core that do not depend on a particular microcontroller:
//!
//! - Step/direction stepper driver with trapezoidal acceleration
//! - NEC infrared protocol decoder fed with measured pulse widths

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod ir;
pub mod stepper;
