//! Board-agnostic core logic for the bet/win prop controller
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Collaborator traits (shared input pin, IR decoder, motion driver, LED output)
//! - Mode machine and the input event table
//! - Shared-pin input classification (long press vs. remote code)
//! - Actuator homing and per-mode positioning
//! - Strip pattern and rotation animation
//! - Configuration type definitions

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod actuator;
pub mod config;
pub mod controller;
pub mod input;
pub mod lights;
pub mod state;
pub mod traits;

#[cfg(test)]
pub(crate) mod mock;
