//! RP2040-specific HAL for the prop controller
//!
//! This crate provides RP2040 implementations of the wager-core
//! collaborator traits:
//!
//! - PIO/DMA driven WS2812 output for the three light strips
//! - Shared IR/button line level published by the edge task
//! - Limit switch input
//! - Monotonic clock backed by embassy-time

#![no_std]

pub mod clock;
pub mod gpio;
pub mod ws2812;

pub use clock::EmbassyClock;
pub use gpio::{LimitSwitch, SharedLevel};
pub use ws2812::{PropStrips, BOX_LEN, FACE_LEN};
