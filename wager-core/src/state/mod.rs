//! Operating modes and the input events that select them
//!
//! The mode machine is explicit, finite, and deterministic. Every transition
//! during normal operation is driven by a classified input event.

pub mod events;
pub mod mode;

pub use events::InputEvent;
pub use mode::Mode;
