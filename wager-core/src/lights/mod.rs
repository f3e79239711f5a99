//! Strip buffers and rotation animation

pub mod animator;
pub mod strip;

pub use animator::LightAnimator;
pub use strip::LightStrip;
