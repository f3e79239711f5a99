//! Shared-pin input classification
//!
//! One physical line carries both the IR receiver output and the
//! mechanical bet button. Two independent classifiers observe it:
//!
//! - [`PressDetector`] counts low iterations and reports a long press on release
//! - [`RemoteButton`] maps decoded IR codes to remote keys
//!
//! [`InputClassifier`] composes them into at most one [`InputEvent`]
//! per loop iteration.
//!
//! [`InputEvent`]: crate::state::InputEvent

pub mod classifier;
pub mod press;
pub mod remote;

pub use classifier::InputClassifier;
pub use press::PressDetector;
pub use remote::RemoteButton;
