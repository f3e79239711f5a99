//! Configuration types
//!
//! Board-agnostic calibration for the prop. Defaults reproduce the
//! calibration of the first prop build; a board can override any value
//! from its configuration file.

pub mod prop;
pub mod toml;

pub use prop::*;
pub use toml::{parse_config, ParseError, ParseErrorKind};
