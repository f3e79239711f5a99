//! Minimal TOML reader for the prop configuration file
//!
//! Handles only the subset the configuration file uses. It does NOT
//! support the full TOML grammar.
//!
//! Supported:
//! - `[section]` and `[strip.<name>]` headers
//! - `key = value` pairs with integer (`_` separators allowed) and boolean values
//! - Comments (`# ...`), whole-line or trailing
//!
//! Keys not listed in a section are rejected so a typo cannot silently
//! leave a default in place. Values that are absent keep their default.
//! `[strip.*]` sections fill the strip slots in the order they appear.

use heapless::String;

use super::prop::{PropConfig, StripConfig, STRIP_COUNT};
use crate::traits::MotionLimits;

/// What went wrong
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseErrorKind {
    /// Unknown or malformed section header
    InvalidSection,
    /// Key not valid in the current section
    UnknownKey,
    /// Line is not `key = value`
    InvalidLine,
    /// Value has the wrong type or is out of range
    InvalidValue,
    /// More `[strip.*]` sections than strips
    TooManyStrips,
}

/// Parse error with the 1-based line it occurred on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ParseError {
    pub line: u16,
    pub kind: ParseErrorKind,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Input,
    Homing,
    Actuator,
    Lights,
    Strip(usize),
}

/// Parse a configuration file on top of the defaults
pub fn parse_config(input: &str) -> Result<PropConfig, ParseError> {
    let mut config = PropConfig::default();
    let mut section = Section::Root;
    let mut strips = 0;

    for (index, raw) in input.lines().enumerate() {
        let line_no = (index + 1).min(u16::MAX as usize) as u16;
        let fail = |kind| ParseError {
            line: line_no,
            kind,
        };

        let line = match raw.find('#') {
            Some(pos) => &raw[..pos],
            None => raw,
        }
        .trim();
        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix('[') {
            let header = header
                .strip_suffix(']')
                .ok_or(fail(ParseErrorKind::InvalidSection))?
                .trim();
            section = match header {
                "input" => Section::Input,
                "homing" => Section::Homing,
                "actuator" => Section::Actuator,
                "lights" => Section::Lights,
                _ => {
                    let name = header
                        .strip_prefix("strip.")
                        .filter(|name| !name.is_empty())
                        .ok_or(fail(ParseErrorKind::InvalidSection))?;
                    if strips == STRIP_COUNT {
                        return Err(fail(ParseErrorKind::TooManyStrips));
                    }
                    let slot = &mut config.lights.strips[strips];
                    *slot = StripConfig::new(name, slot.pin, slot.len);
                    strips += 1;
                    Section::Strip(strips - 1)
                }
            };
            continue;
        }

        let (key, value) = line
            .split_once('=')
            .ok_or(fail(ParseErrorKind::InvalidLine))?;
        let key = key.trim();
        let value = Value(value.trim());

        apply(&mut config, section, key, value).map_err(fail)?;
    }

    Ok(config)
}

/// Raw value text
#[derive(Clone, Copy)]
struct Value<'a>(&'a str);

impl Value<'_> {
    fn integer(self) -> Result<i64, ParseErrorKind> {
        let mut digits: String<24> = String::new();
        for c in self.0.chars().filter(|c| *c != '_') {
            digits.push(c).map_err(|_| ParseErrorKind::InvalidValue)?;
        }
        digits.parse().map_err(|_| ParseErrorKind::InvalidValue)
    }

    fn int<T: TryFrom<i64>>(self) -> Result<T, ParseErrorKind> {
        T::try_from(self.integer()?).map_err(|_| ParseErrorKind::InvalidValue)
    }

    fn boolean(self) -> Result<bool, ParseErrorKind> {
        match self.0 {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(ParseErrorKind::InvalidValue),
        }
    }
}

fn set_limit(limits: &mut MotionLimits, key: &str, value: Value) -> Result<bool, ParseErrorKind> {
    match key {
        "max_speed" => limits.max_speed = value.int()?,
        "acceleration" => limits.acceleration = value.int()?,
        _ => return Ok(false),
    }
    Ok(true)
}

fn apply(config: &mut PropConfig, section: Section, key: &str, value: Value) -> Result<(), ParseErrorKind> {
    match section {
        Section::Root => return Err(ParseErrorKind::UnknownKey),
        Section::Input => match key {
            "long_press_iterations" => config.input.long_press_iterations = value.int()?,
            _ => return Err(ParseErrorKind::UnknownKey),
        },
        Section::Homing => {
            let homing = &mut config.actuator.homing;
            if set_limit(&mut homing.limits, key, value)? {
                return Ok(());
            }
            match key {
                "travel_steps" => homing.travel_steps = value.int()?,
                "home_offset" => homing.home_offset = value.int()?,
                "timeout_ms" => homing.timeout_ms = value.int()?,
                "attempts" => homing.attempts = value.int()?,
                "limit_active_high" => homing.limit_active_high = value.boolean()?,
                _ => return Err(ParseErrorKind::UnknownKey),
            }
        }
        Section::Actuator => {
            let actuator = &mut config.actuator;
            if set_limit(&mut actuator.run_limits, key, value)? {
                return Ok(());
            }
            match key {
                "standby_position" => actuator.standby_position = value.int()?,
                "bet_position" => actuator.bet_position = value.int()?,
                _ => return Err(ParseErrorKind::UnknownKey),
            }
        }
        Section::Lights => match key {
            "frame_interval_ticks" => config.lights.frame_interval_ticks = value.int()?,
            "dot_spacing" => config.lights.dot_spacing = value.int()?,
            _ => return Err(ParseErrorKind::UnknownKey),
        },
        Section::Strip(index) => {
            let strip = &mut config.lights.strips[index];
            match key {
                "pin" => strip.pin = value.int()?,
                "len" => strip.len = value.int()?,
                _ => return Err(ParseErrorKind::UnknownKey),
            }
        }
    }
    Ok(())
}
