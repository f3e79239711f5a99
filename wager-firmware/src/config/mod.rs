//! Calibration loading
//!
//! The board's prop.toml is embedded at build time (and validated by the
//! build script). Anything the controller cannot run with falls back to
//! the built-in defaults.

use defmt::*;

use wager_core::config::{parse_config, LightsConfig, PropConfig};
use wager_hal_rp2040::{BOX_LEN, FACE_LEN};

/// Board calibration file
const PROP_TOML: &str = include_str!("../../prop.toml");

/// Parse and check the embedded calibration
pub fn load() -> PropConfig {
    let mut config = match parse_config(PROP_TOML) {
        Ok(config) => config,
        Err(e) => {
            error!("prop.toml line {}: {:?}, using defaults", e.line, e.kind);
            return PropConfig::default();
        }
    };

    if let Err(e) = config.validate() {
        error!("Invalid calibration {:?}, using defaults", e);
        return PropConfig::default();
    }

    // Strips are bound to fixed pins and lengths on this board
    let board = LightsConfig::default();
    let wired = [FACE_LEN, FACE_LEN, BOX_LEN];
    let matches = config
        .lights
        .strips
        .iter()
        .zip(board.strips.iter().zip(wired))
        .all(|(strip, (fixed, len))| strip.pin == fixed.pin && strip.len as usize == len);
    if !matches {
        warn!("Strip layout differs from the board wiring, using board layout");
        config.lights.strips = board.strips;
    }

    config
}
