//! Remote control key codes
//!
//! Codes are 32-bit NEC frames (address, inverted address, command,
//! inverted command) accumulated MSB first, as the receiver reports them.

use crate::state::InputEvent;

/// Keys of the prop's 17-key NEC remote
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RemoteButton {
    Up,
    Down,
    Left,
    Right,
    Ok,
    Star,
    Hash,
    Digit(u8),
}

const CODE_UP: u64 = 0xFF18E7;
const CODE_DOWN: u64 = 0xFF4AB5;
const CODE_LEFT: u64 = 0xFF10EF;
const CODE_RIGHT: u64 = 0xFF5AA5;
const CODE_OK: u64 = 0xFF38C7;
const CODE_STAR: u64 = 0xFF6897;
const CODE_HASH: u64 = 0xFFB04F;

/// Digit key codes, indexed by digit
const CODE_DIGITS: [u64; 10] = [
    0xFF9867, 0xFFA25D, 0xFF629D, 0xFFE21D, 0xFF22DD, 0xFF02FD, 0xFFC23D, 0xFFE01F, 0xFFA857,
    0xFF906F,
];

impl RemoteButton {
    /// Look up a decoded code
    pub fn from_code(code: u64) -> Option<Self> {
        match code {
            CODE_UP => Some(RemoteButton::Up),
            CODE_DOWN => Some(RemoteButton::Down),
            CODE_LEFT => Some(RemoteButton::Left),
            CODE_RIGHT => Some(RemoteButton::Right),
            CODE_OK => Some(RemoteButton::Ok),
            CODE_STAR => Some(RemoteButton::Star),
            CODE_HASH => Some(RemoteButton::Hash),
            _ => CODE_DIGITS
                .iter()
                .position(|&c| c == code)
                .map(|digit| RemoteButton::Digit(digit as u8)),
        }
    }

    /// Code transmitted for this key
    pub fn code(self) -> u64 {
        match self {
            RemoteButton::Up => CODE_UP,
            RemoteButton::Down => CODE_DOWN,
            RemoteButton::Left => CODE_LEFT,
            RemoteButton::Right => CODE_RIGHT,
            RemoteButton::Ok => CODE_OK,
            RemoteButton::Star => CODE_STAR,
            RemoteButton::Hash => CODE_HASH,
            RemoteButton::Digit(d) => CODE_DIGITS[(d as usize).min(9)],
        }
    }

    /// Input event for this key; only Up, Down and Ok drive the prop
    pub fn event(self) -> InputEvent {
        match self {
            RemoteButton::Up => InputEvent::RemoteUp,
            RemoteButton::Down => InputEvent::RemoteDown,
            RemoteButton::Ok => InputEvent::RemoteOk,
            _ => InputEvent::None,
        }
    }
}
