//! Mode definition

use smart_leds::RGB8;

/// Operating modes of the prop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Power-on reference search; left exactly once at startup
    #[default]
    Homing,
    /// Waiting for a bet, actuator retracted
    Standby,
    /// Bet placed, actuator at the bet position
    Bet,
    /// Win announced, actuator holds where it is
    Win,
}

impl Mode {
    /// Strip color for this mode (`None` leaves the strips untouched)
    pub fn color(self) -> Option<RGB8> {
        use smart_leds::colors::{GREEN, RED, YELLOW};

        match self {
            Mode::Homing => None,
            Mode::Standby => Some(RED),
            Mode::Bet => Some(YELLOW),
            Mode::Win => Some(GREEN),
        }
    }

    /// Check if this mode is part of normal operation (after homing)
    pub fn is_operational(self) -> bool {
        !matches!(self, Mode::Homing)
    }
}
