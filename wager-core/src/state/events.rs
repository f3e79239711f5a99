//! Classified input events

use super::mode::Mode;

/// Logical input produced once per loop iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputEvent {
    /// Nothing happened this iteration
    #[default]
    None,
    /// Mechanical button held past the long-press threshold and released
    LongPress,
    /// Remote "up" key
    RemoteUp,
    /// Remote "down" key
    RemoteDown,
    /// Remote "ok" key
    RemoteOk,
}

impl InputEvent {
    /// Mode this event asks for
    ///
    /// No event ever maps back to [`Mode::Homing`].
    pub fn requested_mode(self) -> Option<Mode> {
        match self {
            InputEvent::None => None,
            InputEvent::LongPress => Some(Mode::Bet),
            InputEvent::RemoteUp => Some(Mode::Standby),
            InputEvent::RemoteDown => Some(Mode::Bet),
            InputEvent::RemoteOk => Some(Mode::Win),
        }
    }

    /// Check if this event came from the IR remote
    pub fn is_remote(self) -> bool {
        matches!(
            self,
            InputEvent::RemoteUp | InputEvent::RemoteDown | InputEvent::RemoteOk
        )
    }

    /// Check if this is an actual event
    pub fn is_some(self) -> bool {
        self != InputEvent::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_table() {
        assert_eq!(InputEvent::None.requested_mode(), None);
        assert_eq!(InputEvent::LongPress.requested_mode(), Some(Mode::Bet));
        assert_eq!(InputEvent::RemoteUp.requested_mode(), Some(Mode::Standby));
        assert_eq!(InputEvent::RemoteDown.requested_mode(), Some(Mode::Bet));
        assert_eq!(InputEvent::RemoteOk.requested_mode(), Some(Mode::Win));
    }

    #[test]
    fn test_nothing_requests_homing() {
        let events = [
            InputEvent::None,
            InputEvent::LongPress,
            InputEvent::RemoteUp,
            InputEvent::RemoteDown,
            InputEvent::RemoteOk,
        ];

        for event in events {
            assert_ne!(event.requested_mode(), Some(Mode::Homing));
        }
    }

    #[test]
    fn test_event_source() {
        assert!(InputEvent::RemoteOk.is_remote());
        assert!(!InputEvent::LongPress.is_remote());
        assert!(!InputEvent::None.is_some());
        assert!(InputEvent::LongPress.is_some());
    }
}
