//! Shared-pin arbitration
//!
//! Samples the shared pin and the IR decoder once per call and resolves
//! them into a single event. When a meaningful remote key and a long-press
//! release land in the same call, the remote key wins and the press is
//! dropped. There is no event queue.

use crate::config::InputConfig;
use crate::state::InputEvent;
use crate::traits::{IrDecoder, LevelInput};

use super::press::PressDetector;
use super::remote::RemoteButton;

/// Input classifier for the shared IR/button line
pub struct InputClassifier<P, D> {
    /// Shared pin (pulled up, low while pressed or during IR pulses)
    pin: P,
    /// IR decoder listening on the same line
    decoder: D,
    /// Long-press detector
    press: PressDetector,
    /// Code decoded during the last poll, for diagnostics
    last_code: Option<u64>,
}

impl<P: LevelInput, D: IrDecoder> InputClassifier<P, D> {
    /// Create a classifier
    pub fn new(pin: P, decoder: D, config: &InputConfig) -> Self {
        Self {
            pin,
            decoder,
            press: PressDetector::new(config.long_press_iterations),
            last_code: None,
        }
    }

    /// Classify this iteration's input
    ///
    /// Never blocks. Returns [`InputEvent::None`] when nothing happened.
    pub fn poll(&mut self) -> InputEvent {
        let long_press = self.press.sample(self.pin.is_low());

        self.last_code = self.decoder.try_decode();
        let remote = match self.last_code {
            Some(code) => {
                self.decoder.acknowledge();
                RemoteButton::from_code(code).map_or(InputEvent::None, RemoteButton::event)
            }
            None => InputEvent::None,
        };

        if remote.is_some() {
            remote
        } else if long_press {
            InputEvent::LongPress
        } else {
            InputEvent::None
        }
    }

    /// Raw code decoded during the last poll (recognized or not)
    pub fn last_code(&self) -> Option<u64> {
        self.last_code
    }

    /// Long-press detector state
    pub fn press(&self) -> &PressDetector {
        &self.press
    }

    /// Get the IR decoder
    pub fn decoder(&self) -> &D {
        &self.decoder
    }

    /// Get the IR decoder mutably
    pub fn decoder_mut(&mut self) -> &mut D {
        &mut self.decoder
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockDecoder, MockPin};

    fn classifier(pin: &MockPin, threshold: u32) -> InputClassifier<&MockPin, MockDecoder> {
        let config = InputConfig {
            long_press_iterations: threshold,
        };
        InputClassifier::new(pin, MockDecoder::default(), &config)
    }

    #[test]
    fn test_idle_line_produces_nothing() {
        let pin = MockPin::new(true);
        let mut input = classifier(&pin, 5);

        for _ in 0..20 {
            assert_eq!(input.poll(), InputEvent::None);
        }
    }

    #[test]
    fn test_long_press_on_release_only() {
        let pin = MockPin::new(false);
        let mut input = classifier(&pin, 5);

        for _ in 0..6 {
            assert_eq!(input.poll(), InputEvent::None);
        }
        assert_eq!(input.press().low_count(), 6);

        pin.set_high(true);
        assert_eq!(input.poll(), InputEvent::LongPress);
        assert_eq!(input.poll(), InputEvent::None);
    }

    #[test]
    fn test_short_low_is_ignored() {
        let pin = MockPin::new(false);
        let mut input = classifier(&pin, 5);

        for _ in 0..5 {
            input.poll();
        }
        pin.set_high(true);
        assert_eq!(input.poll(), InputEvent::None);
        assert_eq!(input.press().low_count(), 0);
    }

    #[test]
    fn test_remote_codes_are_acknowledged() {
        let pin = MockPin::new(true);
        let mut input = classifier(&pin, 5);

        input.decoder.push(RemoteButton::Ok.code());
        assert_eq!(input.poll(), InputEvent::RemoteOk);
        assert_eq!(input.decoder().acknowledged, 1);
        assert_eq!(input.last_code(), Some(RemoteButton::Ok.code()));

        assert_eq!(input.poll(), InputEvent::None);
        assert_eq!(input.last_code(), None);
    }

    #[test]
    fn test_unrecognized_code_is_dropped() {
        let pin = MockPin::new(true);
        let mut input = classifier(&pin, 5);

        input.decoder.push(0x1234_5678);
        assert_eq!(input.poll(), InputEvent::None);
        assert_eq!(input.decoder().acknowledged, 1);

        input.decoder.push(RemoteButton::Star.code());
        assert_eq!(input.poll(), InputEvent::None);
        assert_eq!(input.decoder().acknowledged, 2);
    }

    #[test]
    fn test_remote_wins_over_long_press() {
        let pin = MockPin::new(false);
        let mut input = classifier(&pin, 2);

        for _ in 0..3 {
            input.poll();
        }
        pin.set_high(true);
        input.decoder.push(RemoteButton::Up.code());

        assert_eq!(input.poll(), InputEvent::RemoteUp);
        // The press was consumed with the counter reset
        assert_eq!(input.press().low_count(), 0);
        assert_eq!(input.poll(), InputEvent::None);
    }

    #[test]
    fn test_ignored_code_does_not_mask_long_press() {
        let pin = MockPin::new(false);
        let mut input = classifier(&pin, 2);

        for _ in 0..3 {
            input.poll();
        }
        pin.set_high(true);
        input.decoder.push(RemoteButton::Digit(4).code());

        assert_eq!(input.poll(), InputEvent::LongPress);
    }
}
