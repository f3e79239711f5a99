//! NEC infrared protocol decoder
//!
//! The decoder is a pure state machine fed with the width of each level
//! the receiver output held. It never touches a pin or a timer, so the
//! caller decides how edges are captured (interrupt, edge-wait task, or a
//! recorded trace in tests).
//!
//! # Frame
//!
//! ```text
//! [Lead mark][Lead space][32 data bits, MSB first]
//!    9 ms       4.5 ms    560 us mark + 560 us (0) or 1690 us (1) space
//! ```
//!
//! A 2.25 ms lead space marks a repeat frame, which carries no data and is
//! ignored. The 32 bits are delivered as-is (address, inverted address,
//! command, inverted command) because the remote's key table is keyed by
//! the full value.
//!
//! A decoded frame is held until [`IrDecoder::acknowledge`]; any frame
//! received in the meantime is discarded.

use wager_core::traits::IrDecoder;

/// One level held by the receiver output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pulse {
    /// Carrier present (receiver output low), width in microseconds
    Mark(u32),
    /// Carrier absent (receiver output high), width in microseconds
    Space(u32),
}

impl Pulse {
    /// Pulse for a level that just ended
    ///
    /// `was_low` is the level held during the `width_us` that ended at
    /// this edge.
    pub fn ended(was_low: bool, width_us: u32) -> Self {
        if was_low {
            Pulse::Mark(width_us)
        } else {
            Pulse::Space(width_us)
        }
    }
}

/// Pulse width windows in microseconds (inclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NecTiming {
    pub lead_mark: (u32, u32),
    pub lead_space: (u32, u32),
    pub repeat_space: (u32, u32),
    pub bit_mark: (u32, u32),
    pub bit_space: (u32, u32),
    /// Spaces longer than this are a logical 1
    pub one_threshold: u32,
}

impl NecTiming {
    /// Windows for standard NEC remotes
    pub const STANDARD: Self = Self {
        lead_mark: (8_000, 10_000),
        lead_space: (3_500, 5_000),
        repeat_space: (1_750, 2_750),
        bit_mark: (200, 1_000),
        bit_space: (200, 2_500),
        one_threshold: 1_200,
    };
}

impl Default for NecTiming {
    fn default() -> Self {
        Self::STANDARD
    }
}

fn within(width: u32, (min, max): (u32, u32)) -> bool {
    (min..=max).contains(&width)
}

/// Receive state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum State {
    /// Waiting for a lead mark
    Idle,
    /// Lead mark seen, waiting for the lead space
    Lead,
    /// Expecting the mark of bit `bits`
    BitMark { bits: u8, value: u32 },
    /// Expecting the space of bit `bits`
    BitSpace { bits: u8, value: u32 },
}

/// NEC frame decoder
pub struct NecDecoder {
    timing: NecTiming,
    state: State,
    /// Decoded frame awaiting acknowledgement
    pending: Option<u32>,
    /// Frames discarded because one was already pending
    dropped: u32,
    /// Frames abandoned on an out-of-window pulse
    errors: u32,
}

impl Default for NecDecoder {
    fn default() -> Self {
        Self::new(NecTiming::default())
    }
}

impl NecDecoder {
    /// Create a decoder with custom timing windows
    pub const fn new(timing: NecTiming) -> Self {
        Self {
            timing,
            state: State::Idle,
            pending: None,
            dropped: 0,
            errors: 0,
        }
    }

    /// Feed the width of one level
    ///
    /// Returns the frame value when this pulse completed a frame that was
    /// accepted as pending.
    pub fn feed(&mut self, pulse: Pulse) -> Option<u32> {
        let t = self.timing;

        self.state = match (self.state, pulse) {
            (State::Idle, Pulse::Mark(w)) if within(w, t.lead_mark) => State::Lead,
            (State::Idle, _) => State::Idle,

            (State::Lead, Pulse::Space(w)) if within(w, t.lead_space) => {
                State::BitMark { bits: 0, value: 0 }
            }
            // Repeat frames carry no data
            (State::Lead, Pulse::Space(w)) if within(w, t.repeat_space) => State::Idle,

            (State::BitMark { bits, value }, Pulse::Mark(w)) if within(w, t.bit_mark) => {
                State::BitSpace { bits, value }
            }

            (State::BitSpace { bits, value }, Pulse::Space(w)) if within(w, t.bit_space) => {
                let value = (value << 1) | u32::from(w > t.one_threshold);
                let bits = bits + 1;
                if bits == 32 {
                    self.state = State::Idle;
                    return self.complete(value);
                }
                State::BitMark { bits, value }
            }

            // Out of window: a lead mark may start the next frame
            (_, pulse) => {
                self.errors = self.errors.wrapping_add(1);
                match pulse {
                    Pulse::Mark(w) if within(w, t.lead_mark) => State::Lead,
                    _ => State::Idle,
                }
            }
        };
        None
    }

    fn complete(&mut self, value: u32) -> Option<u32> {
        if self.pending.is_some() {
            self.dropped = self.dropped.wrapping_add(1);
            return None;
        }
        self.pending = Some(value);
        Some(value)
    }

    /// Drop any partially received frame
    pub fn reset(&mut self) {
        self.state = State::Idle;
    }

    /// Check if a frame is being received
    pub fn is_receiving(&self) -> bool {
        self.state != State::Idle
    }

    /// Frames discarded while another was pending
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    /// Frames abandoned on a malformed pulse
    pub fn errors(&self) -> u32 {
        self.errors
    }
}

impl IrDecoder for NecDecoder {
    fn try_decode(&mut self) -> Option<u64> {
        self.pending.map(u64::from)
    }

    fn acknowledge(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const UP: u32 = 0x00FF_18E7;
    const OK: u32 = 0x00FF_38C7;

    fn frame(value: u32) -> Vec<Pulse> {
        let mut pulses = vec![Pulse::Mark(9_000), Pulse::Space(4_500)];
        for bit in (0..32).rev() {
            pulses.push(Pulse::Mark(560));
            let space = if value & (1 << bit) != 0 { 1_690 } else { 560 };
            pulses.push(Pulse::Space(space));
        }
        pulses
    }

    fn feed_all(decoder: &mut NecDecoder, pulses: &[Pulse]) -> Option<u32> {
        pulses.iter().fold(None, |done, p| decoder.feed(*p).or(done))
    }

    #[test]
    fn test_decodes_frame() {
        let mut decoder = NecDecoder::default();
        assert_eq!(feed_all(&mut decoder, &frame(UP)), Some(UP));
        assert_eq!(decoder.try_decode(), Some(0xFF18E7));
        assert!(!decoder.is_receiving());
    }

    #[test]
    fn test_code_held_until_acknowledged() {
        let mut decoder = NecDecoder::default();
        feed_all(&mut decoder, &frame(UP));

        assert_eq!(decoder.try_decode(), Some(UP as u64));
        assert_eq!(decoder.try_decode(), Some(UP as u64));
        decoder.acknowledge();
        assert_eq!(decoder.try_decode(), None);
    }

    #[test]
    fn test_frame_while_pending_is_dropped() {
        let mut decoder = NecDecoder::default();
        feed_all(&mut decoder, &frame(UP));
        assert_eq!(feed_all(&mut decoder, &frame(OK)), None);
        assert_eq!(decoder.dropped(), 1);
        assert_eq!(decoder.try_decode(), Some(UP as u64));

        decoder.acknowledge();
        assert_eq!(feed_all(&mut decoder, &frame(OK)), Some(OK));
    }

    #[test]
    fn test_repeat_frame_is_ignored() {
        let mut decoder = NecDecoder::default();
        let repeat = [Pulse::Mark(9_000), Pulse::Space(2_250), Pulse::Mark(560)];
        assert_eq!(feed_all(&mut decoder, &repeat), None);
        assert_eq!(decoder.try_decode(), None);
        assert!(!decoder.is_receiving());
    }

    #[test]
    fn test_button_hold_is_not_a_frame() {
        let mut decoder = NecDecoder::default();
        // A held button is one very long mark
        assert_eq!(decoder.feed(Pulse::Mark(3_000_000)), None);
        assert_eq!(decoder.feed(Pulse::Space(100_000)), None);
        assert!(!decoder.is_receiving());
    }

    #[test]
    fn test_bad_bit_abandons_frame() {
        let mut decoder = NecDecoder::default();
        let mut pulses = frame(UP);
        pulses[11] = Pulse::Space(5_000);

        assert_eq!(feed_all(&mut decoder, &pulses), None);
        assert_eq!(decoder.try_decode(), None);
        assert!(decoder.errors() > 0);
    }

    #[test]
    fn test_reset_drops_partial_frame() {
        let mut decoder = NecDecoder::default();
        let pulses = frame(UP);
        feed_all(&mut decoder, &pulses[..20]);
        assert!(decoder.is_receiving());

        decoder.reset();
        assert!(!decoder.is_receiving());
        assert_eq!(feed_all(&mut decoder, &pulses[20..]), None);
        assert_eq!(decoder.try_decode(), None);
        assert_eq!(feed_all(&mut decoder, &frame(OK)), Some(OK));
    }

    #[test]
    fn test_resyncs_on_lead_mark() {
        let mut decoder = NecDecoder::default();
        let mut pulses = frame(UP)[..20].to_vec();
        pulses.extend(frame(OK));

        assert_eq!(feed_all(&mut decoder, &pulses), Some(OK));
    }

    #[test]
    fn test_pulse_from_edge() {
        assert_eq!(Pulse::ended(true, 560), Pulse::Mark(560));
        assert_eq!(Pulse::ended(false, 1_690), Pulse::Space(1_690));
    }

    proptest! {
        #[test]
        fn decodes_any_value(value in any::<u32>()) {
            let mut decoder = NecDecoder::default();
            prop_assert_eq!(feed_all(&mut decoder, &frame(value)), Some(value));
        }
    }
}
