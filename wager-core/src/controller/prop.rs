//! The complete prop: input, mode machine, actuator and lights
//!
//! [`Prop`] owns every component and threads them through one loop
//! iteration in a fixed order: classify input, apply the resulting
//! transition, service the actuator, advance the animation.

use crate::actuator::{ActuatorSequencer, HomingError, HomingReport};
use crate::config::PropConfig;
use crate::input::InputClassifier;
use crate::lights::LightAnimator;
use crate::state::{InputEvent, Mode};
use crate::traits::{Clock, IrDecoder, LedDriver, LedError, LevelInput, MotionDriver};

use super::modes::{ModeController, Transition};

/// What happened during one loop iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepOutcome {
    /// Event classified this iteration
    pub event: InputEvent,
    /// Mode change caused by the event
    pub transition: Option<Transition>,
    /// Actuator still moving after servicing
    pub moving: bool,
    /// Animation result: `Ok(true)` when a frame was transmitted
    pub frame: Result<bool, LedError>,
}

/// Prop controller
pub struct Prop<P, D, M, L, C> {
    input: InputClassifier<P, D>,
    modes: ModeController,
    actuator: ActuatorSequencer<M>,
    lights: LightAnimator,
    leds: L,
    clock: C,
}

impl<P, D, M, L, C> Prop<P, D, M, L, C>
where
    P: LevelInput,
    D: IrDecoder,
    M: MotionDriver,
    L: LedDriver,
    C: Clock,
{
    /// Assemble the prop from its hardware collaborators
    pub fn new(config: &PropConfig, pin: P, decoder: D, motion: M, leds: L, clock: C) -> Self {
        Self {
            input: InputClassifier::new(pin, decoder, &config.input),
            modes: ModeController::new(),
            actuator: ActuatorSequencer::new(motion, config.actuator),
            lights: LightAnimator::new(&config.lights),
            leds,
            clock,
        }
    }

    /// Turn every strip off and transmit immediately
    pub async fn blank(&mut self) -> Result<(), LedError> {
        self.lights.clear(&mut self.leds, true).await
    }

    /// Home the actuator, then enter Standby
    ///
    /// Blocks until the limit switch triggers or homing gives up. On
    /// failure the prop stays in [`Mode::Homing`] and must not be stepped.
    pub fn startup<S: LevelInput>(
        &mut self,
        limit: &S,
    ) -> Result<(HomingReport, Option<Transition>), HomingError> {
        let report = self.actuator.home(limit, &self.clock)?;
        let transition = self.transition(Mode::Standby);
        Ok((report, transition))
    }

    /// Request a mode directly
    pub fn transition(&mut self, requested: Mode) -> Option<Transition> {
        self.modes
            .transition(requested, &mut self.lights, &mut self.actuator)
    }

    /// Run one loop iteration
    pub async fn step(&mut self) -> StepOutcome {
        let event = self.input.poll();
        let transition = self
            .modes
            .handle_event(event, &mut self.lights, &mut self.actuator);
        let moving = self.actuator.service();
        let frame = self.lights.tick(&mut self.leds).await;

        StepOutcome {
            event,
            transition,
            moving,
            frame,
        }
    }

    /// Active mode
    pub fn mode(&self) -> Mode {
        self.modes.current_mode()
    }

    /// Get the input classifier
    pub fn input(&self) -> &InputClassifier<P, D> {
        &self.input
    }

    /// Get the input classifier mutably
    pub fn input_mut(&mut self) -> &mut InputClassifier<P, D> {
        &mut self.input
    }

    /// Get the actuator sequencer
    pub fn actuator(&self) -> &ActuatorSequencer<M> {
        &self.actuator
    }

    /// Get the actuator sequencer mutably
    pub fn actuator_mut(&mut self) -> &mut ActuatorSequencer<M> {
        &mut self.actuator
    }

    /// Get the light animator
    pub fn lights(&self) -> &LightAnimator {
        &self.lights
    }

    /// Get the LED driver
    pub fn leds(&self) -> &L {
        &self.leds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actuator::ActuatorState;
    use crate::input::RemoteButton;
    use crate::lights::strip::OFF;
    use crate::mock::{MockClock, MockDecoder, MockLeds, MockLimit, MockMotion, MockPin, MotionCommand};
    use crate::traits::MotionLimits;
    use embassy_futures::block_on;
    use smart_leds::colors::{GREEN, RED, YELLOW};

    type TestProp<'a> = Prop<&'a MockPin, MockDecoder, MockMotion, MockLeds, MockClock>;

    fn config() -> PropConfig {
        let mut config = PropConfig::default();
        config.input.long_press_iterations = 10;
        config.lights.frame_interval_ticks = 4;
        config
    }

    fn prop(pin: &MockPin) -> TestProp<'_> {
        Prop::new(
            &config(),
            pin,
            MockDecoder::default(),
            MockMotion::default(),
            MockLeds::default(),
            MockClock::auto_advance(1),
        )
    }

    fn started(pin: &MockPin) -> TestProp<'_> {
        let mut prop = prop(pin);
        prop.startup(&MockLimit::triggers_after(0)).unwrap();
        prop
    }

    fn settle(prop: &mut TestProp<'_>) {
        while block_on(prop.step()).moving {}
    }

    fn lit(prop: &TestProp<'_>, strip: usize, color: smart_leds::RGB8) -> usize {
        prop.lights().strips()[strip]
            .cells()
            .iter()
            .filter(|c| **c == color)
            .count()
    }

    fn move_commands(prop: &TestProp<'_>) -> usize {
        prop.actuator()
            .motion()
            .commands
            .iter()
            .filter(|c| matches!(c, MotionCommand::MoveTo(_)))
            .count()
    }

    #[test]
    fn test_blank_transmits_dark_frame() {
        let pin = MockPin::new(true);
        let mut prop = prop(&pin);

        block_on(prop.blank()).unwrap();
        let frame = prop.leds().last_frame().unwrap();
        assert!(frame.iter().flatten().all(|c| *c == OFF));
    }

    #[test]
    fn test_cold_boot_homes_then_enters_standby() {
        let pin = MockPin::new(true);
        let mut prop = prop(&pin);
        assert_eq!(prop.mode(), Mode::Homing);

        let limit = MockLimit::triggers_after(200);
        let (report, transition) = prop.startup(&limit).unwrap();
        assert_eq!(report.travel_steps, 200);

        let transition = transition.unwrap();
        assert_eq!(transition.from, Mode::Homing);
        assert_eq!(transition.to, Mode::Standby);
        assert_eq!(transition.target, Some(-10_000));

        assert_eq!(prop.mode(), Mode::Standby);
        assert_eq!(prop.actuator().state(), ActuatorState::Homed);
        assert_eq!(prop.actuator().motion().limits, MotionLimits::new(10_000, 1_000));
        assert_eq!(lit(&prop, 0, RED), 100);
        assert_eq!(lit(&prop, 1, RED), 100);
        assert_eq!(lit(&prop, 2, RED), 7);
    }

    #[test]
    fn test_failed_homing_stays_in_homing() {
        let pin = MockPin::new(true);
        let mut prop = prop(&pin);

        let err = prop.startup(&MockLimit::never()).unwrap_err();
        assert_eq!(err.attempts(), 2);
        assert_eq!(prop.mode(), Mode::Homing);
        assert_eq!(prop.lights().color(), None);
    }

    #[test]
    fn test_long_press_from_standby_enters_bet() {
        let pin = MockPin::new(true);
        let mut prop = started(&pin);
        settle(&mut prop);

        pin.set_high(false);
        for _ in 0..11 {
            let outcome = block_on(prop.step());
            assert_eq!(outcome.transition, None);
        }

        pin.set_high(true);
        let outcome = block_on(prop.step());
        assert_eq!(outcome.event, InputEvent::LongPress);
        assert_eq!(outcome.transition.unwrap().to, Mode::Bet);
        assert_eq!(prop.actuator().motion().target(), 0);
        assert_eq!(lit(&prop, 0, YELLOW), 100);

        // Exactly one transition
        let outcome = block_on(prop.step());
        assert_eq!(outcome.event, InputEvent::None);
        assert_eq!(outcome.transition, None);
    }

    #[test]
    fn test_remote_ok_in_bet_holds_position() {
        let pin = MockPin::new(true);
        let mut prop = started(&pin);
        prop.transition(Mode::Bet);
        settle(&mut prop);
        let moves = move_commands(&prop);

        prop.input_mut().decoder_mut().push(RemoteButton::Ok.code());
        let outcome = block_on(prop.step());

        assert_eq!(outcome.event, InputEvent::RemoteOk);
        assert_eq!(outcome.transition.unwrap().to, Mode::Win);
        assert!(!outcome.moving);
        assert_eq!(move_commands(&prop), moves);
        assert_eq!(prop.actuator().position(), 0);
        assert_eq!(prop.lights().color(), Some(GREEN));
    }

    #[test]
    fn test_other_remote_keys_change_nothing() {
        let pin = MockPin::new(true);
        let mut prop = started(&pin);
        settle(&mut prop);
        let moves = move_commands(&prop);

        for button in [RemoteButton::Left, RemoteButton::Hash, RemoteButton::Digit(7)] {
            prop.input_mut().decoder_mut().push(button.code());
            let outcome = block_on(prop.step());
            assert_eq!(outcome.event, InputEvent::None);
            assert_eq!(outcome.transition, None);
        }

        assert_eq!(prop.mode(), Mode::Standby);
        assert_eq!(move_commands(&prop), moves);
        assert_eq!(prop.input().decoder().acknowledged, 3);
    }

    #[test]
    fn test_repeated_remote_key_is_idempotent() {
        let pin = MockPin::new(true);
        let mut prop = started(&pin);
        let moves = move_commands(&prop);

        prop.input_mut().decoder_mut().push(RemoteButton::Up.code());
        let outcome = block_on(prop.step());
        assert_eq!(outcome.event, InputEvent::RemoteUp);
        assert_eq!(outcome.transition, None);
        assert_eq!(move_commands(&prop), moves);
    }

    #[test]
    fn test_step_animates_and_moves() {
        let pin = MockPin::new(true);
        let mut prop = started(&pin);

        let frames: Vec<bool> = (0..8)
            .map(|_| block_on(prop.step()).frame.unwrap())
            .collect();
        assert_eq!(frames.iter().filter(|sent| **sent).count(), 2);
        assert_eq!(prop.leds().frames.len(), 2);
        assert_eq!(prop.actuator().position(), 100 - 8);
    }
}
