//! Control task
//!
//! Clears the strips, homes the actuator, then runs the
//! poll-transition-service-animate loop forever. Homing blocks the whole
//! executor; nothing else may run until the actuator position is known.

use defmt::*;
use embassy_futures::yield_now;
use embassy_rp::gpio::Output;
use embassy_rp::peripherals::PIO0;
use embassy_time::{Delay, Timer};
use portable_atomic::Ordering;

use wager_core::controller::Prop;
use wager_core::traits::MotionDriver;
use wager_drivers::stepper::StepDirStepper;
use wager_hal_rp2040::{EmbassyClock, LimitSwitch, PropStrips, SharedLevel};

use crate::channels::{SharedDecoder, CURRENT_MODE, LOOP_COUNT};

/// Actuator driver on this board
pub type PropStepper = StepDirStepper<Output<'static>, Output<'static>, Delay, EmbassyClock>;

/// The prop as wired on this board
pub type BoardProp =
    Prop<SharedLevel, SharedDecoder, PropStepper, PropStrips<'static, PIO0>, EmbassyClock>;

#[embassy_executor::task]
pub async fn control_task(prop: &'static mut BoardProp, limit: LimitSwitch<'static>) {
    info!("Control task started");

    if let Err(e) = prop.blank().await {
        warn!("Failed to clear strips: {:?}", e);
    }

    info!("Homing...");
    match prop.startup(&limit) {
        Ok((report, _)) => {
            info!(
                "Homed on attempt {} after {} steps in {} ms",
                report.attempt, report.travel_steps, report.elapsed_ms
            );
        }
        Err(e) => {
            error!("Homing failed: {:?}", e);
            park(prop).await;
        }
    }
    publish_mode(prop);
    info!("Entering {:?}", prop.mode());

    loop {
        let outcome = prop.step().await;
        LOOP_COUNT.fetch_add(1, Ordering::Relaxed);

        if let Some(transition) = outcome.transition {
            info!(
                "{:?} -> {:?} on {:?}",
                transition.from, transition.to, outcome.event
            );
            if let Some(target) = transition.target {
                debug!("Actuator target {}", target);
            }
            publish_mode(prop);
        }

        if let Err(e) = outcome.frame {
            warn!("LED transmit failed: {:?}", e);
        }

        // Let the IR edge task run
        yield_now().await;
    }
}

fn publish_mode(prop: &BoardProp) {
    let mode = prop.mode();
    CURRENT_MODE.lock(|current| current.set(mode));
}

/// Disable the actuator and stay idle
async fn park(prop: &mut BoardProp) -> ! {
    let stepper = prop.actuator_mut().motion_mut();
    stepper.set_enabled(false);
    warn!("Actuator parked at {}", stepper.position());

    loop {
        Timer::after_secs(10).await;
        error!("Homing failed, power cycle to retry");
    }
}
