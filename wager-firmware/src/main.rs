//! Wager - Bet/Win Prop Controller Firmware
//!
//! Main firmware binary for the RP2040 board inside the prop. The board
//! reads a shared IR/button line, drives the lift actuator through a
//! step/dir driver and animates the three WS2812 strips.
//!
//! Wiring:
//! - GPIO3: IR receiver and bet button (shared, pulled up)
//! - GPIO5: actuator limit switch (normally closed to ground, pulled up)
//! - GPIO0 / GPIO4: STEP / DIR
//! - GPIO12 / GPIO14: left / right face strips, GPIO13: box indicator

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::PIO0;
use embassy_rp::pio::{InterruptHandler as PioInterruptHandler, Pio};
use embassy_time::{Delay, Duration, Ticker};
use portable_atomic::Ordering;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use wager_core::controller::Prop;
use wager_drivers::stepper::{StepDirConfig, StepDirStepper};
use wager_hal_rp2040::{EmbassyClock, LimitSwitch, PropStrips, SharedLevel};

use crate::channels::{SharedDecoder, CURRENT_MODE, IR_DECODER, IR_LINE_HIGH, LOOP_COUNT};
use crate::tasks::BoardProp;

mod channels;
mod config;
mod tasks;

bind_interrupts!(struct Irqs {
    PIO0_IRQ_0 => PioInterruptHandler<PIO0>;
});

/// Heartbeat log interval
const HEARTBEAT_SECS: u64 = 10;

static PROP: StaticCell<BoardProp> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Wager prop controller starting...");

    let p = embassy_rp::init(Default::default());

    let config = config::load();
    info!(
        "Calibration: long press {} iterations, standby {} / bet {} steps",
        config.input.long_press_iterations,
        config.actuator.standby_position,
        config.actuator.bet_position
    );

    // Shared IR/button line, owned by the IR task
    let ir_line = Input::new(p.PIN_3, Pull::Up);

    // Limit switch
    let limit = LimitSwitch::new(Input::new(p.PIN_5, Pull::Up));

    // Actuator
    let stepper = StepDirStepper::new(
        Output::new(p.PIN_0, Level::Low),
        Output::new(p.PIN_4, Level::Low),
        Delay,
        EmbassyClock,
        StepDirConfig::default(),
    );

    // Strips on PIO0, one state machine and DMA channel each
    let Pio {
        mut common,
        sm0,
        sm1,
        sm2,
        ..
    } = Pio::new(p.PIO0, Irqs);
    let strips = PropStrips::new(
        &mut common,
        (sm0, sm1, sm2),
        (p.DMA_CH0, p.DMA_CH1, p.DMA_CH2),
        p.PIN_12,
        p.PIN_14,
        p.PIN_13,
    );
    info!("Strips bound to PIO0");

    let prop = PROP.init(Prop::new(
        &config,
        SharedLevel::new(&IR_LINE_HIGH),
        SharedDecoder,
        stepper,
        strips,
        EmbassyClock,
    ));

    spawner.spawn(tasks::ir_task(ir_line)).unwrap();
    spawner.spawn(tasks::control_task(prop, limit)).unwrap();

    info!("All tasks spawned, firmware running");

    // PIO common resources must outlive the strips
    let _common = common;

    let mut ticker = Ticker::every(Duration::from_secs(HEARTBEAT_SECS));
    loop {
        ticker.next().await;

        let loops = LOOP_COUNT.swap(0, Ordering::Relaxed);
        let mode = CURRENT_MODE.lock(|mode| mode.get());
        let (dropped, errors) = IR_DECODER.lock(|decoder| {
            let decoder = decoder.borrow();
            (decoder.dropped(), decoder.errors())
        });
        info!(
            "Heartbeat: {:?}, {} loops/s, IR dropped {} malformed {}",
            mode,
            loops / HEARTBEAT_SECS as u32,
            dropped,
            errors
        );
    }
}
