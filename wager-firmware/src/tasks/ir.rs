//! Shared IR/button line task
//!
//! Waits on every edge of the line, publishes the new level for the
//! long-press detector and feeds the width of the level that just ended to
//! the NEC decoder.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::Instant;

use wager_drivers::ir::Pulse;
use wager_hal_rp2040::SharedLevel;

use crate::channels::{IR_DECODER, IR_LINE_HIGH};

#[embassy_executor::task]
pub async fn ir_task(mut line: Input<'static>) {
    info!("IR task started");

    let mut high = line.is_high();
    let mut since = Instant::now();
    SharedLevel::publish(&IR_LINE_HIGH, high);

    loop {
        line.wait_for_any_edge().await;
        let now = Instant::now();

        let level = line.is_high();
        if level == high {
            // Glitch shorter than the edge latency, pulse widths are lost
            IR_DECODER.lock(|decoder| decoder.borrow_mut().reset());
            continue;
        }

        let width_us = (now - since).as_micros().min(u32::MAX as u64) as u32;
        let pulse = Pulse::ended(!high, width_us);
        high = level;
        since = now;
        SharedLevel::publish(&IR_LINE_HIGH, high);

        if let Some(code) = IR_DECODER.lock(|decoder| decoder.borrow_mut().feed(pulse)) {
            debug!("IR frame {=u32:#010x}", code);
        }
    }
}
