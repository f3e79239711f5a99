//! State shared between tasks
//!
//! The IR edge task owns the shared IR/button pin. It publishes the pin
//! level and feeds the NEC decoder; the control task reads both through
//! the handles below.

use core::cell::{Cell, RefCell};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use portable_atomic::{AtomicBool, AtomicU32};

use wager_core::state::Mode;
use wager_core::traits::IrDecoder;
use wager_drivers::ir::{NecDecoder, NecTiming};

/// Level of the shared IR/button line (pulled up, idle high)
pub static IR_LINE_HIGH: AtomicBool = AtomicBool::new(true);

/// NEC decoder fed by the IR edge task
pub static IR_DECODER: Mutex<CriticalSectionRawMutex, RefCell<NecDecoder>> =
    Mutex::new(RefCell::new(NecDecoder::new(NecTiming::STANDARD)));

/// Control loop iterations, for the heartbeat's loop rate
pub static LOOP_COUNT: AtomicU32 = AtomicU32::new(0);

/// Mode last reported by the control task
pub static CURRENT_MODE: Mutex<CriticalSectionRawMutex, Cell<Mode>> =
    Mutex::new(Cell::new(Mode::Homing));

/// Control-task handle to the shared decoder
pub struct SharedDecoder;

impl IrDecoder for SharedDecoder {
    fn try_decode(&mut self) -> Option<u64> {
        IR_DECODER.lock(|decoder| decoder.borrow_mut().try_decode())
    }

    fn acknowledge(&mut self) {
        IR_DECODER.lock(|decoder| decoder.borrow_mut().acknowledge());
    }
}
