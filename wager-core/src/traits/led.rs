//! Addressable LED strip output

use crate::lights::LightStrip;

/// Errors that can occur while pushing colors to the strips
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedError {
    /// Buffer length differs from the length bound to the physical strip
    LengthMismatch {
        /// Strip index
        strip: u8,
        /// Cells in the buffer
        len: u16,
    },
    /// More buffers than bound strips
    UnknownStrip(u8),
    /// Transmission failed
    WriteFailed,
}

/// LED transmission driver
///
/// Strips are bound to their physical pins when the driver is constructed,
/// in the same order as the animator's buffers.
#[allow(async_fn_in_trait)]
pub trait LedDriver {
    /// Push every buffer to its strip
    async fn transmit(&mut self, strips: &[LightStrip]) -> Result<(), LedError>;
}
