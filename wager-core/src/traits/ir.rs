//! Infrared remote decoder interface

/// Decoder for an IR remote protocol
///
/// The decoder delivers one complete code at a time. Once a code has been
/// read it stays available until [`acknowledge`](IrDecoder::acknowledge) is
/// called; no further codes are produced in the meantime.
pub trait IrDecoder {
    /// Return the pending decoded code, if any
    fn try_decode(&mut self) -> Option<u64>;

    /// Release the pending code so the next transmission can be decoded
    fn acknowledge(&mut self);
}
