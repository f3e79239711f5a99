//! WS2812 output for the three light strips
//!
//! Each strip gets its own PIO state machine and DMA channel, running the
//! WS2812 program shipped with embassy-rp. Strip lengths are fixed at
//! compile time; buffers of any other length are rejected.

use embassy_futures::join::join3;
use embassy_rp::dma::Channel;
use embassy_rp::pio::{Common, Instance, PioPin, StateMachine};
use embassy_rp::pio_programs::ws2812::{PioWs2812, PioWs2812Program};
use embassy_rp::Peri;
use smart_leds::RGB8;
use wager_core::lights::LightStrip;
use wager_core::traits::{LedDriver, LedError};

/// Cells on each display face
pub const FACE_LEN: usize = 300;

/// Cells on the indicator inside the box
pub const BOX_LEN: usize = 20;

/// Strips in buffer order: left face, right face, box
pub struct PropStrips<'d, P: Instance> {
    left: PioWs2812<'d, P, 0, FACE_LEN>,
    right: PioWs2812<'d, P, 1, FACE_LEN>,
    indicator: PioWs2812<'d, P, 2, BOX_LEN>,
}

impl<'d, P: Instance> PropStrips<'d, P> {
    /// Bind the three strips to their pins
    pub fn new(
        common: &mut Common<'d, P>,
        sms: (StateMachine<'d, P, 0>, StateMachine<'d, P, 1>, StateMachine<'d, P, 2>),
        dma: (
            Peri<'d, impl Channel>,
            Peri<'d, impl Channel>,
            Peri<'d, impl Channel>,
        ),
        left_pin: Peri<'d, impl PioPin>,
        right_pin: Peri<'d, impl PioPin>,
        box_pin: Peri<'d, impl PioPin>,
    ) -> Self {
        let program = PioWs2812Program::new(common);
        Self {
            left: PioWs2812::new(common, sms.0, dma.0, left_pin, &program),
            right: PioWs2812::new(common, sms.1, dma.1, right_pin, &program),
            indicator: PioWs2812::new(common, sms.2, dma.2, box_pin, &program),
        }
    }
}

fn frame<'a, const N: usize>(strip: &'a LightStrip, index: u8) -> Result<&'a [RGB8; N], LedError> {
    strip.cells().try_into().map_err(|_| LedError::LengthMismatch {
        strip: index,
        len: strip.len() as u16,
    })
}

impl<P: Instance> LedDriver for PropStrips<'_, P> {
    async fn transmit(&mut self, strips: &[LightStrip]) -> Result<(), LedError> {
        if strips.len() > 3 {
            return Err(LedError::UnknownStrip(3));
        }

        let left = strips.first().map(|s| frame::<FACE_LEN>(s, 0)).transpose()?;
        let right = strips.get(1).map(|s| frame::<FACE_LEN>(s, 1)).transpose()?;
        let indicator = strips.get(2).map(|s| frame::<BOX_LEN>(s, 2)).transpose()?;

        // All three DMA transfers run at once, the frame takes as long as the longest strip
        let Self {
            left: left_out,
            right: right_out,
            indicator: indicator_out,
        } = self;
        join3(
            async {
                if let Some(cells) = left {
                    left_out.write(cells).await;
                }
            },
            async {
                if let Some(cells) = right {
                    right_out.write(cells).await;
                }
            },
            async {
                if let Some(cells) = indicator {
                    indicator_out.write(cells).await;
                }
            },
        )
        .await;
        Ok(())
    }
}
