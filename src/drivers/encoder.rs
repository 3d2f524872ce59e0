//! Rotary Encoder Driver
//!
//! Decodes the encoder's A/B lines on every edge into the shared
//! position counter that the measurement loop samples.

use embassy_futures::select::select;
use embassy_stm32::exti::ExtiInput;

use crate::control::{PositionCounter, QuadratureDecoder};

/// Encoder position shared between the edge task and the main loop
pub static POSITION: PositionCounter = PositionCounter::new();

/// Rotary encoder on two EXTI lines
pub struct Encoder<'d> {
    a: ExtiInput<'d>,
    b: ExtiInput<'d>,
    decoder: QuadratureDecoder,
}

impl<'d> Encoder<'d> {
    /// Create encoder, latching the current pin levels
    #[must_use]
    pub fn new(a: ExtiInput<'d>, b: ExtiInput<'d>) -> Self {
        let decoder = QuadratureDecoder::new(a.is_high(), b.is_high());
        Self { a, b, decoder }
    }

    /// Decode edges into `position` forever
    pub async fn run(&mut self, position: &PositionCounter) -> ! {
        loop {
            select(self.a.wait_for_any_edge(), self.b.wait_for_any_edge()).await;
            let delta = self.decoder.update(self.a.is_high(), self.b.is_high());
            if delta != 0 {
                position.add(delta);
            }
        }
    }
}
