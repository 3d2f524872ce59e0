//! Input Selection Control
//!
//! The rotary encoder selects the displayed screen. Edge decoding runs
//! on the interrupt side and only touches a shared atomic counter; the
//! measurement cycle reads that counter once per pass and turns it into
//! a screen selection plus the mode-change flag that gates the pipeline.

use core::sync::atomic::{AtomicI32, Ordering};

use crate::config::ENCODER_COUNTS_PER_DETENT_SHIFT;
use crate::model::Model;
use crate::types::Screen;

/// Encoder position shared between the edge producer and the cycle
///
/// Written from interrupt context, read by the measurement loop.
pub struct PositionCounter {
    count: AtomicI32,
}

impl PositionCounter {
    /// Create a counter at zero
    #[must_use]
    pub const fn new() -> Self {
        Self {
            count: AtomicI32::new(0),
        }
    }

    /// Add a signed edge count
    pub fn add(&self, delta: i32) {
        if delta != 0 {
            self.count.fetch_add(delta, Ordering::Relaxed);
        }
    }

    /// Current count in quadrature edges
    #[must_use]
    pub fn read(&self) -> i32 {
        self.count.load(Ordering::Relaxed)
    }

    /// Current position in detents
    #[must_use]
    pub fn detent(&self) -> i32 {
        self.read() >> ENCODER_COUNTS_PER_DETENT_SHIFT
    }
}

impl Default for PositionCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// Full-resolution quadrature decoder
///
/// Counts every valid edge of the A/B pair (four per detent), positive
/// for the clockwise sequence 00 -> 01 -> 11 -> 10. Invalid double
/// transitions are ignored.
#[derive(Clone, Copy, Debug, Default)]
pub struct QuadratureDecoder {
    last: u8,
}

impl QuadratureDecoder {
    /// Indexed by `(previous << 2) | current`, with state `(a << 1) | b`
    const TRANSITIONS: [i8; 16] = [0, 1, -1, 0, -1, 0, 0, 1, 1, 0, 0, -1, 0, -1, 1, 0];

    /// Create a decoder for the given initial pin levels
    #[must_use]
    pub const fn new(a: bool, b: bool) -> Self {
        Self {
            last: Self::state(a, b),
        }
    }

    const fn state(a: bool, b: bool) -> u8 {
        ((a as u8) << 1) | (b as u8)
    }

    /// Feed new pin levels, returns the edge count (-1, 0 or +1)
    pub fn update(&mut self, a: bool, b: bool) -> i32 {
        let next = Self::state(a, b);
        let index = usize::from((self.last << 2) | next);
        self.last = next;
        i32::from(Self::TRANSITIONS[index])
    }
}

/// Inputs sampled from the control surface once per cycle
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ControlInputs {
    /// Encoder position in detents
    pub detent: i32,
    /// Encoder button held
    pub button: bool,
}

impl ControlInputs {
    /// Read the shared counter and the button level
    #[must_use]
    pub fn sample(counter: &PositionCounter, button: bool) -> Self {
        Self {
            detent: counter.detent(),
            button,
        }
    }
}

/// Apply this cycle's control inputs to the record
///
/// A detent that differs from the last accepted one and names a screen
/// selects it and raises the mode-change flag for this cycle only.
/// Returns whether the selection changed.
pub fn apply(model: &mut Model, inputs: ControlInputs) -> bool {
    model.begin_cycle();

    if model.detent() != Some(inputs.detent) {
        if let Some(screen) = Screen::from_detent(inputs.detent) {
            model.select_screen(inputs.detent, screen);
        }
    }

    if model.button() != inputs.button {
        model.set_button(inputs.button);
    }

    model.mode_changed()
}
