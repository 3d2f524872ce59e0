//! GPIO Abstractions
//!
//! Type-safe GPIO pin wrappers for the SWR meter.
//! Provides semantic meaning to pins through the type system.

use embassy_stm32::gpio::{Input, Output};

/// Status LED state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LedState {
    /// LED is off
    #[default]
    Off,
    /// LED is on
    On,
}

impl defmt::Format for LedState {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Off => defmt::write!(f, "OFF"),
            Self::On => defmt::write!(f, "ON"),
        }
    }
}

/// Carrier indicator LED
pub struct StatusLed<'d> {
    pin: Output<'d>,
    state: LedState,
}

impl<'d> StatusLed<'d> {
    /// Create a new status LED (initially off)
    #[must_use]
    pub fn new(pin: Output<'d>) -> Self {
        Self {
            pin,
            state: LedState::Off,
        }
    }

    /// Drive the LED, touching the pin only on change
    pub fn set(&mut self, on: bool) {
        let state = if on { LedState::On } else { LedState::Off };
        if state == self.state {
            return;
        }
        match state {
            LedState::On => self.pin.set_high(),
            LedState::Off => self.pin.set_low(),
        }
        self.state = state;
    }

    /// Get current state
    #[must_use]
    pub const fn state(&self) -> LedState {
        self.state
    }
}

/// Encoder push button (active low with pull-up)
pub struct EncoderButton<'d> {
    pin: Input<'d>,
}

impl<'d> EncoderButton<'d> {
    /// Create encoder button
    #[must_use]
    pub fn new(pin: Input<'d>) -> Self {
        Self { pin }
    }

    /// Check if pressed
    #[must_use]
    pub fn is_pressed(&self) -> bool {
        self.pin.is_low()
    }
}
