//! Hardware Abstraction Layer
//!
//! Provides safe abstractions over STM32G474 peripherals.
//! This module isolates hardware-specific code from the measurement
//! core, which only sees the `RawChannel` and `FrequencySource` traits.

pub mod adc;
pub mod counter;
pub mod gpio;
pub mod serial;
