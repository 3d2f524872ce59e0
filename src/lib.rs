//! SWR Meter Firmware Library
//!
//! This library provides the measurement core of an STM32G474-based
//! standing-wave-ratio and power meter. A directional coupler feeds two
//! logarithmic detectors (forward and reflected) read through an
//! external LTC2309 ADC; an RSSI line gates measurement on carrier
//! presence and a prescaled counter supplies the carrier frequency.
//!
//! # Architecture
//!
//! The firmware is organized in layers:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    APPLICATION LAYER                         │
//! │  Meter cycle  │  Screens  │  Serial measurement record       │
//! ├─────────────────────────────────────────────────────────────┤
//! │                  MEASUREMENT PIPELINE                        │
//! │  Sampler  →  CalibrationCorrector  →  MetricsEngine          │
//! ├─────────────────────────────────────────────────────────────┤
//! │                   HAL / DRIVER LAYER                         │
//! │  LTC2309  │  RSSI ADC  │  Counter  │  Encoder  │  SSD1306    │
//! ├─────────────────────────────────────────────────────────────┤
//! │                    RTOS / SCHEDULER                          │
//! │           embassy-rs (async/await executor)                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Design Principles
//!
//! - **Single writer**: the [`model::Model`] is mutated only by the
//!   running cycle; derived values are replaced as one set
//! - **Typed stages**: each pipeline stage consumes the previous
//!   stage's output type
//! - **No unsafe code**: peripheral access goes through embassy
//! - **Functional core, imperative shell**: pure logic separated from I/O
//! - **Defined numeric edges**: saturation instead of NaN or infinity

#![cfg_attr(feature = "embedded", no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Re-export dependencies needed by applications (only in embedded mode)
#[cfg(feature = "embedded")]
pub use embassy_executor;
#[cfg(feature = "embedded")]
pub use embassy_stm32;
#[cfg(feature = "embedded")]
pub use embassy_time;

/// Hardware Abstraction Layer
///
/// Thin wrappers over STM32G474 peripherals.
#[cfg(feature = "embedded")]
pub mod hal;

/// Peripheral Drivers
///
/// Drivers for external ICs (LTC2309, SSD1306) and the encoder.
#[cfg(feature = "embedded")]
pub mod drivers;

/// Measurement Pipeline
///
/// Sampling, calibration and derived metrics.
pub mod measure;

/// Measurement record shared by all stages
pub mod model;

/// Per-cycle driver
pub mod meter;

/// Screen selection and encoder decoding
pub mod control;

/// Frequency counter conversion
pub mod frequency;

/// Serial measurement record
pub mod protocol;

/// Screen layout
pub mod ui;

/// Shared types used across modules
pub mod types;

/// System configuration and constants
pub mod config;

/// Prelude module for common imports
#[cfg(feature = "embedded")]
pub mod prelude {
    //! Convenient re-exports for common types and traits.

    pub use crate::config::*;
    pub use crate::types::*;

    // Embassy
    pub use embassy_time::{Duration, Instant, Timer};

    // Error handling
    pub use core::result::Result;

    // Logging
    pub use defmt::{debug, error, info, trace, warn};
}
