//! Measurement Pipeline
//!
//! The three per-cycle stages, leaves first. Each stage consumes the
//! previous stage's output type, so the evaluation order is fixed by
//! the types rather than by call order:
//!
//! ```text
//! RawChannel ──► Sampler ──► RawSample
//!                               │
//!                  CalibrationCorrector ──► CorrectedPower
//!                                               │
//!                                 MetricsEngine ──► DerivedMetrics
//! ```

pub mod calibration;
pub mod metrics;
pub mod sampler;

pub use calibration::{CalibrationCorrector, CorrectedPower, CouplerResponse, DetectorCalibration};
pub use metrics::{DerivedMetrics, MetricsEngine};
pub use sampler::{DetectorSampler, RawChannel, RawSample, RssiSampler};
