//! Measurement Cycle
//!
//! One pass of the cooperative control loop. The driver owns the
//! samplers and the pipeline stages and mutates the [`Model`] in
//! place; display and serial output are left to the caller, which
//! receives a [`CycleOutcome`] describing what happened.
//!
//! Order within a cycle:
//!
//! 1. apply control inputs (may raise the mode-change flag)
//! 2. sample RSSI and both detectors, unless the mode changed
//! 3. with a carrier present: poll the frequency counter, then run
//!    calibration and metrics and emit a log record, unless the mode
//!    changed
//! 4. without a carrier: clear the record while the button is held
//! 5. close the cycle timing

use crate::control::{self, ControlInputs};
use crate::frequency::FrequencySource;
use crate::measure::calibration::CalibrationCorrector;
use crate::measure::metrics::MetricsEngine;
use crate::measure::sampler::{DetectorSampler, RawChannel, RawSample, RssiSampler};
use crate::model::Model;
use crate::protocol::LogRecord;

/// Result of one cycle
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CycleOutcome {
    /// Screen selection changed; sampling and metrics were skipped
    Skipped,
    /// No carrier present; nothing measured
    Idle,
    /// No carrier present and the button was held; record cleared
    Cleared,
    /// Metrics committed; the record to log
    Measured(LogRecord),
}

#[cfg(feature = "embedded")]
impl defmt::Format for CycleOutcome {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Skipped => defmt::write!(f, "Skipped"),
            Self::Idle => defmt::write!(f, "Idle"),
            Self::Cleared => defmt::write!(f, "Cleared"),
            Self::Measured(record) => defmt::write!(f, "Measured({})", record),
        }
    }
}

/// The meter's per-cycle driver
pub struct Meter<F, R, S> {
    model: Model,
    forward: DetectorSampler<F>,
    reflected: DetectorSampler<R>,
    rssi: RssiSampler<S>,
    corrector: CalibrationCorrector,
    engine: MetricsEngine,
}

impl<F, R, S> Meter<F, R, S>
where
    F: RawChannel,
    R: RawChannel,
    S: RawChannel,
{
    /// Create a meter with the built-in calibration
    #[must_use]
    pub fn new(forward: F, reflected: R, rssi: S, now_ms: u32) -> Self {
        Self::with_calibration(
            forward,
            reflected,
            rssi,
            CalibrationCorrector::default(),
            MetricsEngine::default(),
            now_ms,
        )
    }

    /// Create a meter with explicit calibration stages
    #[must_use]
    pub fn with_calibration(
        forward: F,
        reflected: R,
        rssi: S,
        corrector: CalibrationCorrector,
        engine: MetricsEngine,
        now_ms: u32,
    ) -> Self {
        Self {
            model: Model::new(now_ms).with_coupler(engine.coupling(), engine.directivity()),
            forward: DetectorSampler::new(forward),
            reflected: DetectorSampler::new(reflected),
            rssi: RssiSampler::new(rssi),
            corrector,
            engine,
        }
    }

    /// The measurement record
    #[must_use]
    pub const fn model(&self) -> &Model {
        &self.model
    }

    /// Calibration stage
    #[must_use]
    pub const fn corrector(&self) -> &CalibrationCorrector {
        &self.corrector
    }

    /// Metrics stage
    #[must_use]
    pub const fn engine(&self) -> &MetricsEngine {
        &self.engine
    }

    /// Run one complete cycle
    pub fn run_cycle<Q: FrequencySource>(
        &mut self,
        inputs: ControlInputs,
        frequency: &mut Q,
        now_ms: u32,
    ) -> CycleOutcome {
        let mode_changed = control::apply(&mut self.model, inputs);

        if !mode_changed {
            self.model.set_rssi(self.rssi.sample());
            self.model
                .set_raw(RawSample::acquire(&mut self.forward, &mut self.reflected));
        }

        let outcome = if self.model.is_signal_present() {
            if let Some(freq) = frequency.poll() {
                self.model.set_frequency(freq);
            }
            if mode_changed {
                CycleOutcome::Skipped
            } else {
                self.measure();
                CycleOutcome::Measured(LogRecord::from_model(&self.model, now_ms))
            }
        } else if mode_changed {
            CycleOutcome::Skipped
        } else if self.model.button() {
            self.model.clear();
            CycleOutcome::Cleared
        } else {
            CycleOutcome::Idle
        };

        self.model.end_cycle(now_ms);

        #[cfg(feature = "embedded")]
        match outcome {
            CycleOutcome::Skipped => defmt::debug!("cycle skipped: screen {}", self.model.screen()),
            CycleOutcome::Cleared => defmt::debug!("measurement cleared"),
            CycleOutcome::Measured(_) => defmt::trace!("{}", self.model.metrics()),
            CycleOutcome::Idle => {}
        }

        outcome
    }

    /// Calibrate the stored sample and commit the derived set
    fn measure(&mut self) {
        let freq = self.model.frequency();
        let power = self.corrector.correct(self.model.raw(), freq);
        let metrics = self.engine.derive(power, freq);
        self.model.commit(metrics);
    }
}
