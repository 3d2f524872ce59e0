//! Detector and Coupler Calibration
//!
//! Frequency-dependent correction of the detector codes and the
//! conversion from corrected detector voltage to dBm.

use crate::config::calibration::{FORWARD_DETECTOR, REFLECTED_DETECTOR};
use crate::measure::sampler::RawSample;
use crate::types::{DetectorCode, Frequency};

/// Two-stage linear calibration of one logarithmic detector
///
/// Stage one removes the frequency drift of the detector response,
/// stage two maps the corrected voltage onto dBm.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DetectorCalibration {
    /// Drift in mV per kHz
    pub drift_slope: f32,
    /// Drift at 0 kHz in mV
    pub drift_offset: f32,
    /// Fit slope in dB per mV
    pub slope: f32,
    /// Fit intercept in dBm
    pub intercept: f32,
}

impl DetectorCalibration {
    /// Remove the frequency drift from a detector voltage
    #[must_use]
    pub fn adjust(&self, raw_voltage: f32, frequency_khz: f32) -> f32 {
        raw_voltage - (self.drift_slope * frequency_khz + self.drift_offset)
    }

    /// Frequency-correct a detector voltage and convert it to dBm
    #[must_use]
    pub fn correct(&self, raw_voltage: f32, frequency_khz: f32) -> f32 {
        self.slope * self.adjust(raw_voltage, frequency_khz) + self.intercept
    }
}

/// Second-order polynomial in frequency describing a coupler property
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CouplerResponse {
    /// Coefficient of f² (dB / kHz²)
    pub quadratic: f32,
    /// Coefficient of f (dB / kHz)
    pub linear: f32,
    /// Constant term in dB
    pub constant: f32,
}

impl CouplerResponse {
    /// Evaluate at a frequency, using its precomputed square
    #[must_use]
    pub fn evaluate(&self, frequency: Frequency) -> f32 {
        self.quadratic * frequency.khz_squared_f32()
            + self.linear * frequency.as_khz_f32()
            + self.constant
    }
}

/// Output of the calibration stage: detector-referred power
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct CorrectedPower {
    /// Forward detector input power in dBm
    pub forward_dbm: f32,
    /// Reflected detector input power in dBm
    pub reflected_dbm: f32,
}

#[cfg(feature = "embedded")]
impl defmt::Format for CorrectedPower {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Det(fwd={} dBm, ref={} dBm)", self.forward_dbm, self.reflected_dbm);
    }
}

/// Calibration stage holding one fit per detector
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CalibrationCorrector {
    forward: DetectorCalibration,
    reflected: DetectorCalibration,
}

impl CalibrationCorrector {
    /// Create a corrector from separate forward and reflected fits
    #[must_use]
    pub const fn new(forward: DetectorCalibration, reflected: DetectorCalibration) -> Self {
        Self { forward, reflected }
    }

    /// Forward detector fit
    #[must_use]
    pub const fn forward(&self) -> &DetectorCalibration {
        &self.forward
    }

    /// Reflected detector fit
    #[must_use]
    pub const fn reflected(&self) -> &DetectorCalibration {
        &self.reflected
    }

    /// Correct a single detector code with the given fit
    #[must_use]
    pub fn correct_code(cal: &DetectorCalibration, code: DetectorCode, frequency: Frequency) -> f32 {
        cal.correct(code.as_f32(), frequency.as_khz_f32())
    }

    /// Convert both detector codes to dBm
    #[must_use]
    pub fn correct(&self, raw: RawSample, frequency: Frequency) -> CorrectedPower {
        CorrectedPower {
            forward_dbm: Self::correct_code(&self.forward, raw.forward, frequency),
            reflected_dbm: Self::correct_code(&self.reflected, raw.reflected, frequency),
        }
    }
}

impl Default for CalibrationCorrector {
    fn default() -> Self {
        Self::new(FORWARD_DETECTOR, REFLECTED_DETECTOR)
    }
}
