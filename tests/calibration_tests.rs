//! Calibration Tests
//!
//! Tests for detector frequency correction and coupler polynomials.
//! Run with: cargo test --target x86_64-unknown-linux-gnu --no-default-features --features std --test calibration_tests

use swr_meter::config::calibration::{COUPLING, DIRECTIVITY, FORWARD_DETECTOR, REFLECTED_DETECTOR};
use swr_meter::measure::calibration::{CalibrationCorrector, CouplerResponse, DetectorCalibration};
use swr_meter::measure::sampler::RawSample;
use swr_meter::types::{DetectorCode, Frequency};

fn assert_close(actual: f32, expected: f64, tolerance: f64) {
    let err = (f64::from(actual) - expected).abs();
    assert!(err <= tolerance, "expected {expected}, got {actual} (err {err})");
}

fn sample(forward: u32, reflected: u32) -> RawSample {
    RawSample {
        forward: DetectorCode::clamp(forward),
        reflected: DetectorCode::clamp(reflected),
    }
}

// =============================================================================
// Detector Correction Tests
// =============================================================================

#[test]
fn test_forward_drift_adjustment() {
    // 2000 - (-0.6282e-3 * 14000 + 8.9)
    assert_close(FORWARD_DETECTOR.adjust(2000.0, 14_000.0), 1999.8948, 1e-3);
}

#[test]
fn test_reflected_drift_adjustment() {
    // 500 - (-0.6473e-3 * 14000 + 8.09)
    assert_close(REFLECTED_DETECTOR.adjust(500.0, 14_000.0), 500.9722, 1e-3);
}

#[test]
fn test_forward_fit() {
    assert_close(FORWARD_DETECTOR.correct(2000.0, 14_000.0), -22.431_574, 1e-3);
}

#[test]
fn test_reflected_fit() {
    assert_close(REFLECTED_DETECTOR.correct(500.0, 14_000.0), -60.322_938, 1e-3);
}

#[test]
fn test_custom_detector_is_linear() {
    let cal = DetectorCalibration {
        drift_slope: 0.0,
        drift_offset: 0.0,
        slope: 0.5,
        intercept: -10.0,
    };
    assert_close(cal.correct(100.0, 7_000.0), 40.0, 1e-6);
}

// =============================================================================
// Coupler Polynomial Tests
// =============================================================================

#[test]
fn test_coupling_at_14_mhz() {
    assert_close(COUPLING.evaluate(Frequency::from_khz(14_000)), 37.550_466, 1e-3);
}

#[test]
fn test_directivity_at_14_mhz() {
    assert_close(DIRECTIVITY.evaluate(Frequency::from_khz(14_000)), 37.515_264, 1e-3);
}

#[test]
fn test_polynomial_at_zero_frequency() {
    assert_close(COUPLING.evaluate(Frequency::ZERO), 37.498, 1e-5);
    assert_close(DIRECTIVITY.evaluate(Frequency::ZERO), 37.51, 1e-5);
}

#[test]
fn test_polynomial_is_deterministic() {
    let freq = Frequency::from_khz(28_400);
    let first = COUPLING.evaluate(freq);
    for _ in 0..10 {
        assert_eq!(COUPLING.evaluate(freq).to_bits(), first.to_bits());
    }
}

#[test]
fn test_polynomial_at_high_frequency() {
    // Square of 54 MHz in kHz would overflow 32 bits
    let poly = CouplerResponse {
        quadratic: 1.0e-9,
        linear: 0.0,
        constant: 0.0,
    };
    assert_close(poly.evaluate(Frequency::from_khz(54_000)), 2.916, 1e-3);
}

// =============================================================================
// Corrector Tests
// =============================================================================

#[test]
fn test_corrector_default_uses_built_in_calibration() {
    let corrector = CalibrationCorrector::default();
    assert_eq!(*corrector.forward(), FORWARD_DETECTOR);
    assert_eq!(*corrector.reflected(), REFLECTED_DETECTOR);
}

#[test]
fn test_corrector_output() {
    let corrector = CalibrationCorrector::default();
    let power = corrector.correct(sample(2000, 500), Frequency::from_khz(14_000));
    assert_close(power.forward_dbm, -22.431_574, 1e-3);
    assert_close(power.reflected_dbm, -60.322_938, 1e-3);
}

#[test]
fn test_corrector_zero_code_is_finite() {
    let corrector = CalibrationCorrector::default();
    let power = corrector.correct(RawSample::ZERO, Frequency::from_khz(14_000));
    assert!(power.forward_dbm.is_finite());
    assert!(power.reflected_dbm.is_finite());
}
