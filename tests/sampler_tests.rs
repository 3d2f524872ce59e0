//! Sampler Tests
//!
//! Tests for windowed averaging, detector rescale and clamping.
//! Run with: cargo test --target x86_64-unknown-linux-gnu --no-default-features --features std --test sampler_tests

use swr_meter::config::{AVERAGING_WINDOW, DETECTOR_FULL_SCALE};
use swr_meter::measure::sampler::{DetectorSampler, RawChannel, RawSample, RssiSampler};
use swr_meter::types::DetectorCode;

/// Channel returning a fixed word
struct Constant(u16);

impl RawChannel for Constant {
    fn read_raw(&mut self) -> Option<u16> {
        Some(self.0)
    }
}

/// Channel replaying a sequence, counting reads; `None` is a failed read
struct Sequence {
    values: Vec<Option<u16>>,
    reads: usize,
}

impl Sequence {
    fn new(values: &[u16]) -> Self {
        Self::with_failures(&values.iter().copied().map(Some).collect::<Vec<_>>())
    }

    fn with_failures(values: &[Option<u16>]) -> Self {
        Self {
            values: values.to_vec(),
            reads: 0,
        }
    }
}

impl RawChannel for Sequence {
    fn read_raw(&mut self) -> Option<u16> {
        let value = self.values[self.reads % self.values.len()];
        self.reads += 1;
        value
    }
}

// =============================================================================
// Averaging Tests
// =============================================================================

#[test]
fn test_detector_reads_full_window() {
    let mut sampler: DetectorSampler<Sequence> = DetectorSampler::new(Sequence::new(&[32_000]));
    let _ = sampler.sample();
    assert_eq!(sampler.channel_mut().reads, AVERAGING_WINDOW);
}

#[test]
fn test_detector_rescales_average() {
    // 32000 / 16 = 2000
    let mut sampler: DetectorSampler<Constant> = DetectorSampler::new(Constant(32_000));
    assert_eq!(sampler.sample().value(), 2000);
}

#[test]
fn test_detector_averages_mixed_reads() {
    // Mean of 30000 and 34000 is 32000, rescaled to 2000
    let mut sampler: DetectorSampler<Sequence> =
        DetectorSampler::new(Sequence::new(&[30_000, 34_000]));
    assert_eq!(sampler.sample().value(), 2000);
}

#[test]
fn test_full_scale_reads_do_not_overflow() {
    let mut sampler: DetectorSampler<Constant> = DetectorSampler::new(Constant(u16::MAX));
    assert_eq!(sampler.sample(), DetectorCode::FULL_SCALE);
}

#[test]
fn test_small_window() {
    let mut sampler: DetectorSampler<Sequence, 2> =
        DetectorSampler::new(Sequence::new(&[8000, 8002]));
    assert_eq!(sampler.sample().value(), 500);
    assert_eq!(sampler.channel_mut().reads, 2);
}

// =============================================================================
// Failed Read Tests
// =============================================================================

#[test]
fn test_failed_read_left_out_of_average() {
    // One bus error in the window must not drag the average down
    let mut window = vec![Some(32_000); AVERAGING_WINDOW];
    window[5] = None;
    let mut sampler: DetectorSampler<Sequence> = DetectorSampler::new(Sequence::with_failures(&window));
    assert_eq!(sampler.sample().value(), 2000);
    assert_eq!(sampler.channel_mut().reads, AVERAGING_WINDOW);
}

#[test]
fn test_failed_window_reads_as_no_signal() {
    let mut sampler: DetectorSampler<Sequence> = DetectorSampler::new(Sequence::with_failures(&[None]));
    assert_eq!(sampler.sample(), DetectorCode::ZERO);

    let mut rssi: RssiSampler<Sequence> = RssiSampler::new(Sequence::with_failures(&[None]));
    assert!(!rssi.sample().is_signal_present());
}

#[test]
fn test_rssi_failed_read_left_out_of_average() {
    let mut rssi: RssiSampler<Sequence, 4> =
        RssiSampler::new(Sequence::with_failures(&[Some(40), None, Some(40), None]));
    assert_eq!(rssi.sample().value(), 40);
}

// =============================================================================
// Clamp Tests
// =============================================================================

#[test]
fn test_clamp_pins_above_full_scale() {
    assert_eq!(DetectorCode::clamp(3301).value(), DETECTOR_FULL_SCALE);
    assert_eq!(DetectorCode::clamp(4095).value(), DETECTOR_FULL_SCALE);
}

#[test]
fn test_clamp_keeps_full_scale() {
    assert_eq!(DetectorCode::clamp(3300).value(), 3300);
    assert!(DetectorCode::clamp(3300).is_saturated());
}

#[test]
fn test_clamp_zeroes_below_noise_floor() {
    assert_eq!(DetectorCode::clamp(399).value(), 0);
    assert_eq!(DetectorCode::clamp(1).value(), 0);
}

#[test]
fn test_clamp_keeps_noise_floor() {
    assert_eq!(DetectorCode::clamp(400).value(), 400);
}

#[test]
fn test_clamp_range_property() {
    for rescaled in 0..5000u32 {
        let code = DetectorCode::clamp(rescaled).value();
        assert!(code == 0 || (400..=3300).contains(&code), "{rescaled} -> {code}");
    }
}

// =============================================================================
// RSSI Tests
// =============================================================================

#[test]
fn test_rssi_plain_average() {
    let mut sampler: RssiSampler<Sequence> = RssiSampler::new(Sequence::new(&[10, 30]));
    assert_eq!(sampler.sample().value(), 20);
}

#[test]
fn test_rssi_not_clamped_or_rescaled() {
    // Values below the detector floor survive on the RSSI path
    let mut low: RssiSampler<Constant> = RssiSampler::new(Constant(25));
    assert_eq!(low.sample().value(), 25);

    let mut high: RssiSampler<Constant> = RssiSampler::new(Constant(4000));
    assert_eq!(high.sample().value(), 4000);
}

#[test]
fn test_rssi_presence_threshold() {
    let mut quiet: RssiSampler<Constant> = RssiSampler::new(Constant(19));
    assert!(!quiet.sample().is_signal_present());

    let mut carrier: RssiSampler<Constant> = RssiSampler::new(Constant(20));
    assert!(carrier.sample().is_signal_present());
}

// =============================================================================
// Acquire Tests
// =============================================================================

#[test]
fn test_acquire_samples_both_detectors() {
    let mut fwd: DetectorSampler<Constant> = DetectorSampler::new(Constant(32_000));
    let mut rfl: DetectorSampler<Constant> = DetectorSampler::new(Constant(8_000));
    let raw = RawSample::acquire(&mut fwd, &mut rfl);
    assert_eq!(raw.forward.value(), 2000);
    assert_eq!(raw.reflected.value(), 500);
}

#[test]
fn test_acquire_zero_when_quiet() {
    let mut fwd: DetectorSampler<Constant> = DetectorSampler::new(Constant(1000));
    let mut rfl: DetectorSampler<Constant> = DetectorSampler::new(Constant(0));
    assert_eq!(RawSample::acquire(&mut fwd, &mut rfl), RawSample::ZERO);
}
