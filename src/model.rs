//! Measurement Record
//!
//! The single state record of the meter. It is created once at startup,
//! mutated in place by the cycle driver and read by display and logging.
//! There is exactly one writer, the cycle currently executing.

use crate::config::calibration::{COUPLING, DIRECTIVITY};
use crate::measure::calibration::CouplerResponse;
use crate::measure::metrics::DerivedMetrics;
use crate::measure::sampler::RawSample;
use crate::types::{DetectorCode, Frequency, RssiCode, Screen};

/// Raw inputs, derived quantities and UI selection state
#[derive(Clone, Debug, PartialEq)]
pub struct Model {
    /// Selected screen
    screen: Screen,
    /// Last accepted encoder detent, `None` until the first read
    detent: Option<i32>,
    /// Input selection changed during the current cycle
    mode_changed: bool,
    /// Encoder button held
    button: bool,
    /// Timestamp of the last cycle in milliseconds
    time_ms: u32,
    /// Duration of the last cycle in milliseconds
    loop_time_ms: u32,
    /// Last accepted frequency and its square
    frequency: Frequency,
    /// Averaged RSSI code
    rssi: RssiCode,
    /// Clamped detector codes
    raw: RawSample,
    /// Derived quantities, replaced only as a complete set
    metrics: DerivedMetrics,
    /// Coupler responses shown on the diagnostics screen
    coupling: CouplerResponse,
    directivity: CouplerResponse,
}

impl Model {
    /// Create the record at startup
    #[must_use]
    pub const fn new(time_ms: u32) -> Self {
        Self {
            screen: Screen::Raw,
            detent: None,
            mode_changed: false,
            button: false,
            time_ms,
            loop_time_ms: 0,
            frequency: Frequency::ZERO,
            rssi: RssiCode::new(0),
            raw: RawSample::ZERO,
            metrics: DerivedMetrics::ZERO,
            coupling: COUPLING,
            directivity: DIRECTIVITY,
        }
    }

    /// Use the coupler responses of the metrics engine in effect
    #[must_use]
    pub fn with_coupler(self, coupling: CouplerResponse, directivity: CouplerResponse) -> Self {
        Self {
            coupling,
            directivity,
            ..self
        }
    }

    /// Selected screen
    #[must_use]
    pub const fn screen(&self) -> Screen {
        self.screen
    }

    /// Last accepted encoder detent
    #[must_use]
    pub const fn detent(&self) -> Option<i32> {
        self.detent
    }

    /// Select a screen through an encoder detent
    ///
    /// Raises the mode-change flag; the caller clears it at the start
    /// of every cycle with [`Model::begin_cycle`].
    pub fn select_screen(&mut self, detent: i32, screen: Screen) {
        self.detent = Some(detent);
        self.screen = screen;
        self.mode_changed = true;
    }

    /// Input selection changed during this cycle
    #[must_use]
    pub const fn mode_changed(&self) -> bool {
        self.mode_changed
    }

    /// Reset the per-cycle mode-change flag
    pub fn begin_cycle(&mut self) {
        self.mode_changed = false;
    }

    /// Encoder button held
    #[must_use]
    pub const fn button(&self) -> bool {
        self.button
    }

    /// Record the encoder button state
    pub fn set_button(&mut self, pressed: bool) {
        self.button = pressed;
    }

    /// Timestamp of the last cycle
    #[must_use]
    pub const fn time_ms(&self) -> u32 {
        self.time_ms
    }

    /// Duration of the last cycle
    #[must_use]
    pub const fn loop_time_ms(&self) -> u32 {
        self.loop_time_ms
    }

    /// Close a cycle: record its duration and timestamp
    pub fn end_cycle(&mut self, now_ms: u32) {
        self.loop_time_ms = now_ms.wrapping_sub(self.time_ms);
        self.time_ms = now_ms;
    }

    /// Last accepted frequency
    #[must_use]
    pub const fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Accept a new frequency reading (square updated with it)
    pub fn set_frequency(&mut self, frequency: Frequency) {
        self.frequency = frequency;
    }

    /// Averaged RSSI code
    #[must_use]
    pub const fn rssi(&self) -> RssiCode {
        self.rssi
    }

    /// Store a new RSSI sample
    pub fn set_rssi(&mut self, rssi: RssiCode) {
        self.rssi = rssi;
    }

    /// Clamped detector codes
    #[must_use]
    pub const fn raw(&self) -> RawSample {
        self.raw
    }

    /// Forward detector code
    #[must_use]
    pub const fn forward_code(&self) -> DetectorCode {
        self.raw.forward
    }

    /// Reflected detector code
    #[must_use]
    pub const fn reflected_code(&self) -> DetectorCode {
        self.raw.reflected
    }

    /// Store a new detector sample
    pub fn set_raw(&mut self, raw: RawSample) {
        self.raw = raw;
    }

    /// Derived quantities of the last measured cycle
    #[must_use]
    pub const fn metrics(&self) -> &DerivedMetrics {
        &self.metrics
    }

    /// Replace the derived quantities as one set
    pub fn commit(&mut self, metrics: DerivedMetrics) {
        self.metrics = metrics;
    }

    /// Coupling attenuation at the current frequency, in dB
    #[must_use]
    pub fn coupling(&self) -> f32 {
        self.coupling.evaluate(self.frequency)
    }

    /// Directivity at the current frequency, in dB
    #[must_use]
    pub fn directivity(&self) -> f32 {
        self.directivity.evaluate(self.frequency)
    }

    /// A carrier is present on the RSSI channel
    #[must_use]
    pub const fn is_signal_present(&self) -> bool {
        self.rssi.is_signal_present()
    }

    /// Zero raw detector codes and every derived quantity
    ///
    /// Frequency, screen selection and RSSI are kept.
    pub fn clear(&mut self) {
        self.raw = RawSample::ZERO;
        self.metrics = DerivedMetrics::ZERO;
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new(0)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Model {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "Model({}, {}, {}, {}, {})",
            self.screen,
            self.frequency,
            self.rssi,
            self.raw,
            self.metrics
        );
    }
}
