//! Detector Sampling
//!
//! Windowed averaging of raw ADC reads. The detector samplers rescale
//! and clamp the average to strip the detector noise floor; the RSSI
//! sampler returns the plain average.

use crate::config::{AVERAGING_WINDOW, DETECTOR_RESCALE_SHIFT};
use crate::types::{DetectorCode, RssiCode};

/// A hardware channel that yields one raw conversion per call
///
/// Reads are polled and assumed to complete in bounded time. A failed
/// conversion returns `None` and is left out of the window average.
pub trait RawChannel {
    /// Perform a single conversion
    fn read_raw(&mut self) -> Option<u16>;
}

impl<T: RawChannel + ?Sized> RawChannel for &mut T {
    fn read_raw(&mut self) -> Option<u16> {
        (**self).read_raw()
    }
}

/// Average the successful reads among `W` attempts
///
/// Returns `None` when every read in the window failed.
fn average<const W: usize, C: RawChannel>(channel: &mut C) -> Option<u32> {
    const { assert!(W >= 1, "averaging window must hold at least one read") };

    let mut acc: u32 = 0;
    let mut good: u32 = 0;
    for _ in 0..W {
        if let Some(raw) = channel.read_raw() {
            acc += u32::from(raw);
            good += 1;
        }
    }
    acc.checked_div(good)
}

/// Sampler for one directional detector (forward or reflected)
pub struct DetectorSampler<C, const W: usize = AVERAGING_WINDOW> {
    channel: C,
}

impl<C: RawChannel, const W: usize> DetectorSampler<C, W> {
    /// Create a sampler over a hardware channel
    #[must_use]
    pub const fn new(channel: C) -> Self {
        Self { channel }
    }

    /// Average `W` reads, divide by 16 and clamp to the detector range
    ///
    /// A window with no successful read yields zero (no signal).
    pub fn sample(&mut self) -> DetectorCode {
        average::<W, _>(&mut self.channel)
            .map_or(DetectorCode::ZERO, |avg| DetectorCode::clamp(avg >> DETECTOR_RESCALE_SHIFT))
    }

    /// Access the underlying channel
    pub fn channel_mut(&mut self) -> &mut C {
        &mut self.channel
    }
}

/// Sampler for the signal-strength channel
pub struct RssiSampler<C, const W: usize = AVERAGING_WINDOW> {
    channel: C,
}

impl<C: RawChannel, const W: usize> RssiSampler<C, W> {
    /// Create a sampler over a hardware channel
    #[must_use]
    pub const fn new(channel: C) -> Self {
        Self { channel }
    }

    /// Average `W` reads without rescale or clamp
    ///
    /// A window with no successful read yields zero (no carrier).
    pub fn sample(&mut self) -> RssiCode {
        #[allow(clippy::cast_possible_truncation)]
        let avg = average::<W, _>(&mut self.channel).map_or(0, |avg| avg as u16);
        RssiCode::new(avg)
    }

    /// Access the underlying channel
    pub fn channel_mut(&mut self) -> &mut C {
        &mut self.channel
    }
}

/// Output of the sampling stage: one code per detector
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct RawSample {
    /// Forward detector code
    pub forward: DetectorCode,
    /// Reflected detector code
    pub reflected: DetectorCode,
}

impl RawSample {
    /// Both detectors at zero
    pub const ZERO: Self = Self {
        forward: DetectorCode::ZERO,
        reflected: DetectorCode::ZERO,
    };

    /// Sample both detectors, forward first
    pub fn acquire<F, R, const W: usize>(
        forward: &mut DetectorSampler<F, W>,
        reflected: &mut DetectorSampler<R, W>,
    ) -> Self
    where
        F: RawChannel,
        R: RawChannel,
    {
        let forward = forward.sample();
        let reflected = reflected.sample();
        Self { forward, reflected }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for RawSample {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Raw(fwd={}, ref={})", self.forward, self.reflected);
    }
}
