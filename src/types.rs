//! Shared types used across the SWR meter firmware
//!
//! This module defines domain-specific types that enforce invariants
//! at compile time and provide type safety throughout the codebase.

use core::fmt;

use crate::config::{DETECTOR_FULL_SCALE, DETECTOR_NOISE_FLOOR, RSSI_PRESENT_THRESHOLD};

/// Measured carrier frequency in kHz
///
/// The square is computed once when the value is accepted so the two
/// coupler polynomials never recompute it, and it can never disagree
/// with the frequency it was derived from.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Frequency {
    khz: u32,
    khz_squared: u64,
}

impl Frequency {
    /// Zero frequency (no reading accepted yet)
    pub const ZERO: Self = Self::from_khz(0);

    /// Create a frequency from kHz
    #[must_use]
    pub const fn from_khz(khz: u32) -> Self {
        Self {
            khz,
            khz_squared: khz as u64 * khz as u64,
        }
    }

    /// Get the frequency in kHz
    #[must_use]
    pub const fn as_khz(self) -> u32 {
        self.khz
    }

    /// Get the square of the frequency in kHz²
    #[must_use]
    pub const fn khz_squared(self) -> u64 {
        self.khz_squared
    }

    /// Frequency in kHz as floating point
    #[must_use]
    pub fn as_khz_f32(self) -> f32 {
        self.khz as f32
    }

    /// Square of the frequency as floating point
    #[must_use]
    pub fn khz_squared_f32(self) -> f32 {
        self.khz_squared as f32
    }
}

impl fmt::Debug for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frequency({} kHz)", self.khz)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Frequency {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{} kHz", self.khz);
    }
}

/// Averaged, rescaled and clamped detector code
///
/// Always either 0 or within `DETECTOR_NOISE_FLOOR..=DETECTOR_FULL_SCALE`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct DetectorCode(u16);

impl DetectorCode {
    /// No signal
    pub const ZERO: Self = Self(0);

    /// Detector ceiling
    pub const FULL_SCALE: Self = Self(DETECTOR_FULL_SCALE);

    /// Clamp a rescaled average into the detector code range
    ///
    /// Above the ceiling the value is pinned to the ceiling; below the
    /// noise floor it is forced to zero rather than floored.
    #[must_use]
    pub const fn clamp(rescaled: u32) -> Self {
        if rescaled > DETECTOR_FULL_SCALE as u32 {
            Self(DETECTOR_FULL_SCALE)
        } else if rescaled < DETECTOR_NOISE_FLOOR as u32 {
            Self(0)
        } else {
            Self(rescaled as u16)
        }
    }

    /// Get the code value
    #[must_use]
    pub const fn value(self) -> u16 {
        self.0
    }

    /// Code as floating point (detector output in mV)
    #[must_use]
    pub fn as_f32(self) -> f32 {
        f32::from(self.0)
    }

    /// Check if the detector is pinned at its ceiling
    #[must_use]
    pub const fn is_saturated(self) -> bool {
        self.0 >= DETECTOR_FULL_SCALE
    }
}

impl fmt::Debug for DetectorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DetectorCode({})", self.0)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for DetectorCode {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{}", self.0);
    }
}

/// Averaged RSSI code (no rescale, no clamp)
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct RssiCode(u16);

impl RssiCode {
    /// Create from an averaged code
    #[must_use]
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Get the code value
    #[must_use]
    pub const fn value(self) -> u16 {
        self.0
    }

    /// Check if a carrier is present
    #[must_use]
    pub const fn is_signal_present(self) -> bool {
        self.0 > RSSI_PRESENT_THRESHOLD
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for RssiCode {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "RSSI({})", self.0);
    }
}

/// Display screen selected with the encoder
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Screen {
    /// Forward power, SWR, return loss and power loss
    Main,
    /// Documentation pointer
    Info,
    /// Forward and reflected power in dBm and watts
    Dbm,
    /// Raw codes, frequency and calibration values
    #[default]
    Raw,
}

impl Screen {
    /// All screens in encoder order
    pub const ALL: [Self; 4] = [Self::Main, Self::Info, Self::Dbm, Self::Raw];

    /// Screen for an encoder detent, if the detent is in range
    #[must_use]
    pub const fn from_detent(detent: i32) -> Option<Self> {
        match detent {
            0 => Some(Self::Main),
            1 => Some(Self::Info),
            2 => Some(Self::Dbm),
            3 => Some(Self::Raw),
            _ => None,
        }
    }

    /// Encoder detent that selects this screen
    #[must_use]
    pub const fn detent(self) -> i32 {
        match self {
            Self::Main => 0,
            Self::Info => 1,
            Self::Dbm => 2,
            Self::Raw => 3,
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Screen {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Main => defmt::write!(f, "Main"),
            Self::Info => defmt::write!(f, "Info"),
            Self::Dbm => defmt::write!(f, "dBm"),
            Self::Raw => defmt::write!(f, "Raw"),
        }
    }
}
