//! Power and Match Metrics
//!
//! Turns detector-referred dBm into line power and the derived match
//! quantities. Every step depends on the one before it:
//!
//! 1. add coupler coupling (forward) and directivity (reflected)
//! 2. add the external attenuator
//! 3. dBm to watts
//! 4. reflection coefficient
//! 5. SWR
//! 6. return loss
//! 7. mismatch power loss
//!
//! The divisions and logarithm in steps 4-6 saturate instead of
//! producing infinity or NaN; see [`reflection_coefficient`], [`swr`]
//! and [`return_loss_db`].

use crate::config::calibration::{ATTENUATOR_DB, COUPLING, DIRECTIVITY};
use crate::config::{RETURN_LOSS_MAX_DB, SWR_MAX};
use crate::measure::calibration::{CorrectedPower, CouplerResponse};
use crate::types::Frequency;

/// Convert dBm to watts: `10^(dBm/10 - 3)`
#[must_use]
pub fn dbm_to_watts(dbm: f32) -> f32 {
    libm::powf(10.0, dbm / 10.0 - 3.0)
}

/// Convert watts to dBm: `10·log10(W·1000)`
#[must_use]
pub fn watts_to_dbm(watts: f32) -> f32 {
    10.0 * libm::log10f(watts * 1000.0)
}

/// Reflection coefficient `sqrt(Pref / Pfwd)`, clamped into [0, 1]
///
/// No usable forward power (zero, negative or not finite) saturates
/// to 1, as does reflected power exceeding forward power.
#[must_use]
pub fn reflection_coefficient(forward_watts: f32, reflected_watts: f32) -> f32 {
    if forward_watts.is_nan() || forward_watts <= 0.0 || forward_watts.is_infinite() {
        return 1.0;
    }
    if reflected_watts.is_nan() || reflected_watts <= 0.0 {
        return 0.0;
    }
    let ratio = reflected_watts / forward_watts;
    if ratio >= 1.0 {
        1.0
    } else {
        libm::sqrtf(ratio)
    }
}

/// SWR `(1 + γ) / (1 - γ)`, saturating at [`SWR_MAX`]
#[must_use]
pub fn swr(gamma: f32) -> f32 {
    if gamma >= 1.0 {
        return SWR_MAX;
    }
    let gamma = gamma.max(0.0);
    let ratio = (1.0 + gamma) / (1.0 - gamma);
    ratio.min(SWR_MAX)
}

/// Return loss `-20·log10(γ)`, saturating at [`RETURN_LOSS_MAX_DB`]
#[must_use]
pub fn return_loss_db(gamma: f32) -> f32 {
    if gamma.is_nan() || gamma <= 0.0 {
        return RETURN_LOSS_MAX_DB;
    }
    (-20.0 * libm::log10f(gamma)).min(RETURN_LOSS_MAX_DB)
}

/// Mismatch loss `Pfwd · ((SWR - 1) / (SWR + 1))²`
#[must_use]
pub fn power_loss_watts(forward_watts: f32, swr: f32) -> f32 {
    let k = (swr - 1.0) / (swr + 1.0);
    forward_watts * k * k
}

/// The complete derived-quantity set of one measured cycle
///
/// Always produced and stored as a whole so a reader never sees values
/// from two different cycles.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct DerivedMetrics {
    /// Forward line power in dBm
    pub forward_dbm: f32,
    /// Reflected line power in dBm
    pub reflected_dbm: f32,
    /// Forward line power in watts
    pub forward_watts: f32,
    /// Reflected line power in watts
    pub reflected_watts: f32,
    /// Reflection coefficient, 0..=1
    pub gamma: f32,
    /// Standing wave ratio, 1..=`SWR_MAX`
    pub swr: f32,
    /// Return loss in dB, 0..=`RETURN_LOSS_MAX_DB`
    pub return_loss_db: f32,
    /// Mismatch power loss in watts
    pub loss_watts: f32,
}

impl DerivedMetrics {
    /// All fields zero (cleared / never measured)
    pub const ZERO: Self = Self {
        forward_dbm: 0.0,
        reflected_dbm: 0.0,
        forward_watts: 0.0,
        reflected_watts: 0.0,
        gamma: 0.0,
        swr: 0.0,
        return_loss_db: 0.0,
        loss_watts: 0.0,
    };

    /// SWR is at its saturation value
    #[must_use]
    pub fn swr_saturated(&self) -> bool {
        self.swr >= SWR_MAX
    }

    /// Return loss is at its saturation value
    #[must_use]
    pub fn return_loss_saturated(&self) -> bool {
        self.return_loss_db >= RETURN_LOSS_MAX_DB
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for DerivedMetrics {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "Metrics(fwd={} W, ref={} W, SWR={}, RL={} dB)",
            self.forward_watts,
            self.reflected_watts,
            self.swr,
            self.return_loss_db
        );
    }
}

/// Coupler- and attenuator-corrected metrics computation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MetricsEngine {
    coupling: CouplerResponse,
    directivity: CouplerResponse,
    attenuator_db: f32,
}

impl MetricsEngine {
    /// Create an engine from coupler polynomials and attenuator offset
    #[must_use]
    pub const fn new(coupling: CouplerResponse, directivity: CouplerResponse, attenuator_db: f32) -> Self {
        Self {
            coupling,
            directivity,
            attenuator_db,
        }
    }

    /// Coupling polynomial
    #[must_use]
    pub const fn coupling(&self) -> CouplerResponse {
        self.coupling
    }

    /// Directivity polynomial
    #[must_use]
    pub const fn directivity(&self) -> CouplerResponse {
        self.directivity
    }

    /// Coupling attenuation at a frequency
    #[must_use]
    pub fn coupling_db(&self, frequency: Frequency) -> f32 {
        self.coupling.evaluate(frequency)
    }

    /// Directivity at a frequency
    #[must_use]
    pub fn directivity_db(&self, frequency: Frequency) -> f32 {
        self.directivity.evaluate(frequency)
    }

    /// Compute the full derived set from detector-referred power
    #[must_use]
    pub fn derive(&self, power: CorrectedPower, frequency: Frequency) -> DerivedMetrics {
        let forward_dbm = power.forward_dbm + self.coupling_db(frequency) + self.attenuator_db;
        let reflected_dbm = power.reflected_dbm + self.directivity_db(frequency) + self.attenuator_db;

        let forward_watts = dbm_to_watts(forward_dbm);
        let reflected_watts = dbm_to_watts(reflected_dbm);

        let gamma = reflection_coefficient(forward_watts, reflected_watts);
        let swr = swr(gamma);
        let return_loss_db = return_loss_db(gamma);
        let loss_watts = power_loss_watts(forward_watts, swr);

        DerivedMetrics {
            forward_dbm,
            reflected_dbm,
            forward_watts,
            reflected_watts,
            gamma,
            swr,
            return_loss_db,
            loss_watts,
        }
    }
}

impl Default for MetricsEngine {
    fn default() -> Self {
        Self::new(COUPLING, DIRECTIVITY, ATTENUATOR_DB)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_dbm_is_one_milliwatt() {
        assert!((dbm_to_watts(0.0) - 1.0e-3).abs() < 1.0e-9);
        assert!((dbm_to_watts(30.0) - 1.0).abs() < 1.0e-5);
    }

    #[test]
    fn gamma_never_leaves_unit_interval() {
        assert_eq!(reflection_coefficient(1.0, 2.0), 1.0);
        assert_eq!(reflection_coefficient(0.0, 0.0), 1.0);
        assert_eq!(reflection_coefficient(f32::NAN, 1.0), 1.0);
        assert_eq!(reflection_coefficient(1.0, f32::NAN), 0.0);
    }

    #[test]
    fn loss_is_finite_at_saturation() {
        assert!(power_loss_watts(10.0, SWR_MAX).is_finite());
    }
}
