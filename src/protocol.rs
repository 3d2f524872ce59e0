//! Serial Measurement Record
//!
//! One JSON object per measured cycle, one object per line:
//!
//! ```text
//! {"t":123456,"f":14000,"i":35.319,"r":-2.608}
//! ```
//!
//! `t` is the cycle timestamp in milliseconds, `f` the frequency in kHz,
//! `i` and `r` forward and reflected line power in dBm rounded to three
//! decimals. Host tools depend on these exact keys.
//!
//! Encoding and decoding go through `serde_json_core`; power values
//! that are not finite never make it into a parsed record.

use heapless::String;
use serde::{Deserialize, Serialize};

use crate::model::Model;

/// Maximum rendered line length, terminator included
pub const MAX_RECORD_LEN: usize = 96;

/// Line terminator after each record
pub const RECORD_TERMINATOR: &str = "\r\n";

/// Round to three decimal places
#[must_use]
pub fn round3(value: f32) -> f32 {
    libm::roundf(value * 1000.0) / 1000.0
}

/// One logged measurement
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogRecord {
    /// Timestamp in milliseconds
    pub t: u32,
    /// Frequency in kHz
    pub f: u32,
    /// Forward power in dBm, rounded to 3 decimals
    pub i: f32,
    /// Reflected power in dBm, rounded to 3 decimals
    pub r: f32,
}

impl LogRecord {
    /// Build a record, rounding the power values
    #[must_use]
    pub fn new(t: u32, f: u32, forward_dbm: f32, reflected_dbm: f32) -> Self {
        Self {
            t,
            f,
            i: round3(forward_dbm),
            r: round3(reflected_dbm),
        }
    }

    /// Build a record from the current measurement state
    #[must_use]
    pub fn from_model(model: &Model, t: u32) -> Self {
        let metrics = model.metrics();
        Self::new(
            t,
            model.frequency().as_khz(),
            metrics.forward_dbm,
            metrics.reflected_dbm,
        )
    }

    /// Render the record as one terminated JSON line
    pub fn render(&self) -> Result<String<MAX_RECORD_LEN>, serde_json_core::ser::Error> {
        let mut line: String<MAX_RECORD_LEN> = serde_json_core::to_string(self)?;
        line.push_str(RECORD_TERMINATOR)
            .map_err(|()| serde_json_core::ser::Error::BufferFull)?;
        Ok(line)
    }

    /// Parse a line produced by [`LogRecord::render`]
    ///
    /// Keys may appear in any order; surrounding whitespace and the
    /// terminator are ignored. Returns `None` for malformed JSON, a
    /// missing, repeated or unknown key, or a power that is not finite.
    #[must_use]
    pub fn parse(line: &str) -> Option<Self> {
        let (record, _) = serde_json_core::from_str::<Self>(line.trim()).ok()?;
        (record.i.is_finite() && record.r.is_finite()).then_some(record)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for LogRecord {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Log(t={}, f={}, i={}, r={})", self.t, self.f, self.i, self.r);
    }
}
