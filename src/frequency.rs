//! Frequency Measurement
//!
//! The carrier frequency comes from a gated edge counter behind an
//! external prescaler. A reading exists only once per gate period; in
//! between, the last accepted frequency stays in effect.
//!
//! The edge counter itself is a free-running hardware timer clocked by
//! the prescaler output. [`CounterGate`] turns successive snapshots of
//! that counter into gate counts.

use crate::config::{FREQUENCY_GATE_MS, FREQUENCY_PRESCALER};
use crate::types::Frequency;

/// Supplier of frequency readings
pub trait FrequencySource {
    /// Take the reading of a completed gate, if one is available
    fn poll(&mut self) -> Option<Frequency>;
}

impl<T: FrequencySource + ?Sized> FrequencySource for &mut T {
    fn poll(&mut self) -> Option<Frequency> {
        (**self).poll()
    }
}

/// Convert edges counted during one gate into kHz
///
/// With the default 40 ms gate and ÷8 prescaler this is `count / 5`.
#[must_use]
pub const fn count_to_khz(count: u32) -> u32 {
    ((count as u64 * FREQUENCY_PRESCALER as u64) / FREQUENCY_GATE_MS as u64) as u32
}

/// Gate bookkeeping for an edge counter
///
/// The counting side calls [`GateCounter::close_gate`] at the end of
/// every gate period; the measurement side consumes the result through
/// [`FrequencySource::poll`].
#[derive(Clone, Copy, Debug, Default)]
pub struct GateCounter {
    pending: Option<u32>,
}

impl GateCounter {
    /// Create a counter with no completed gate
    #[must_use]
    pub const fn new() -> Self {
        Self { pending: None }
    }

    /// Publish the edge count of a finished gate
    pub fn close_gate(&mut self, count: u32) {
        self.pending = Some(count);
    }

    /// A finished gate is waiting to be read
    #[must_use]
    pub const fn available(&self) -> bool {
        self.pending.is_some()
    }
}

impl FrequencySource for GateCounter {
    fn poll(&mut self) -> Option<Frequency> {
        self.pending.take().map(|count| Frequency::from_khz(count_to_khz(count)))
    }
}

/// Nominal gate period in microseconds
pub const GATE_US: u64 = FREQUENCY_GATE_MS as u64 * 1000;

/// Rescale a count taken over `elapsed_us` to the nominal gate period
#[must_use]
pub fn normalize_count(count: u32, elapsed_us: u64) -> u32 {
    let nominal = u64::from(count) * GATE_US / elapsed_us.max(1);
    u32::try_from(nominal).unwrap_or(u32::MAX)
}

/// Gate timing over a free-running 32-bit edge counter
///
/// Fed with counter snapshots and timestamps; closes a gate on the
/// first snapshot at or after the gate period and publishes the
/// normalized count through the inner [`GateCounter`].
#[derive(Clone, Copy, Debug)]
pub struct CounterGate {
    last_count: u32,
    gate_start_us: u64,
    gate: GateCounter,
}

impl CounterGate {
    /// Open the first gate at the given snapshot
    #[must_use]
    pub const fn new(count: u32, now_us: u64) -> Self {
        Self {
            last_count: count,
            gate_start_us: now_us,
            gate: GateCounter::new(),
        }
    }

    /// Take a counter snapshot, closing the gate once its period is over
    pub fn update(&mut self, count: u32, now_us: u64) {
        let elapsed = now_us.saturating_sub(self.gate_start_us);
        if elapsed < GATE_US {
            return;
        }
        let edges = count.wrapping_sub(self.last_count);
        self.gate.close_gate(normalize_count(edges, elapsed));
        self.last_count = count;
        self.gate_start_us = now_us;
    }

    /// A finished gate is waiting to be read
    #[must_use]
    pub const fn available(&self) -> bool {
        self.gate.available()
    }
}

impl FrequencySource for CounterGate {
    fn poll(&mut self) -> Option<Frequency> {
        self.gate.poll()
    }
}
