//! Frequency Counter Tests
//!
//! Tests for gate timing over the free-running hardware edge counter:
//! wraparound, overshoot normalization and the kHz conversion.
//! Run with: cargo test --target x86_64-unknown-linux-gnu --no-default-features --features std --test frequency_tests

use swr_meter::frequency::{count_to_khz, normalize_count, CounterGate, FrequencySource, GATE_US};

/// Prescaled edges seen in one nominal gate for an RF input in Hz
fn edges_per_gate(rf_hz: u64) -> u32 {
    u32::try_from(rf_hz / 8 * GATE_US / 1_000_000).unwrap()
}

// =============================================================================
// Conversion Tests
// =============================================================================

#[test]
fn test_lowest_band_edge() {
    // 1.75 MHz / 8 over 40 ms
    assert_eq!(edges_per_gate(1_750_000), 8_750);
    assert_eq!(count_to_khz(8_750), 1_750);
}

#[test]
fn test_highest_band_edge() {
    assert_eq!(count_to_khz(edges_per_gate(54_000_000)), 54_000);
}

#[test]
fn test_normalize_at_nominal_gate() {
    assert_eq!(normalize_count(8_750, GATE_US), 8_750);
}

#[test]
fn test_normalize_overshoot() {
    // 60 ms of edges scaled back to 40 ms
    assert_eq!(normalize_count(13_125, 60_000), 8_750);
}

#[test]
fn test_normalize_zero_elapsed() {
    assert_eq!(normalize_count(0, 0), 0);
}

// =============================================================================
// Gate Tests
// =============================================================================

#[test]
fn test_no_reading_before_gate_closes() {
    let mut gate = CounterGate::new(0, 0);
    gate.update(5_000, GATE_US - 1);
    assert!(!gate.available());
    assert_eq!(gate.poll(), None);
}

#[test]
fn test_gate_reads_1_75_mhz() {
    let mut gate = CounterGate::new(1_000, 10);
    gate.update(1_000 + edges_per_gate(1_750_000), 10 + GATE_US);
    assert_eq!(gate.poll().map(|f| f.as_khz()), Some(1_750));
    assert_eq!(gate.poll(), None);
}

#[test]
fn test_gate_survives_counter_wrap() {
    let start = u32::MAX - 100;
    let mut gate = CounterGate::new(start, 0);
    gate.update(start.wrapping_add(70_000), GATE_US);
    assert_eq!(gate.poll().map(|f| f.as_khz()), Some(14_000));
}

#[test]
fn test_late_gate_is_normalized() {
    let mut gate = CounterGate::new(0, 0);
    gate.update(105_000, 60_000);
    assert_eq!(gate.poll().map(|f| f.as_khz()), Some(14_000));
}

#[test]
fn test_consecutive_gates_use_last_snapshot() {
    let mut gate = CounterGate::new(0, 0);
    gate.update(70_000, GATE_US);
    assert_eq!(gate.poll().map(|f| f.as_khz()), Some(14_000));

    // Snapshots inside the next gate do not move its start
    gate.update(80_000, GATE_US + 1_000);
    assert!(!gate.available());
    gate.update(70_000 + 35_500, 2 * GATE_US);
    assert_eq!(gate.poll().map(|f| f.as_khz()), Some(7_100));
}
