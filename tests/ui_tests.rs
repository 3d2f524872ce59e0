//! User Interface Tests
//!
//! Tests for screen layout and power unit scaling.
//! Run with: cargo test --target x86_64-unknown-linux-gnu --no-default-features --features std --test ui_tests

use swr_meter::config::{RETURN_LOSS_MAX_DB, SWR_MAX};
use swr_meter::measure::calibration::CalibrationCorrector;
use swr_meter::measure::metrics::{DerivedMetrics, MetricsEngine};
use swr_meter::measure::sampler::RawSample;
use swr_meter::model::Model;
use swr_meter::types::{DetectorCode, Frequency, RssiCode, Screen};
use swr_meter::ui::{render, write_power, UiState, INFO_ROWS, ROW_LEN};

fn power(watts: f32) -> String {
    let mut out = String::new();
    write_power(&mut out, watts, 5).unwrap();
    out
}

fn measured(screen: Screen) -> Model {
    let freq = Frequency::from_khz(14_000);
    let raw = RawSample {
        forward: DetectorCode::clamp(2000),
        reflected: DetectorCode::clamp(500),
    };
    let metrics = MetricsEngine::default().derive(CalibrationCorrector::default().correct(raw, freq), freq);

    let mut model = Model::new(0);
    model.select_screen(screen.detent(), screen);
    model.set_frequency(freq);
    model.set_rssi(RssiCode::new(100));
    model.set_raw(raw);
    model.commit(metrics);
    model.end_cycle(12);
    model
}

// =============================================================================
// Power Formatting Tests
// =============================================================================

#[test]
fn test_power_below_picowatt_is_blank() {
    assert_eq!(power(0.0), "");
    assert_eq!(power(1.0e-13), "");
}

#[test]
fn test_power_units() {
    assert_eq!(power(5.0e-12), "  5.0 pW");
    assert_eq!(power(2.5e-9), "  2.5 nW");
    assert_eq!(power(5.485_7e-4), "548.6 uW");
    assert_eq!(power(0.25), "250.0 mW");
    assert_eq!(power(3.403), "  3.4 W");
    assert_eq!(power(100.0), "100.0 W");
    assert_eq!(power(2000.0), " 2.00 kW");
}

// =============================================================================
// Screen Tests
// =============================================================================

#[test]
fn test_main_screen() {
    let text = render(&measured(Screen::Main)).unwrap();
    assert_eq!(text.row(0), "FWD __:   3.4 W S");
    assert_eq!(text.row(1), "SWR __:   1.0");
    assert_eq!(text.row(2), "RL ___: 37.93 dB");
    assert_eq!(text.row(3), "LOSS _: 548.6 uW");
}

#[test]
fn test_main_screen_saturated() {
    let mut model = Model::new(0);
    model.select_screen(0, Screen::Main);
    model.commit(DerivedMetrics {
        forward_watts: 1.0,
        swr: SWR_MAX,
        return_loss_db: RETURN_LOSS_MAX_DB,
        ..DerivedMetrics::ZERO
    });
    let text = render(&model).unwrap();
    assert_eq!(text.row(1), "SWR __:  HIGH");
    assert_eq!(text.row(2), "RL ___: >99.9 dB");
}

#[test]
fn test_main_screen_cleared() {
    let mut model = measured(Screen::Main);
    model.clear();
    model.set_rssi(RssiCode::new(0));
    let text = render(&model).unwrap();
    assert_eq!(text.row(0), "FWD __: ");
    assert_eq!(text.row(1), "SWR __: ");
    assert_eq!(text.row(2), "RL ___: ");
    assert_eq!(text.row(3), "LOSS _: ");
}

#[test]
fn test_dbm_screen() {
    let text = render(&measured(Screen::Dbm)).unwrap();
    assert_eq!(text.row(0), "forward: 35.3 dBm");
    assert_eq!(text.row(1), "reflected: -2.6 dBm");
    assert_eq!(text.row(2), "forward:   3.4 W");
    assert_eq!(text.row(3), "reflected: 548.6 uW");
}

#[test]
fn test_raw_screen() {
    let text = render(&measured(Screen::Raw)).unwrap();
    assert_eq!(text.row(0), "f: 14000 t: 12");
    assert_eq!(text.row(1), "fw: 2000 rw: 500");
    assert_eq!(text.row(2), "cpl: 37.6 dir: 37.52");
    assert_eq!(text.row(3), "rs: 100");
}

#[test]
fn test_raw_screen_at_startup() {
    let text = render(&Model::new(0)).unwrap();
    assert_eq!(text.row(0), "f: 0 t: 0");
    assert_eq!(text.row(1), "fw: 0 rw: 0");
    assert_eq!(text.row(2), "cpl: 37.5 dir: 37.51");
    assert_eq!(text.row(3), "rs: 0");
}

#[test]
fn test_info_screen() {
    let text = render(&measured(Screen::Info)).unwrap();
    for (row, line) in INFO_ROWS.iter().enumerate() {
        assert_eq!(text.row(row), *line);
    }
}

#[test]
fn test_rows_fit_panel() {
    for screen in Screen::ALL {
        let text = render(&measured(screen)).unwrap();
        for row in text.rows() {
            assert!(row.len() <= ROW_LEN, "{screen:?}: {row:?}");
        }
    }
}

#[test]
fn test_row_out_of_range_is_empty() {
    assert_eq!(render(&Model::new(0)).unwrap().row(9), "");
}

#[test]
fn test_render_reports_overflow() {
    let mut model = measured(Screen::Dbm);
    model.commit(DerivedMetrics {
        forward_dbm: 1.0e30,
        ..*model.metrics()
    });
    assert!(render(&model).is_err());
}

// =============================================================================
// Refresh Tests
// =============================================================================

#[test]
fn test_refresh_only_on_change() {
    let mut ui = UiState::new();
    let mut model = measured(Screen::Main);
    assert!(ui.refresh(&model).unwrap().is_some());
    assert!(ui.refresh(&model).unwrap().is_none());

    model.select_screen(2, Screen::Dbm);
    assert!(ui.refresh(&model).unwrap().is_some());
    assert!(ui.refresh(&model).unwrap().is_none());
}

#[test]
fn test_invalidate_forces_redraw() {
    let mut ui = UiState::new();
    let model = measured(Screen::Raw);
    assert!(ui.refresh(&model).unwrap().is_some());
    ui.invalidate();
    assert!(ui.refresh(&model).unwrap().is_some());
}

#[test]
fn test_refresh_error_keeps_shown_text() {
    let mut ui = UiState::new();
    let mut model = measured(Screen::Dbm);
    assert!(ui.refresh(&model).unwrap().is_some());

    let good = *model.metrics();
    model.commit(DerivedMetrics {
        reflected_dbm: -1.0e30,
        ..good
    });
    assert!(ui.refresh(&model).is_err());

    // Back to the text already on the panel: nothing to redraw
    model.commit(good);
    assert!(ui.refresh(&model).unwrap().is_none());
}
