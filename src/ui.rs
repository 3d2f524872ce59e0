//! User Interface
//!
//! Text layout of the four screens. Each screen is four rows of at
//! most [`ROW_LEN`] characters, composed from the measurement record;
//! the display driver only draws the rows.

use core::fmt::{self, Write};

use heapless::String;

use crate::config::DISPLAY_ROWS;
use crate::model::Model;
use crate::types::Screen;

/// Characters per row (6 px font on 128 px)
pub const ROW_LEN: usize = 21;

/// Row buffer, with headroom for wide numbers
pub type Row = String<32>;

/// Rendered screen content
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ScreenText {
    rows: [Row; DISPLAY_ROWS],
}

impl ScreenText {
    /// Rows top to bottom
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// A single row
    #[must_use]
    pub fn row(&self, index: usize) -> &str {
        self.rows.get(index).map_or("", |r| r.as_str())
    }
}

/// Splash text shown while peripherals settle
pub const SPLASH: &str = "SWR METER";

/// Info screen content
pub const INFO_ROWS: [&str; DISPLAY_ROWS] = [
    "Documents at github",
    "https://github.com/",
    ".../hardware",
    ".../powermeter-fw",
];

/// Write a power value scaled to pW..kW, or nothing below 1 pW
pub fn write_power<W: Write>(out: &mut W, watts: f32, width: usize) -> fmt::Result {
    let (value, unit, precision): (f32, &str, usize) = if watts < 1.0E-12 {
        return Ok(());
    } else if watts < 1.0E-9 {
        (watts * 1.0E12, "pW", 1)
    } else if watts < 1.0E-6 {
        (watts * 1.0E9, "nW", 1)
    } else if watts < 1.0E-3 {
        (watts * 1.0E6, "uW", 1)
    } else if watts < 1.0 {
        (watts * 1.0E3, "mW", 1)
    } else if watts < 1.6E3 {
        (watts, "W", 1)
    } else {
        (watts / 1.0E3, "kW", 2)
    };
    write!(out, "{value:>width$.precision$} {unit}")
}

/// Compose the rows of the selected screen
///
/// Fails if a value is too wide for the row buffer.
pub fn render(model: &Model) -> Result<ScreenText, fmt::Error> {
    let mut text = ScreenText::default();
    match model.screen() {
        Screen::Main => main_screen(model, &mut text.rows),
        Screen::Info => info_screen(&mut text.rows),
        Screen::Dbm => dbm_screen(model, &mut text.rows),
        Screen::Raw => raw_screen(model, &mut text.rows),
    }?;
    Ok(text)
}

fn main_screen(model: &Model, rows: &mut [Row; DISPLAY_ROWS]) -> fmt::Result {
    let m = model.metrics();

    let [fwd, swr, rl, loss] = rows;

    fwd.write_str("FWD __: ")?;
    write_power(fwd, m.forward_watts, 5)?;
    if model.is_signal_present() {
        fwd.write_str(" S")?;
    }

    swr.write_str("SWR __: ")?;
    if m.swr_saturated() {
        swr.write_str(" HIGH")?;
    } else if m.swr > 0.0 {
        write!(swr, "{:>5.1}", m.swr)?;
    }

    rl.write_str("RL ___: ")?;
    if m.return_loss_saturated() {
        write!(rl, ">{:.1} dB", m.return_loss_db)?;
    } else if m.return_loss_db > 0.0 {
        write!(rl, "{:>5.2} dB", m.return_loss_db)?;
    }

    loss.write_str("LOSS _: ")?;
    if m.loss_watts > 0.0 {
        write_power(loss, m.loss_watts, 5)?;
    }
    Ok(())
}

fn info_screen(rows: &mut [Row; DISPLAY_ROWS]) -> fmt::Result {
    for (row, line) in rows.iter_mut().zip(INFO_ROWS) {
        row.write_str(line)?;
    }
    Ok(())
}

fn dbm_screen(model: &Model, rows: &mut [Row; DISPLAY_ROWS]) -> fmt::Result {
    let m = model.metrics();
    let [fwd_dbm, ref_dbm, fwd_w, ref_w] = rows;

    write!(fwd_dbm, "forward: {:.1} dBm", m.forward_dbm)?;
    write!(ref_dbm, "reflected: {:.1} dBm", m.reflected_dbm)?;

    fwd_w.write_str("forward: ")?;
    write_power(fwd_w, m.forward_watts, 5)?;

    ref_w.write_str("reflected: ")?;
    write_power(ref_w, m.reflected_watts, 5)
}

fn raw_screen(model: &Model, rows: &mut [Row; DISPLAY_ROWS]) -> fmt::Result {
    let [freq, codes, cal, rssi] = rows;

    write!(freq, "f: {} t: {}", model.frequency().as_khz(), model.loop_time_ms())?;
    write!(
        codes,
        "fw: {} rw: {}",
        model.forward_code().value(),
        model.reflected_code().value()
    )?;
    write!(cal, "cpl: {:.1} dir: {:.2}", model.coupling(), model.directivity())?;
    write!(rssi, "rs: {}", model.rssi().value())
}

/// Tracks whether the display content changed since the last flush
#[derive(Clone, Debug, Default)]
pub struct UiState {
    shown: Option<ScreenText>,
}

impl UiState {
    /// Create with nothing shown yet
    #[must_use]
    pub const fn new() -> Self {
        Self { shown: None }
    }

    /// Render the record; returns the text only if it differs from
    /// what is on the panel
    ///
    /// A render failure leaves the shown text untouched.
    pub fn refresh(&mut self, model: &Model) -> Result<Option<&ScreenText>, fmt::Error> {
        let text = render(model)?;
        if self.shown.as_ref() == Some(&text) {
            return Ok(None);
        }
        self.shown = Some(text);
        Ok(self.shown.as_ref())
    }

    /// Force the next refresh to redraw
    pub fn invalidate(&mut self) {
        self.shown = None;
    }
}
