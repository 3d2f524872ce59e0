//! OLED Display Driver
//!
//! Draws [`ScreenText`] pages on the 128x32 SSD1306 panel.
//! Uses the SSD1306 controller with I2C interface.

use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use embedded_hal::i2c::I2c;
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::{I2CDisplayInterface, Ssd1306};

use crate::config::{DISPLAY_HEIGHT, DISPLAY_ROWS};
use crate::ui::{ScreenText, SPLASH};

/// Pixel pitch between text rows
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
const ROW_PITCH: i32 = (DISPLAY_HEIGHT / DISPLAY_ROWS as u32) as i32;

/// Display failure
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisplayError {
    /// Controller did not accept the init sequence
    Init,
    /// Frame transfer failed
    Flush,
    /// Drawing into the frame buffer failed
    Draw,
}

impl defmt::Format for DisplayError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Init => defmt::write!(f, "init"),
            Self::Flush => defmt::write!(f, "flush"),
            Self::Draw => defmt::write!(f, "draw"),
        }
    }
}

/// Result type for display operations
pub type DisplayResult<T> = Result<T, DisplayError>;

type Panel<I> =
    Ssd1306<I2CInterface<I>, DisplaySize128x32, BufferedGraphicsMode<DisplaySize128x32>>;

/// OLED display driver
pub struct Display<I: I2c> {
    panel: Panel<I>,
}

impl<I: I2c> Display<I> {
    /// Create and initialize the panel
    pub fn new(i2c: I) -> DisplayResult<Self> {
        let interface = I2CDisplayInterface::new(i2c);
        let mut panel = Ssd1306::new(interface, DisplaySize128x32, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();
        panel.init().map_err(|_| DisplayError::Init)?;
        Ok(Self { panel })
    }

    /// Show the start-up banner
    pub fn splash(&mut self) -> DisplayResult<()> {
        self.panel.clear_buffer();
        Self::text(&mut self.panel, SPLASH, 1)?;
        self.flush()
    }

    /// Replace the panel contents with one screen
    pub fn draw(&mut self, screen: &ScreenText) -> DisplayResult<()> {
        self.panel.clear_buffer();
        for (row, line) in screen.rows().iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
            Self::text(&mut self.panel, line, row as i32)?;
        }
        self.flush()
    }

    fn text(panel: &mut Panel<I>, line: &str, row: i32) -> DisplayResult<()> {
        let style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
        Text::with_baseline(line, Point::new(0, row * ROW_PITCH), style, Baseline::Top)
            .draw(panel)
            .map_err(|_| DisplayError::Draw)?;
        Ok(())
    }

    fn flush(&mut self) -> DisplayResult<()> {
        self.panel.flush().map_err(|_| DisplayError::Flush)
    }
}
