//! System configuration and hardware constants
//!
//! This module defines compile-time constants for the SWR meter hardware.
//! Sampling parameters, bus addresses, pin mappings and the calibration
//! constants of the coupler and detectors are centralized here. Nothing
//! is persisted at runtime; recalibration means rebuilding.

use crate::measure::calibration::{CouplerResponse, DetectorCalibration};

/// System clock frequency (STM32G474 @ 170MHz)
pub const SYSTEM_CLOCK_HZ: u32 = 170_000_000;

/// Number of consecutive raw reads averaged per sample
pub const AVERAGING_WINDOW: usize = 16;

/// Right shift applied to the averaged detector code (divide by 16)
pub const DETECTOR_RESCALE_SHIFT: u32 = 4;

/// Detector ceiling; averaged codes above this are pinned here
pub const DETECTOR_FULL_SCALE: u16 = 3300;

/// Detector noise floor; averaged codes below this read as zero
pub const DETECTOR_NOISE_FLOOR: u16 = 400;

/// RSSI code above which a carrier is considered present
pub const RSSI_PRESENT_THRESHOLD: u16 = 19;

/// Frequency counter gate time in milliseconds
pub const FREQUENCY_GATE_MS: u32 = 40;

/// Division ratio of the external prescaler in front of the counter input
pub const FREQUENCY_PRESCALER: u32 = 8;

/// Highest SWR reported; used when the reflection coefficient saturates
pub const SWR_MAX: f32 = 999.0;

/// Highest return loss reported in dB; used for a perfect match
pub const RETURN_LOSS_MAX_DB: f32 = 99.9;

/// I2C bus frequency for the detector ADC and display
pub const I2C_FREQUENCY_HZ: u32 = 400_000;

/// LTC2309 I2C address (AD1 = AD0 = low)
pub const LTC2309_I2C_ADDR: u8 = 0x08;

/// SSD1306 OLED I2C address
pub const DISPLAY_I2C_ADDR: u8 = 0x3C;

/// Display width in pixels
pub const DISPLAY_WIDTH: u32 = 128;

/// Display height in pixels
pub const DISPLAY_HEIGHT: u32 = 32;

/// Text rows available on the display (8 px font)
pub const DISPLAY_ROWS: usize = 4;

/// Splash screen hold time in milliseconds
pub const SPLASH_HOLD_MS: u64 = 2000;

/// Serial measurement log baud rate
pub const LOG_BAUD_RATE: u32 = 57_600;

/// Encoder counts per mechanical detent
pub const ENCODER_COUNTS_PER_DETENT_SHIFT: u32 = 2;

/// Calibration constants
pub mod calibration {
    //! Coupler and detector calibration, fixed at build time.
    //!
    //! The detector fits map a frequency-corrected detector code (mV) to
    //! dBm at the detector input. The coupler polynomials take frequency
    //! in kHz and return dB.

    use super::{CouplerResponse, DetectorCalibration};

    /// Forward (AD8307) detector
    pub const FORWARD_DETECTOR: DetectorCalibration = DetectorCalibration {
        drift_slope: -0.6282E-3,
        drift_offset: 8.9,
        slope: 0.02452,
        intercept: -71.469,
    };

    /// Reflected (AD8307) detector
    pub const REFLECTED_DETECTOR: DetectorCalibration = DetectorCalibration {
        drift_slope: -0.6473E-3,
        drift_offset: 8.09,
        slope: 0.024_750,
        intercept: -72.722,
    };

    /// Forward coupling attenuation of the directional coupler
    pub const COUPLING: CouplerResponse = CouplerResponse {
        quadratic: 4.389E-10,
        linear: -2.397E-6,
        constant: 37.498,
    };

    /// Reverse isolation (directivity) of the directional coupler
    pub const DIRECTIVITY: CouplerResponse = CouplerResponse {
        quadratic: 1.354E-9,
        linear: -1.858E-5,
        constant: 37.51,
    };

    /// External attenuator in front of both detectors, in dB
    pub const ATTENUATOR_DB: f32 = 20.2;
}

/// Pin assignments for GPIO
pub mod pins {
    //! GPIO pin assignments matching the schematic

    /// Status LED (directly on MCU)
    pub const LED_STATUS: &str = "PA5";

    /// I2C1 SCL (LTC2309 detector ADC)
    pub const I2C1_SCL: &str = "PB8";

    /// I2C1 SDA (LTC2309 detector ADC)
    pub const I2C1_SDA: &str = "PB9";

    /// I2C2 SCL (display)
    pub const I2C2_SCL: &str = "PA9";

    /// I2C2 SDA (display)
    pub const I2C2_SDA: &str = "PA8";

    /// Encoder A input
    pub const ENCODER_A: &str = "PA0";

    /// Encoder B input
    pub const ENCODER_B: &str = "PA1";

    /// Encoder push button (active low)
    pub const ENCODER_SW: &str = "PA4";

    /// RSSI analog input
    pub const RSSI_ADC: &str = "PB1";

    /// Prescaled RF counter input (TIM2_CH1, clocks TIM2)
    pub const FREQ_IN: &str = "PA15";

    /// Serial log TX
    pub const LOG_TX: &str = "PA2";

    /// Serial log RX
    pub const LOG_RX: &str = "PA3";
}
