//! ADC Driver
//!
//! Internal ADC channel carrying the receiver RSSI voltage.

use embassy_stm32::adc::{Adc, AnyAdcChannel, SampleTime};
use embassy_stm32::peripherals::ADC1;

use crate::measure::sampler::RawChannel;

/// RSSI input on ADC1
pub struct RssiAdc<'d> {
    adc: Adc<'d, ADC1>,
    channel: AnyAdcChannel<ADC1>,
}

impl<'d> RssiAdc<'d> {
    /// Create the RSSI reader over an ADC1 channel
    #[must_use]
    pub fn new(mut adc: Adc<'d, ADC1>, channel: AnyAdcChannel<ADC1>) -> Self {
        adc.set_sample_time(SampleTime::CYCLES47_5);
        Self { adc, channel }
    }
}

impl RawChannel for RssiAdc<'_> {
    fn read_raw(&mut self) -> Option<u16> {
        Some(self.adc.blocking_read(&mut self.channel))
    }
}
