//! LTC2309 ADC Driver
//!
//! 8-channel 12-bit I2C ADC digitizing the forward and reflected
//! detector voltages. Each read is a full conversion: the input word
//! selects the channel, and the left-justified result comes back in
//! two bytes.

use core::cell::RefCell;

use embedded_hal::i2c::I2c;

use crate::measure::sampler::RawChannel;

/// Single-ended input selection
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Channel {
    /// CH0 against COM (forward detector)
    Ch0,
    /// CH1 against COM (reflected detector)
    Ch1,
    /// CH2 against COM
    Ch2,
    /// CH3 against COM
    Ch3,
}

impl Channel {
    /// S/D, O/S, S1 and S0 bits of the input word
    #[must_use]
    pub const fn select_bits(self) -> u8 {
        match self {
            Self::Ch0 => 0b1000_0000,
            Self::Ch1 => 0b1100_0000,
            Self::Ch2 => 0b1001_0000,
            Self::Ch3 => 0b1101_0000,
        }
    }
}

impl defmt::Format for Channel {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Ch0 => defmt::write!(f, "CH0"),
            Self::Ch1 => defmt::write!(f, "CH1"),
            Self::Ch2 => defmt::write!(f, "CH2"),
            Self::Ch3 => defmt::write!(f, "CH3"),
        }
    }
}

/// Unipolar conversion bit
const UNIPOLAR: u8 = 0b0000_1000;

/// Input word for a unipolar, awake conversion on `channel`
#[must_use]
pub const fn input_word(channel: Channel) -> u8 {
    channel.select_bits() | UNIPOLAR
}

/// LTC2309 on a blocking I2C bus
///
/// The bus sits in a `RefCell` so both detector channels can share it.
pub struct Ltc2309<I> {
    i2c: RefCell<I>,
    address: u8,
}

impl<I: I2c> Ltc2309<I> {
    /// Create driver at the given 7-bit address
    #[must_use]
    pub const fn new(i2c: I, address: u8) -> Self {
        Self {
            i2c: RefCell::new(i2c),
            address,
        }
    }

    /// Convert one channel, returning the left-justified 16-bit word
    pub fn convert(&self, channel: Channel) -> Result<u16, I::Error> {
        let mut buf = [0u8; 2];
        self.i2c
            .borrow_mut()
            .write_read(self.address, &[input_word(channel)], &mut buf)?;
        Ok(u16::from_be_bytes(buf))
    }

    /// Handle for one input channel
    #[must_use]
    pub const fn channel(&self, channel: Channel) -> Ltc2309Channel<'_, I> {
        Ltc2309Channel { adc: self, channel }
    }
}

/// One LTC2309 input as a sampler channel
pub struct Ltc2309Channel<'a, I> {
    adc: &'a Ltc2309<I>,
    channel: Channel,
}

impl<I: I2c> RawChannel for Ltc2309Channel<'_, I> {
    fn read_raw(&mut self) -> Option<u16> {
        match self.adc.convert(self.channel) {
            Ok(word) => Some(word),
            Err(_) => {
                defmt::warn!("LTC2309 {} read failed", self.channel);
                None
            }
        }
    }
}
