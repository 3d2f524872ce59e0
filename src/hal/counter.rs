//! Frequency Counter Input
//!
//! TIM2 runs in external clock mode 1 with TI1 as its clock, so every
//! rising edge of the prescaled RF signal on TIM2_CH1 advances the
//! 32-bit counter in hardware. The measurement loop snapshots the
//! counter once per cycle and [`CounterGate`] does the gating.

use embassy_stm32::pac::timer::vals::{Sms, Ts};
use embassy_stm32::peripherals::TIM2;
use embassy_stm32::timer::low_level::{InputTISelection, Timer};
use embassy_stm32::timer::Channel;
use embassy_stm32::Peripheral;
use embassy_time::Instant;

use crate::frequency::{CounterGate, FrequencySource};
use crate::types::Frequency;

/// Hardware edge counter on TIM2
///
/// `P` keeps the TIM2_CH1 pin configured for its alternate function
/// for as long as the counter lives.
pub struct PulseCounter<'d, P> {
    timer: Timer<'d, TIM2>,
    _pin: P,
    gate: CounterGate,
}

impl<'d, P> PulseCounter<'d, P> {
    /// Configure TIM2 as a free-running edge counter and open the first gate
    pub fn new(tim: impl Peripheral<P = TIM2> + 'd, pin: P) -> Self {
        let timer = Timer::new(tim);
        timer.stop();

        timer.set_input_ti_selection(Channel::Ch1, InputTISelection::Normal);
        let regs = timer.regs_gp32();
        regs.psc().write_value(0);
        regs.arr().write_value(u32::MAX);
        regs.smcr().modify(|w| {
            w.set_ts(Ts::TI1FP1);
            w.set_sms(Sms::EXT_CLOCK_MODE);
        });
        regs.cnt().write_value(0);

        timer.start();

        let gate = CounterGate::new(0, Instant::now().as_micros());
        Self {
            timer,
            _pin: pin,
            gate,
        }
    }

    /// Current edge count
    #[must_use]
    pub fn count(&self) -> u32 {
        self.timer.regs_gp32().cnt().read()
    }
}

impl<P> FrequencySource for PulseCounter<'_, P> {
    fn poll(&mut self) -> Option<Frequency> {
        let count = self.count();
        self.gate.update(count, Instant::now().as_micros());
        self.gate.poll()
    }
}
