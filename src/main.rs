//! SWR Meter Main Application
//!
//! Entry point for the STM32G474-based SWR and power meter firmware.
//! Initializes hardware, spawns the encoder task and runs the
//! measurement loop.

#![no_std]
#![no_main]

use defmt::{error, info, unwrap, warn};
use embassy_executor::Spawner;
use embassy_futures::yield_now;
use embassy_stm32::adc::{Adc, AdcChannel};
use embassy_stm32::exti::ExtiInput;
use embassy_stm32::gpio::{Input, Level, Output, Pull, Speed};
use embassy_stm32::i2c::I2c;
use embassy_stm32::peripherals::TIM2;
use embassy_stm32::time::Hertz;
use embassy_stm32::timer::input_capture::CapturePin;
use embassy_stm32::usart::{self, UartTx};
use {defmt_rtt as _, panic_probe as _};

use swr_meter::control::ControlInputs;
use swr_meter::drivers::display::Display;
use swr_meter::drivers::encoder::{Encoder, POSITION};
use swr_meter::drivers::ltc2309::{Channel, Ltc2309};
use swr_meter::hal::adc::RssiAdc;
use swr_meter::hal::counter::PulseCounter;
use swr_meter::hal::gpio::{EncoderButton, StatusLed};
use swr_meter::hal::serial::SerialLog;
use swr_meter::meter::{CycleOutcome, Meter};
use swr_meter::prelude::*;
use swr_meter::ui::UiState;

/// Milliseconds since boot, wrapping like the record timestamps
#[allow(clippy::cast_possible_truncation)]
fn now_ms() -> u32 {
    Instant::now().as_millis() as u32
}

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("SWR Meter Firmware v{}", env!("CARGO_PKG_VERSION"));

    // SYSCLK = 170 MHz from HSI through PLL1_R
    let mut config = embassy_stm32::Config::default();
    {
        use embassy_stm32::rcc::*;

        config.rcc.pll = Some(Pll {
            source: PllSource::HSI,
            prediv: PllPreDiv::DIV4,
            mul: PllMul::MUL85,
            divp: None,
            divq: None,
            divr: Some(PllRDiv::DIV2),
        });
        config.rcc.sys = Sysclk::PLL1_R;
        config.rcc.boost = true;
    }
    let p = embassy_stm32::init(config);

    info!("Peripherals initialized");

    let mut led = StatusLed::new(Output::new(p.PA5, Level::Low, Speed::Low));

    // I2C1: LTC2309, PB8 = SCL, PB9 = SDA
    let adc_bus = I2c::new_blocking(
        p.I2C1,
        p.PB8,
        p.PB9,
        Hertz(I2C_FREQUENCY_HZ),
        Default::default(),
    );
    let ltc2309 = Ltc2309::new(adc_bus, LTC2309_I2C_ADDR);

    // I2C2: SSD1306, PA9 = SCL, PA8 = SDA
    let display_bus = I2c::new_blocking(
        p.I2C2,
        p.PA9,
        p.PA8,
        Hertz(I2C_FREQUENCY_HZ),
        Default::default(),
    );
    let mut display = match Display::new(display_bus) {
        Ok(display) => display,
        Err(e) => {
            error!("display init failed: {}", e);
            loop {
                cortex_m::asm::wfi();
            }
        }
    };
    if let Err(e) = display.splash() {
        warn!("splash failed: {}", e);
    }
    Timer::after(Duration::from_millis(SPLASH_HOLD_MS)).await;

    info!("I2C buses initialized at {} Hz", I2C_FREQUENCY_HZ);

    let mut uart_config = usart::Config::default();
    uart_config.baudrate = LOG_BAUD_RATE;
    let uart = match UartTx::new(p.USART2, p.PA2, p.DMA1_CH1, uart_config) {
        Ok(uart) => uart,
        Err(e) => {
            error!("log UART config rejected: {}", e);
            loop {
                cortex_m::asm::wfi();
            }
        }
    };
    let mut log = SerialLog::new(uart);

    let rssi = RssiAdc::new(Adc::new(p.ADC1), p.PB1.degrade_adc());
    let button = EncoderButton::new(Input::new(p.PA4, Pull::Up));

    let encoder_a = ExtiInput::new(p.PA0, p.EXTI0, Pull::Up);
    let encoder_b = ExtiInput::new(p.PA1, p.EXTI1, Pull::Up);
    unwrap!(spawner.spawn(encoder_task(encoder_a, encoder_b)));

    // PA15 = TIM2_CH1, prescaled RF clocks TIM2 directly
    let freq_in = CapturePin::<TIM2, _>::new_ch1(p.PA15, Pull::None);
    let mut counter = PulseCounter::new(p.TIM2, freq_in);

    let mut meter = Meter::new(
        ltc2309.channel(Channel::Ch0),
        ltc2309.channel(Channel::Ch1),
        rssi,
        now_ms(),
    );
    let mut ui = UiState::new();

    info!("Tasks spawned, entering measurement loop");

    loop {
        let inputs = ControlInputs::sample(&POSITION, button.is_pressed());
        let outcome = meter.run_cycle(inputs, &mut counter, now_ms());

        if let CycleOutcome::Measured(record) = outcome {
            if let Err(e) = log.emit(&record).await {
                warn!("log write failed: {}", e);
            }
        }

        led.set(meter.model().is_signal_present());

        match ui.refresh(meter.model()) {
            Ok(Some(screen)) => {
                if let Err(e) = display.draw(screen) {
                    warn!("display update failed: {}", e);
                    ui.invalidate();
                }
            }
            Ok(None) => {}
            Err(_) => warn!("screen text too wide for row"),
        }

        yield_now().await;
    }
}

/// Encoder task - decodes A/B edges into the shared position
#[embassy_executor::task]
async fn encoder_task(a: ExtiInput<'static>, b: ExtiInput<'static>) {
    let mut encoder = Encoder::new(a, b);
    encoder.run(&POSITION).await
}
