//! Zenertest - Diode / Zener Tester Firmware
//!
//! Main firmware binary for RP2040-based tester boards. Press the scan
//! button to measure whatever is connected between the red and black
//! probes; the result and a diagram of the component orientation appear
//! on the 16x2 LCD.
//!
//! Board wiring:
//! - GPIO26 / ADC0: terminal A (red probe) divider
//! - GPIO27 / ADC1: terminal B (black probe) divider
//! - GPIO14: forward excitation, GPIO15: reverse excitation
//! - GPIO16: scan button (active high, pulled down)
//! - GPIO8 RS, GPIO9 E, GPIO10-13 D4-D7: HD44780 LCD

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{Adc, Channel, Config as AdcConfig};
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_time::{Delay, Timer};
use embedded_hal::delay::DelayNs;
use {defmt_rtt as _, panic_probe as _};

use zenertest_core::tester::CycleError;
use zenertest_core::traits::{AnalogFrontEnd, DisplaySink, Excitation};
use zenertest_core::ui::render_message;
use zenertest_core::{Classification, Tester};
use zenertest_drivers::{GpioExcitation, Hd44780, ScanButton};

use crate::config::TESTER_CONFIG;
use crate::front_end::Rp2040FrontEnd;

mod config;
mod front_end;

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Zenertest firmware starting...");

    let config = TESTER_CONFIG;

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Excitation lines first, so the probes are unpowered as early as possible
    let excitation = GpioExcitation::new(
        Output::new(p.PIN_14, Level::Low),
        Output::new(p.PIN_15, Level::Low),
    );

    // Setup LCD
    let mut lcd = Hd44780::new(
        Output::new(p.PIN_8, Level::Low),
        Output::new(p.PIN_9, Level::Low),
        [
            Output::new(p.PIN_10, Level::Low),
            Output::new(p.PIN_11, Level::Low),
            Output::new(p.PIN_12, Level::Low),
            Output::new(p.PIN_13, Level::Low),
        ],
        Delay,
    );
    if let Err(e) = lcd.init() {
        error!("LCD init failed: {}", e);
    }
    if let Err(e) = render_message("Initializing...", &mut lcd) {
        warn!("LCD write failed: {}", e);
    }

    // Let the excitation step-up converter stabilise
    Timer::after_millis(config.ui.startup_ms as u64).await;

    if let Err(e) = lcd.load_glyphs() {
        error!("Glyph upload failed: {}", e);
    }
    info!("LCD initialized");

    // Setup ADC for the probe terminals
    let adc = Adc::new_blocking(p.ADC, AdcConfig::default());
    let front_end = Rp2040FrontEnd::new(
        adc,
        Channel::new_pin(p.PIN_26, Pull::None),
        Channel::new_pin(p.PIN_27, Pull::None),
    );

    let mut tester = Tester::new(front_end, excitation, Delay, &config);
    let mut button = ScanButton::new_active_high(Input::new(p.PIN_16, Pull::Down));
    info!(
        "Tester ready: {} uV/step, open {} dV, short {} dV",
        config.front_end.uv_per_step(),
        config.thresholds.open_dv,
        config.thresholds.short_dv
    );

    // Measure whatever is connected at power-up
    measure(&mut tester, &mut lcd);

    // Service loop: a scan runs to completion before the button is polled again
    loop {
        if button.poll() {
            measure(&mut tester, &mut lcd);
        }
        Timer::after_millis(config.ui.poll_interval_ms as u64).await;
    }
}

/// Run one measurement cycle and log the outcome
fn measure<A, E, D, S>(tester: &mut Tester<A, E, D>, lcd: &mut S)
where
    A: AnalogFrontEnd,
    E: Excitation,
    D: DelayNs,
    S: DisplaySink,
{
    match tester.run_cycle(lcd) {
        Ok(classification) => log_classification(&classification),
        Err(CycleError::Measure(e)) => warn!("Measurement failed: {}", e),
        Err(CycleError::Display(e)) => error!("Display error: {}", e),
    }
}

fn log_classification(classification: &Classification) {
    match classification {
        Classification::Open => info!("Open circuit"),
        Classification::Short => info!("Short circuit"),
        Classification::Diode { direction, voltage } => {
            info!("Diode {}: {} uV", direction, voltage.microvolts())
        }
        Classification::Zener { direction, voltage } => {
            info!("Zener {}: {} uV", direction, voltage.microvolts())
        }
    }
}
