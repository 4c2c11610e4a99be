//! Meridian - Three-Mode Digital Clock Firmware
//!
//! Main firmware binary for RP2040 boards driving an SSD1306 character
//! display, an MCP79410 battery-backed RTC and a TCN75A thermometer on
//! a shared I2C bus.
//!
//! Named after the Latin "meridies" - the clock face splits the day at
//! noon into AM and PM.

#![no_std]
#![no_main]

use core::cell::RefCell;

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::i2c::{Config as I2cConfig, I2c};
use embassy_time::{Duration, Ticker, Timer};
use embedded_hal_bus::i2c::RefCellDevice;
use {defmt_rtt as _, panic_probe as _};

use meridian_core::app::AppContext;
use meridian_core::config::ClockConfig;
use meridian_drivers::rtc::Mcp79410;
use meridian_drivers::sensor::Tcn75a;

use crate::buttons::ButtonBank;
use crate::display::CharFrame;

mod buttons;
mod display;

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Meridian firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Display, RTC and thermometer all hang off I2C0
    let i2c = I2c::new_blocking(p.I2C0, p.PIN_17, p.PIN_16, I2cConfig::default());
    let bus = RefCell::new(i2c);

    let frame = match CharFrame::new(RefCellDevice::new(&bus)) {
        Ok(frame) => frame,
        Err(_) => defmt::panic!("display init failed"),
    };

    let mut sensor = Tcn75a::new(RefCellDevice::new(&bus));
    if sensor.init().is_err() {
        warn!("thermometer init failed, temperature mode will read 0");
    }

    let rtc = Mcp79410::new(RefCellDevice::new(&bus));

    // Active-low buttons, BTN0 cycles the display mode
    let buttons = ButtonBank::new([
        Input::new(p.PIN_10, Pull::Up),
        Input::new(p.PIN_11, Pull::Up),
        Input::new(p.PIN_12, Pull::Up),
        Input::new(p.PIN_13, Pull::Up),
    ]);

    let mut app = AppContext::new(rtc, frame, sensor, buttons);

    let config = ClockConfig::new();
    let report = match app.init(&config) {
        Ok(report) => report,
        Err(error) => defmt::panic!("clock bring-up failed: {}", error),
    };

    info!("Lost power at: {=str}", report.power_down.stamp(false, false).as_str());
    info!("Power was back at: {=str}", report.power_up.stamp(false, false).as_str());
    if report.seeded {
        info!("The time has been set");
    } else {
        info!("Trusting the battery-backed clock");
    }
    info!("Current time is: {=str}", report.current.stamp(true, true).as_str());
    info!("Alarm 0 is set for: {=str}", report.alarm0.stamp(true, false).as_str());
    info!("Alarm 1 is set for: {=str}", report.alarm1.stamp(true, false).as_str());

    if let Err(error) = app.render_splash() {
        warn!("splash render failed: {}", error);
    }
    Timer::after_secs(2).await;

    let mut ticker = Ticker::every(Duration::from_secs(1));
    loop {
        match app.render_step() {
            Ok(step) if step.mode_changed => {
                info!("BUTTON PRESSED MODE CHANGE Mode={}", step.mode.index());
            }
            Ok(_) => {}
            Err(error) => warn!("render failed: {}", error),
        }

        ticker.next().await;

        match app.check_alarms() {
            Ok(events) => {
                if events.alarm0 {
                    info!("ALARM 0!!!");
                }
                if events.alarm1 {
                    info!("ALARM 1!!!");
                }
            }
            Err(error) => warn!("alarm check failed: {}", error),
        }
    }
}
