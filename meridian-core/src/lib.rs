//! Board-agnostic core logic for the Meridian clock firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - BCD codec for the RTC's register encoding
//! - Time record and carry-propagating increment
//! - Digit-to-glyph rendering
//! - Display mode state machine
//! - The three mode renderers (clock, temperature, calendar)
//! - Application context: init sequence, render step, alarm check
//! - Hardware abstraction traits (RTC, frame, sensor, buttons)

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod app;
pub mod bcd;
pub mod config;
pub mod digits;
pub mod mode;
pub mod render;
pub mod temperature;
pub mod time;
pub mod traits;

#[cfg(test)]
pub(crate) mod testing;
