//! Hardware driver implementations for the Meridian clock
//!
//! Implements the `meridian-core` peripheral traits for the actual
//! parts on the board, over `embedded-hal` 1.0 bus traits:
//!
//! - MCP79410 battery-backed real-time clock (I2C)
//! - TCN75A ambient temperature sensor (I2C)

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod rtc;
pub mod sensor;

#[cfg(test)]
pub(crate) mod testing;
