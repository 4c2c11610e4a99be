//! TCN75A ambient temperature sensor
//!
//! Two registers matter: the 16-bit ambient temperature register at
//! pointer 0 and the configuration register at pointer 1. The part
//! powers up at 9-bit resolution; init bumps it to 12-bit, where one
//! LSB is 0.0625 degrees C. The reading is left-justified two's
//! complement, so an arithmetic shift recovers sign for free.

use embedded_hal::i2c::I2c;

use meridian_core::traits::sensor::{SensorError, TemperatureSensor};

/// I2C address with all three address pins strapped low.
pub const TCN75A_ADDR: u8 = 0x48;

const REG_AMBIENT: u8 = 0x00;
const REG_CONFIG: u8 = 0x01;

/// Configuration value: 12-bit resolution, everything else default.
const CONFIG_12BIT: u8 = 0x60;

/// Degrees Celsius per LSB at 12-bit resolution.
const DEGREES_PER_LSB: f32 = 0.0625;

/// TCN75A driver over an `embedded-hal` I2C bus.
pub struct Tcn75a<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2c> Tcn75a<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Tcn75a {
            i2c,
            address: TCN75A_ADDR,
        }
    }

    /// Switch the part to 12-bit conversions.
    pub fn init(&mut self) -> Result<(), SensorError> {
        self.i2c
            .write(self.address, &[REG_CONFIG, CONFIG_12BIT])
            .map_err(|_| SensorError::Bus)
    }
}

impl<I2C: I2c> TemperatureSensor for Tcn75a<I2C> {
    fn read_celsius(&mut self) -> Result<f32, SensorError> {
        let mut raw = [0u8; 2];
        self.i2c
            .write_read(self.address, &[REG_AMBIENT], &mut raw)
            .map_err(|_| SensorError::Bus)?;
        let counts = i16::from_be_bytes(raw) >> 4;
        Ok(counts as f32 * DEGREES_PER_LSB)
    }
}
