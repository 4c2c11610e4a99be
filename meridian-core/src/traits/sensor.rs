//! Temperature sensor trait

/// Errors that can occur reading the sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Bus transfer failed
    Bus,
}

/// Trait for ambient temperature sensors.
pub trait TemperatureSensor {
    /// Read the current ambient temperature in degrees Celsius.
    ///
    /// Takes `&mut self` because the read is a bus transaction.
    fn read_celsius(&mut self) -> Result<f32, SensorError>;
}
