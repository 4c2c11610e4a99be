//! Temperature conversion and display decomposition
//!
//! The sensor reports Celsius as a float; the display shows both
//! scales as fixed-width `NN.NN` fields. Rounding to hundredths is
//! done on the millidegree value with half-away-from-zero ties, using
//! truncating integer division so both halves come from the same
//! scaled value.

/// Convert degrees Celsius to Fahrenheit.
pub fn celsius_to_fahrenheit(c: f32) -> f32 {
    c * 9.0 / 5.0 + 32.0
}

/// Convert degrees Fahrenheit to Celsius.
pub fn fahrenheit_to_celsius(f: f32) -> f32 {
    (f - 32.0) * 5.0 / 9.0
}

/// A temperature rounded to hundredths for display.
///
/// The fractional part is always non-negative, even when the whole
/// part is negative: -5.31 splits into `whole = -5, hundredths = 31`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FixedTemp {
    pub whole: i16,
    pub hundredths: u8,
}

impl FixedTemp {
    /// Round a degree value to hundredths, ties away from zero.
    pub fn round(value: f32) -> FixedTemp {
        let (scaled, hundredths) = if value < 0.0 {
            let scaled = (value * 1000.0 - 5.0) as i32 / 10;
            (scaled, (-scaled % 100) as u8)
        } else {
            let scaled = (value * 1000.0 + 5.0) as i32 / 10;
            (scaled, (scaled % 100) as u8)
        };
        FixedTemp {
            whole: (scaled / 100) as i16,
            hundredths,
        }
    }
}

/// One sensor reading with both display scales derived from it.
///
/// Ephemeral: recomputed every temperature-mode render tick. The
/// Celsius field is derived back from the Fahrenheit value rather than
/// taken from the raw reading, so the two rows always agree with each
/// other after conversion.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TemperatureSample {
    pub raw_celsius: f32,
    pub fahrenheit: FixedTemp,
    pub celsius: FixedTemp,
}

impl TemperatureSample {
    pub fn from_celsius(raw: f32) -> TemperatureSample {
        let fahrenheit = celsius_to_fahrenheit(raw);
        TemperatureSample {
            raw_celsius: raw,
            fahrenheit: FixedTemp::round(fahrenheit),
            celsius: FixedTemp::round(fahrenheit_to_celsius(fahrenheit)),
        }
    }
}
