//! Mode renderers
//!
//! Each renderer draws one complete frame: clear the buffer, draw the
//! title row and the mode's content, then flush. The panel never shows
//! a partially drawn frame.

use crate::bcd;
use crate::digits::glyph_pair;
use crate::temperature::{FixedTemp, TemperatureSample};
use crate::time::{Meridiem, TimeRecord};
use crate::traits::{Frame, FrameError};

/// Title card shown for a couple of seconds at power-on.
pub fn render_splash<F: Frame>(frame: &mut F) -> Result<(), FrameError> {
    frame.clear();
    frame.set_cursor(0, 0);
    frame.put_str(" Digital Clock");
    frame.set_cursor(0, 2);
    frame.put_str("BTN0 cycles mode");
    frame.flush()
}

/// Clock mode: `HH:MM:SS AM/PM`, with the separator alternating
/// between ':' and ' ' on every call as a blink effect.
pub fn render_clock<F: Frame>(
    frame: &mut F,
    time: &TimeRecord,
    separator_on: bool,
) -> Result<(), FrameError> {
    let separator = if separator_on { ':' } else { ' ' };

    frame.clear();
    frame.set_cursor(0, 0);
    frame.put_str(" Digi Clock Mode");
    frame.set_cursor(0, 2);
    put_two_digits(frame, bcd::to_int(time.hour));
    frame.put_char(separator);
    put_two_digits(frame, bcd::to_int(time.minute));
    frame.put_char(separator);
    put_two_digits(frame, bcd::to_int(time.second));
    frame.put_char(' ');
    frame.put_str(match time.meridiem {
        Meridiem::Am => " AM",
        Meridiem::Pm => " PM",
    });
    frame.flush()
}

/// Temperature mode: one `NN.NN` row per scale.
pub fn render_temperature<F: Frame>(
    frame: &mut F,
    sample: &TemperatureSample,
) -> Result<(), FrameError> {
    frame.clear();
    frame.set_cursor(0, 0);
    frame.put_str("Temperature Mode");
    frame.set_cursor(0, 2);
    put_fixed(frame, &sample.fahrenheit);
    frame.put_str(" F");
    frame.set_cursor(0, 3);
    put_fixed(frame, &sample.celsius);
    frame.put_str(" C");
    frame.flush()
}

/// Calendar mode: weekday name and `MM/DD/YY`.
pub fn render_calendar<F: Frame>(frame: &mut F, time: &TimeRecord) -> Result<(), FrameError> {
    frame.clear();
    frame.set_cursor(0, 0);
    frame.put_str("Calendar Mode");
    frame.set_cursor(0, 2);
    frame.put_str(time.weekday_name());
    frame.set_cursor(0, 3);
    put_two_digits(frame, bcd::to_int(time.month));
    frame.put_char('/');
    put_two_digits(frame, bcd::to_int(time.date));
    frame.put_char('/');
    put_two_digits(frame, bcd::to_int(time.year));
    frame.flush()
}

/// Emit both glyphs of a two-digit field, tens first.
fn put_two_digits<F: Frame>(frame: &mut F, value: u8) {
    let (tens, units) = glyph_pair(value);
    frame.put_char(tens);
    frame.put_char(units);
}

/// Emit a `NN.NN` temperature field, '-' prefixed when negative. The
/// fractional digits are non-negative regardless of sign.
fn put_fixed<F: Frame>(frame: &mut F, value: &FixedTemp) {
    if value.whole < 0 {
        frame.put_char('-');
    }
    put_two_digits(frame, value.whole.unsigned_abs() as u8);
    frame.put_char('.');
    put_two_digits(frame, value.hundredths);
}
