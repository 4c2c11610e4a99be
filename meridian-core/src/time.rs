//! Time record and carry-propagating arithmetic
//!
//! [`TimeRecord`] mirrors the RTC's register file: every two-digit
//! field is stored as packed BCD (0x30 in the minute field means 30
//! minutes), the weekday is a plain 0-6 index and the meridiem is a
//! separate flag, exactly as the hour register splits them.

use core::fmt::Write;

use heapless::String;

use crate::bcd;

/// AM/PM designator for 12-hour time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Meridiem {
    Am,
    Pm,
}

/// Weekday names indexed by the RTC's weekday field.
///
/// Which weekday starts this table is arbitrary; the index is opaque
/// and only has to match whatever was written when the clock was set.
pub const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// One snapshot of the RTC register file.
///
/// `second`, `minute`, `hour`, `date`, `month` and `year` are packed
/// BCD bytes. `hour` runs 1-12 with [`Meridiem`] carrying AM/PM;
/// `weekday` is the raw 0-6 index into [`WEEKDAYS`]; `year` holds the
/// low two digits only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeRecord {
    pub second: u8,
    pub minute: u8,
    pub hour: u8,
    pub meridiem: Meridiem,
    pub weekday: u8,
    pub date: u8,
    pub month: u8,
    pub year: u8,
}

impl TimeRecord {
    /// Advance this record by `delta_seconds`, carrying seconds into
    /// minutes and minutes into hours. Returns a new record; the input
    /// is left untouched.
    ///
    /// Hour arithmetic runs on a zero-based 0-11 scale internally
    /// (`hour - 1`) and maps back to 1-12 afterwards, so 12 wraps to 1
    /// rather than 0. The weekday, date, month, year and meridiem are
    /// not advanced: this is a seconds-granularity tick, and rolling
    /// the date across midnight is out of its scope.
    pub fn increment(&self, delta_seconds: u32) -> TimeRecord {
        let mut next = *self;
        let total = bcd::to_int(self.second) as u32 + delta_seconds;
        next.second = bcd::from_int((total % 60) as u8);
        let total = bcd::to_int(self.minute) as u32 + total / 60;
        next.minute = bcd::from_int((total % 60) as u8);
        let total = bcd::to_int(self.hour) as u32 + total / 60 - 1;
        next.hour = bcd::from_int((total % 12 + 1) as u8);
        next
    }

    /// Weekday name for this record's index.
    pub fn weekday_name(&self) -> &'static str {
        WEEKDAYS[self.weekday as usize % WEEKDAYS.len()]
    }

    /// Format this record for the console, `Weekday M/D/YY H:MM:SS PM`.
    ///
    /// The power-fail timestamp registers carry neither seconds nor a
    /// year, so both parts are optional.
    pub fn stamp(&self, with_seconds: bool, with_year: bool) -> String<40> {
        let mut out = String::new();
        // heapless::String only errors on capacity, which 40 bytes covers.
        let _ = write!(
            out,
            "{} {}/{}",
            self.weekday_name(),
            bcd::to_int(self.month),
            bcd::to_int(self.date)
        );
        if with_year {
            let _ = write!(out, "/{:02}", bcd::to_int(self.year));
        }
        let _ = write!(out, " {}:{:02}", bcd::to_int(self.hour), bcd::to_int(self.minute));
        if with_seconds {
            let _ = write!(out, ":{:02}", bcd::to_int(self.second));
        }
        let _ = out.push_str(match self.meridiem {
            Meridiem::Am => " AM",
            Meridiem::Pm => " PM",
        });
        out
    }
}
