//! Startup configuration
//!
//! Nothing here is field-adjustable, so the configuration is a set of
//! compile-time constants rather than anything parsed at runtime.

use crate::time::{Meridiem, TimeRecord};

/// Startup configuration for [`crate::app::AppContext::init`].
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockConfig {
    /// Reseed the RTC even if the backup battery kept it running.
    pub force_seed: bool,
    /// Time written when (re)seeding.
    pub seed: TimeRecord,
    /// Alarm 0 fires this many seconds after startup.
    pub alarm0_offset_secs: u32,
    /// Alarm 1 fires this many seconds after alarm 0.
    pub alarm1_offset_secs: u32,
}

impl ClockConfig {
    /// Thursday 5/9/19 6:30:00 PM, alarms at +30 s and +60 s.
    pub const fn new() -> ClockConfig {
        ClockConfig {
            force_seed: true,
            seed: TimeRecord {
                second: 0x00,
                minute: 0x30,
                hour: 0x06,
                meridiem: Meridiem::Pm,
                weekday: 3,
                date: 0x09,
                month: 0x05,
                year: 0x19,
            },
            alarm0_offset_secs: 30,
            alarm1_offset_secs: 30,
        }
    }
}

impl Default for ClockConfig {
    fn default() -> ClockConfig {
        ClockConfig::new()
    }
}
