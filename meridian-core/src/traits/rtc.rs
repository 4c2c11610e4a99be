//! Real-time clock driver trait

use crate::time::TimeRecord;

/// Errors that can occur talking to the RTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RtcError {
    /// Bus transfer failed
    Bus,
    /// Oscillator did not settle after a start/stop request
    Oscillator,
}

/// Register sets addressable on the RTC.
///
/// `PowerDown` and `PowerUp` are the power-fail timestamps; they carry
/// no seconds field and no year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RtcTarget {
    Clock,
    Alarm0,
    Alarm1,
    PowerDown,
    PowerUp,
}

impl RtcTarget {
    /// Whether this target's registers include a seconds field.
    pub fn has_seconds(self) -> bool {
        !matches!(self, RtcTarget::PowerDown | RtcTarget::PowerUp)
    }

    /// Whether this target's registers include a year field.
    pub fn has_year(self) -> bool {
        matches!(self, RtcTarget::Clock)
    }
}

/// Which clock fields an alarm comparator matches against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AlarmMatch {
    Seconds,
    Minutes,
    Hours,
    Weekday,
    Date,
    /// Seconds, minutes, hour, weekday, date and month all match
    All,
}

/// Alarm channel configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlarmConfig {
    /// Drive the interrupt pin high (rather than low) when triggered
    pub polarity_high: bool,
    pub match_mode: AlarmMatch,
}

impl AlarmConfig {
    /// Active-high full match, the configuration both alarms use.
    pub const fn full_match() -> AlarmConfig {
        AlarmConfig {
            polarity_high: true,
            match_mode: AlarmMatch::All,
        }
    }
}

/// Trait for battery-backed BCD real-time clocks.
///
/// Implementations own the bus access; the core only ever deals in
/// [`TimeRecord`]s and targets.
pub trait RtcDriver {
    /// Read one register set. For targets without seconds or year the
    /// missing fields come back as zero.
    fn read_time(&mut self, target: RtcTarget) -> Result<TimeRecord, RtcError>;

    /// Write one register set. Fields the target lacks are ignored.
    fn write_time(&mut self, target: RtcTarget, time: &TimeRecord) -> Result<(), RtcError>;

    /// Start the clock oscillator.
    fn start_clock(&mut self) -> Result<(), RtcError>;

    /// Stop the clock oscillator and wait for it to settle, so the
    /// time registers can be written without a tick racing them.
    fn stop_clock(&mut self) -> Result<(), RtcError>;

    /// Arm one alarm comparator. A non-alarm target is a no-op that
    /// returns `Ok` without touching the device.
    fn enable_alarm(&mut self, target: RtcTarget, config: AlarmConfig) -> Result<(), RtcError>;

    /// Disarm one alarm comparator. A non-alarm target is a no-op.
    fn disable_alarm(&mut self, target: RtcTarget) -> Result<(), RtcError>;

    /// Whether an alarm comparator has triggered since it was armed.
    /// Always false for a non-alarm target.
    fn alarm_flagged(&mut self, target: RtcTarget) -> Result<bool, RtcError>;

    /// Whether the backup battery supply is enabled.
    fn backup_battery_set(&mut self) -> Result<bool, RtcError>;

    /// Enable the backup battery supply.
    fn enable_backup_battery(&mut self) -> Result<(), RtcError>;

    /// Clear the power-fail latch (and with it the timestamp pair).
    fn clear_power_fail(&mut self) -> Result<(), RtcError>;
}
