//! MCP79410 battery-backed real-time clock
//!
//! The RTC keeps every time field in packed BCD. Besides the running
//! clock it has two alarm comparators, a battery-backup switch and a
//! pair of power-fail timestamp registers (minute/hour/date/month
//! only; no seconds, no year).
//!
//! Datasheet points that matter here:
//! - I2C address 0x6F.
//! - The oscillator start bit lives in the seconds register, so the
//!   seconds value must be carried along when touching it. OSCRUN in
//!   the weekday register reports the actual oscillator state.
//! - The weekday register also holds the VBATEN and PWRFAIL bits.
//! - Each alarm's weekday register holds its polarity, match mask and
//!   triggered flag alongside the weekday value.

use embedded_hal::i2c::I2c;

use meridian_core::time::{Meridiem, TimeRecord};
use meridian_core::traits::rtc::{AlarmConfig, AlarmMatch, RtcDriver, RtcError, RtcTarget};

/// Fixed I2C address of the MCP79410 RTCC block.
pub const MCP79410_ADDR: u8 = 0x6F;

/// Register addresses
mod reg {
    pub const RTCSEC: u8 = 0x00;
    pub const RTCWKDAY: u8 = 0x03;
    pub const CONTROL: u8 = 0x07;
    /// First register of each alarm's time block (sec..month).
    pub const ALM0SEC: u8 = 0x0A;
    pub const ALM1SEC: u8 = 0x11;
    /// Weekday/config register of each alarm block.
    pub const ALM0WKDAY: u8 = 0x0D;
    pub const ALM1WKDAY: u8 = 0x14;
    /// Power-fail timestamp blocks (min, hour, date, wkday|month).
    pub const PWRDNMIN: u8 = 0x18;
    pub const PWRUPMIN: u8 = 0x1C;
}

/// Register bits
mod bits {
    /// Oscillator start, in the seconds register.
    pub const ST: u8 = 0x80;
    /// Oscillator running, in the weekday register.
    pub const OSCRUN: u8 = 0x20;
    /// Power-fail latch, in the weekday register.
    pub const PWRFAIL: u8 = 0x10;
    /// Battery backup enable, in the weekday register.
    pub const VBATEN: u8 = 0x08;
    /// 12-hour mode and PM flag, in every hour register.
    pub const HOUR_12: u8 = 0x40;
    pub const HOUR_PM: u8 = 0x20;
    /// Alarm polarity, triggered flag and match-mask field, in the
    /// alarm weekday registers.
    pub const ALMPOL: u8 = 0x80;
    pub const ALMIF: u8 = 0x08;
    pub const ALMMSK: u8 = 0x70;
    /// Alarm enables, in the control register.
    pub const ALM0EN: u8 = 0x10;
    pub const ALM1EN: u8 = 0x20;
}

/// Retries polling OSCRUN after a start/stop request.
const OSC_SETTLE_POLLS: u8 = 100;

/// MCP79410 driver over an `embedded-hal` I2C bus.
pub struct Mcp79410<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2c> Mcp79410<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Mcp79410 {
            i2c,
            address: MCP79410_ADDR,
        }
    }

    fn read_reg(&mut self, register: u8) -> Result<u8, RtcError> {
        let mut value = [0u8];
        self.i2c
            .write_read(self.address, &[register], &mut value)
            .map_err(|_| RtcError::Bus)?;
        Ok(value[0])
    }

    fn write_reg(&mut self, register: u8, value: u8) -> Result<(), RtcError> {
        self.i2c
            .write(self.address, &[register, value])
            .map_err(|_| RtcError::Bus)
    }

    /// Read-modify-write preserving everything outside `mask`.
    fn update_reg(&mut self, register: u8, mask: u8, value: u8) -> Result<(), RtcError> {
        let old = self.read_reg(register)?;
        self.write_reg(register, (old & !mask) | (value & mask))
    }

    fn burst_read(&mut self, start: u8, buffer: &mut [u8]) -> Result<(), RtcError> {
        self.i2c
            .write_read(self.address, &[start], buffer)
            .map_err(|_| RtcError::Bus)
    }

    /// Base of a target's time block (seconds register for the clock
    /// and alarms, minutes register for the power-fail stamps).
    fn base(target: RtcTarget) -> u8 {
        match target {
            RtcTarget::Clock => reg::RTCSEC,
            RtcTarget::Alarm0 => reg::ALM0SEC,
            RtcTarget::Alarm1 => reg::ALM1SEC,
            RtcTarget::PowerDown => reg::PWRDNMIN,
            RtcTarget::PowerUp => reg::PWRUPMIN,
        }
    }

    fn alarm_wkday_reg(target: RtcTarget) -> Option<u8> {
        match target {
            RtcTarget::Alarm0 => Some(reg::ALM0WKDAY),
            RtcTarget::Alarm1 => Some(reg::ALM1WKDAY),
            _ => None,
        }
    }

    fn alarm_enable_bit(target: RtcTarget) -> Option<u8> {
        match target {
            RtcTarget::Alarm0 => Some(bits::ALM0EN),
            RtcTarget::Alarm1 => Some(bits::ALM1EN),
            _ => None,
        }
    }

    fn match_mask(mode: AlarmMatch) -> u8 {
        let field = match mode {
            AlarmMatch::Seconds => 0b000,
            AlarmMatch::Minutes => 0b001,
            AlarmMatch::Hours => 0b010,
            AlarmMatch::Weekday => 0b011,
            AlarmMatch::Date => 0b100,
            AlarmMatch::All => 0b111,
        };
        field << 4
    }

    fn encode_hour(hour_bcd: u8, meridiem: Meridiem) -> u8 {
        let pm = match meridiem {
            Meridiem::Am => 0,
            Meridiem::Pm => bits::HOUR_PM,
        };
        bits::HOUR_12 | pm | (hour_bcd & 0x1F)
    }

    fn decode_hour(raw: u8) -> (u8, Meridiem) {
        let meridiem = if raw & bits::HOUR_PM != 0 {
            Meridiem::Pm
        } else {
            Meridiem::Am
        };
        (raw & 0x1F, meridiem)
    }
}

impl<I2C: I2c> RtcDriver for Mcp79410<I2C> {
    fn read_time(&mut self, target: RtcTarget) -> Result<TimeRecord, RtcError> {
        let base = Self::base(target);
        if target.has_seconds() {
            // sec, min, hour, wkday, date, month[, year]
            let mut buffer = [0u8; 7];
            let len = if target.has_year() { 7 } else { 6 };
            self.burst_read(base, &mut buffer[..len])?;
            let (hour, meridiem) = Self::decode_hour(buffer[2]);
            Ok(TimeRecord {
                second: buffer[0] & 0x7F,
                minute: buffer[1] & 0x7F,
                hour,
                meridiem,
                weekday: buffer[3] & 0x07,
                date: buffer[4] & 0x3F,
                month: buffer[5] & 0x1F,
                year: buffer[6],
            })
        } else {
            // min, hour, date, wkday|month
            let mut buffer = [0u8; 4];
            self.burst_read(base, &mut buffer)?;
            let (hour, meridiem) = Self::decode_hour(buffer[1]);
            Ok(TimeRecord {
                second: 0,
                minute: buffer[0] & 0x7F,
                hour,
                meridiem,
                weekday: buffer[3] >> 5,
                date: buffer[2] & 0x3F,
                month: buffer[3] & 0x1F,
                year: 0,
            })
        }
    }

    fn write_time(&mut self, target: RtcTarget, time: &TimeRecord) -> Result<(), RtcError> {
        let base = Self::base(target);
        if !target.has_seconds() {
            // The hardware stamps these itself; writing them is only
            // useful for bring-up checks.
            self.write_reg(base, time.minute)?;
            self.write_reg(base + 1, Self::encode_hour(time.hour, time.meridiem))?;
            self.write_reg(base + 2, time.date)?;
            self.write_reg(base + 3, (time.weekday << 5) | (time.month & 0x1F))?;
            return Ok(());
        }

        // Seconds first: for the running clock the caller is expected
        // to have stopped the oscillator, so ST stays clear here and
        // start_clock raises it again afterwards.
        self.write_reg(base, time.second)?;
        self.write_reg(base + 1, time.minute)?;
        self.write_reg(base + 2, Self::encode_hour(time.hour, time.meridiem))?;
        // Weekday shares its register with VBATEN/PWRFAIL (clock) or
        // the alarm config bits (alarms); touch only the index field.
        self.update_reg(base + 3, 0x07, time.weekday)?;
        self.write_reg(base + 4, time.date)?;
        self.write_reg(base + 5, time.month & 0x1F)?;
        if target.has_year() {
            self.write_reg(base + 6, time.year)?;
        }
        Ok(())
    }

    fn start_clock(&mut self) -> Result<(), RtcError> {
        self.update_reg(reg::RTCSEC, bits::ST, bits::ST)?;
        for _ in 0..OSC_SETTLE_POLLS {
            if self.read_reg(reg::RTCWKDAY)? & bits::OSCRUN != 0 {
                return Ok(());
            }
        }
        Err(RtcError::Oscillator)
    }

    fn stop_clock(&mut self) -> Result<(), RtcError> {
        self.update_reg(reg::RTCSEC, bits::ST, 0)?;
        for _ in 0..OSC_SETTLE_POLLS {
            if self.read_reg(reg::RTCWKDAY)? & bits::OSCRUN == 0 {
                return Ok(());
            }
        }
        Err(RtcError::Oscillator)
    }

    fn enable_alarm(&mut self, target: RtcTarget, config: AlarmConfig) -> Result<(), RtcError> {
        // Non-alarm targets are a no-op, per the trait.
        let (wkday_reg, enable_bit) = match (Self::alarm_wkday_reg(target), Self::alarm_enable_bit(target)) {
            (Some(wkday_reg), Some(enable_bit)) => (wkday_reg, enable_bit),
            _ => return Ok(()),
        };
        let polarity = if config.polarity_high { bits::ALMPOL } else { 0 };
        let mask = Self::match_mask(config.match_mode);
        // Clears the triggered flag as a side effect of arming.
        self.update_reg(
            wkday_reg,
            bits::ALMPOL | bits::ALMMSK | bits::ALMIF,
            polarity | mask,
        )?;
        self.update_reg(reg::CONTROL, enable_bit, enable_bit)
    }

    fn disable_alarm(&mut self, target: RtcTarget) -> Result<(), RtcError> {
        match Self::alarm_enable_bit(target) {
            Some(enable_bit) => self.update_reg(reg::CONTROL, enable_bit, 0),
            None => Ok(()),
        }
    }

    fn alarm_flagged(&mut self, target: RtcTarget) -> Result<bool, RtcError> {
        match Self::alarm_wkday_reg(target) {
            Some(wkday_reg) => Ok(self.read_reg(wkday_reg)? & bits::ALMIF != 0),
            None => Ok(false),
        }
    }

    fn backup_battery_set(&mut self) -> Result<bool, RtcError> {
        Ok(self.read_reg(reg::RTCWKDAY)? & bits::VBATEN != 0)
    }

    fn enable_backup_battery(&mut self) -> Result<(), RtcError> {
        self.update_reg(reg::RTCWKDAY, bits::VBATEN, bits::VBATEN)
    }

    fn clear_power_fail(&mut self) -> Result<(), RtcError> {
        self.update_reg(reg::RTCWKDAY, bits::PWRFAIL, 0)
    }
}
