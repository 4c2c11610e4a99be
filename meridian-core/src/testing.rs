//! Shared peripheral fakes for unit tests

use std::collections::VecDeque;
use std::string::String;
use std::vec::Vec;

use crate::time::TimeRecord;
use crate::traits::{
    AlarmConfig, ButtonPad, Frame, FrameError, RtcDriver, RtcError, RtcTarget, SensorError,
    TemperatureSensor, FRAME_COLS, FRAME_ROWS,
};

/// In-memory 16x4 character frame.
pub(crate) struct FakeFrame {
    cells: [[char; FRAME_COLS as usize]; FRAME_ROWS as usize],
    col: u8,
    row: u8,
    pub clears: usize,
    pub flushes: usize,
}

impl FakeFrame {
    pub fn new() -> FakeFrame {
        FakeFrame {
            cells: [[' '; FRAME_COLS as usize]; FRAME_ROWS as usize],
            col: 0,
            row: 0,
            clears: 0,
            flushes: 0,
        }
    }

    /// One row as a 16-character string.
    pub fn row(&self, row: usize) -> String {
        self.cells[row].iter().collect()
    }
}

impl Frame for FakeFrame {
    fn clear(&mut self) {
        self.cells = [[' '; FRAME_COLS as usize]; FRAME_ROWS as usize];
        self.col = 0;
        self.row = 0;
        self.clears += 1;
    }

    fn set_cursor(&mut self, col: u8, row: u8) {
        self.col = col;
        self.row = row;
    }

    fn put_char(&mut self, glyph: char) {
        if self.col < FRAME_COLS && self.row < FRAME_ROWS {
            self.cells[self.row as usize][self.col as usize] = glyph;
        }
        self.col = self.col.saturating_add(1);
    }

    fn put_str(&mut self, text: &str) {
        for glyph in text.chars() {
            self.put_char(glyph);
        }
    }

    fn flush(&mut self) -> Result<(), FrameError> {
        self.flushes += 1;
        Ok(())
    }
}

/// RTC fake holding one record per target plus the flag/enable state.
pub(crate) struct FakeRtc {
    times: [Option<TimeRecord>; 5],
    pub flagged: [bool; 2],
    pub enabled: [bool; 2],
    pub vbat_set: bool,
    pub running: bool,
    pub power_fail_cleared: bool,
    pub disables: Vec<RtcTarget>,
    pub alarm_configs: Vec<(RtcTarget, AlarmConfig)>,
}

impl FakeRtc {
    pub fn new() -> FakeRtc {
        FakeRtc {
            times: [None; 5],
            flagged: [false; 2],
            enabled: [false; 2],
            vbat_set: false,
            running: true,
            power_fail_cleared: false,
            disables: Vec::new(),
            alarm_configs: Vec::new(),
        }
    }

    /// Fake with a live clock value and the backup battery set.
    pub fn with_clock(time: TimeRecord) -> FakeRtc {
        let mut rtc = FakeRtc::new();
        rtc.times[Self::slot(RtcTarget::Clock)] = Some(time);
        rtc.vbat_set = true;
        rtc
    }

    pub fn time_at(&self, target: RtcTarget) -> Option<TimeRecord> {
        self.times[Self::slot(target)]
    }

    pub fn set_time(&mut self, target: RtcTarget, time: TimeRecord) {
        self.times[Self::slot(target)] = Some(time);
    }

    fn slot(target: RtcTarget) -> usize {
        match target {
            RtcTarget::Clock => 0,
            RtcTarget::Alarm0 => 1,
            RtcTarget::Alarm1 => 2,
            RtcTarget::PowerDown => 3,
            RtcTarget::PowerUp => 4,
        }
    }

    fn alarm_index(target: RtcTarget) -> usize {
        match target {
            RtcTarget::Alarm0 => 0,
            RtcTarget::Alarm1 => 1,
            _ => panic!("not an alarm target: {target:?}"),
        }
    }
}

impl RtcDriver for FakeRtc {
    fn read_time(&mut self, target: RtcTarget) -> Result<TimeRecord, RtcError> {
        let mut time = self.times[Self::slot(target)].expect("target never written");
        if !target.has_seconds() {
            time.second = 0;
        }
        if !target.has_year() {
            time.year = 0;
        }
        Ok(time)
    }

    fn write_time(&mut self, target: RtcTarget, time: &TimeRecord) -> Result<(), RtcError> {
        self.times[Self::slot(target)] = Some(*time);
        Ok(())
    }

    fn start_clock(&mut self) -> Result<(), RtcError> {
        self.running = true;
        Ok(())
    }

    fn stop_clock(&mut self) -> Result<(), RtcError> {
        self.running = false;
        Ok(())
    }

    fn enable_alarm(&mut self, target: RtcTarget, config: AlarmConfig) -> Result<(), RtcError> {
        self.enabled[Self::alarm_index(target)] = true;
        self.alarm_configs.push((target, config));
        Ok(())
    }

    fn disable_alarm(&mut self, target: RtcTarget) -> Result<(), RtcError> {
        let index = Self::alarm_index(target);
        self.enabled[index] = false;
        self.flagged[index] = false;
        self.disables.push(target);
        Ok(())
    }

    fn alarm_flagged(&mut self, target: RtcTarget) -> Result<bool, RtcError> {
        Ok(self.flagged[Self::alarm_index(target)])
    }

    fn backup_battery_set(&mut self) -> Result<bool, RtcError> {
        Ok(self.vbat_set)
    }

    fn enable_backup_battery(&mut self) -> Result<(), RtcError> {
        self.vbat_set = true;
        Ok(())
    }

    fn clear_power_fail(&mut self) -> Result<(), RtcError> {
        self.power_fail_cleared = true;
        Ok(())
    }
}

/// Sensor fake returning a fixed Celsius reading.
pub(crate) struct FakeSensor(pub f32);

impl TemperatureSensor for FakeSensor {
    fn read_celsius(&mut self) -> Result<f32, SensorError> {
        Ok(self.0)
    }
}

/// Button fake replaying a queue of poll samples, idle once drained.
pub(crate) struct FakeButtons {
    samples: VecDeque<u8>,
}

impl FakeButtons {
    pub fn idle() -> FakeButtons {
        FakeButtons {
            samples: VecDeque::new(),
        }
    }

    pub fn replay(samples: &[u8]) -> FakeButtons {
        FakeButtons {
            samples: samples.iter().copied().collect(),
        }
    }
}

impl ButtonPad for FakeButtons {
    fn read_mask(&mut self) -> u8 {
        self.samples.pop_front().unwrap_or(0)
    }
}
