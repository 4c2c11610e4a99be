//! Application context and loop steps
//!
//! [`AppContext`] owns the four peripheral collaborators and the bits
//! of state the loop carries between iterations: the display mode, the
//! local clock shadow and the separator blink flag. The firmware loop
//! is strictly `render_step` -> sleep -> `check_alarms`, once per
//! second, on a single thread of control.
//!
//! The clock shadow is read from the RTC once at startup and then
//! advanced locally by one second per iteration, so the displayed
//! clock free-runs rather than re-querying the peripheral every tick.

use crate::bcd;
use crate::config::ClockConfig;
use crate::mode::{self, DisplayMode};
use crate::render;
use crate::temperature::TemperatureSample;
use crate::time::{Meridiem, TimeRecord};
use crate::traits::{
    AlarmConfig, ButtonPad, Frame, FrameError, RtcDriver, RtcError, RtcTarget, SensorError,
    TemperatureSensor,
};

/// Any peripheral failure surfaced to the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AppError {
    Rtc(RtcError),
    Frame(FrameError),
    Sensor(SensorError),
}

impl From<RtcError> for AppError {
    fn from(err: RtcError) -> AppError {
        AppError::Rtc(err)
    }
}

impl From<FrameError> for AppError {
    fn from(err: FrameError) -> AppError {
        AppError::Frame(err)
    }
}

impl From<SensorError> for AppError {
    fn from(err: SensorError) -> AppError {
        AppError::Sensor(err)
    }
}

/// What [`AppContext::init`] found and programmed, for the console.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InitReport {
    /// When power was lost (no seconds or year on this register set).
    pub power_down: TimeRecord,
    /// When power came back.
    pub power_up: TimeRecord,
    /// Whether the clock was reseeded rather than trusted.
    pub seeded: bool,
    /// The running clock value after init.
    pub current: TimeRecord,
    pub alarm0: TimeRecord,
    pub alarm1: TimeRecord,
}

/// Outcome of one render step.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepReport {
    pub mode: DisplayMode,
    pub mode_changed: bool,
}

/// Which alarm channels fired during one check.
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlarmEvents {
    pub alarm0: bool,
    pub alarm1: bool,
}

/// The application context threaded through the loop. No globals:
/// everything the loop touches lives here.
pub struct AppContext<R, F, S, B> {
    rtc: R,
    frame: F,
    sensor: S,
    buttons: B,
    mode: DisplayMode,
    shadow: TimeRecord,
    separator_on: bool,
}

impl<R, F, S, B> AppContext<R, F, S, B>
where
    R: RtcDriver,
    F: Frame,
    S: TemperatureSensor,
    B: ButtonPad,
{
    pub fn new(rtc: R, frame: F, sensor: S, buttons: B) -> Self {
        AppContext {
            rtc,
            frame,
            sensor,
            buttons,
            mode: DisplayMode::Clock,
            shadow: ClockConfig::new().seed,
            separator_on: false,
        }
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    /// The local clock shadow as of the last step.
    pub fn shadow(&self) -> &TimeRecord {
        &self.shadow
    }

    #[cfg(test)]
    pub(crate) fn frame_ref(&self) -> &F {
        &self.frame
    }

    /// Bring up the clock.
    ///
    /// Reads the power-fail timestamp pair, then either trusts the
    /// battery-backed clock or stops it, writes the seed time and
    /// restarts it. Both alarm channels are programmed relative to the
    /// resulting time and armed active-high on a full match. Finally
    /// the backup battery is enabled, the power-fail latch cleared and
    /// the clock shadow taken from a fresh read.
    pub fn init(&mut self, config: &ClockConfig) -> Result<InitReport, AppError> {
        let power_down = self.rtc.read_time(RtcTarget::PowerDown)?;
        let power_up = self.rtc.read_time(RtcTarget::PowerUp)?;

        let seeded = !self.rtc.backup_battery_set()? || config.force_seed;
        let current = if seeded {
            self.rtc.stop_clock()?;
            self.rtc.write_time(RtcTarget::Clock, &config.seed)?;
            self.rtc.start_clock()?;
            self.rtc.enable_backup_battery()?;
            config.seed
        } else {
            self.rtc.read_time(RtcTarget::Clock)?
        };

        let alarm0 = current.increment(config.alarm0_offset_secs);
        self.rtc.write_time(RtcTarget::Alarm0, &alarm0)?;
        let alarm1 = alarm0.increment(config.alarm1_offset_secs);
        self.rtc.write_time(RtcTarget::Alarm1, &alarm1)?;

        self.rtc.enable_alarm(RtcTarget::Alarm0, AlarmConfig::full_match())?;
        self.rtc.enable_alarm(RtcTarget::Alarm1, AlarmConfig::full_match())?;

        self.rtc.enable_backup_battery()?;
        self.rtc.clear_power_fail()?;

        self.mode = DisplayMode::Clock;
        self.separator_on = false;
        self.shadow = self.rtc.read_time(RtcTarget::Clock)?;

        Ok(InitReport {
            power_down,
            power_up,
            seeded,
            current,
            alarm0,
            alarm1,
        })
    }

    /// Draw the power-on title card.
    pub fn render_splash(&mut self) -> Result<(), AppError> {
        render::render_splash(&mut self.frame)?;
        Ok(())
    }

    /// One loop iteration's poll-and-draw: sample the buttons, advance
    /// the mode on the mode-button pattern, tick the clock shadow and
    /// render the active mode's frame.
    ///
    /// The shadow advances every iteration whichever mode is showing,
    /// so switching back to clock mode does not rewind the display.
    pub fn render_step(&mut self) -> Result<StepReport, AppError> {
        let mask = self.buttons.read_mask();
        let previous = self.mode;
        self.mode = mode::after_poll(self.mode, mask);

        match self.mode {
            DisplayMode::Clock => {
                // Quirk, kept deliberately: a two-digit hour drags the
                // meridiem to PM while clock mode is showing.
                if bcd::to_int(self.shadow.hour) > 9 {
                    self.shadow.meridiem = Meridiem::Pm;
                }
                self.separator_on = !self.separator_on;
                render::render_clock(&mut self.frame, &self.shadow, self.separator_on)?;
                self.shadow = self.shadow.increment(1);
            }
            DisplayMode::Temperature => {
                self.shadow = self.shadow.increment(1);
                let sample = TemperatureSample::from_celsius(self.sensor.read_celsius()?);
                render::render_temperature(&mut self.frame, &sample)?;
            }
            DisplayMode::Calendar => {
                self.shadow = self.shadow.increment(1);
                render::render_calendar(&mut self.frame, &self.shadow)?;
            }
        }

        Ok(StepReport {
            mode: self.mode,
            mode_changed: self.mode != previous,
        })
    }

    /// Poll both alarm channels; a flagged channel is disarmed on the
    /// spot so each alarm fires at most once per enable cycle.
    pub fn check_alarms(&mut self) -> Result<AlarmEvents, AppError> {
        let mut events = AlarmEvents::default();
        if self.rtc.alarm_flagged(RtcTarget::Alarm0)? {
            self.rtc.disable_alarm(RtcTarget::Alarm0)?;
            events.alarm0 = true;
        }
        if self.rtc.alarm_flagged(RtcTarget::Alarm1)? {
            self.rtc.disable_alarm(RtcTarget::Alarm1)?;
            events.alarm1 = true;
        }
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::MODE_BUTTON_MASK;
    use crate::testing::{FakeButtons, FakeFrame, FakeRtc, FakeSensor};

    fn power_stamp(hour: u8, minute: u8) -> TimeRecord {
        TimeRecord {
            second: 0,
            minute: bcd::from_int(minute),
            hour: bcd::from_int(hour),
            meridiem: Meridiem::Am,
            weekday: 1,
            date: 0x08,
            month: 0x05,
            year: 0,
        }
    }

    fn rtc_with_power_stamps(mut rtc: FakeRtc) -> FakeRtc {
        rtc.set_time(RtcTarget::PowerDown, power_stamp(11, 40));
        rtc.set_time(RtcTarget::PowerUp, power_stamp(11, 45));
        rtc
    }

    fn context(
        rtc: FakeRtc,
        buttons: FakeButtons,
    ) -> AppContext<FakeRtc, FakeFrame, FakeSensor, FakeButtons> {
        AppContext::new(rtc, FakeFrame::new(), FakeSensor(23.456), buttons)
    }

    fn ready_context() -> AppContext<FakeRtc, FakeFrame, FakeSensor, FakeButtons> {
        let rtc = rtc_with_power_stamps(FakeRtc::new());
        let mut ctx = context(rtc, FakeButtons::idle());
        ctx.init(&ClockConfig::new()).unwrap();
        ctx
    }

    #[test]
    fn init_seeds_a_dead_clock() {
        let mut rtc = rtc_with_power_stamps(FakeRtc::new());
        rtc.vbat_set = false;
        let mut ctx = context(rtc, FakeButtons::idle());

        let config = ClockConfig {
            force_seed: false,
            ..ClockConfig::new()
        };
        let report = ctx.init(&config).unwrap();

        assert!(report.seeded);
        assert_eq!(report.current, config.seed);
        assert_eq!(
            report.current.stamp(true, true).as_str(),
            "Thursday 5/9/19 6:30:00 PM"
        );
    }

    #[test]
    fn init_trusts_a_battery_backed_clock() {
        let running = power_stamp(9, 15);
        let rtc = rtc_with_power_stamps(FakeRtc::with_clock(running));
        let mut ctx = context(rtc, FakeButtons::idle());

        let config = ClockConfig {
            force_seed: false,
            ..ClockConfig::new()
        };
        let report = ctx.init(&config).unwrap();

        assert!(!report.seeded);
        assert_eq!(bcd::to_int(report.current.hour), 9);
        assert_eq!(bcd::to_int(report.current.minute), 15);
    }

    #[test]
    fn force_seed_overrides_the_battery() {
        let rtc = rtc_with_power_stamps(FakeRtc::with_clock(power_stamp(9, 15)));
        let mut ctx = context(rtc, FakeButtons::idle());

        let report = ctx.init(&ClockConfig::new()).unwrap();

        assert!(report.seeded);
        assert_eq!(report.current, ClockConfig::new().seed);
    }

    #[test]
    fn init_programs_both_alarms_after_now() {
        let mut ctx = ready_context();

        // Seed is 6:30:00; alarms land 30 s and 60 s later.
        let report = ctx.init(&ClockConfig::new()).unwrap();
        assert_eq!(bcd::to_int(report.alarm0.second), 30);
        assert_eq!(bcd::to_int(report.alarm0.minute), 30);
        assert_eq!(bcd::to_int(report.alarm1.second), 0);
        assert_eq!(bcd::to_int(report.alarm1.minute), 31);
        // The programmed registers match what was reported.
        assert_eq!(ctx.rtc.time_at(RtcTarget::Alarm0), Some(report.alarm0));
        assert_eq!(ctx.rtc.time_at(RtcTarget::Alarm1), Some(report.alarm1));
    }

    #[test]
    fn init_report_carries_power_fail_stamps() {
        let mut ctx = ready_context();
        let report = ctx.init(&ClockConfig::new()).unwrap();

        // Power-fail registers have no seconds and no year.
        assert_eq!(
            report.power_down.stamp(false, false).as_str(),
            "Tuesday 5/8 11:40 AM"
        );
        assert_eq!(
            report.power_up.stamp(false, false).as_str(),
            "Tuesday 5/8 11:45 AM"
        );
    }

    #[test]
    fn mode_cycles_through_all_three_and_back() {
        let rtc = rtc_with_power_stamps(FakeRtc::new());
        let mut ctx = context(
            rtc,
            FakeButtons::replay(&[MODE_BUTTON_MASK, MODE_BUTTON_MASK, MODE_BUTTON_MASK]),
        );
        ctx.init(&ClockConfig::new()).unwrap();

        let step = ctx.render_step().unwrap();
        assert!(step.mode_changed);
        assert_eq!(step.mode, DisplayMode::Temperature);

        let step = ctx.render_step().unwrap();
        assert_eq!(step.mode, DisplayMode::Calendar);

        let step = ctx.render_step().unwrap();
        assert_eq!(step.mode, DisplayMode::Clock);
        assert!(step.mode_changed);
    }

    #[test]
    fn other_button_patterns_do_not_switch_modes() {
        let rtc = rtc_with_power_stamps(FakeRtc::new());
        let mut ctx = context(rtc, FakeButtons::replay(&[0b0010, 0b0011, 0b0000]));
        ctx.init(&ClockConfig::new()).unwrap();

        for _ in 0..3 {
            let step = ctx.render_step().unwrap();
            assert!(!step.mode_changed);
            assert_eq!(step.mode, DisplayMode::Clock);
        }
    }

    #[test]
    fn clock_shadow_free_runs_one_second_per_step() {
        let mut ctx = ready_context();

        ctx.render_step().unwrap();
        assert_eq!(&ctx.frame_ref().row(2)[..8], "06:30:00");

        ctx.render_step().unwrap();
        // Separator blinks off on the second frame.
        assert_eq!(&ctx.frame_ref().row(2)[..8], "06 30 01");
    }

    #[test]
    fn shadow_keeps_ticking_while_other_modes_show() {
        let rtc = rtc_with_power_stamps(FakeRtc::new());
        let mut ctx = context(rtc, FakeButtons::replay(&[MODE_BUTTON_MASK, 0, 0]));
        ctx.init(&ClockConfig::new()).unwrap();

        // Three steps spent in temperature mode still advance time.
        ctx.render_step().unwrap();
        ctx.render_step().unwrap();
        ctx.render_step().unwrap();
        assert_eq!(bcd::to_int(ctx.shadow().second), 3);
    }

    #[test]
    fn two_digit_hour_forces_pm() {
        let mut late = power_stamp(10, 15);
        late.meridiem = Meridiem::Am;
        let rtc = rtc_with_power_stamps(FakeRtc::with_clock(late));
        let mut ctx = context(rtc, FakeButtons::idle());
        ctx.init(&ClockConfig {
            force_seed: false,
            ..ClockConfig::new()
        })
        .unwrap();

        ctx.render_step().unwrap();
        assert_eq!(&ctx.frame_ref().row(2)[..12], "10:15:00  PM");
        assert_eq!(ctx.shadow().meridiem, Meridiem::Pm);
    }

    #[test]
    fn temperature_mode_renders_a_fresh_sample() {
        let rtc = rtc_with_power_stamps(FakeRtc::new());
        let mut ctx = context(rtc, FakeButtons::replay(&[MODE_BUTTON_MASK]));
        ctx.init(&ClockConfig::new()).unwrap();

        ctx.render_step().unwrap();
        assert_eq!(&ctx.frame_ref().row(2)[..7], "74.22 F");
        assert_eq!(&ctx.frame_ref().row(3)[..7], "23.46 C");
    }

    #[test]
    fn alarms_fire_once_then_disarm() {
        let mut ctx = ready_context();

        let quiet = ctx.check_alarms().unwrap();
        assert!(!quiet.alarm0 && !quiet.alarm1);

        ctx.rtc.flagged[0] = true;
        let events = ctx.check_alarms().unwrap();
        assert!(events.alarm0);
        assert!(!events.alarm1);
        assert_eq!(ctx.rtc.disables, [RtcTarget::Alarm0]);

        // One-shot: the disarmed channel stays quiet afterwards.
        let events = ctx.check_alarms().unwrap();
        assert!(!events.alarm0);
    }

    #[test]
    fn both_alarm_channels_are_independent() {
        let mut ctx = ready_context();
        ctx.rtc.flagged = [true, true];

        let events = ctx.check_alarms().unwrap();
        assert!(events.alarm0 && events.alarm1);
        assert_eq!(ctx.rtc.disables, [RtcTarget::Alarm0, RtcTarget::Alarm1]);
    }

    #[test]
    fn init_arms_both_alarms_full_match() {
        let ctx = ready_context();
        assert_eq!(ctx.rtc.enabled, [true, true]);
        for (_, config) in &ctx.rtc.alarm_configs {
            assert_eq!(*config, AlarmConfig::full_match());
        }
        assert!(ctx.rtc.power_fail_cleared);
        assert!(ctx.rtc.running);
    }
}
