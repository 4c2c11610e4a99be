//! Display mode state machine
//!
//! One button cycles the display through its three modes. Detection is
//! a single poll sample compared against the mode button's bitmask, so
//! a button held across loop iterations retriggers every second; there
//! is no debounce layer beyond the once-per-iteration poll.

/// Poll mask that advances the display mode (button 0 alone).
pub const MODE_BUTTON_MASK: u8 = 0b0001;

/// The three display modes, numbered as they cycle modulo 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayMode {
    Calendar = 0,
    Clock = 1,
    Temperature = 2,
}

impl DisplayMode {
    /// The mode after one button press: `(mode + 1) % 3`.
    pub fn next(self) -> DisplayMode {
        match self {
            DisplayMode::Clock => DisplayMode::Temperature,
            DisplayMode::Temperature => DisplayMode::Calendar,
            DisplayMode::Calendar => DisplayMode::Clock,
        }
    }

    /// Mode number as logged on the console.
    pub fn index(self) -> u8 {
        self as u8
    }
}

/// Advance `mode` if `mask` is exactly the mode button pattern.
pub fn after_poll(mode: DisplayMode, mask: u8) -> DisplayMode {
    if mask == MODE_BUTTON_MASK {
        mode.next()
    } else {
        mode
    }
}
