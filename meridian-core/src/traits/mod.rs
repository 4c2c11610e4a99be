//! Hardware abstraction traits
//!
//! These traits define the interface between the application logic
//! and hardware-specific implementations.

pub mod frame;
pub mod input;
pub mod rtc;
pub mod sensor;

pub use frame::{Frame, FrameError, FRAME_COLS, FRAME_ROWS};
pub use input::ButtonPad;
pub use rtc::{AlarmConfig, AlarmMatch, RtcDriver, RtcError, RtcTarget};
pub use sensor::{SensorError, TemperatureSensor};
