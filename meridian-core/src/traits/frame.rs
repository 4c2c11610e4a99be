//! Character frame trait for the display
//!
//! The panel is driven as a 16x4 grid of character cells. Drawing goes
//! into a frame buffer; nothing reaches the glass until [`Frame::flush`],
//! so a frame is always pushed whole.

/// Character columns per row.
pub const FRAME_COLS: u8 = 16;
/// Character rows.
pub const FRAME_ROWS: u8 = 4;

/// Errors pushing a frame to the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Bus transfer failed
    Bus,
}

/// Trait for buffered character displays.
///
/// Buffer operations cannot fail; only the transfer to the panel can.
/// Writes past the right edge of a row are dropped by implementations.
pub trait Frame {
    /// Blank the frame buffer.
    fn clear(&mut self);

    /// Move the write cursor to a character cell.
    fn set_cursor(&mut self, col: u8, row: u8);

    /// Write one glyph at the cursor and advance it.
    fn put_char(&mut self, glyph: char);

    /// Write a string starting at the cursor.
    fn put_str(&mut self, text: &str);

    /// Push the frame buffer to the panel.
    fn flush(&mut self) -> Result<(), FrameError>;
}
