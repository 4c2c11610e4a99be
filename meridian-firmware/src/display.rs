//! SSD1306 character frame
//!
//! Adapts the 128x64 pixel OLED into the 16x4 character grid the core
//! rendering code draws on. Each cell is 8x16 pixels; text lands on
//! even rows of the FONT_8X13 glyphs with a little breathing room.

use embedded_graphics::{
    mono_font::{ascii::FONT_8X13, MonoTextStyle, MonoTextStyleBuilder},
    pixelcolor::BinaryColor,
    prelude::*,
    text::{Baseline, Text},
};
use embedded_hal::i2c::I2c;
use ssd1306::{mode::BufferedGraphicsMode, prelude::*, I2CDisplayInterface, Ssd1306};

use meridian_core::traits::{Frame, FrameError, FRAME_COLS, FRAME_ROWS};

const CELL_WIDTH: i32 = 8;
const CELL_HEIGHT: i32 = 16;

type Display<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

/// A 16x4 character grid over a buffered SSD1306.
pub struct CharFrame<I2C: I2c> {
    display: Display<I2C>,
    style: MonoTextStyle<'static, BinaryColor>,
    col: u8,
    row: u8,
}

impl<I2C: I2c> CharFrame<I2C> {
    pub fn new(i2c: I2C) -> Result<Self, FrameError> {
        let interface = I2CDisplayInterface::new(i2c);
        let mut display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();
        display.init().map_err(|_| FrameError::Bus)?;

        let style = MonoTextStyleBuilder::new()
            .font(&FONT_8X13)
            .text_color(BinaryColor::On)
            .build();

        Ok(Self {
            display,
            style,
            col: 0,
            row: 0,
        })
    }
}

impl<I2C: I2c> Frame for CharFrame<I2C> {
    fn clear(&mut self) {
        self.display.clear_buffer();
        self.col = 0;
        self.row = 0;
    }

    fn set_cursor(&mut self, col: u8, row: u8) {
        self.col = col;
        self.row = row;
    }

    fn put_char(&mut self, ch: char) {
        if self.col >= FRAME_COLS || self.row >= FRAME_ROWS {
            return;
        }
        let origin = Point::new(
            i32::from(self.col) * CELL_WIDTH,
            i32::from(self.row) * CELL_HEIGHT,
        );
        let mut buf = [0u8; 4];
        let text = ch.encode_utf8(&mut buf);
        // Drawing into the buffer cannot fail
        let _ = Text::with_baseline(text, origin, self.style, Baseline::Top)
            .draw(&mut self.display);
        self.col += 1;
    }

    fn put_str(&mut self, text: &str) {
        for ch in text.chars() {
            self.put_char(ch);
        }
    }

    fn flush(&mut self) -> Result<(), FrameError> {
        self.display.flush().map_err(|_| FrameError::Bus)
    }
}
