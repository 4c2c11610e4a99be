//! Push button sampling
//!
//! Four active-low buttons wired to pulled-up GPIOs. Bit 0 of the mask
//! is BTN0, the mode button; the rest are reserved.

use embassy_rp::gpio::Input;

use meridian_core::traits::ButtonPad;

pub struct ButtonBank<'d> {
    pins: [Input<'d>; 4],
}

impl<'d> ButtonBank<'d> {
    pub fn new(pins: [Input<'d>; 4]) -> Self {
        Self { pins }
    }
}

impl ButtonPad for ButtonBank<'_> {
    fn read_mask(&mut self) -> u8 {
        let mut mask = 0;
        for (bit, pin) in self.pins.iter().enumerate() {
            if pin.is_low() {
                mask |= 1 << bit;
            }
        }
        mask
    }
}
