//! Button input trait

/// Trait for a polled button group.
///
/// One sample per loop iteration; bit N set means button N is pressed.
/// There is no debouncing at this level.
pub trait ButtonPad {
    /// Read the current button bitmask.
    fn read_mask(&mut self) -> u8;
}
