//! Binary-coded decimal codec
//!
//! The MCP79410 keeps every time field as two packed decimal digits,
//! one per nibble. All register values cross this boundary.

/// Decode a packed BCD byte to its plain integer value.
///
/// Only defined for bytes whose nibbles are both in 0..=9; the RTC is
/// trusted to emit valid BCD, so out-of-range nibbles are not checked.
pub const fn to_int(data: u8) -> u8 {
    ((data >> 4) * 10) + (data & 0x0F)
}

/// Encode an integer in 0..=99 as a packed BCD byte.
pub const fn from_int(value: u8) -> u8 {
    ((value / 10) << 4) | (value % 10)
}
