//! Two-digit glyph rendering
//!
//! Every numeric field on the display is a fixed-width two-character
//! cell pair: tens digit then units digit, with no leading-zero
//! suppression (5 seconds renders as "05").

/// Split a value in 0..=99 into its tens and units display glyphs.
pub const fn glyph_pair(value: u8) -> (char, char) {
    let (tens, units) = if value >= 10 {
        (value / 10, value % 10)
    } else {
        (0, value)
    };
    ((b'0' + tens) as char, (b'0' + units) as char)
}
