//! 7-segment glyph tables
//!
//! Segment bits, as the TM1639 maps them to a grid:
//!
//! ```text
//!    --a--
//!   |     |
//!   f     b
//!   |     |
//!    --g--
//!   |     |
//!   e     c
//!   |     |
//!    --d--  .dp
//! ```

pub const SEG_A: u8 = 0x01;
pub const SEG_B: u8 = 0x02;
pub const SEG_C: u8 = 0x04;
pub const SEG_D: u8 = 0x08;
pub const SEG_E: u8 = 0x10;
pub const SEG_F: u8 = 0x20;
pub const SEG_G: u8 = 0x40;

/// Decimal point, ORed onto any glyph
pub const DOT: u8 = 0x80;

/// Digit value that renders as an empty position
pub const BLANK_DIGIT: u8 = 10;

/// Shown for letters a 7-segment cell cannot draw (K, M, N, V, W, X)
///
/// Three horizontal bars. No real letter uses this pattern, so a
/// placeholder on the panel is never mistaken for text.
pub const UNRENDERABLE: u8 = SEG_A | SEG_D | SEG_G;

/// Digits 0-9 followed by the blank code
pub const DIGITS: [u8; 11] = [
    0x3F, // 0
    0x06, // 1
    0x5B, // 2
    0x4F, // 3
    0x66, // 4
    0x6D, // 5
    0x7D, // 6
    0x07, // 7
    0x7F, // 8
    0x6F, // 9
    0x00, // blank
];

/// Letters A-Z, one shape per letter regardless of case
const LETTERS: [u8; 26] = [
    0x77,         // A
    0x7C,         // b
    0x39,         // C
    0x5E,         // d
    0x79,         // E
    0x71,         // F
    0x3D,         // G
    0x76,         // H
    0x30,         // I
    0x1E,         // J
    UNRENDERABLE, // K
    0x38,         // L
    UNRENDERABLE, // M
    UNRENDERABLE, // N
    0x3F,         // O
    0x73,         // P
    0x67,         // q
    0x50,         // r
    0x6D,         // S
    0x78,         // t
    0x3E,         // U
    UNRENDERABLE, // V
    UNRENDERABLE, // W
    UNRENDERABLE, // X
    0x6E,         // y
    0x5B,         // Z
];

/// Encode a digit value; anything above 9 is blank
pub fn digit_glyph(value: u8) -> u8 {
    DIGITS
        .get(value as usize)
        .copied()
        .unwrap_or(DIGITS[BLANK_DIGIT as usize])
}

/// Encode an ASCII character
///
/// A few lowercase letters have their own shape; the rest share the
/// uppercase one. NUL and space are blank.
pub fn letter_glyph(ch: u8) -> u8 {
    match ch {
        b'c' => 0x58,
        b'h' => 0x74,
        b'i' => SEG_E,
        b'o' => 0x5C,
        b'u' => 0x1C,
        b'A'..=b'Z' => LETTERS[(ch - b'A') as usize],
        b'a'..=b'z' => LETTERS[(ch - b'a') as usize],
        b'0'..=b'9' => DIGITS[(ch - b'0') as usize],
        b'-' => SEG_G,
        b'_' => SEG_D,
        b'\0' | b' ' => 0x00,
        _ => UNRENDERABLE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_glyphs() {
        assert_eq!(digit_glyph(0), 0x3F);
        assert_eq!(digit_glyph(5), 0x6D);
        assert_eq!(digit_glyph(8), 0x7F);
        assert_eq!(digit_glyph(BLANK_DIGIT), 0x00);
        assert_eq!(digit_glyph(42), 0x00);
    }

    #[test]
    fn test_letter_case_folding() {
        assert_eq!(letter_glyph(b'A'), 0x77);
        assert_eq!(letter_glyph(b'a'), 0x77);
        assert_eq!(letter_glyph(b'F'), letter_glyph(b'f'));
        assert_eq!(letter_glyph(b'O'), 0x3F);
        assert_eq!(letter_glyph(b'o'), 0x5C);
    }

    #[test]
    fn test_unrenderable_letters_use_placeholder() {
        for ch in *b"KMNVWXkmnvwx" {
            assert_eq!(letter_glyph(ch), UNRENDERABLE, "{}", ch as char);
        }
        assert_eq!(letter_glyph(b'#'), UNRENDERABLE);
    }

    #[test]
    fn test_placeholder_is_not_a_letter() {
        for ch in b'A'..=b'Z' {
            if !b"KMNVWX".contains(&ch) {
                assert_ne!(letter_glyph(ch), UNRENDERABLE, "{}", ch as char);
            }
        }
    }

    #[test]
    fn test_blank_and_punctuation() {
        assert_eq!(letter_glyph(b'\0'), 0x00);
        assert_eq!(letter_glyph(b' '), 0x00);
        assert_eq!(letter_glyph(b'-'), 0x40);
        assert_eq!(letter_glyph(b'7'), digit_glyph(7));
    }
}
