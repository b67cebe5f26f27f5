//! Display content descriptor

use croupier_protocol::glyph::BLANK_DIGIT;

use crate::console::RotationDirection;

/// Cells on the panel
pub const CELLS: usize = 5;

/// What the cells hold
///
/// Digit buffers hold values 0-9 (10 is blank); letter buffers hold ASCII.
/// Buffers are indexed from `start`, so `values[0]` lands on cell `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Body {
    /// Leave the panel blank
    #[default]
    None,
    Digits {
        values: [u8; CELLS],
        start: u8,
        len: u8,
    },
    Letters {
        text: [u8; CELLS],
        start: u8,
        len: u8,
    },
    /// Letters on `start..split`, digits on `split..len`
    LettersAndDigits {
        letters: [u8; CELLS],
        digits: [u8; CELLS],
        start: u8,
        split: u8,
        len: u8,
    },
    /// Spinning outline; the composer owns `index`
    Marquee {
        index: u8,
        direction: RotationDirection,
    },
}

/// Descriptor handed from the console to the display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayDescriptor {
    pub body: Body,
    /// Decimal point per cell, indexed like the body's buffers
    pub dots: [bool; CELLS],
    /// The cells in `blink_mask` flash
    pub blink: bool,
    /// One bit per panel cell, bit 0 is the leftmost
    pub blink_mask: u8,
    /// Blink phase the frame was composed in
    pub blink_visible: bool,
    /// Differs from the last composed frame
    pub dirty: bool,
}

impl DisplayDescriptor {
    pub fn blank() -> Self {
        Self::default()
    }

    pub fn digits(values: [u8; CELLS], dots: [bool; CELLS]) -> Self {
        Self {
            body: Body::Digits {
                values,
                start: 0,
                len: CELLS as u8,
            },
            dots,
            ..Self::default()
        }
    }

    /// Left-aligned text; short strings are padded with blanks
    pub fn letters(text: &[u8]) -> Self {
        Self {
            body: Body::Letters {
                text: pad(text, b' '),
                start: 0,
                len: CELLS as u8,
            },
            ..Self::default()
        }
    }

    /// Text on the left, digits filling the rest of the panel
    pub fn mixed(letters: &[u8], digits: &[u8]) -> Self {
        let split = letters.len().min(CELLS) as u8;
        Self {
            body: Body::LettersAndDigits {
                letters: pad(letters, b' '),
                digits: pad(digits, BLANK_DIGIT),
                start: 0,
                split,
                len: CELLS as u8,
            },
            ..Self::default()
        }
    }

    pub fn marquee(direction: RotationDirection) -> Self {
        Self {
            body: Body::Marquee {
                index: 0,
                direction,
            },
            ..Self::default()
        }
    }

    /// Make the cells in `mask` blink
    pub fn blinking(mut self, mask: u8) -> Self {
        self.blink = true;
        self.blink_mask = mask;
        self
    }

    /// Whether two frames would put the same pattern on the panel
    ///
    /// Compared per body type: only the fields that type renders count.
    pub fn same_content(&self, other: &Self) -> bool {
        if self.dots != other.dots || self.blink_visible != other.blink_visible {
            return false;
        }
        match (self.body, other.body) {
            (Body::None, Body::None) => true,
            (
                Body::Digits { values, start, len },
                Body::Digits {
                    values: v2,
                    start: s2,
                    len: l2,
                },
            ) => values == v2 && start == s2 && len == l2,
            (
                Body::Letters { text, start, len },
                Body::Letters {
                    text: t2,
                    start: s2,
                    len: l2,
                },
            ) => text == t2 && start == s2 && len == l2,
            (
                Body::LettersAndDigits {
                    letters,
                    digits,
                    start,
                    split,
                    len,
                },
                Body::LettersAndDigits {
                    letters: l2,
                    digits: d2,
                    start: s2,
                    split: p2,
                    len: n2,
                },
            ) => letters == l2 && digits == d2 && start == s2 && split == p2 && len == n2,
            (Body::Marquee { index, .. }, Body::Marquee { index: i2, .. }) => index == i2,
            _ => false,
        }
    }

    /// Blank the cells in the blink mask
    pub(crate) fn hide_blinking_cells(&mut self) {
        let mask = self.blink_mask;
        let hidden = |cell: usize| mask & (1 << cell) != 0;

        match &mut self.body {
            Body::Digits { values, start, len } => {
                for (i, value) in values.iter_mut().enumerate().take(*len as usize) {
                    if hidden(*start as usize + i) {
                        *value = BLANK_DIGIT;
                    }
                }
            }
            Body::Letters { text, start, len } => {
                for (i, ch) in text.iter_mut().enumerate().take(*len as usize) {
                    if hidden(*start as usize + i) {
                        *ch = b' ';
                    }
                }
            }
            Body::LettersAndDigits {
                letters,
                digits,
                start,
                split,
                len,
            } => {
                let (start, split, len) = (*start as usize, *split as usize, *len as usize);
                for cell in start..len.min(CELLS) {
                    if !hidden(cell) {
                        continue;
                    }
                    if cell < split {
                        letters[cell - start] = b' ';
                    } else if let Some(d) = digits.get_mut(cell - split) {
                        *d = BLANK_DIGIT;
                    }
                }
            }
            Body::None | Body::Marquee { .. } => {}
        }
    }
}

fn pad(src: &[u8], fill: u8) -> [u8; CELLS] {
    let mut out = [fill; CELLS];
    for (dst, &b) in out.iter_mut().zip(src) {
        *dst = b;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_frames_match() {
        let a = DisplayDescriptor::digits([0, 3, 3, 1, 7], [false, true, true, false, false]);
        assert!(a.same_content(&a));
    }

    #[test]
    fn test_any_field_change_differs() {
        let base = DisplayDescriptor::digits([0, 3, 3, 1, 7], [false; CELLS]);

        let mut other = base;
        other.dots[4] = true;
        assert!(!base.same_content(&other));

        let other = DisplayDescriptor::digits([0, 3, 4, 1, 7], [false; CELLS]);
        assert!(!base.same_content(&other));

        let mut other = base;
        other.blink_visible = !base.blink_visible;
        assert!(!base.same_content(&other));

        assert!(!base.same_content(&DisplayDescriptor::letters(b"03317")));
    }

    #[test]
    fn test_letters_window_change_differs() {
        let base = DisplayDescriptor::letters(b"PAUSE");

        let mut moved = base;
        moved.body = Body::Letters {
            text: *b"PAUSE",
            start: 1,
            len: CELLS as u8,
        };
        assert!(!base.same_content(&moved));

        let mut shorter = base;
        shorter.body = Body::Letters {
            text: *b"PAUSE",
            start: 0,
            len: 4,
        };
        assert!(!base.same_content(&shorter));
    }

    #[test]
    fn test_mixed_field_change_differs() {
        let base = DisplayDescriptor::mixed(b"LF-", &[1, 7]);

        let mut resplit = base;
        if let Body::LettersAndDigits { split, .. } = &mut resplit.body {
            *split = 2;
        }
        assert!(!base.same_content(&resplit));

        let mut moved = base;
        if let Body::LettersAndDigits { start, .. } = &mut moved.body {
            *start = 1;
        }
        assert!(!base.same_content(&moved));

        let mut shorter = base;
        if let Body::LettersAndDigits { len, .. } = &mut shorter.body {
            *len = 4;
        }
        assert!(!base.same_content(&shorter));

        assert!(!base.same_content(&DisplayDescriptor::mixed(b"LF-", &[1, 8])));
        assert!(base.same_content(&DisplayDescriptor::mixed(b"LF-", &[1, 7])));
    }

    #[test]
    fn test_marquee_compares_index_only() {
        let a = DisplayDescriptor::marquee(RotationDirection::Clockwise);
        let b = DisplayDescriptor::marquee(RotationDirection::CounterClockwise);
        assert!(a.same_content(&b));

        let mut c = a;
        c.body = Body::Marquee {
            index: 3,
            direction: RotationDirection::Clockwise,
        };
        assert!(!a.same_content(&c));
    }

    #[test]
    fn test_mixed_layout() {
        let d = DisplayDescriptor::mixed(b"LF-", &[1, 7]);
        assert_eq!(
            d.body,
            Body::LettersAndDigits {
                letters: *b"LF-  ",
                digits: [1, 7, BLANK_DIGIT, BLANK_DIGIT, BLANK_DIGIT],
                start: 0,
                split: 3,
                len: 5,
            }
        );
    }

    #[test]
    fn test_hide_blinking_cells() {
        let mut d = DisplayDescriptor::digits([0, 3, 3, 1, 7], [false; CELLS]).blinking(0b11000);
        d.hide_blinking_cells();
        assert!(matches!(
            d.body,
            Body::Digits { values, .. } if values == [0, 3, 3, BLANK_DIGIT, BLANK_DIGIT]
        ));

        let mut d = DisplayDescriptor::mixed(b"LF-", &[1, 7]).blinking(0b10001);
        d.hide_blinking_cells();
        match d.body {
            Body::LettersAndDigits { letters, digits, .. } => {
                assert_eq!(&letters[..3], b" F-");
                assert_eq!(digits[..2], [1, BLANK_DIGIT]);
            }
            _ => panic!("body changed type"),
        }
    }
}
