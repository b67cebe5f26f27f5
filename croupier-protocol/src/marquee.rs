//! Marquee animation
//!
//! A single lit segment runs clockwise around the outline of positions
//! 0-3, lingering on both vertical edges for a frame. Stepping the index
//! down runs it counter-clockwise.

use crate::glyph::{SEG_A, SEG_B, SEG_C, SEG_D, SEG_E, SEG_F};
use crate::layout::POSITIONS;

/// Frames in one lap
pub const MARQUEE_STEPS: usize = 14;

pub const MARQUEE_TABLE: [[u8; POSITIONS]; MARQUEE_STEPS] = [
    [SEG_A, 0, 0, 0, 0],
    [0, SEG_A, 0, 0, 0],
    [0, 0, SEG_A, 0, 0],
    [0, 0, 0, SEG_A, 0],
    [0, 0, 0, SEG_B, 0],
    [0, 0, 0, SEG_B | SEG_C, 0],
    [0, 0, 0, SEG_C, 0],
    [0, 0, 0, SEG_D, 0],
    [0, 0, SEG_D, 0, 0],
    [0, SEG_D, 0, 0, 0],
    [SEG_D, 0, 0, 0, 0],
    [SEG_E, 0, 0, 0, 0],
    [SEG_E | SEG_F, 0, 0, 0, 0],
    [SEG_F, 0, 0, 0, 0],
];

/// Frame for `index`, clamped to the last frame when out of range
pub fn frame(index: u8) -> &'static [u8; POSITIONS] {
    let index = (index as usize).min(MARQUEE_STEPS - 1);
    &MARQUEE_TABLE[index]
}

/// Next index clockwise
pub fn advance(index: u8) -> u8 {
    ((index as usize + 1) % MARQUEE_STEPS) as u8
}

/// Next index counter-clockwise
pub fn regress(index: u8) -> u8 {
    ((index as usize + MARQUEE_STEPS - 1) % MARQUEE_STEPS) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_fifth_position_stays_dark() {
        assert!(MARQUEE_TABLE.iter().all(|step| step[4] == 0));
    }

    #[test]
    fn test_every_step_lights_something() {
        assert!(MARQUEE_TABLE
            .iter()
            .all(|step| step.iter().any(|&seg| seg != 0)));
    }

    #[test]
    fn test_out_of_range_index_is_clamped() {
        assert_eq!(frame(13), frame(200));
    }

    #[test]
    fn test_lap_wraps() {
        assert_eq!(advance(13), 0);
        assert_eq!(regress(0), 13);
    }

    proptest! {
        #[test]
        fn prop_regress_undoes_advance(index in 0u8..14) {
            prop_assert_eq!(regress(advance(index)), index);
        }

        #[test]
        fn prop_fourteen_steps_is_a_lap(index in 0u8..14) {
            let mut i = index;
            for _ in 0..MARQUEE_STEPS {
                i = advance(i);
                prop_assert!((i as usize) < MARQUEE_STEPS);
            }
            prop_assert_eq!(i, index);
        }
    }
}
