//! Key timing presets

/// Long-press behaviour of a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LongPress {
    /// One threshold that keeps re-firing while the key is held
    Repeating { period_ms: u32 },
    /// Two escalating thresholds; the second is final until release
    Staged { first_ms: u32, second_ms: u32 },
}

/// Per-key classification thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyTiming {
    /// A level must hold this long before it counts as a press
    pub debounce_ms: u32,
    /// Releases shorter than this are clicks
    pub click_max_ms: u32,
    /// Long-press tiers
    pub long_press: LongPress,
}

/// GPIO keys and opto sensors
pub const DISCRETE_KEY_TIMING: KeyTiming = KeyTiming {
    debounce_ms: 3,
    click_max_ms: 500,
    long_press: LongPress::Staged {
        first_ms: 2000,
        second_ms: 4000,
    },
};

/// Keys scanned by the display controller
///
/// A press must show up on two consecutive 10ms polls.
pub const MATRIX_KEY_TIMING: KeyTiming = KeyTiming {
    debounce_ms: 10,
    click_max_ms: 500,
    long_press: LongPress::Repeating { period_ms: 1000 },
};

impl Default for KeyTiming {
    fn default() -> Self {
        DISCRETE_KEY_TIMING
    }
}
