//! Configuration types
//!
//! Timing and behaviour knobs for the dealer. Everything here is fixed at
//! build time; only the operator's menu choices are persisted (see
//! [`crate::settings`]).

mod timing;

pub use timing::{KeyTiming, LongPress, DISCRETE_KEY_TIMING, MATRIX_KEY_TIMING};

/// Console workflow configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConsoleConfig {
    /// Time allowed for boot before the watchdog forces `Safety`
    pub prepare_timeout_ms: u32,
    /// Length of the feedback beep
    pub beep_ms: u16,
    /// Whether the board has a buzzer fitted
    pub buzzer_enabled: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            prepare_timeout_ms: 3000,
            beep_ms: 60,
            buzzer_enabled: false,
        }
    }
}

/// Display timing configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayConfig {
    /// Half-period of the edit-field blink
    pub blink_period_ms: u32,
    /// Time per marquee frame
    pub marquee_period_ms: u32,
    /// Panel brightness, 1..=8
    pub brightness: u8,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            blink_period_ms: 300,
            marquee_period_ms: 120,
            brightness: 5,
        }
    }
}
