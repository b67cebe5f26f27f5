//! Key input
//!
//! Every physical key, opto sensor and matrix key runs through the same
//! debounce automaton. The [`Keypad`] owns one per key and is the only
//! writer of their state.

mod debounce;
mod keypad;
mod wake;

pub use debounce::{Key, KeyState, LongTier};
pub use keypad::{DiscreteLevels, KeyId, Keypad, DISCRETE_KEYS, KEY_COUNT, MATRIX_KEYS};
pub use wake::{WakeGate, WAKE_DEBOUNCE_MS};
