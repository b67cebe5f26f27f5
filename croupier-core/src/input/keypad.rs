//! Key classification layer
//!
//! Four keys are wired to GPIOs (power, touch and the two opto sensors).
//! Five more sit in the display controller's key matrix and arrive as
//! bits of its 16-bit scan word.

use croupier_protocol::keyscan::matrix_pressed;

use super::debounce::{Key, KeyState};
use crate::config::{KeyTiming, DISCRETE_KEY_TIMING, MATRIX_KEY_TIMING};

/// Every key the console can see
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyId {
    Power,
    Touch,
    /// Beam across the card exit
    OptoLaunch,
    /// Seat mark on the turntable
    OptoRotate,
    Random,
    Add,
    Sub,
    Setting,
    Launch,
}

pub const KEY_COUNT: usize = 9;

/// GPIO keys
pub const DISCRETE_KEYS: [KeyId; 4] = [
    KeyId::Power,
    KeyId::Touch,
    KeyId::OptoLaunch,
    KeyId::OptoRotate,
];

/// Matrix keys, in key-scan bit map order
pub const MATRIX_KEYS: [KeyId; 5] = [
    KeyId::Random,
    KeyId::Add,
    KeyId::Sub,
    KeyId::Setting,
    KeyId::Launch,
];

impl KeyId {
    fn index(self) -> usize {
        self as usize
    }
}

/// Active levels of the GPIO keys for one scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DiscreteLevels {
    pub power: bool,
    pub touch: bool,
    pub opto_launch: bool,
    pub opto_rotate: bool,
}

impl DiscreteLevels {
    /// Convert raw pin levels
    ///
    /// The power and touch keys pull their pin low. The opto sensors drive
    /// theirs high when the beam is interrupted.
    pub fn from_pins(power_high: bool, touch_high: bool, launch_high: bool, rotate_high: bool) -> Self {
        Self {
            power: !power_high,
            touch: !touch_high,
            opto_launch: launch_high,
            opto_rotate: rotate_high,
        }
    }
}

/// Debounced state of every key
///
/// Sole writer of key state. The console only reads it.
#[derive(Debug, Clone)]
pub struct Keypad {
    keys: [Key; KEY_COUNT],
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new(DISCRETE_KEY_TIMING, MATRIX_KEY_TIMING)
    }
}

impl Keypad {
    pub fn new(discrete: KeyTiming, matrix: KeyTiming) -> Self {
        Self {
            keys: [
                Key::new(KeyId::Power, discrete),
                Key::new(KeyId::Touch, discrete),
                Key::new(KeyId::OptoLaunch, discrete),
                Key::new(KeyId::OptoRotate, discrete),
                Key::new(KeyId::Random, matrix),
                Key::new(KeyId::Add, matrix),
                Key::new(KeyId::Sub, matrix),
                Key::new(KeyId::Setting, matrix),
                Key::new(KeyId::Launch, matrix),
            ],
        }
    }

    /// Classify one poll of both key sources
    pub fn scan(&mut self, discrete: DiscreteLevels, key_scan: u16) {
        self.key_mut(KeyId::Power).scan(discrete.power);
        self.key_mut(KeyId::Touch).scan(discrete.touch);
        self.key_mut(KeyId::OptoLaunch).scan(discrete.opto_launch);
        self.key_mut(KeyId::OptoRotate).scan(discrete.opto_rotate);

        for (id, pressed) in MATRIX_KEYS.iter().zip(matrix_pressed(key_scan)) {
            self.key_mut(*id).scan(pressed);
        }
    }

    /// Advance every press timer
    pub fn advance_ms(&mut self, elapsed_ms: u32) {
        for key in self.keys.iter_mut() {
            key.advance_ms(elapsed_ms);
        }
    }

    pub fn key(&self, id: KeyId) -> &Key {
        &self.keys[id.index()]
    }

    pub fn state(&self, id: KeyId) -> KeyState {
        self.key(id).state()
    }

    /// Forget every press in progress, e.g. after waking from sleep
    pub fn reset(&mut self) {
        for key in self.keys.iter_mut() {
            key.reset();
        }
    }

    fn key_mut(&mut self, id: KeyId) -> &mut Key {
        &mut self.keys[id.index()]
    }
}
