//! TM1639 Display/Keypad Wire Encoding
//!
//! The front panel is a TM1639 LED driver that also scans the key matrix.
//! It talks a 3-wire synchronous bus (CLK, DIO, STB), LSB first, with no
//! acknowledgement and no parity:
//!
//! ```text
//!  STB ‾‾\________________________________/‾‾
//!  CLK ‾‾‾‾\_/‾\_/‾\_/‾\_/‾\_/‾\_/‾\_/‾\_/‾‾‾
//!  DIO ----< b0>< b1>< b2>< b3>< b4>< b5>< b6>< b7>--
//! ```
//!
//! This crate holds everything about that bus that is pure data: command
//! bytes, glyph tables, the marquee animation, display RAM addressing and
//! the key-scan bit map. Pin toggling lives in `croupier-drivers`.
//!
//! A glitched byte or a misread key-scan word cannot be detected at this
//! layer. Key debouncing upstream is what rejects implausible key data.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod command;
pub mod glyph;
pub mod keyscan;
pub mod layout;
pub mod marquee;

pub use command::{clamp_brightness, display_control};
pub use glyph::{digit_glyph, letter_glyph, BLANK_DIGIT, DOT, UNRENDERABLE};
pub use keyscan::{matrix_pressed, KEY_SCAN_BITS, MATRIX_KEYS};
pub use layout::{physical_position, position_writes, POSITIONS};
pub use marquee::{MARQUEE_STEPS, MARQUEE_TABLE};
