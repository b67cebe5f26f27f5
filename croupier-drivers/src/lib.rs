//! Hardware driver implementations
//!
//! This crate provides concrete implementations over the pin traits in
//! croupier-hal for the dealer's peripherals:
//!
//! - TM1639 display/keypad controller (bit-banged 3-wire bus)
//! - H-bridge motor pair implementing the core `Actuator` trait
//! - GPIO buzzer

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod buzzer;
pub mod motor;
pub mod tm1639;

pub use buzzer::Buzzer;
pub use motor::{HBridge, MotorPair};
pub use tm1639::Tm1639;
