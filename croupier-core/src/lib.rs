//! Board-agnostic core logic for the card dealer firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Key debouncing and classification
//! - Console workflow state machine and settings menu
//! - Dealing sequencer
//! - Display content composition and change detection
//! - Actuator trait and sensor smoothing
//! - Configuration and the persisted settings codec
//!
//! Data flows one way per tick:
//!
//! ```text
//! raw levels -> Keypad -> Console -> DisplayDescriptor -> Composer -> driver
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod console;
pub mod display;
pub mod input;
pub mod sensor;
#[cfg(feature = "serde")]
pub mod settings;
pub mod traits;
