//! Croupier Hardware Abstraction Layer
//!
//! This crate defines the hardware traits the dealer firmware is written
//! against. Chip-specific crates implement them over their vendor HAL.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (croupier-firmware)        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  croupier-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!            ┌─────────────────┐
//!            │ croupier-hal-   │
//!            │    stm32g0      │
//!            └─────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`gpio::FlexPin`] - Bidirectional line that switches direction at runtime
//! - [`flash::BlobStore`] - Fixed-size persistent settings record

#![no_std]
#![deny(unsafe_code)]

pub mod flash;
pub mod gpio;

// Re-export key traits at crate root for convenience
pub use flash::{BlobStore, FlashError};
pub use gpio::{FlexPin, InputPin, OutputPin};
