//! STM32G0-specific HAL for the Croupier firmware
//!
//! Wraps embassy-stm32 peripherals in the `croupier-hal` traits. The
//! dealer board uses an STM32G031K8 (64KB flash, 2KB pages).
//!
//! # Features
//!
//! - `stm32g031k8` - Dealer main board MCU
//! - `stm32g030k8` - Cost-reduced variant of the same board
//! - `defmt` - Enable debug formatting support

#![no_std]
#![deny(unsafe_code)]

pub mod flash;
pub mod gpio;

pub use flash::TailPageStore;
pub use gpio::{FlexLine, InputLine, OutputLine, WakeLine};
