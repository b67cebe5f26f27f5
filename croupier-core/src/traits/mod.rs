//! Seams between the console and the board
//!
//! The console only commands motors through [`Actuator`]; the drivers
//! crate supplies the H-bridge implementation.

pub mod actuator;

pub use actuator::{Actuator, MotorDirection, MotorId};
