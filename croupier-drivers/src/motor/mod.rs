//! Motor driver implementations
//!
//! Both dealer motors are brushed DC motors behind an H-bridge with a
//! separate boost-converter enable:
//!
//! - Card feed (out)
//! - Turntable (rotate)

pub mod hbridge;

pub use hbridge::{HBridge, MotorPair};
