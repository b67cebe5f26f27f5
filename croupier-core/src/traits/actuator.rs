//! Motor actuator trait
//!
//! The dealer has two brushed motors behind H-bridges: one feeds cards
//! out of the shoe, the other turns the table between seats. Neither has
//! feedback beyond the opto sensors read through the keypad.

/// Which motor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotorId {
    /// Card feed
    Out,
    /// Turntable
    Rotate,
}

/// Drive state of a motor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotorDirection {
    Forward,
    Reverse,
    #[default]
    Stop,
}

/// Motor outputs
///
/// `drive` is called every console tick with the wanted state, so
/// implementations should make repeated calls cheap.
pub trait Actuator {
    fn drive(&mut self, motor: MotorId, direction: MotorDirection);

    /// Stop both motors
    fn stop_all(&mut self) {
        self.drive(MotorId::Out, MotorDirection::Stop);
        self.drive(MotorId::Rotate, MotorDirection::Stop);
    }
}
