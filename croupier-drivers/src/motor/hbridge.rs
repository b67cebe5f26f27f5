//! H-bridge motor driver
//!
//! Each bridge has a forward input, a reverse input and an enable for the
//! boost converter feeding it. Stopping pulls both inputs low and drops
//! the enable, so the motor coasts.

use croupier_core::traits::{Actuator, MotorDirection, MotorId};
use croupier_hal::OutputPin;

/// One H-bridge
pub struct HBridge<F, R, E> {
    forward: F,
    reverse: R,
    enable: E,
    direction: MotorDirection,
}

impl<F: OutputPin, R: OutputPin, E: OutputPin> HBridge<F, R, E> {
    /// Create a bridge and make sure it starts stopped
    pub fn new(forward: F, reverse: R, enable: E) -> Self {
        let mut bridge = Self {
            forward,
            reverse,
            enable,
            direction: MotorDirection::Stop,
        };
        bridge.apply(MotorDirection::Stop);
        bridge
    }

    pub fn direction(&self) -> MotorDirection {
        self.direction
    }

    /// Drive in `direction`; repeated requests leave the pins alone
    pub fn set(&mut self, direction: MotorDirection) {
        if direction != self.direction {
            self.apply(direction);
        }
    }

    fn apply(&mut self, direction: MotorDirection) {
        self.direction = direction;
        match direction {
            MotorDirection::Forward => {
                // Break before make
                self.reverse.set_low();
                self.forward.set_high();
                self.enable.set_high();
            }
            MotorDirection::Reverse => {
                self.forward.set_low();
                self.reverse.set_high();
                self.enable.set_high();
            }
            MotorDirection::Stop => {
                self.forward.set_low();
                self.reverse.set_low();
                self.enable.set_low();
            }
        }
    }
}

/// Card feed and turntable bridges
pub struct MotorPair<O, T> {
    out: O,
    rotate: T,
}

impl<OF, OR, OE, TF, TR, TE> MotorPair<HBridge<OF, OR, OE>, HBridge<TF, TR, TE>>
where
    OF: OutputPin,
    OR: OutputPin,
    OE: OutputPin,
    TF: OutputPin,
    TR: OutputPin,
    TE: OutputPin,
{
    pub fn new(out: HBridge<OF, OR, OE>, rotate: HBridge<TF, TR, TE>) -> Self {
        Self { out, rotate }
    }

    pub fn direction(&self, motor: MotorId) -> MotorDirection {
        match motor {
            MotorId::Out => self.out.direction(),
            MotorId::Rotate => self.rotate.direction(),
        }
    }
}

impl<OF, OR, OE, TF, TR, TE> Actuator for MotorPair<HBridge<OF, OR, OE>, HBridge<TF, TR, TE>>
where
    OF: OutputPin,
    OR: OutputPin,
    OE: OutputPin,
    TF: OutputPin,
    TR: OutputPin,
    TE: OutputPin,
{
    fn drive(&mut self, motor: MotorId, direction: MotorDirection) {
        match motor {
            MotorId::Out => self.out.set(direction),
            MotorId::Rotate => self.rotate.set(direction),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;
    use std::rc::Rc;

    /// Mock pin that counts writes
    #[derive(Clone)]
    struct MockPin {
        high: Rc<Cell<bool>>,
        writes: Rc<Cell<u32>>,
    }

    impl MockPin {
        fn new() -> Self {
            Self {
                high: Rc::new(Cell::new(true)),
                writes: Rc::new(Cell::new(0)),
            }
        }
    }

    impl OutputPin for MockPin {
        fn set_high(&mut self) {
            self.high.set(true);
            self.writes.set(self.writes.get() + 1);
        }

        fn set_low(&mut self) {
            self.high.set(false);
            self.writes.set(self.writes.get() + 1);
        }

        fn is_set_high(&self) -> bool {
            self.high.get()
        }
    }

    fn bridge() -> (HBridge<MockPin, MockPin, MockPin>, [MockPin; 3]) {
        let pins = [MockPin::new(), MockPin::new(), MockPin::new()];
        let bridge = HBridge::new(pins[0].clone(), pins[1].clone(), pins[2].clone());
        (bridge, pins)
    }

    fn levels(pins: &[MockPin; 3]) -> [bool; 3] {
        [pins[0].is_set_high(), pins[1].is_set_high(), pins[2].is_set_high()]
    }

    #[test]
    fn test_starts_stopped() {
        let (bridge, pins) = bridge();
        assert_eq!(bridge.direction(), MotorDirection::Stop);
        assert_eq!(levels(&pins), [false, false, false]);
    }

    #[test]
    fn test_directions() {
        let (mut bridge, pins) = bridge();

        bridge.set(MotorDirection::Forward);
        assert_eq!(levels(&pins), [true, false, true]);

        bridge.set(MotorDirection::Reverse);
        assert_eq!(levels(&pins), [false, true, true]);

        bridge.set(MotorDirection::Stop);
        assert_eq!(levels(&pins), [false, false, false]);
    }

    #[test]
    fn test_repeated_drive_is_free() {
        let (mut bridge, pins) = bridge();
        bridge.set(MotorDirection::Forward);
        let after_first = pins[0].writes.get();
        bridge.set(MotorDirection::Forward);
        bridge.set(MotorDirection::Forward);
        assert_eq!(pins[0].writes.get(), after_first);
    }

    #[test]
    fn test_pair_routes_motors() {
        let (out, out_pins) = bridge();
        let (rotate, rotate_pins) = bridge();
        let mut pair = MotorPair::new(out, rotate);

        pair.drive(MotorId::Rotate, MotorDirection::Reverse);
        assert_eq!(levels(&rotate_pins), [false, true, true]);
        assert_eq!(levels(&out_pins), [false, false, false]);

        pair.drive(MotorId::Out, MotorDirection::Forward);
        assert_eq!(pair.direction(MotorId::Out), MotorDirection::Forward);

        pair.stop_all();
        assert_eq!(levels(&out_pins), [false, false, false]);
        assert_eq!(levels(&rotate_pins), [false, false, false]);
    }
}
