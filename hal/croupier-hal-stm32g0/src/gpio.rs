//! GPIO adapters for STM32G0
//!
//! Newtypes over the embassy-stm32 pin drivers so they can implement the
//! `croupier-hal` traits.

use croupier_hal::gpio::{FlexPin, InputPin, OutputPin};
use embassy_stm32::exti::ExtiInput;
use embassy_stm32::gpio::{Flex, Input, Output, Pull, Speed};

/// Push-pull output
pub struct OutputLine<'d>(Output<'d>);

impl<'d> OutputLine<'d> {
    pub fn new(pin: Output<'d>) -> Self {
        Self(pin)
    }
}

impl OutputPin for OutputLine<'_> {
    fn set_high(&mut self) {
        self.0.set_high();
    }

    fn set_low(&mut self) {
        self.0.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.0.is_set_high()
    }
}

/// Plain digital input
pub struct InputLine<'d>(Input<'d>);

impl<'d> InputLine<'d> {
    pub fn new(pin: Input<'d>) -> Self {
        Self(pin)
    }
}

impl InputPin for InputLine<'_> {
    fn is_high(&self) -> bool {
        self.0.is_high()
    }
}

/// Input with an EXTI line, used for the key that wakes the board
pub struct WakeLine<'d>(ExtiInput<'d>);

impl<'d> WakeLine<'d> {
    pub fn new(pin: ExtiInput<'d>) -> Self {
        Self(pin)
    }

    /// Wait for the next falling edge (key going down)
    ///
    /// Raw edge only; contact bounce is left to the caller.
    pub async fn wait_for_press(&mut self) {
        self.0.wait_for_falling_edge().await;
    }
}

impl InputPin for WakeLine<'_> {
    fn is_high(&self) -> bool {
        self.0.is_high()
    }
}

/// Bidirectional line, e.g. the TM1639 DIO pin
pub struct FlexLine<'d> {
    pin: Flex<'d>,
    pull: Pull,
}

impl<'d> FlexLine<'d> {
    /// Wrap `pin` and start out driving it high
    pub fn new(mut pin: Flex<'d>, pull: Pull) -> Self {
        pin.set_high();
        pin.set_as_output(Speed::VeryHigh);
        Self { pin, pull }
    }
}

impl OutputPin for FlexLine<'_> {
    fn set_high(&mut self) {
        self.pin.set_high();
    }

    fn set_low(&mut self) {
        self.pin.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.pin.is_set_high()
    }
}

impl InputPin for FlexLine<'_> {
    fn is_high(&self) -> bool {
        self.pin.is_high()
    }
}

impl FlexPin for FlexLine<'_> {
    fn set_as_input(&mut self) {
        self.pin.set_as_input(self.pull);
    }

    fn set_as_output(&mut self) {
        self.pin.set_as_output(Speed::VeryHigh);
    }
}
