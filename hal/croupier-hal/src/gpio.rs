//! GPIO pin abstractions
//!
//! Pin operations are infallible. A bit-banged line has no way to report a
//! failed transition, so the traits carry no error type.

/// Digital output pin
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the pin is currently driven high
    fn is_set_high(&self) -> bool;

    /// Check if the pin is currently driven low
    fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }
}

/// Digital input pin
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

/// Line that is driven most of the time but turned around to sample a
/// peripheral's reply, like the shared data line of a 3-wire bus.
///
/// `is_high` is only meaningful after `set_as_input`.
pub trait FlexPin: OutputPin + InputPin {
    /// Release the line and sample it
    fn set_as_input(&mut self);

    /// Drive the line again, keeping the last written level
    fn set_as_output(&mut self);
}
