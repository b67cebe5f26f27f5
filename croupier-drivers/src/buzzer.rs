//! GPIO buzzer
//!
//! An active buzzer on a plain output. The console asks for a beep of a
//! given length and the 1ms tick counts it down.

use croupier_hal::OutputPin;

/// Buzzer with a millisecond countdown
pub struct Buzzer<P> {
    pin: P,
    remaining_ms: u32,
}

impl<P: OutputPin> Buzzer<P> {
    pub fn new(pin: P) -> Self {
        let mut buzzer = Self {
            pin,
            remaining_ms: 0,
        };
        buzzer.pin.set_low();
        buzzer
    }

    /// Start a beep, replacing any beep in progress
    pub fn beep(&mut self, duration_ms: u16) {
        self.remaining_ms = duration_ms as u32;
        if self.remaining_ms > 0 {
            self.pin.set_high();
        }
    }

    /// Advance the countdown; the buzzer goes quiet when it runs out
    pub fn tick(&mut self, elapsed_ms: u32) {
        if self.remaining_ms == 0 {
            return;
        }
        self.remaining_ms = self.remaining_ms.saturating_sub(elapsed_ms);
        if self.remaining_ms == 0 {
            self.pin.set_low();
        }
    }

    pub fn silence(&mut self) {
        self.remaining_ms = 0;
        self.pin.set_low();
    }

    pub fn is_sounding(&self) -> bool {
        self.remaining_ms > 0
    }

    pub fn remaining_ms(&self) -> u32 {
        self.remaining_ms
    }
}
