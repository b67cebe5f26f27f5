//! Supply voltage smoothing
//!
//! The sampling task feeds raw millivolt readings through an exponentially
//! weighted moving average and hands the console a snapshot every tick.

/// Weight of a new sample is `1 / EWMA_DIVISOR`
pub const EWMA_DIVISOR: i32 = 25;

/// Fractional bits kept in the filter state
const FRAC_BITS: u32 = 8;

/// Smoothed supply voltages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorSnapshot {
    pub battery_mv: u16,
    pub motor_mv: u16,
}

/// Fixed-point EWMA with alpha = 1/25
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Ewma {
    /// Estimate scaled by `2^FRAC_BITS`
    state: i32,
    primed: bool,
}

impl Ewma {
    pub const fn new() -> Self {
        Self {
            state: 0,
            primed: false,
        }
    }

    /// Fold in a sample and return the new estimate
    ///
    /// The first sample seeds the filter directly.
    pub fn update(&mut self, sample: u16) -> u16 {
        let scaled = (sample as i32) << FRAC_BITS;
        if self.primed {
            self.state += (scaled - self.state) / EWMA_DIVISOR;
        } else {
            self.state = scaled;
            self.primed = true;
        }
        self.value()
    }

    /// Current estimate, rounded to the nearest millivolt
    pub fn value(&self) -> u16 {
        let rounded = (self.state + (1 << (FRAC_BITS - 1))) >> FRAC_BITS;
        rounded.clamp(0, u16::MAX as i32) as u16
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

/// Filters for both supply rails
#[derive(Debug, Clone, Copy, Default)]
pub struct SupplyFilter {
    battery: Ewma,
    motor: Ewma,
}

impl SupplyFilter {
    pub const fn new() -> Self {
        Self {
            battery: Ewma::new(),
            motor: Ewma::new(),
        }
    }

    pub fn update(&mut self, battery_mv: u16, motor_mv: u16) -> SensorSnapshot {
        SensorSnapshot {
            battery_mv: self.battery.update(battery_mv),
            motor_mv: self.motor.update(motor_mv),
        }
    }

    pub fn snapshot(&self) -> SensorSnapshot {
        SensorSnapshot {
            battery_mv: self.battery.value(),
            motor_mv: self.motor.value(),
        }
    }
}
