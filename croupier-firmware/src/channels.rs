//! Inter-task communication
//!
//! Every shared value has exactly one writer:
//!
//! - tick task: `MS_COUNTER`
//! - display task: `KEY_SCAN`, `PANEL_READY`, `PANEL_OFF`
//! - console task: `DISPLAY_INTENT`, `BEEP`, `PANEL_POWER`, `SAMPLING_ENABLED`
//! - sampling task: `SENSORS`

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;
use portable_atomic::{AtomicBool, AtomicU16, AtomicU32, Ordering};

use croupier_core::display::DisplayDescriptor;
use croupier_core::sensor::SensorSnapshot;

/// Milliseconds since boot, advanced by the 1ms tick
pub static MS_COUNTER: AtomicU32 = AtomicU32::new(0);

/// Latest TM1639 key-scan word; all ones means nothing pressed
pub static KEY_SCAN: AtomicU16 = AtomicU16::new(0xFFFF);

/// Console display intent, published every console tick
pub static DISPLAY_INTENT: Signal<CriticalSectionRawMutex, DisplayDescriptor> = Signal::new();

/// Beep length requested by the console
pub static BEEP: Signal<CriticalSectionRawMutex, u16> = Signal::new();

/// Channel capacity for panel power requests; one off and one on
pub const PANEL_POWER_CHANNEL_SIZE: usize = 2;

/// Panel power requests from the console (power down / wake), in order
pub static PANEL_POWER: Channel<CriticalSectionRawMutex, bool, PANEL_POWER_CHANNEL_SIZE> =
    Channel::new();

/// The panel is off; the console may go to sleep
pub static PANEL_OFF: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// The panel finished its init sequence
pub static PANEL_READY: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Smoothed supply voltages
pub static SENSORS: Signal<CriticalSectionRawMutex, SensorSnapshot> = Signal::new();

/// Cleared while the board sleeps
pub static SAMPLING_ENABLED: AtomicBool = AtomicBool::new(true);

/// Current millisecond count
pub fn now_ms() -> u32 {
    MS_COUNTER.load(Ordering::Relaxed)
}

/// Tracks elapsed time against `MS_COUNTER` for one task
pub struct Elapsed {
    last: u32,
}

impl Elapsed {
    pub fn new() -> Self {
        Self { last: now_ms() }
    }

    /// Milliseconds since the previous call
    pub fn take(&mut self) -> u32 {
        let now = now_ms();
        let delta = now.wrapping_sub(self.last);
        self.last = now;
        delta
    }
}
