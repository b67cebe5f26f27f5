//! 1ms tick task
//!
//! Advances the shared millisecond counter and runs the buzzer countdown.

use defmt::*;
use embassy_time::{Duration, Ticker};
use portable_atomic::Ordering;

use croupier_drivers::Buzzer;
use croupier_hal_stm32g0::OutputLine;

use crate::channels::{BEEP, MS_COUNTER};

/// Tick interval in milliseconds
pub const TICK_INTERVAL_MS: u32 = 1;

/// Tick task - counts milliseconds and times beeps
#[embassy_executor::task]
pub async fn tick_task(mut buzzer: Buzzer<OutputLine<'static>>) {
    info!("Tick task started");

    let mut ticker = Ticker::every(Duration::from_millis(TICK_INTERVAL_MS as u64));

    loop {
        ticker.next().await;

        MS_COUNTER.fetch_add(TICK_INTERVAL_MS, Ordering::Relaxed);

        if let Some(duration_ms) = BEEP.try_take() {
            trace!("Beep {}ms", duration_ms);
            buzzer.beep(duration_ms);
        }
        buzzer.tick(TICK_INTERVAL_MS);
    }
}
