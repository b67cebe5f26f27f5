//! Display task
//!
//! Owns the TM1639 bus. Every 10ms it composes the console's latest
//! intent, redraws only when the frame changed, then reads the key matrix
//! for the console task.

use defmt::*;
use embassy_time::{Delay, Duration, Ticker};
use portable_atomic::Ordering;

use croupier_core::config::DisplayConfig;
use croupier_core::display::{Composer, DisplayDescriptor};
use croupier_drivers::Tm1639;
use croupier_hal_stm32g0::{FlexLine, OutputLine};

use crate::channels::{Elapsed, DISPLAY_INTENT, KEY_SCAN, PANEL_OFF, PANEL_POWER, PANEL_READY};

/// Display refresh interval in milliseconds
pub const DISPLAY_INTERVAL_MS: u64 = 10;

/// The front panel as wired on the dealer board
pub type Panel = Tm1639<
    OutputLine<'static>,
    FlexLine<'static>,
    OutputLine<'static>,
    OutputLine<'static>,
    Delay,
>;

/// Display task - composition, bus writes and key scan
#[embassy_executor::task]
pub async fn display_task(mut panel: Panel, config: DisplayConfig) {
    info!("Display task started");

    let mut composer = Composer::new(config);
    let mut intent = DisplayDescriptor::blank();
    let mut powered = true;
    let mut elapsed = Elapsed::new();
    let mut ticker = Ticker::every(Duration::from_millis(DISPLAY_INTERVAL_MS));

    panel.init();
    PANEL_READY.signal(());
    info!("Panel up, brightness {}", panel.brightness());

    loop {
        ticker.next().await;
        composer.advance_ms(elapsed.take());

        if let Ok(on) = PANEL_POWER.try_receive() {
            if on {
                if !powered {
                    panel.init();
                    composer.invalidate();
                    powered = true;
                    info!("Panel powered up");
                }
                // The console waits in Prepare for this after every wake
                PANEL_READY.signal(());
            } else {
                if powered {
                    panel.set_display_power(false);
                    panel.set_controller_enabled(false);
                    powered = false;
                    KEY_SCAN.store(0xFFFF, Ordering::Relaxed);
                    info!("Panel powered down");
                }
                PANEL_OFF.signal(());
            }
        }

        if !powered {
            continue;
        }

        if let Some(next) = DISPLAY_INTENT.try_take() {
            intent = next;
        }

        let frame = composer.compose(&intent);
        if frame.dirty {
            trace!("Render {:?}", frame);
            panel.render(&frame);
        }

        KEY_SCAN.store(panel.read_key_scan(), Ordering::Relaxed);
    }
}
