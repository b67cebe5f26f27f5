//! Supply sampling task
//!
//! Reads the battery and motor-supply dividers every 10ms and publishes
//! the smoothed voltages to the console.

use defmt::*;
use embassy_stm32::adc::{Adc, AnyAdcChannel};
use embassy_stm32::peripherals::ADC1;
use embassy_time::{Duration, Ticker};
use portable_atomic::Ordering;

use croupier_core::sensor::SupplyFilter;

use crate::channels::{SAMPLING_ENABLED, SENSORS};

/// Sampling interval in milliseconds
pub const SAMPLING_INTERVAL_MS: u64 = 10;

/// ADC reference in millivolts
const VREF_MV: u32 = 3300;

/// Full-scale 12-bit reading
const ADC_MAX: u32 = 4095;

/// Both rails sit behind a 1:2 divider
const DIVIDER_RATIO: u32 = 2;

/// The two analog inputs
pub struct SupplyChannels {
    pub adc: Adc<'static, ADC1>,
    pub battery: AnyAdcChannel<ADC1>,
    pub motor: AnyAdcChannel<ADC1>,
}

/// Sampling task - ADC reads through the supply filter
#[embassy_executor::task]
pub async fn sampling_task(mut channels: SupplyChannels) {
    info!("Sampling task started");

    let mut filter = SupplyFilter::new();
    let mut ticker = Ticker::every(Duration::from_millis(SAMPLING_INTERVAL_MS));

    loop {
        ticker.next().await;

        if !SAMPLING_ENABLED.load(Ordering::Relaxed) {
            continue;
        }

        let battery_raw = channels.adc.blocking_read(&mut channels.battery);
        let motor_raw = channels.adc.blocking_read(&mut channels.motor);

        let snapshot = filter.update(to_millivolts(battery_raw), to_millivolts(motor_raw));
        SENSORS.signal(snapshot);
    }
}

fn to_millivolts(raw: u16) -> u16 {
    let mv = raw as u32 * VREF_MV * DIVIDER_RATIO / ADC_MAX;
    mv.min(u16::MAX as u32) as u16
}
