//! Console task
//!
//! Every 10ms: classify keys, run the console state machine, drive the
//! motors and publish the display intent. Also owns the power-down and
//! wake sequence.

use defmt::*;
use embassy_time::{Duration, Instant, Ticker, Timer};
use portable_atomic::Ordering;

use croupier_core::config::ConsoleConfig;
use croupier_core::console::{Console, Effects, Mode};
use croupier_core::input::{DiscreteLevels, Keypad, WakeGate};
use croupier_core::traits::Actuator;
use croupier_drivers::{HBridge, MotorPair};
use croupier_hal::InputPin;
use croupier_hal_stm32g0::{InputLine, OutputLine, WakeLine};

use crate::channels::{
    Elapsed, BEEP, DISPLAY_INTENT, KEY_SCAN, PANEL_OFF, PANEL_POWER, PANEL_READY,
    SAMPLING_ENABLED, SENSORS,
};
use crate::config::SettingsPersistence;

/// Console tick interval in milliseconds
pub const CONSOLE_INTERVAL_MS: u64 = 10;

/// Power-key sampling interval while it settles during sleep
const WAKE_POLL_MS: u64 = 5;

type Bridge = HBridge<OutputLine<'static>, OutputLine<'static>, OutputLine<'static>>;

/// Card feed and turntable motors
pub type Motors = MotorPair<Bridge, Bridge>;

/// Everything the console task owns
pub struct ConsoleResources {
    pub config: ConsoleConfig,
    pub power_key: WakeLine<'static>,
    pub touch_key: InputLine<'static>,
    pub launch_opto: InputLine<'static>,
    pub rotate_opto: InputLine<'static>,
    pub motors: Motors,
    pub settings: SettingsPersistence<'static>,
}

/// Console task - keypad, workflow and motors
#[embassy_executor::task]
pub async fn console_task(mut res: ConsoleResources) {
    info!("Console task started");

    let mut keypad = Keypad::default();
    let mut console = Console::new(res.config);
    let mut elapsed = Elapsed::new();
    let mut ticker = Ticker::every(Duration::from_millis(CONSOLE_INTERVAL_MS));

    loop {
        ticker.next().await;

        let delta = elapsed.take();
        keypad.advance_ms(delta);
        console.advance_ms(delta);

        let levels = DiscreteLevels::from_pins(
            res.power_key.is_high(),
            res.touch_key.is_high(),
            res.launch_opto.is_high(),
            res.rotate_opto.is_high(),
        );
        keypad.scan(levels, KEY_SCAN.load(Ordering::Relaxed));

        if let Some(snapshot) = SENSORS.try_take() {
            console.set_sensors(snapshot);
        }

        if console.mode() == Mode::Prepare && PANEL_READY.try_take().is_some() {
            let stored = res.settings.load();
            console.boot_complete(stored);
        }

        let edited = *console.setting_menu();
        let fx = console.update(&keypad, &mut res.motors);
        DISPLAY_INTENT.signal(*console.display());

        if console.mode().blinks() && *console.setting_menu() != edited {
            debug!("Editing {:?}", console.setting_menu());
        }

        if handle_effects(&fx, &mut res) {
            break;
        }

        if fx.power_down {
            power_down(&mut res).await;
            keypad.reset();
            console.reinitialize();
            elapsed = Elapsed::new();
            info!("Woke up, reinitializing");
        }
    }

    // Suspended until a hard reset
    res.motors.stop_all();
    core::future::pending::<()>().await;
}

/// Log and forward one tick's effects; returns true when the console suspends
fn handle_effects(fx: &Effects, res: &mut ConsoleResources) -> bool {
    if let Some(t) = fx.transition {
        info!("Mode {:?} -> {:?}", t.from, t.to);
    }

    if let Some(duration_ms) = fx.beep_ms {
        BEEP.signal(duration_ms);
    }

    if let Some(menu) = fx.save {
        info!("Settings committed: {:?}", menu);
        res.settings.save(&menu);
    }

    if fx.suspend {
        warn!("Init watchdog tripped, console suspended");
        return true;
    }
    false
}

/// Turn the panel off and sleep until the power key is pressed
async fn power_down(res: &mut ConsoleResources) {
    info!("Powering down");

    // No settings write here: flashing right before sleep kept the board
    // from waking. Edited settings are already saved at commit.
    res.motors.stop_all();
    SAMPLING_ENABLED.store(false, Ordering::Relaxed);
    PANEL_OFF.reset();
    PANEL_POWER.send(false).await;
    PANEL_OFF.wait().await;

    wait_for_wake(&mut res.power_key).await;

    SAMPLING_ENABLED.store(true, Ordering::Relaxed);
    PANEL_READY.reset();
    PANEL_POWER.send(true).await;
}

/// Wait for the key that asked for the power-down to be let go, then for a
/// steady press. Sleeps on the key's edge interrupt while nothing moves.
async fn wait_for_wake(key: &mut WakeLine<'static>) {
    let mut gate = WakeGate::default();
    let mut last = Instant::now();

    loop {
        let now = Instant::now();
        let elapsed_ms = (now - last).as_millis().min(u32::MAX as u64) as u32;
        last = now;

        if gate.sample(key.is_low(), elapsed_ms) {
            return;
        }

        if gate.idle() {
            key.wait_for_press().await;
        } else {
            Timer::after_millis(WAKE_POLL_MS).await;
        }
    }
}
