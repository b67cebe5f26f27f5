//! Croupier - Card Dealer Firmware
//!
//! Main firmware binary for the STM32G031-based dealer board. Four tasks
//! share the work:
//!
//! - tick: 1ms counter and buzzer
//! - console: keys, workflow state machine and motors
//! - display: TM1639 refresh and key-matrix scan
//! - sampling: supply voltages

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_stm32::adc::{Adc, AdcChannel};
use embassy_stm32::bind_interrupts;
use embassy_stm32::exti::{self, ExtiInput};
use embassy_stm32::flash::Flash;
use embassy_stm32::gpio::{AnyPin, Flex, Input, Level, Output, Pull, Speed};
use embassy_stm32::Peri;
use embassy_time::Delay;
use {defmt_rtt as _, panic_probe as _};

use croupier_drivers::{Buzzer, HBridge, MotorPair, Tm1639};
use croupier_hal_stm32g0::{FlexLine, InputLine, OutputLine, TailPageStore, WakeLine};

use crate::config::{console_config, display_config, SettingsPersistence};

mod channels;
mod config;
mod tasks;

bind_interrupts!(struct Irqs {
    EXTI4_15 => exti::InterruptHandler<embassy_stm32::interrupt::typelevel::EXTI4_15>;
});

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Croupier firmware starting...");

    let p = embassy_stm32::init(Default::default());
    info!("Peripherals initialized");

    // TM1639 panel (CLK=PA3, DIO=PA4, STB=PA5); PA8 high cuts panel power
    let display = display_config();
    let panel = Tm1639::new(
        output(p.PA3.into(), Level::High),
        FlexLine::new(Flex::new(p.PA4), Pull::Up),
        output(p.PA5.into(), Level::High),
        output(p.PA8.into(), Level::High),
        Delay,
        display.brightness,
    );

    // Buzzer (PA11)
    let buzzer = Buzzer::new(output(p.PA11.into(), Level::Low));

    // Motors: feed on PB0/PB1 with boost enable PA2, turntable on PB9/PB8
    // with boost enable PB6
    let out_motor = HBridge::new(
        output(p.PB0.into(), Level::Low),
        output(p.PB1.into(), Level::Low),
        output(p.PA2.into(), Level::Low),
    );
    let rotate_motor = HBridge::new(
        output(p.PB9.into(), Level::Low),
        output(p.PB8.into(), Level::Low),
        output(p.PB6.into(), Level::Low),
    );
    let motors = MotorPair::new(out_motor, rotate_motor);

    // Keys: power (PC14, wakes the board) and touch (PC15) pull low;
    // opto sensors on PB2 (card exit) and PA0 (turntable)
    let power_key = WakeLine::new(ExtiInput::new(p.PC14, p.EXTI14, Pull::Up, Irqs));
    let touch_key = InputLine::new(Input::new(p.PC15, Pull::Up));
    let launch_opto = InputLine::new(Input::new(p.PB2, Pull::None));
    let rotate_opto = InputLine::new(Input::new(p.PA0, Pull::None));

    // Settings page at the tail of flash
    let settings = SettingsPersistence::new(TailPageStore::new(Flash::new_blocking(p.FLASH)));

    // Supply sensing: battery on PA1, motor rail on PA7
    let supply = tasks::SupplyChannels {
        adc: Adc::new(p.ADC1),
        battery: p.PA1.degrade_adc(),
        motor: p.PA7.degrade_adc(),
    };

    let console = tasks::ConsoleResources {
        config: console_config(),
        power_key,
        touch_key,
        launch_opto,
        rotate_opto,
        motors,
        settings,
    };

    // Spawn tasks
    spawner.spawn(tasks::tick_task(buzzer)).unwrap();
    spawner.spawn(tasks::display_task(panel, display)).unwrap();
    spawner.spawn(tasks::sampling_task(supply)).unwrap();
    spawner.spawn(tasks::console_task(console)).unwrap();

    info!("All tasks spawned, firmware running");
}

/// Push-pull output starting at `level`
fn output(pin: Peri<'static, AnyPin>, level: Level) -> OutputLine<'static> {
    OutputLine::new(Output::new(pin, level, Speed::VeryHigh))
}
