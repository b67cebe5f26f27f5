//! Panel layout for each mode

use super::menu::{DealingMode, DealingOrder, MenuItem, SettingItem};
use super::mode::{LaunchMode, Mode};
use crate::display::DisplayDescriptor;

/// Dots separating deck, players and cards on the idle layout
const IDLE_DOTS: [bool; 5] = [false, true, true, false, false];

const DECK_CELLS: u8 = 0b00011;
const PLAYER_CELL: u8 = 0b00100;
const CARD_CELLS: u8 = 0b11000;
const ALL_CELLS: u8 = 0b11111;

/// Descriptor for the console's current state
pub(super) fn render(
    mode: Mode,
    main: &MenuItem,
    scratch: &MenuItem,
    launch_mode: LaunchMode,
) -> DisplayDescriptor {
    let view = match mode {
        Mode::Prepare => DisplayDescriptor::blank(),
        Mode::Idle => summary(main),
        Mode::Setting => setting(scratch),
        Mode::SetPlayerLaunch => {
            DisplayDescriptor::mixed(b"PLy-", &[scratch.player_count % 10]).blinking(0b10000)
        }
        Mode::Launch if launch_mode == LaunchMode::Test => DisplayDescriptor::letters(b"tESt"),
        Mode::Launch => DisplayDescriptor::marquee(main.rotation),
        Mode::Pause => DisplayDescriptor::letters(b"PAUSE"),
        Mode::Safety => DisplayDescriptor::letters(b"SAFE"),
        Mode::Close => DisplayDescriptor::letters(b" OFF"),
    };

    if mode.blinks() {
        view
    } else {
        DisplayDescriptor { blink: false, blink_mask: 0, ..view }
    }
}

/// `DD.P.CC`: deck count, players, cards per player
fn summary(menu: &MenuItem) -> DisplayDescriptor {
    DisplayDescriptor::digits(
        [
            tens(menu.deck_count),
            menu.deck_count % 10,
            menu.player_count % 10,
            tens(menu.card_count),
            menu.card_count % 10,
        ],
        IDLE_DOTS,
    )
}

fn setting(menu: &MenuItem) -> DisplayDescriptor {
    match menu.setting {
        SettingItem::None => summary(menu),
        SettingItem::BaseCardCount => summary(menu).blinking(DECK_CELLS),
        SettingItem::PlayerCount => summary(menu).blinking(PLAYER_CELL),
        SettingItem::CardCount => summary(menu).blinking(CARD_CELLS),
        SettingItem::BurstCount => {
            DisplayDescriptor::mixed(b"LF-", &[tens(menu.burst_count), menu.burst_count % 10])
                .blinking(CARD_CELLS)
        }
        SettingItem::DealingMode => match menu.deal_mode {
            DealingMode::Rotate => DisplayDescriptor::letters(b"F-F-F"),
            DealingMode::Sway => DisplayDescriptor::letters(b" FFF "),
        }
        .blinking(ALL_CELLS),
        SettingItem::DealingOrder => match menu.deal_order {
            DealingOrder::BottomFirst => DisplayDescriptor::letters(b"dFFFF"),
            DealingOrder::BottomLast => DisplayDescriptor::letters(b"FFFFd"),
        }
        .blinking(ALL_CELLS),
        SettingItem::RotationDirection => DisplayDescriptor::marquee(menu.rotation).blinking(0),
    }
}

fn tens(value: u8) -> u8 {
    (value / 10) % 10
}
