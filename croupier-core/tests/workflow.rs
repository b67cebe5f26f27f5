//! End-to-end console workflow on the host
//!
//! Drives the keypad, console and composer together the way the firmware
//! tasks do, one 10ms poll at a time.

use croupier_core::config::DisplayConfig;
use croupier_core::console::{Console, LaunchMode, MenuItem, Mode, SettingItem};
use croupier_core::display::{Body, Composer, DisplayDescriptor};
use croupier_core::input::{DiscreteLevels, Keypad};
use croupier_core::settings;
use croupier_core::traits::{Actuator, MotorDirection, MotorId};
use croupier_protocol::glyph::BLANK_DIGIT;

const POLL_MS: u32 = 10;
const NO_KEYS: u16 = 0xFFFF;
const SETTING_BIT: u8 = 14;
const ADD_BIT: u8 = 10;
const LAUNCH_BIT: u8 = 3;

#[derive(Default)]
struct Motors {
    out: MotorDirection,
    rotate: MotorDirection,
}

impl Actuator for Motors {
    fn drive(&mut self, motor: MotorId, direction: MotorDirection) {
        match motor {
            MotorId::Out => self.out = direction,
            MotorId::Rotate => self.rotate = direction,
        }
    }
}

struct Dealer {
    keys: Keypad,
    console: Console,
    composer: Composer,
    motors: Motors,
    saved: Option<MenuItem>,
    frames: Vec<DisplayDescriptor>,
}

impl Dealer {
    fn boot(stored: Option<MenuItem>) -> Self {
        let mut console = Console::default();
        console.boot_complete(stored);
        Self {
            keys: Keypad::default(),
            console,
            composer: Composer::new(DisplayConfig::default()),
            motors: Motors::default(),
            saved: None,
            frames: Vec::new(),
        }
    }

    fn poll(&mut self, levels: DiscreteLevels, scan: u16) {
        self.keys.advance_ms(POLL_MS);
        self.console.advance_ms(POLL_MS);
        self.composer.advance_ms(POLL_MS);

        self.keys.scan(levels, scan);
        let fx = self.console.update(&self.keys, &mut self.motors);
        if let Some(menu) = fx.save {
            self.saved = Some(menu);
        }
        let frame = self.composer.compose(self.console.display());
        self.frames.push(frame);
    }

    fn idle(&mut self, polls: usize) {
        for _ in 0..polls {
            self.poll(DiscreteLevels::default(), NO_KEYS);
        }
    }

    fn click(&mut self, bit: u8) {
        for _ in 0..3 {
            self.poll(DiscreteLevels::default(), !(1 << bit));
        }
        self.idle(1);
    }

    fn feed_card(&mut self) {
        let blocked = DiscreteLevels {
            opto_launch: true,
            ..Default::default()
        };
        for _ in 0..3 {
            self.poll(blocked, NO_KEYS);
        }
        self.idle(1);
    }

    fn last_frame(&self) -> &DisplayDescriptor {
        self.frames.last().expect("no frames composed")
    }
}

#[test]
fn idle_frame_is_drawn_once() {
    let mut dealer = Dealer::boot(None);
    dealer.idle(3);

    let drawn: Vec<_> = dealer.frames.iter().map(|f| f.dirty).collect();
    assert_eq!(drawn, vec![true, false, false]);
    assert_eq!(
        dealer.last_frame().body,
        Body::Digits {
            values: [0, 3, 3, 1, 7],
            start: 0,
            len: 5
        }
    );
}

#[test]
fn editing_deck_count_blinks_and_persists() {
    let mut dealer = Dealer::boot(None);
    dealer.idle(1);

    dealer.click(SETTING_BIT);
    assert_eq!(dealer.console.mode(), Mode::Setting);
    assert_eq!(dealer.console.setting_menu().setting, SettingItem::BaseCardCount);
    assert!(dealer.console.display().blink);

    // Let a blink half-period pass; the deck cells go dark
    dealer.idle(30);
    let dark = dealer
        .frames
        .iter()
        .find(|f| !f.blink_visible)
        .expect("blink never toggled");
    match dark.body {
        Body::Digits { values, .. } => {
            assert_eq!(&values[..2], &[BLANK_DIGIT, BLANK_DIGIT]);
            assert_eq!(values[2], 3);
        }
        other => panic!("unexpected body {:?}", other),
    }

    dealer.click(ADD_BIT);
    assert_eq!(dealer.console.setting_menu().deck_count, 4);
    assert_eq!(dealer.console.main_menu().deck_count, 3);

    dealer.click(LAUNCH_BIT);
    assert_eq!(dealer.console.mode(), Mode::Idle);
    let saved = dealer.saved.expect("commit was not saved");
    assert_eq!(saved.deck_count, 4);

    let blob = settings::encode(&saved).unwrap();
    let restored = settings::decode(&blob).unwrap();
    let rebooted = Dealer::boot(Some(restored));
    assert_eq!(rebooted.console.main_menu().deck_count, 4);
}

#[test]
fn single_seat_deal_runs_to_completion() {
    let menu = MenuItem {
        deck_count: 0,
        player_count: 1,
        card_count: 2,
        burst_count: 2,
        ..Default::default()
    };
    let mut dealer = Dealer::boot(Some(menu));
    dealer.idle(1);

    dealer.click(LAUNCH_BIT);
    assert_eq!(dealer.console.mode(), Mode::Launch);
    assert_eq!(dealer.console.launch_mode(), LaunchMode::Normal);

    dealer.idle(1);
    assert_eq!(dealer.motors.out, MotorDirection::Forward);
    assert!(matches!(dealer.last_frame().body, Body::Marquee { .. }));

    dealer.feed_card();
    assert_eq!(dealer.console.launch().dealt(), 1);
    assert_eq!(dealer.console.mode(), Mode::Launch);

    dealer.feed_card();
    assert_eq!(dealer.console.mode(), Mode::Idle);
    assert_eq!(dealer.motors.out, MotorDirection::Stop);
    assert_eq!(dealer.motors.rotate, MotorDirection::Stop);
}

#[test]
fn touch_pauses_a_deal_in_progress() {
    let mut dealer = Dealer::boot(None);
    dealer.idle(1);
    dealer.click(LAUNCH_BIT);
    dealer.idle(1);

    let touch = DiscreteLevels {
        touch: true,
        ..Default::default()
    };
    dealer.poll(touch, NO_KEYS);
    dealer.poll(touch, NO_KEYS);
    assert_eq!(dealer.console.mode(), Mode::Pause);
    assert_eq!(dealer.motors.out, MotorDirection::Stop);
    assert_eq!(dealer.console.display(), &DisplayDescriptor::letters(b"PAUSE"));
    assert!(dealer.last_frame().dirty);

    dealer.idle(1);
    dealer.click(LAUNCH_BIT);
    assert_eq!(dealer.console.mode(), Mode::Launch);
    dealer.idle(1);
    assert_eq!(dealer.motors.out, MotorDirection::Forward);
}
