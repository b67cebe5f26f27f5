//! Console state machine
//!
//! Sole writer of the menus, the mode and the display intent. Each console
//! tick runs the global transitions first, in priority order, and only
//! runs the per-mode key handling when none of them fired.

use super::launch::Launch;
use super::menu::{MenuItem, SettingItem};
use super::mode::{LaunchMode, Mode};
use super::view;
use crate::config::ConsoleConfig;
use crate::display::DisplayDescriptor;
use crate::input::{KeyId, Keypad};
use crate::sensor::SensorSnapshot;
use crate::traits::Actuator;

/// A mode change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Transition {
    pub from: Mode,
    pub to: Mode,
}

/// What the firmware has to act on after a console tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Effects {
    /// Latest mode change this tick
    pub transition: Option<Transition>,
    /// Sound the buzzer for this long
    pub beep_ms: Option<u16>,
    /// Settings were committed and should be persisted
    pub save: Option<MenuItem>,
    /// Turn the panel off and sleep until the power key wakes the board
    pub power_down: bool,
    /// Stop scheduling the console; only a reset recovers
    pub suspend: bool,
}

/// The console aggregate
#[derive(Debug, Clone)]
pub struct Console {
    config: ConsoleConfig,
    main_menu: MenuItem,
    setting_menu: MenuItem,
    mode: Mode,
    last_mode: Mode,
    launch_mode: LaunchMode,
    launch: Launch,
    prepare_wait_ms: u32,
    beep_remaining_ms: u32,
    uptime_ms: u32,
    power_down_sent: bool,
    sensors: SensorSnapshot,
    display: DisplayDescriptor,
    pending: Effects,
}

impl Default for Console {
    fn default() -> Self {
        Self::new(ConsoleConfig::default())
    }
}

impl Console {
    pub fn new(config: ConsoleConfig) -> Self {
        Self {
            config,
            main_menu: MenuItem::default(),
            setting_menu: MenuItem::default(),
            mode: Mode::Prepare,
            last_mode: Mode::Prepare,
            launch_mode: LaunchMode::None,
            launch: Launch::default(),
            prepare_wait_ms: 0,
            beep_remaining_ms: 0,
            uptime_ms: 0,
            power_down_sent: false,
            sensors: SensorSnapshot::default(),
            display: DisplayDescriptor::blank(),
            pending: Effects::default(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn last_mode(&self) -> Mode {
        self.last_mode
    }

    /// Committed settings
    pub fn main_menu(&self) -> &MenuItem {
        &self.main_menu
    }

    /// Settings being edited
    pub fn setting_menu(&self) -> &MenuItem {
        &self.setting_menu
    }

    pub fn launch_mode(&self) -> LaunchMode {
        self.launch_mode
    }

    pub fn launch(&self) -> &Launch {
        &self.launch
    }

    /// Current display intent
    pub fn display(&self) -> &DisplayDescriptor {
        &self.display
    }

    pub fn sensors(&self) -> &SensorSnapshot {
        &self.sensors
    }

    pub fn set_sensors(&mut self, snapshot: SensorSnapshot) {
        self.sensors = snapshot;
    }

    /// Advance the console's millisecond counters
    pub fn advance_ms(&mut self, elapsed_ms: u32) {
        self.uptime_ms = self.uptime_ms.wrapping_add(elapsed_ms);
        self.beep_remaining_ms = self.beep_remaining_ms.saturating_sub(elapsed_ms);
        if self.mode == Mode::Prepare {
            self.prepare_wait_ms = self.prepare_wait_ms.saturating_add(elapsed_ms);
        }
    }

    /// Finish booting with the settings loaded from storage
    pub fn boot_complete(&mut self, settings: Option<MenuItem>) {
        if self.mode != Mode::Prepare {
            return;
        }
        self.main_menu = MenuItem {
            setting: SettingItem::None,
            ..settings.unwrap_or_default()
        };
        self.setting_menu = self.main_menu;
        self.switch_mode(Mode::Idle, true);
        self.refresh_display();
    }

    /// Start over after waking from sleep
    pub fn reinitialize(&mut self) {
        self.launch = Launch::default();
        self.launch_mode = LaunchMode::None;
        self.beep_remaining_ms = 0;
        self.switch_mode(Mode::Prepare, false);
        self.refresh_display();
    }

    /// Run one console tick
    pub fn update<A: Actuator>(&mut self, keys: &Keypad, actuator: &mut A) -> Effects {
        if self.mode == Mode::Safety {
            actuator.stop_all();
            self.pending.suspend = true;
            return core::mem::take(&mut self.pending);
        }

        if !self.global_transitions(keys) {
            self.handle_mode(keys, actuator);
        }

        if !self.mode.drives_motors() {
            actuator.stop_all();
        }
        if self.mode == Mode::Safety {
            self.pending.suspend = true;
        }

        self.refresh_display();
        core::mem::take(&mut self.pending)
    }

    /// Returns true when a global transition fired
    fn global_transitions(&mut self, keys: &Keypad) -> bool {
        let mode = self.mode;

        if keys.key(KeyId::Touch).just_pressed()
            && !matches!(mode, Mode::Pause | Mode::Safety | Mode::Setting)
        {
            self.switch_mode(Mode::Pause, false);
            return true;
        }

        if keys.key(KeyId::Power).long_pressed() && mode != Mode::Close {
            self.switch_mode(Mode::Close, true);
            return true;
        }

        let editable = !matches!(mode, Mode::Pause | Mode::Safety);

        if keys.key(KeyId::Random).long_pressed() && editable {
            if mode != Mode::SetPlayerLaunch {
                self.switch_mode(Mode::SetPlayerLaunch, true);
            }
            return true;
        }

        if keys.key(KeyId::Setting).long_pressed() && editable {
            if mode != Mode::Setting {
                self.switch_mode(Mode::Setting, true);
            }
            self.setting_menu.setting = SettingItem::RotationDirection;
            return true;
        }

        false
    }

    fn handle_mode<A: Actuator>(&mut self, keys: &Keypad, actuator: &mut A) {
        match self.mode {
            Mode::Prepare => {
                if self.prepare_wait_ms > self.config.prepare_timeout_ms {
                    self.switch_mode(Mode::Safety, true);
                }
            }
            Mode::Idle => self.handle_idle(keys),
            Mode::SetPlayerLaunch => self.handle_set_player(keys),
            Mode::Setting => self.handle_setting(keys),
            Mode::Launch => {
                if self.launch_mode == LaunchMode::None || self.launch.step(keys, actuator) {
                    self.switch_mode(Mode::Idle, true);
                }
            }
            Mode::Pause => {
                if keys.key(KeyId::Launch).clicked() {
                    self.switch_mode(self.last_mode, true);
                } else if keys.key(KeyId::Power).clicked() {
                    self.switch_mode(Mode::Idle, true);
                }
            }
            Mode::Safety => {}
            Mode::Close => {
                if self.beep_remaining_ms == 0 && !self.power_down_sent {
                    self.power_down_sent = true;
                    self.pending.power_down = true;
                }
            }
        }
    }

    fn handle_idle(&mut self, keys: &Keypad) {
        if keys.key(KeyId::Launch).clicked() {
            self.start_launch(LaunchMode::Normal);
        } else if keys.key(KeyId::Random).clicked() {
            self.start_launch(LaunchMode::Random);
        } else if keys.key(KeyId::Launch).long_pressed() {
            self.start_launch(LaunchMode::Test);
        } else if keys.key(KeyId::Setting).clicked() {
            self.switch_mode(Mode::Setting, true);
            self.setting_menu.setting = SettingItem::BaseCardCount;
        }
    }

    fn handle_set_player(&mut self, keys: &Keypad) {
        if keys.key(KeyId::Launch).clicked() || keys.key(KeyId::Random).clicked() {
            self.commit();
            self.switch_mode(Mode::Idle, true);
            return;
        }

        let delta = step_delta(keys);
        if delta != 0 {
            self.setting_menu.adjust_players(delta);
            self.beep();
        }
    }

    fn handle_setting(&mut self, keys: &Keypad) {
        if keys.key(KeyId::Launch).clicked() || keys.key(KeyId::Random).clicked() {
            self.commit();
            self.switch_mode(Mode::Idle, true);
            return;
        }

        if keys.key(KeyId::Setting).clicked() {
            let next = self.setting_menu.setting.next(self.main_menu.player_count);
            if next == SettingItem::None {
                self.commit();
                self.switch_mode(Mode::Idle, true);
            } else {
                self.setting_menu.setting = next;
                self.beep();
            }
            return;
        }

        let delta = step_delta(keys);
        if delta != 0 && self.setting_menu.adjust(delta) {
            self.beep();
        }
    }

    fn start_launch(&mut self, mode: LaunchMode) {
        self.launch_mode = mode;
        self.switch_mode(Mode::Launch, true);
    }

    /// Copy the scratch menu into the committed one
    ///
    /// Only a changed menu is handed out for saving; each save rewrites a
    /// whole flash page.
    fn commit(&mut self) {
        self.setting_menu.setting = SettingItem::None;
        if self.setting_menu == self.main_menu {
            return;
        }
        self.main_menu = self.setting_menu;
        self.pending.save = Some(self.main_menu);
    }

    fn switch_mode(&mut self, target: Mode, beep: bool) {
        self.last_mode = self.mode;
        self.mode = target;

        let resuming = self.last_mode == Mode::Pause;
        match target {
            Mode::Setting | Mode::SetPlayerLaunch if !resuming => {
                self.setting_menu = self.main_menu;
            }
            Mode::Launch if !resuming => {
                self.launch = Launch::start(&self.main_menu, self.launch_mode, self.uptime_ms);
            }
            Mode::Prepare => self.prepare_wait_ms = 0,
            Mode::Close => self.power_down_sent = false,
            _ => {}
        }

        self.pending.transition = Some(Transition {
            from: self.last_mode,
            to: target,
        });
        if beep {
            self.beep();
        }
    }

    fn beep(&mut self) {
        if self.config.buzzer_enabled {
            self.beep_remaining_ms = self.config.beep_ms as u32;
            self.pending.beep_ms = Some(self.config.beep_ms);
        }
    }

    fn refresh_display(&mut self) {
        self.display = view::render(
            self.mode,
            &self.main_menu,
            &self.setting_menu,
            self.launch_mode,
        );
    }
}

/// +1 for add, -1 for sub; holding either repeats
fn step_delta(keys: &Keypad) -> i8 {
    let add = keys.key(KeyId::Add);
    let sub = keys.key(KeyId::Sub);
    if add.clicked() || add.long_or_repeat() {
        1
    } else if sub.clicked() || sub.long_or_repeat() {
        -1
    } else {
        0
    }
}
