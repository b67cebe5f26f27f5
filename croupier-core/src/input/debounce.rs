//! Debounce and classification automaton
//!
//! One automaton serves both key families; [`KeyTiming`] picks the
//! long-press behaviour. `scan` runs every poll (about 10ms) and
//! `advance_ms` is fed from the 1ms tick.
//!
//! The transient states (`Released`, `Clicked`, `LongPressed`,
//! `LongPressedRepeat`) last exactly one scan. A held key otherwise reads
//! `Pressed`, so consumers can match on the state without edge tracking.

use crate::config::{KeyTiming, LongPress};

use super::keypad::KeyId;

/// Long-press tier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LongTier {
    First,
    Second,
}

/// Classified state of a key for the current scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyState {
    /// Not pressed, or a press still inside the debounce window
    #[default]
    Idle,
    /// Press confirmed and still held
    Pressed,
    /// Let go after a long hold
    Released,
    /// Let go within the click window
    Clicked,
    /// A long-press threshold was crossed this scan
    LongPressed(LongTier),
    /// Held past a repeating threshold again
    LongPressedRepeat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Debouncing,
    Held,
}

/// A debounced key
#[derive(Debug, Clone)]
pub struct Key {
    id: KeyId,
    timing: KeyTiming,
    /// Last two samples, oldest first; `true` is active
    levels: [bool; 2],
    phase: Phase,
    /// Time since the press edge
    press_time: u32,
    /// Long-press tiers fired during this press
    tiers_fired: u8,
    /// A repeat is due on the scan after the first long press
    repeat_armed: bool,
    /// Next repeating threshold, measured on `press_time`
    next_repeat_ms: u32,
    state: KeyState,
    last_state: KeyState,
}

impl Key {
    pub fn new(id: KeyId, timing: KeyTiming) -> Self {
        Self {
            id,
            timing,
            levels: [false; 2],
            phase: Phase::Idle,
            press_time: 0,
            tiers_fired: 0,
            repeat_armed: false,
            next_repeat_ms: 0,
            state: KeyState::Idle,
            last_state: KeyState::Idle,
        }
    }

    pub fn id(&self) -> KeyId {
        self.id
    }

    pub fn timing(&self) -> &KeyTiming {
        &self.timing
    }

    /// Current classified state
    pub fn state(&self) -> KeyState {
        self.state
    }

    /// State from the previous scan
    pub fn last_state(&self) -> KeyState {
        self.last_state
    }

    /// Time since the current press began, 0 when idle
    pub fn press_time(&self) -> u32 {
        self.press_time
    }

    /// Last two sampled levels, oldest first
    pub fn levels(&self) -> [bool; 2] {
        self.levels
    }

    /// Press was confirmed on this scan
    pub fn just_pressed(&self) -> bool {
        self.state == KeyState::Pressed && self.last_state == KeyState::Idle
    }

    pub fn clicked(&self) -> bool {
        self.state == KeyState::Clicked
    }

    /// Any long-press tier fired on this scan
    pub fn long_pressed(&self) -> bool {
        matches!(self.state, KeyState::LongPressed(_))
    }

    /// Long press or a repeat fired on this scan
    pub fn long_or_repeat(&self) -> bool {
        self.long_pressed() || self.state == KeyState::LongPressedRepeat
    }

    /// Advance the press timer
    pub fn advance_ms(&mut self, elapsed_ms: u32) {
        if self.phase != Phase::Idle {
            self.press_time = self.press_time.saturating_add(elapsed_ms);
        }
    }

    /// Classify a new sample
    pub fn scan(&mut self, active: bool) {
        self.last_state = self.state;
        self.levels = [self.levels[1], active];

        self.state = match self.phase {
            Phase::Idle => {
                if active {
                    self.phase = Phase::Debouncing;
                    self.press_time = 0;
                }
                KeyState::Idle
            }
            Phase::Debouncing => {
                if !active {
                    // Glitch shorter than one poll
                    self.phase = Phase::Idle;
                    self.press_time = 0;
                    KeyState::Idle
                } else if self.press_time >= self.timing.debounce_ms {
                    self.phase = Phase::Held;
                    self.tiers_fired = 0;
                    self.repeat_armed = false;
                    KeyState::Pressed
                } else {
                    KeyState::Idle
                }
            }
            Phase::Held if !active => self.release(),
            Phase::Held => self.hold(),
        };
    }

    /// Drop any press in progress
    pub fn reset(&mut self) {
        *self = Self::new(self.id, self.timing);
    }

    fn hold(&mut self) -> KeyState {
        match self.timing.long_press {
            LongPress::Repeating { period_ms } => {
                if self.repeat_armed {
                    self.repeat_armed = false;
                    self.next_repeat_ms = self.press_time.saturating_add(period_ms);
                    KeyState::LongPressedRepeat
                } else if self.tiers_fired == 0 && self.press_time >= period_ms {
                    self.tiers_fired = 1;
                    self.repeat_armed = true;
                    KeyState::LongPressed(LongTier::First)
                } else if self.tiers_fired > 0 && self.press_time >= self.next_repeat_ms {
                    self.next_repeat_ms = self.next_repeat_ms.saturating_add(period_ms);
                    KeyState::LongPressedRepeat
                } else {
                    KeyState::Pressed
                }
            }
            LongPress::Staged {
                first_ms,
                second_ms,
            } => match self.tiers_fired {
                0 if self.press_time >= first_ms => {
                    self.tiers_fired = 1;
                    KeyState::LongPressed(LongTier::First)
                }
                1 if self.press_time >= second_ms => {
                    self.tiers_fired = 2;
                    KeyState::LongPressed(LongTier::Second)
                }
                _ => KeyState::Pressed,
            },
        }
    }

    fn release(&mut self) -> KeyState {
        let held = self.press_time;
        self.phase = Phase::Idle;
        self.press_time = 0;
        self.repeat_armed = false;

        if self.tiers_fired == 0 && held < self.timing.click_max_ms {
            KeyState::Clicked
        } else {
            KeyState::Released
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DISCRETE_KEY_TIMING, MATRIX_KEY_TIMING};
    use proptest::prelude::*;

    const POLL_MS: u32 = 10;

    /// Poll `scans` times at `active`, returning every classified state
    fn poll(key: &mut Key, active: bool, scans: usize) -> Vec<KeyState> {
        (0..scans)
            .map(|_| {
                key.advance_ms(POLL_MS);
                key.scan(active);
                key.state()
            })
            .collect()
    }

    fn count(states: &[KeyState], wanted: KeyState) -> usize {
        states.iter().filter(|&&s| s == wanted).count()
    }

    #[test]
    fn test_idle_key_stays_idle() {
        let mut key = Key::new(KeyId::Add, MATRIX_KEY_TIMING);
        let states = poll(&mut key, false, 50);
        assert!(states.iter().all(|&s| s == KeyState::Idle));
        assert_eq!(key.press_time(), 0);
    }

    #[test]
    fn test_short_press_clicks() {
        let mut key = Key::new(KeyId::Setting, MATRIX_KEY_TIMING);

        let pressed = poll(&mut key, true, 5);
        assert_eq!(pressed[0], KeyState::Idle);
        assert_eq!(pressed[1], KeyState::Pressed);
        assert_eq!(key.last_state(), KeyState::Pressed);

        let released = poll(&mut key, false, 2);
        assert_eq!(released, vec![KeyState::Clicked, KeyState::Idle]);
    }

    #[test]
    fn test_just_pressed_fires_once() {
        let mut key = Key::new(KeyId::Touch, DISCRETE_KEY_TIMING);
        key.scan(true);
        key.advance_ms(POLL_MS);
        key.scan(true);
        assert!(key.just_pressed());
        key.advance_ms(POLL_MS);
        key.scan(true);
        assert!(!key.just_pressed());
        assert_eq!(key.state(), KeyState::Pressed);
    }

    #[test]
    fn test_slow_release_is_not_a_click() {
        let mut key = Key::new(KeyId::Add, MATRIX_KEY_TIMING);
        poll(&mut key, true, 60);
        let released = poll(&mut key, false, 1);
        assert_eq!(released, vec![KeyState::Released]);
    }

    #[test]
    fn test_single_sample_glitch_is_swallowed() {
        let mut key = Key::new(KeyId::OptoLaunch, DISCRETE_KEY_TIMING);
        key.scan(true);
        key.advance_ms(POLL_MS);
        key.scan(false);
        assert_eq!(key.state(), KeyState::Idle);
        assert_eq!(key.press_time(), 0);
    }

    #[test]
    fn test_repeating_long_press() {
        let mut key = Key::new(KeyId::Add, MATRIX_KEY_TIMING);
        // Press edge at t=0, confirmed at t=10
        let states = poll(&mut key, true, 350);

        let long_at = states
            .iter()
            .position(|&s| s == KeyState::LongPressed(LongTier::First))
            .unwrap();
        assert_eq!(count(&states, KeyState::LongPressed(LongTier::First)), 1);
        // press_time is 10ms per poll after the edge
        assert_eq!(long_at, 100);
        assert_eq!(states[long_at + 1], KeyState::LongPressedRepeat);

        let repeats: Vec<usize> = states
            .iter()
            .enumerate()
            .filter(|(_, s)| **s == KeyState::LongPressedRepeat)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(repeats, vec![101, 201, 301]);
    }

    #[test]
    fn test_staged_long_press_tiers() {
        let mut key = Key::new(KeyId::Power, DISCRETE_KEY_TIMING);
        let states = poll(&mut key, true, 600);

        assert_eq!(count(&states, KeyState::LongPressed(LongTier::First)), 1);
        assert_eq!(count(&states, KeyState::LongPressed(LongTier::Second)), 1);
        assert_eq!(count(&states, KeyState::LongPressedRepeat), 0);
        assert_eq!(states[200], KeyState::LongPressed(LongTier::First));
        assert_eq!(states[400], KeyState::LongPressed(LongTier::Second));
        assert_eq!(states[599], KeyState::Pressed);

        assert_eq!(poll(&mut key, false, 1), vec![KeyState::Released]);
    }

    #[test]
    fn test_timer_monotonic_while_held() {
        let mut key = Key::new(KeyId::Add, MATRIX_KEY_TIMING);
        let mut last = 0;
        for _ in 0..300 {
            key.advance_ms(POLL_MS);
            key.scan(true);
            assert!(key.press_time() >= last);
            last = key.press_time();
        }
        key.advance_ms(POLL_MS);
        key.scan(false);
        assert_eq!(key.press_time(), 0);
    }

    #[test]
    fn test_reset_drops_press() {
        let mut key = Key::new(KeyId::Random, MATRIX_KEY_TIMING);
        poll(&mut key, true, 3);
        key.reset();
        assert_eq!(key.state(), KeyState::Idle);
        assert_eq!(poll(&mut key, false, 1), vec![KeyState::Idle]);
    }

    proptest! {
        #[test]
        fn prop_click_window(held_polls in 0usize..200, staged in any::<bool>()) {
            let timing = if staged { DISCRETE_KEY_TIMING } else { MATRIX_KEY_TIMING };
            let mut key = Key::new(KeyId::Launch, timing);

            key.scan(true);
            let mut states = poll(&mut key, true, held_polls);
            key.advance_ms(POLL_MS);
            let held_ms = key.press_time();
            key.scan(false);
            states.push(key.state());

            let confirmed = held_polls >= 1;
            let expect_click = confirmed
                && held_ms >= timing.debounce_ms
                && held_ms < timing.click_max_ms;
            prop_assert_eq!(count(&states, KeyState::Clicked) == 1, expect_click);
            prop_assert!(count(&states, KeyState::Clicked) <= 1);
        }

        #[test]
        fn prop_glitch_never_presses(gap_polls in 1usize..20) {
            let mut key = Key::new(KeyId::Touch, DISCRETE_KEY_TIMING);
            for _ in 0..gap_polls {
                key.scan(true);
                prop_assert_ne!(key.state(), KeyState::Pressed);
                let states = poll(&mut key, false, 1);
                prop_assert_eq!(states[0], KeyState::Idle);
            }
        }

        #[test]
        fn prop_long_press_fires_once(held_polls in 101usize..500) {
            let mut key = Key::new(KeyId::Sub, MATRIX_KEY_TIMING);
            let states = poll(&mut key, true, held_polls);
            prop_assert_eq!(count(&states, KeyState::LongPressed(LongTier::First)), 1);
            prop_assert_eq!(count(&states, KeyState::Clicked), 0);
        }
    }
}
