//! Dealing sequencer
//!
//! Snapshot of the committed menu taken when a launch starts, plus the
//! progress through it. Cards are fed at a seat in bursts, the table then
//! turns to the next seat that is still owed cards. The bottom cards go
//! to the starting seat, before or after everyone else.
//!
//! A card is counted when the exit beam is restored. A seat is reached
//! on each confirmed press of the turntable's seat-mark sensor.

use super::menu::{DealingMode, DealingOrder, MenuItem, RotationDirection};
use super::mode::LaunchMode;
use crate::input::{KeyId, KeyState, Keypad};
use crate::traits::{Actuator, MotorDirection, MotorId};

/// Most seats the table supports
pub const MAX_SEATS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum Phase {
    /// Turning toward a seat
    Seeking {
        marks_left: u8,
        direction: RotationDirection,
    },
    /// Feeding a burst at the current seat
    Feeding { cards_left: u8, bottom: bool },
    Done,
}

/// Coarse progress, for the display and logs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LaunchProgress {
    Seeking,
    Feeding,
    Done,
}

/// Working launch fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Launch {
    mode: LaunchMode,
    seats: u8,
    seat: u8,
    owed: [u8; MAX_SEATS],
    bottom_owed: u8,
    bottom_seat: u8,
    burst: u8,
    order: DealingOrder,
    sway: bool,
    /// Configured direction; in sway this flips at the ends of the arc
    travel: RotationDirection,
    phase: Phase,
    dealt: u16,
}

impl Default for Launch {
    fn default() -> Self {
        Self::start(&MenuItem::default(), LaunchMode::None, 0)
    }
}

impl Launch {
    /// Snapshot `menu` and plan the first move
    ///
    /// `seed` picks the starting seat in random mode.
    pub fn start(menu: &MenuItem, mode: LaunchMode, seed: u32) -> Self {
        let seats = menu.player_count.min(MAX_SEATS as u8);
        let mut owed = [0; MAX_SEATS];
        for slot in owed.iter_mut().take(seats as usize) {
            *slot = menu.card_count;
        }

        let mut launch = Self {
            mode,
            seats,
            seat: 0,
            owed,
            bottom_owed: menu.deck_count,
            bottom_seat: 0,
            burst: menu.burst_count.max(1),
            order: menu.deal_order,
            sway: menu.deal_mode == DealingMode::Sway && matches!(seats, 2 | 3),
            travel: menu.rotation,
            phase: Phase::Done,
            dealt: 0,
        };

        launch.phase = match mode {
            LaunchMode::None => Phase::Done,
            LaunchMode::Test => Phase::Feeding {
                cards_left: 1,
                bottom: false,
            },
            LaunchMode::Normal => launch.plan(false),
            LaunchMode::Random => {
                let target = if seats > 0 { (seed % seats as u32) as u8 } else { 0 };
                launch.bottom_seat = target;
                launch.seek(target, false)
            }
        };
        launch
    }

    pub fn mode(&self) -> LaunchMode {
        self.mode
    }

    /// Seat the table currently stands at
    pub fn seat(&self) -> u8 {
        self.seat
    }

    /// Cards fed so far
    pub fn dealt(&self) -> u16 {
        self.dealt
    }

    /// Cards still owed to a seat
    pub fn owed(&self, seat: u8) -> u8 {
        self.owed.get(seat as usize).copied().unwrap_or(0)
    }

    pub fn bottom_owed(&self) -> u8 {
        self.bottom_owed
    }

    pub fn progress(&self) -> LaunchProgress {
        match self.phase {
            Phase::Seeking { .. } => LaunchProgress::Seeking,
            Phase::Feeding { .. } => LaunchProgress::Feeding,
            Phase::Done => LaunchProgress::Done,
        }
    }

    pub fn is_done(&self) -> bool {
        self.phase == Phase::Done
    }

    /// Run one console tick; returns true once the plan is finished
    pub fn step<A: Actuator>(&mut self, keys: &Keypad, actuator: &mut A) -> bool {
        match self.phase {
            Phase::Seeking {
                marks_left,
                direction,
            } => {
                actuator.drive(MotorId::Out, MotorDirection::Stop);
                actuator.drive(MotorId::Rotate, motor_direction(direction));

                if keys.key(KeyId::OptoRotate).just_pressed() {
                    self.seat = self.neighbour(self.seat, direction);
                    if marks_left <= 1 {
                        actuator.drive(MotorId::Rotate, MotorDirection::Stop);
                        self.phase = self.plan(false);
                    } else {
                        self.phase = Phase::Seeking {
                            marks_left: marks_left - 1,
                            direction,
                        };
                    }
                }
            }
            Phase::Feeding { cards_left, bottom } => {
                actuator.drive(MotorId::Rotate, MotorDirection::Stop);
                actuator.drive(MotorId::Out, MotorDirection::Forward);

                if card_passed(keys.state(KeyId::OptoLaunch)) {
                    self.dealt = self.dealt.saturating_add(1);
                    if bottom {
                        self.bottom_owed = self.bottom_owed.saturating_sub(1);
                    } else if let Some(slot) = self.owed.get_mut(self.seat as usize) {
                        *slot = slot.saturating_sub(1);
                    }

                    if cards_left <= 1 {
                        actuator.drive(MotorId::Out, MotorDirection::Stop);
                        self.phase = if self.mode == LaunchMode::Test {
                            Phase::Done
                        } else {
                            self.plan(!bottom)
                        };
                    } else {
                        self.phase = Phase::Feeding {
                            cards_left: cards_left - 1,
                            bottom,
                        };
                    }
                }
            }
            Phase::Done => actuator.stop_all(),
        }
        self.phase == Phase::Done
    }

    /// Decide what to do from the current seat
    ///
    /// `after_burst` is set right after feeding players here, so the table
    /// moves on instead of emptying one seat.
    fn plan(&mut self, after_burst: bool) -> Phase {
        if self.order == DealingOrder::BottomFirst && self.bottom_owed > 0 {
            return self.seek(self.bottom_seat, true);
        }
        if !after_burst && self.owed(self.seat) > 0 {
            return self.feed(false);
        }
        if let Some(target) = self.next_owed_seat() {
            return self.seek(target, false);
        }
        if self.bottom_owed > 0 {
            return self.seek(self.bottom_seat, true);
        }
        Phase::Done
    }

    fn feed(&self, bottom: bool) -> Phase {
        let owed = if bottom {
            self.bottom_owed
        } else {
            self.owed(self.seat)
        };
        if owed == 0 {
            return Phase::Done;
        }
        Phase::Feeding {
            cards_left: owed.min(self.burst),
            bottom,
        }
    }

    /// Turn toward `target`, or feed straight away when already there
    fn seek(&mut self, target: u8, bottom: bool) -> Phase {
        let (direction, marks) = self.route(target);
        if marks == 0 {
            if bottom {
                return self.feed(true);
            }
            return self.plan(false);
        }
        Phase::Seeking {
            marks_left: marks,
            direction,
        }
    }

    fn route(&mut self, target: u8) -> (RotationDirection, u8) {
        let n = self.seats.max(1);
        if self.sway {
            if target > self.seat {
                self.travel = RotationDirection::Clockwise;
                (self.travel, target - self.seat)
            } else {
                self.travel = RotationDirection::CounterClockwise;
                (self.travel, self.seat - target)
            }
        } else {
            let marks = match self.travel {
                RotationDirection::Clockwise => (target + n - self.seat % n) % n,
                RotationDirection::CounterClockwise => (self.seat % n + n - target % n) % n,
            };
            (self.travel, marks)
        }
    }

    fn next_owed_seat(&self) -> Option<u8> {
        if self.seats == 0 {
            return None;
        }
        if self.sway {
            let ahead = self.scan_arc(self.travel);
            let behind = self.scan_arc(self.travel.toggled());
            return ahead
                .or(behind)
                .or_else(|| (self.owed(self.seat) > 0).then_some(self.seat));
        }
        let mut seat = self.seat;
        for _ in 0..self.seats {
            seat = self.neighbour(seat, self.travel);
            if self.owed(seat) > 0 {
                return Some(seat);
            }
        }
        None
    }

    /// First owed seat along the arc without wrapping
    fn scan_arc(&self, direction: RotationDirection) -> Option<u8> {
        match direction {
            RotationDirection::Clockwise => (self.seat + 1..self.seats).find(|&s| self.owed(s) > 0),
            RotationDirection::CounterClockwise => {
                (0..self.seat).rev().find(|&s| self.owed(s) > 0)
            }
        }
    }

    fn neighbour(&self, seat: u8, direction: RotationDirection) -> u8 {
        let n = self.seats.max(1);
        match direction {
            RotationDirection::Clockwise => (seat + 1) % n,
            RotationDirection::CounterClockwise => (seat + n - 1) % n,
        }
    }
}

fn motor_direction(direction: RotationDirection) -> MotorDirection {
    match direction {
        RotationDirection::Clockwise => MotorDirection::Forward,
        RotationDirection::CounterClockwise => MotorDirection::Reverse,
    }
}

/// The exit beam was restored after a card went through
fn card_passed(state: KeyState) -> bool {
    matches!(state, KeyState::Clicked | KeyState::Released)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::DiscreteLevels;

    #[derive(Default)]
    struct MockActuator {
        out: MotorDirection,
        rotate: MotorDirection,
    }

    impl Actuator for MockActuator {
        fn drive(&mut self, motor: MotorId, direction: MotorDirection) {
            match motor {
                MotorId::Out => self.out = direction,
                MotorId::Rotate => self.rotate = direction,
            }
        }
    }

    struct Bench {
        keys: Keypad,
        motors: MockActuator,
    }

    impl Bench {
        fn new() -> Self {
            Self {
                keys: Keypad::default(),
                motors: MockActuator::default(),
            }
        }

        fn poll(&mut self, levels: DiscreteLevels, launch: &mut Launch) -> bool {
            self.keys.advance_ms(10);
            self.keys.scan(levels, 0xFFFF);
            launch.step(&self.keys, &mut self.motors)
        }

        /// Let one card through the exit beam
        fn pass_card(&mut self, launch: &mut Launch) -> bool {
            let blocked = DiscreteLevels {
                opto_launch: true,
                ..Default::default()
            };
            self.poll(blocked, launch);
            self.poll(blocked, launch);
            self.poll(DiscreteLevels::default(), launch)
        }

        /// Let the table pass one seat mark
        fn pass_mark(&mut self, launch: &mut Launch) -> bool {
            let mark = DiscreteLevels {
                opto_rotate: true,
                ..Default::default()
            };
            self.poll(mark, launch);
            let done = self.poll(mark, launch);
            self.poll(DiscreteLevels::default(), launch);
            done
        }
    }

    fn menu(players: u8, cards: u8, deck: u8, burst: u8) -> MenuItem {
        MenuItem {
            player_count: players,
            card_count: cards,
            deck_count: deck,
            burst_count: burst,
            deal_mode: DealingMode::Rotate,
            ..Default::default()
        }
    }

    #[test]
    fn test_none_is_done_immediately() {
        let launch = Launch::start(&MenuItem::default(), LaunchMode::None, 0);
        assert!(launch.is_done());
    }

    #[test]
    fn test_empty_plan_is_done() {
        let launch = Launch::start(&menu(0, 5, 0, 1), LaunchMode::Normal, 0);
        assert!(launch.is_done());
    }

    #[test]
    fn test_test_mode_feeds_one_card() {
        let mut bench = Bench::new();
        let mut launch = Launch::start(&menu(4, 10, 3, 2), LaunchMode::Test, 0);
        assert_eq!(launch.progress(), LaunchProgress::Feeding);

        bench.poll(DiscreteLevels::default(), &mut launch);
        assert_eq!(bench.motors.out, MotorDirection::Forward);
        assert_eq!(bench.motors.rotate, MotorDirection::Stop);

        assert!(bench.pass_card(&mut launch));
        assert_eq!(launch.dealt(), 1);
        assert_eq!(bench.motors.out, MotorDirection::Stop);
    }

    #[test]
    fn test_bottom_first_then_round_robin() {
        let mut bench = Bench::new();
        let mut launch = Launch::start(&menu(2, 2, 1, 1), LaunchMode::Normal, 0);

        // Bottom card at seat 0
        assert_eq!(launch.progress(), LaunchProgress::Feeding);
        bench.pass_card(&mut launch);
        assert_eq!(launch.bottom_owed(), 0);

        // Seat 0 gets one card, then the table moves on
        bench.pass_card(&mut launch);
        assert_eq!(launch.owed(0), 1);
        assert_eq!(launch.progress(), LaunchProgress::Seeking);
        bench.poll(DiscreteLevels::default(), &mut launch);
        assert_eq!(bench.motors.rotate, MotorDirection::Forward);

        bench.pass_mark(&mut launch);
        assert_eq!(launch.seat(), 1);
        assert_eq!(launch.progress(), LaunchProgress::Feeding);
        bench.pass_card(&mut launch);
        assert_eq!(launch.owed(1), 1);

        bench.pass_mark(&mut launch);
        assert_eq!(launch.seat(), 0);
        bench.pass_card(&mut launch);
        bench.pass_mark(&mut launch);
        assert!(bench.pass_card(&mut launch));

        assert_eq!(launch.dealt(), 5);
        assert_eq!(bench.motors.out, MotorDirection::Stop);
        assert_eq!(bench.motors.rotate, MotorDirection::Stop);
    }

    #[test]
    fn test_bottom_last_returns_to_start() {
        let mut bench = Bench::new();
        let mut m = menu(3, 1, 1, 5);
        m.deal_order = DealingOrder::BottomLast;
        let mut launch = Launch::start(&m, LaunchMode::Normal, 0);

        bench.pass_card(&mut launch);
        bench.pass_mark(&mut launch);
        bench.pass_card(&mut launch);
        bench.pass_mark(&mut launch);
        bench.pass_card(&mut launch);
        assert_eq!(launch.seat(), 2);

        // One more mark wraps back to seat 0 for the bottom card
        assert_eq!(launch.progress(), LaunchProgress::Seeking);
        bench.pass_mark(&mut launch);
        assert_eq!(launch.seat(), 0);
        assert!(bench.pass_card(&mut launch));
        assert_eq!(launch.dealt(), 4);
    }

    #[test]
    fn test_counter_clockwise_turns_in_reverse() {
        let mut bench = Bench::new();
        let mut m = menu(3, 1, 0, 1);
        m.rotation = RotationDirection::CounterClockwise;
        let mut launch = Launch::start(&m, LaunchMode::Normal, 0);

        bench.pass_card(&mut launch);
        bench.poll(DiscreteLevels::default(), &mut launch);
        assert_eq!(bench.motors.rotate, MotorDirection::Reverse);
        bench.pass_mark(&mut launch);
        assert_eq!(launch.seat(), 2);
    }

    #[test]
    fn test_sway_reverses_at_the_end() {
        let mut bench = Bench::new();
        let mut m = menu(3, 2, 0, 1);
        m.deal_mode = DealingMode::Sway;
        let mut launch = Launch::start(&m, LaunchMode::Normal, 0);

        bench.pass_card(&mut launch);
        bench.pass_mark(&mut launch);
        bench.pass_card(&mut launch);
        bench.pass_mark(&mut launch);
        assert_eq!(launch.seat(), 2);
        bench.pass_card(&mut launch);

        // Seat 2 is the end of the arc; the table swings back
        bench.poll(DiscreteLevels::default(), &mut launch);
        assert_eq!(bench.motors.rotate, MotorDirection::Reverse);
        bench.pass_mark(&mut launch);
        assert_eq!(launch.seat(), 1);
    }

    #[test]
    fn test_random_start_seeks_first() {
        let mut bench = Bench::new();
        let mut launch = Launch::start(&menu(4, 1, 0, 1), LaunchMode::Random, 6);
        assert_eq!(launch.progress(), LaunchProgress::Seeking);

        bench.pass_mark(&mut launch);
        assert_eq!(launch.progress(), LaunchProgress::Seeking);
        bench.pass_mark(&mut launch);
        assert_eq!(launch.seat(), 2);
        assert_eq!(launch.progress(), LaunchProgress::Feeding);
    }

    #[test]
    fn test_zero_burst_feeds_one() {
        let launch = Launch::start(&menu(2, 5, 0, 0), LaunchMode::Normal, 0);
        assert_eq!(
            launch.phase,
            Phase::Feeding {
                cards_left: 1,
                bottom: false
            }
        );
    }
}
