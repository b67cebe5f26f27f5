//! Settings menu model

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Bottom cards kept back from the deal
pub const DECK_RANGE: (u8, u8) = (0, 99);
/// Seats around the table
pub const PLAYER_RANGE: (u8, u8) = (0, 8);
/// Cards per player
pub const CARD_RANGE: (u8, u8) = (0, 99);
/// Cards fed per stop
pub const BURST_RANGE: (u8, u8) = (0, 99);

/// Clamp a stepped value back into `[min, max]`
///
/// Stepping past either end wraps to the other end. A value above 254 is
/// a decrement that wrapped below zero and lands on `max`. Reversed bounds
/// are swapped.
pub fn limit_value(value: u8, min: u8, max: u8) -> u8 {
    let (min, max) = if min > max { (max, min) } else { (min, max) };
    if value > 254 {
        max
    } else if value > max {
        min
    } else if value < min {
        max
    } else {
        value
    }
}

/// Item under the settings cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SettingItem {
    #[default]
    None,
    BaseCardCount,
    PlayerCount,
    CardCount,
    BurstCount,
    DealingMode,
    DealingOrder,
    /// Only reached by holding the setting key
    RotationDirection,
}

impl SettingItem {
    /// Item after this one when the setting key is clicked
    ///
    /// `None` means the cycle is finished. The dealing-mode item only
    /// applies to two or three players.
    pub fn next(self, committed_players: u8) -> SettingItem {
        match self {
            SettingItem::None => SettingItem::BaseCardCount,
            SettingItem::BaseCardCount => SettingItem::PlayerCount,
            SettingItem::PlayerCount => SettingItem::CardCount,
            SettingItem::CardCount => SettingItem::BurstCount,
            SettingItem::BurstCount if matches!(committed_players, 2 | 3) => {
                SettingItem::DealingMode
            }
            SettingItem::BurstCount | SettingItem::DealingMode => SettingItem::DealingOrder,
            SettingItem::DealingOrder | SettingItem::RotationDirection => SettingItem::None,
        }
    }
}

/// How the turntable moves between seats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DealingMode {
    /// Swing back and forth over the occupied arc
    #[default]
    Sway,
    /// Keep turning the same way
    Rotate,
}

impl DealingMode {
    pub fn toggled(self) -> Self {
        match self {
            DealingMode::Sway => DealingMode::Rotate,
            DealingMode::Rotate => DealingMode::Sway,
        }
    }
}

/// When the bottom cards are dealt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DealingOrder {
    #[default]
    BottomFirst,
    BottomLast,
}

impl DealingOrder {
    pub fn toggled(self) -> Self {
        match self {
            DealingOrder::BottomFirst => DealingOrder::BottomLast,
            DealingOrder::BottomLast => DealingOrder::BottomFirst,
        }
    }
}

/// Turntable direction; clockwise visits seats in increasing order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RotationDirection {
    #[default]
    Clockwise,
    CounterClockwise,
}

impl RotationDirection {
    pub fn toggled(self) -> Self {
        match self {
            RotationDirection::Clockwise => RotationDirection::CounterClockwise,
            RotationDirection::CounterClockwise => RotationDirection::Clockwise,
        }
    }
}

/// Dealer settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MenuItem {
    /// Settings cursor
    pub setting: SettingItem,
    pub deck_count: u8,
    pub player_count: u8,
    pub card_count: u8,
    pub burst_count: u8,
    pub deal_mode: DealingMode,
    pub deal_order: DealingOrder,
    pub rotation: RotationDirection,
}

impl Default for MenuItem {
    fn default() -> Self {
        Self {
            setting: SettingItem::None,
            deck_count: 3,
            player_count: 3,
            card_count: 17,
            burst_count: 17,
            deal_mode: DealingMode::Sway,
            deal_order: DealingOrder::BottomFirst,
            rotation: RotationDirection::Clockwise,
        }
    }
}

impl MenuItem {
    /// Step the value under the cursor by `delta`
    ///
    /// Counts wrap within their range; two-valued items flip on any
    /// nonzero delta. Returns whether anything changed.
    pub fn adjust(&mut self, delta: i8) -> bool {
        if delta == 0 {
            return false;
        }
        let step = |value: u8, (min, max): (u8, u8)| {
            limit_value(value.wrapping_add(delta as u8), min, max)
        };

        let before = *self;
        match self.setting {
            SettingItem::None => {}
            SettingItem::BaseCardCount => self.deck_count = step(self.deck_count, DECK_RANGE),
            SettingItem::PlayerCount => self.player_count = step(self.player_count, PLAYER_RANGE),
            SettingItem::CardCount => self.card_count = step(self.card_count, CARD_RANGE),
            SettingItem::BurstCount => self.burst_count = step(self.burst_count, BURST_RANGE),
            SettingItem::DealingMode => self.deal_mode = self.deal_mode.toggled(),
            SettingItem::DealingOrder => self.deal_order = self.deal_order.toggled(),
            SettingItem::RotationDirection => self.rotation = self.rotation.toggled(),
        }
        *self != before
    }

    /// Step the player count, as the quick player edit does
    pub fn adjust_players(&mut self, delta: i8) {
        let (min, max) = PLAYER_RANGE;
        self.player_count = limit_value(self.player_count.wrapping_add(delta as u8), min, max);
    }

    /// Pin every count to the top of its range
    pub fn clamped(self) -> Self {
        Self {
            deck_count: self.deck_count.min(DECK_RANGE.1),
            player_count: self.player_count.min(PLAYER_RANGE.1),
            card_count: self.card_count.min(CARD_RANGE.1),
            burst_count: self.burst_count.min(BURST_RANGE.1),
            ..self
        }
    }
}
