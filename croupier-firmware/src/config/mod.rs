//! Board configuration and settings persistence

pub mod persistence;

pub use persistence::SettingsPersistence;

use croupier_core::config::{ConsoleConfig, DisplayConfig};

/// Console settings for this build
pub fn console_config() -> ConsoleConfig {
    ConsoleConfig {
        buzzer_enabled: cfg!(feature = "buzzer"),
        ..ConsoleConfig::default()
    }
}

pub fn display_config() -> DisplayConfig {
    DisplayConfig::default()
}
