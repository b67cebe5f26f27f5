//! Settings persistence
//!
//! Loads the committed menu from the tail flash page and writes it back on
//! every commit. Failures are logged and the console keeps running from
//! memory.

use defmt::*;

use croupier_core::console::MenuItem;
use croupier_core::settings::{self, SettingsError};
use croupier_hal_stm32g0::TailPageStore;

/// Settings persistence manager
pub struct SettingsPersistence<'d> {
    store: TailPageStore<'d>,
}

impl<'d> SettingsPersistence<'d> {
    pub fn new(store: TailPageStore<'d>) -> Self {
        Self { store }
    }

    /// Load the committed menu, or `None` to boot with defaults
    pub fn load(&mut self) -> Option<MenuItem> {
        match settings::load(&mut self.store) {
            Ok(menu) => {
                info!("Loaded settings from flash");
                Some(menu)
            }
            Err(SettingsError::Blank) => {
                info!("No settings in flash, using defaults");
                None
            }
            Err(e) => {
                warn!("Failed to load settings: {:?}", e);
                None
            }
        }
    }

    /// Persist a committed menu
    pub fn save(&mut self, menu: &MenuItem) {
        match settings::save(&mut self.store, menu) {
            Ok(()) => info!("Settings saved"),
            Err(e) => warn!("Failed to save settings: {:?}", e),
        }
    }
}
