//! Console modes

/// Top-level console mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Booting; guarded by the init watchdog
    #[default]
    Prepare,
    /// Showing the committed settings, waiting for a command
    Idle,
    /// Quick player-count edit
    SetPlayerLaunch,
    /// Full settings menu
    Setting,
    /// Dealing
    Launch,
    /// Held by the touch sensor or the operator
    Pause,
    /// Terminal; needs a hard reset
    Safety,
    /// Powering down
    Close,
}

impl Mode {
    /// Modes in which the edited field blinks
    pub fn blinks(self) -> bool {
        matches!(self, Mode::Setting | Mode::SetPlayerLaunch)
    }

    /// Whether motors may run in this mode
    pub fn drives_motors(self) -> bool {
        self == Mode::Launch
    }
}

/// How a launch was requested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LaunchMode {
    /// Nothing to do; returns to idle
    #[default]
    None,
    /// Deal every seat starting from seat 0
    Normal,
    /// Deal every seat starting from a random seat
    Random,
    /// Feed a single card where the turntable stands
    Test,
}
