//! Console workflow
//!
//! The console is the top-level orchestrator. It reads classified keys,
//! edits the settings menu, runs the dealing sequencer and describes what
//! the panel should show.
//!
//! ```text
//!           ┌─────────┐ boot   ┌──────┐ click launch/random ┌────────┐
//!           │ Prepare ├───────►│ Idle ├────────────────────►│ Launch │
//!           └────┬────┘        └┬──┬──┘◄────────────────────┴────────┘
//!      watchdog  │   click set  │  │ hold random               done
//!           ┌────▼───┐   ┌──────▼┐ ┌▼────────────────┐
//!           │ Safety │   │Setting│ │ SetPlayerLaunch │
//!           └────────┘   └───────┘ └─────────────────┘
//!
//!   touch -> Pause (resume with launch)      hold power -> Close
//! ```

mod launch;
mod machine;
mod menu;
mod mode;
mod view;

pub use launch::{Launch, LaunchProgress, MAX_SEATS};
pub use machine::{Console, Effects, Transition};
pub use menu::{
    limit_value, DealingMode, DealingOrder, MenuItem, RotationDirection, SettingItem,
    BURST_RANGE, CARD_RANGE, DECK_RANGE, PLAYER_RANGE,
};
pub use mode::{LaunchMode, Mode};
