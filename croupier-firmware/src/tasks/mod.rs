//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod console;
pub mod display;
pub mod sampling;
pub mod tick;

pub use console::{console_task, ConsoleResources};
pub use display::{display_task, Panel};
pub use sampling::{sampling_task, SupplyChannels};
pub use tick::tick_task;
