//! Display content
//!
//! The console describes what the five-cell panel should show as a
//! [`DisplayDescriptor`]. The [`Composer`] applies blink and marquee
//! timing and decides whether the driver has to be touched at all.

mod compose;
mod descriptor;

pub use compose::Composer;
pub use descriptor::{Body, DisplayDescriptor, CELLS};
