//! Display composition
//!
//! Sole writer of the shadow frame. Runs on the display task: the 1ms tick
//! feeds `advance_ms`, then `compose` turns the console's intent into the
//! frame to draw and flags whether it differs from the last one.

use croupier_protocol::marquee;

use super::descriptor::{Body, DisplayDescriptor};
use crate::config::DisplayConfig;
use crate::console::RotationDirection;

/// Blink and marquee timing plus change detection
#[derive(Debug, Clone)]
pub struct Composer {
    config: DisplayConfig,
    shadow: DisplayDescriptor,
    blink_ms: u32,
    blink_visible: bool,
    marquee_ms: u32,
    marquee_index: u8,
}

impl Default for Composer {
    fn default() -> Self {
        Self::new(DisplayConfig::default())
    }
}

impl Composer {
    pub fn new(config: DisplayConfig) -> Self {
        Self {
            config,
            // Matches a blank panel in the visible blink phase
            shadow: DisplayDescriptor {
                blink_visible: true,
                ..DisplayDescriptor::blank()
            },
            blink_ms: 0,
            blink_visible: true,
            marquee_ms: 0,
            marquee_index: 0,
        }
    }

    pub fn advance_ms(&mut self, elapsed_ms: u32) {
        self.blink_ms = self.blink_ms.saturating_add(elapsed_ms);
        self.marquee_ms = self.marquee_ms.saturating_add(elapsed_ms);
    }

    /// Compose the frame for `intent`
    ///
    /// The returned frame has `dirty` set when it would change the panel.
    /// It always becomes the new comparison baseline.
    pub fn compose(&mut self, intent: &DisplayDescriptor) -> DisplayDescriptor {
        let mut frame = *intent;

        if intent.blink {
            let period = self.config.blink_period_ms.max(1);
            while self.blink_ms >= period {
                self.blink_ms -= period;
                self.blink_visible = !self.blink_visible;
            }
        } else {
            self.blink_ms = 0;
            self.blink_visible = true;
        }

        if let Body::Marquee { direction, .. } = intent.body {
            let period = self.config.marquee_period_ms.max(1);
            while self.marquee_ms >= period {
                self.marquee_ms -= period;
                self.marquee_index = match direction {
                    RotationDirection::Clockwise => marquee::advance(self.marquee_index),
                    RotationDirection::CounterClockwise => marquee::regress(self.marquee_index),
                };
            }
            frame.body = Body::Marquee {
                index: self.marquee_index,
                direction,
            };
        } else {
            self.marquee_ms = 0;
        }

        frame.blink_visible = self.blink_visible;
        if !self.blink_visible {
            frame.hide_blinking_cells();
        }

        frame.dirty = !frame.same_content(&self.shadow);
        self.shadow = frame;
        frame
    }

    /// Force the next frame to be drawn, e.g. after the panel lost power
    pub fn invalidate(&mut self) {
        self.shadow = DisplayDescriptor::blank();
        self.shadow.blink_visible = !self.blink_visible;
    }

    pub fn marquee_index(&self) -> u8 {
        self.marquee_index
    }
}
