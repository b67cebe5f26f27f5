//! Power-key wake gate
//!
//! Decides when a sleeping board should wake. The key that asked for the
//! power-down is usually still held, and it bounces when let go, so a raw
//! edge is not enough: the key first has to stay released for the
//! debounce window, then stay pressed for it.
//!
//! The caller samples the key whenever it likes (a poll timer, or right
//! after an edge interrupt) and passes the time since the previous sample.

/// Default settle time for the wake key
pub const WAKE_DEBOUNCE_MS: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum Stage {
    /// Waiting for the key to be let go for good
    Releasing,
    /// Released and settled; the next steady press wakes
    Armed,
    Woken,
}

/// Debounced release-then-press detector
#[derive(Debug, Clone)]
pub struct WakeGate {
    debounce_ms: u32,
    stage: Stage,
    /// Level of the previous sample, `None` before the first
    last: Option<bool>,
    /// How long the key has held `last`
    steady_ms: u32,
}

impl Default for WakeGate {
    fn default() -> Self {
        Self::new(WAKE_DEBOUNCE_MS)
    }
}

impl WakeGate {
    pub fn new(debounce_ms: u32) -> Self {
        Self {
            debounce_ms,
            stage: Stage::Releasing,
            last: None,
            steady_ms: 0,
        }
    }

    /// Feed one sample; returns true once the wake press is confirmed
    ///
    /// `elapsed_ms` is the time since the previous sample. A level change
    /// restarts the settle time, so after an edge interrupt any elapsed
    /// value is safe.
    pub fn sample(&mut self, pressed: bool, elapsed_ms: u32) -> bool {
        if self.last == Some(pressed) {
            self.steady_ms = self.steady_ms.saturating_add(elapsed_ms);
        } else {
            self.last = Some(pressed);
            self.steady_ms = 0;
        }

        let settled = self.steady_ms >= self.debounce_ms;
        self.stage = match self.stage {
            Stage::Releasing if !pressed && settled => Stage::Armed,
            Stage::Armed if pressed && settled => Stage::Woken,
            stage => stage,
        };
        self.stage == Stage::Woken
    }

    /// Armed and the key is up: nothing can happen until the next press,
    /// so the caller may sleep on the key's edge interrupt
    pub fn idle(&self) -> bool {
        self.stage == Stage::Armed && self.last == Some(false)
    }

    pub fn woken(&self) -> bool {
        self.stage == Stage::Woken
    }
}
