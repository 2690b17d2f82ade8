#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic combo tracker with a hard decay window.
//!
//! Every hit refills the window to its full length rather than extending it,
//! so a chain survives only while eliminations keep arriving within the window.

use std::time::Duration;

use log::debug;
use quarantine_arcade_core::{multiplier_for, ComboState, COMBO_WINDOW};

/// Configuration parameters required to construct the combo tracker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    window: Duration,
}

impl Config {
    /// Creates a new configuration using the provided decay window.
    #[must_use]
    pub const fn new(window: Duration) -> Self {
        Self { window }
    }

    /// Length of the window granted by every hit.
    #[must_use]
    pub const fn window(&self) -> Duration {
        self.window
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(COMBO_WINDOW)
    }
}

/// Pure combo counter that decays when no hit arrives inside the window.
#[derive(Clone, Debug)]
pub struct ComboTracker {
    window: Duration,
    state: ComboState,
}

impl Default for ComboTracker {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl ComboTracker {
    /// Creates a new tracker using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            window: config.window,
            state: ComboState::default(),
        }
    }

    /// Counts one hit and refills the window.
    ///
    /// With a zero window the hit still counts toward the best chain, but no
    /// chain survives it.
    pub fn record_hit(&mut self) {
        let combo_count = self.state.combo_count.saturating_add(1);
        self.state.highest_combo = self.state.highest_combo.max(combo_count);

        if self.window.is_zero() {
            self.state.combo_count = 0;
            self.state.window_remaining = Duration::ZERO;
            return;
        }

        self.state.combo_count = combo_count;
        self.state.window_remaining = self.window;
    }

    /// Decays the window by `dt`.
    ///
    /// Returns the length of the chain when it expires during this call.
    pub fn advance(&mut self, dt: Duration) -> Option<u32> {
        if self.state.combo_count == 0 {
            return None;
        }

        self.state.window_remaining = self.state.window_remaining.saturating_sub(dt);
        if !self.state.window_remaining.is_zero() {
            return None;
        }

        let expired = self.state.combo_count;
        self.state.combo_count = 0;
        debug!("combo of {expired} expired");
        Some(expired)
    }

    /// Multiplier earned by the current chain.
    #[must_use]
    pub const fn multiplier(&self) -> f32 {
        multiplier_for(self.state.combo_count)
    }

    /// Clears the chain, the window and the session best.
    pub fn reset(&mut self) {
        self.state = ComboState::default();
    }

    /// Current combo length.
    #[must_use]
    pub const fn combo_count(&self) -> u32 {
        self.state.combo_count
    }

    /// Time left before the chain expires.
    #[must_use]
    pub const fn window_remaining(&self) -> Duration {
        self.state.window_remaining
    }

    /// Longest chain since the last reset.
    #[must_use]
    pub const fn highest_combo(&self) -> u32 {
        self.state.highest_combo
    }

    /// Copy of the full tracker state.
    #[must_use]
    pub const fn state(&self) -> ComboState {
        self.state
    }
}
