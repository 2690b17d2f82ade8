#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Arcade session controller that batches eliminations for a timed window.
//!
//! The host calls [`ArcadeSession::advance`] once per tick together with its
//! interactive flag. Nothing moves while the host is not interactive: the
//! countdown, the session timer, elapsed active time and combo decay are all
//! frozen together. When the session timer runs out the controller captures an
//! [`ArcadeSnapshot`] and keeps the queued eliminations until the host either
//! drains or clears them during settlement.

use std::time::Duration;

use log::{debug, warn};
use quarantine_arcade_core::{
    ArcadeSnapshot, ComboState, EliminationRecord, HudSnapshot, Identity, SessionEvent,
    SessionPhase, COMBO_WINDOW, COUNTDOWN_DURATION, SESSION_DURATION,
};
use quarantine_arcade_system_combo::{ComboTracker, Config as ComboConfig};
use quarantine_arcade_system_elimination_queue::EliminationQueue;

/// Configuration parameters required to construct the session controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    countdown: Duration,
    session_length: Duration,
    combo: ComboConfig,
}

impl Config {
    /// Creates a new configuration from explicit phase lengths.
    #[must_use]
    pub const fn new(countdown: Duration, session_length: Duration, combo: ComboConfig) -> Self {
        Self {
            countdown,
            session_length,
            combo,
        }
    }

    /// Length of the pre-roll countdown.
    #[must_use]
    pub const fn countdown(&self) -> Duration {
        self.countdown
    }

    /// Length of the active phase.
    #[must_use]
    pub const fn session_length(&self) -> Duration {
        self.session_length
    }

    /// Combo tracker configuration.
    #[must_use]
    pub const fn combo(&self) -> ComboConfig {
        self.combo
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(
            COUNTDOWN_DURATION,
            SESSION_DURATION,
            ComboConfig::new(COMBO_WINDOW),
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
enum Phase {
    Idle,
    Countdown {
        remaining: Duration,
    },
    Active {
        time_remaining: Duration,
        elapsed: Duration,
    },
    Ended {
        snapshot: ArcadeSnapshot,
    },
}

/// Owns the session phase, the combo tracker and the elimination queue.
#[derive(Debug)]
pub struct ArcadeSession {
    config: Config,
    phase: Phase,
    combo: ComboTracker,
    queue: EliminationQueue,
    total_eliminations: u32,
    powerups_collected: u32,
}

impl Default for ArcadeSession {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl ArcadeSession {
    /// Creates an idle controller using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            phase: Phase::Idle,
            combo: ComboTracker::new(config.combo),
            queue: EliminationQueue::new(),
            total_eliminations: 0,
            powerups_collected: 0,
        }
    }

    /// Begins the countdown for a fresh session.
    ///
    /// Any state left from a previous session, including unsettled records, is
    /// discarded. This is also the replay path out of [`SessionPhase::Ended`].
    pub fn start_session(&mut self) {
        self.reset_counters();
        self.phase = Phase::Countdown {
            remaining: self.config.countdown,
        };
        debug!("arcade session countdown started");
    }

    /// Abandons the session and returns to [`SessionPhase::Idle`].
    ///
    /// Queued records and combo state are discarded and no snapshot is produced.
    pub fn cancel_session(&mut self) {
        if self.phase == Phase::Idle {
            return;
        }

        if !self.queue.is_empty() {
            debug!(
                "cancelling session with {} unsettled eliminations",
                self.queue.len()
            );
        }
        self.reset_counters();
        self.phase = Phase::Idle;
    }

    /// Advances session time by `dt` when the host is interactive.
    ///
    /// Emits [`SessionEvent`] values into `out` for every transition observed
    /// during the tick.
    pub fn advance(
        &mut self,
        dt: Duration,
        host_is_interactive: bool,
        out: &mut Vec<SessionEvent>,
    ) {
        if !host_is_interactive {
            return;
        }

        match self.phase {
            Phase::Countdown { remaining } => self.advance_countdown(remaining, dt, out),
            Phase::Active {
                time_remaining,
                elapsed,
            } => self.advance_active(time_remaining, elapsed, dt, out),
            Phase::Idle | Phase::Ended { .. } => {}
        }
    }

    /// Queues an elimination of the provided identity.
    ///
    /// Ignored outside [`SessionPhase::Active`].
    pub fn record_elimination(&mut self, identity: Identity) {
        if !self.is_active() {
            warn!(
                "ignoring elimination of {} outside the active phase ({:?})",
                identity.id().as_str(),
                self.phase()
            );
            return;
        }

        self.queue.enqueue(identity);
        self.total_eliminations = self.total_eliminations.saturating_add(1);
        self.combo.record_hit();
    }

    /// Counts a collected powerup. Ignored outside [`SessionPhase::Active`].
    pub fn record_powerup(&mut self) {
        if !self.is_active() {
            return;
        }
        self.powerups_collected = self.powerups_collected.saturating_add(1);
    }

    /// Removes the queued records for commit.
    ///
    /// Only available once the session has ended; otherwise returns an empty batch.
    #[must_use]
    pub fn drain_queue(&mut self) -> Vec<EliminationRecord> {
        if self.phase() != SessionPhase::Ended {
            warn!("refusing to drain eliminations during {:?}", self.phase());
            return Vec::new();
        }
        self.queue.drain()
    }

    /// Discards the queued records. Only available once the session has ended.
    pub fn clear_queue(&mut self) {
        if self.phase() != SessionPhase::Ended {
            warn!("refusing to clear eliminations during {:?}", self.phase());
            return;
        }
        self.queue.clear();
    }

    /// Phase the controller currently occupies.
    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        match self.phase {
            Phase::Idle => SessionPhase::Idle,
            Phase::Countdown { .. } => SessionPhase::Countdown,
            Phase::Active { .. } => SessionPhase::Active,
            Phase::Ended { .. } => SessionPhase::Ended,
        }
    }

    /// Reports whether eliminations are currently being counted.
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self.phase, Phase::Active { .. })
    }

    /// Snapshot frozen when the session ended, if it has.
    #[must_use]
    pub fn final_snapshot(&self) -> Option<&ArcadeSnapshot> {
        match &self.phase {
            Phase::Ended { snapshot } => Some(snapshot),
            _ => None,
        }
    }

    /// Records waiting for settlement, in enqueue order.
    #[must_use]
    pub fn pending(&self) -> &[EliminationRecord] {
        self.queue.records()
    }

    /// Current combo state.
    #[must_use]
    pub fn combo_state(&self) -> ComboState {
        self.combo.state()
    }

    /// Multiplier earned by the current combo.
    #[must_use]
    pub fn multiplier(&self) -> f32 {
        self.combo.multiplier()
    }

    /// Projection of the live state for the HUD.
    ///
    /// Available in every phase except [`SessionPhase::Idle`], so a paused or
    /// finished session keeps rendering its last known values.
    #[must_use]
    pub fn snapshot_for_rendering(&self) -> Option<HudSnapshot> {
        let (countdown_remaining, time_remaining, elapsed_active) = match &self.phase {
            Phase::Idle => return None,
            Phase::Countdown { remaining } => {
                (*remaining, self.config.session_length, Duration::ZERO)
            }
            Phase::Active {
                time_remaining,
                elapsed,
            } => (Duration::ZERO, *time_remaining, *elapsed),
            Phase::Ended { snapshot } => (Duration::ZERO, Duration::ZERO, snapshot.elapsed_active),
        };

        Some(HudSnapshot {
            phase: self.phase(),
            countdown_remaining,
            time_remaining,
            elapsed_active,
            total_eliminations: self.total_eliminations,
            powerups_collected: self.powerups_collected,
            combo: self.combo.state(),
            multiplier: self.combo.multiplier(),
            queue_size: self.queue.len(),
        })
    }

    fn advance_countdown(
        &mut self,
        remaining: Duration,
        dt: Duration,
        out: &mut Vec<SessionEvent>,
    ) {
        let remaining = remaining.saturating_sub(dt);
        if !remaining.is_zero() {
            self.phase = Phase::Countdown { remaining };
            return;
        }

        self.phase = Phase::Active {
            time_remaining: self.config.session_length,
            elapsed: Duration::ZERO,
        };
        debug!("arcade session active");
        out.push(SessionEvent::CountdownFinished);
    }

    fn advance_active(
        &mut self,
        time_remaining: Duration,
        elapsed: Duration,
        dt: Duration,
        out: &mut Vec<SessionEvent>,
    ) {
        let time_remaining = time_remaining.saturating_sub(dt);
        let elapsed = elapsed.saturating_add(dt);

        if let Some(combo) = self.combo.advance(dt) {
            out.push(SessionEvent::ComboExpired { combo });
        }

        if !time_remaining.is_zero() {
            self.phase = Phase::Active {
                time_remaining,
                elapsed,
            };
            return;
        }

        let snapshot = ArcadeSnapshot::capture(
            self.total_eliminations,
            self.combo.highest_combo(),
            self.powerups_collected,
            elapsed,
            self.queue.len(),
        );
        debug!(
            "arcade session ended with {} eliminations queued",
            snapshot.queue_size
        );
        self.phase = Phase::Ended {
            snapshot: snapshot.clone(),
        };
        out.push(SessionEvent::SessionEnded { snapshot });
    }

    fn reset_counters(&mut self) {
        self.combo.reset();
        self.queue.reset();
        self.total_eliminations = 0;
        self.powerups_collected = 0;
    }
}
