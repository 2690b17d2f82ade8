#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Host-side glue that turns a settled session into external side effects.
//!
//! The session and settlement systems stay pure. This adapter owns the two
//! collaborators they must never touch: the quarantine client that receives
//! the committed batch and the high-score store consulted at session end.
//! Both are injected handles rather than ambient state.

mod scores;

use std::time::Duration;

use log::{info, warn};
use quarantine_arcade_core::{
    ArcadeSnapshot, BatchReceipt, EliminationRecord, HighScoreEntry, HighScoreStore,
    HostRunState, HudSnapshot, Identity, QuarantineClient, QuarantineError, SessionEvent,
    SettlementAction,
};
use quarantine_arcade_system_session::{ArcadeSession, Config};
use quarantine_arcade_system_settlement::Settlement;

pub use scores::{InMemoryHighScores, HISTORY_CAPACITY};

/// Result of a settlement confirm as seen by the host.
#[derive(Clone, Debug, PartialEq)]
pub enum SettlementOutcome {
    /// No settlement is open or nothing was selected yet.
    Pending,
    /// The batch was submitted and the service answered.
    Quarantined {
        /// Per-batch answer from the service.
        receipt: BatchReceipt,
    },
    /// The submission failed. The drained records are handed back so the
    /// caller can decide whether to retry; the session no longer holds them.
    QuarantineFailed {
        /// Records that were drained for the failed submission.
        records: Vec<EliminationRecord>,
        /// Failure reported by the service client.
        error: QuarantineError,
    },
    /// The batch was dropped without side effects.
    Discarded {
        /// Number of records that were dropped.
        count: usize,
    },
    /// A new session countdown started.
    Replaying,
    /// The player left the arcade.
    ExitedToLobby,
}

/// Drives an arcade session and settles it against injected collaborators.
#[derive(Debug)]
pub struct ArcadeHost<Q, S> {
    session: ArcadeSession,
    settlement: Option<Settlement>,
    quarantine: Q,
    scores: S,
    events: Vec<SessionEvent>,
}

impl<Q, S> ArcadeHost<Q, S>
where
    Q: QuarantineClient,
    S: HighScoreStore,
{
    /// Creates an idle host around the provided collaborators.
    #[must_use]
    pub fn new(config: Config, quarantine: Q, scores: S) -> Self {
        Self {
            session: ArcadeSession::new(config),
            settlement: None,
            quarantine,
            scores,
            events: Vec::new(),
        }
    }

    /// Starts a fresh session countdown, dropping any open settlement.
    pub fn start(&mut self) {
        self.settlement = None;
        self.session.start_session();
    }

    /// Abandons the current session or settlement and returns to idle.
    pub fn cancel(&mut self) {
        self.settlement = None;
        self.session.cancel_session();
    }

    /// Advances the session by one host tick.
    ///
    /// Returns the events emitted during the tick. When the session ends the
    /// high-score store is consulted and the settlement menu opens.
    pub fn tick(&mut self, dt: Duration, run_state: HostRunState) -> &[SessionEvent] {
        self.events.clear();
        self.session
            .advance(dt, run_state.is_interactive(), &mut self.events);

        let ended = self.events.iter().find_map(|event| match event {
            SessionEvent::SessionEnded { snapshot } => Some(snapshot.clone()),
            _ => None,
        });
        if let Some(snapshot) = ended {
            self.open_settlement(snapshot);
        }

        &self.events
    }

    /// Forwards an in-game elimination to the session.
    pub fn record_elimination(&mut self, identity: Identity) {
        self.session.record_elimination(identity);
    }

    /// Forwards a collected powerup to the session.
    pub fn record_powerup(&mut self) {
        self.session.record_powerup();
    }

    /// Moves the settlement selection when a menu is open.
    pub fn navigate(&mut self, direction: i32) {
        if let Some(settlement) = self.settlement.as_mut() {
            settlement.navigate(direction);
        }
    }

    /// Confirms the highlighted settlement option and carries it out.
    pub fn confirm(&mut self) -> SettlementOutcome {
        let action = match self.settlement.as_mut() {
            Some(settlement) => settlement.confirm(),
            None => return SettlementOutcome::Pending,
        };

        match action {
            SettlementAction::None => SettlementOutcome::Pending,
            SettlementAction::QuarantineAll => {
                self.settlement = None;
                let outcome = self.submit_batch();
                self.session.cancel_session();
                outcome
            }
            SettlementAction::DiscardQueue => {
                self.settlement = None;
                let count = self.session.pending().len();
                self.session.clear_queue();
                self.session.cancel_session();
                info!("discarded {count} queued eliminations");
                SettlementOutcome::Discarded { count }
            }
            SettlementAction::Replay => {
                self.start();
                SettlementOutcome::Replaying
            }
            SettlementAction::ExitToLobby => {
                self.cancel();
                SettlementOutcome::ExitedToLobby
            }
        }
    }

    /// Session controller driven by the host.
    #[must_use]
    pub fn session(&self) -> &ArcadeSession {
        &self.session
    }

    /// Open settlement, if the session has ended and not been settled.
    #[must_use]
    pub fn settlement(&self) -> Option<&Settlement> {
        self.settlement.as_ref()
    }

    /// HUD projection of the live session.
    #[must_use]
    pub fn hud(&self) -> Option<HudSnapshot> {
        self.session.snapshot_for_rendering()
    }

    /// Injected quarantine client.
    #[must_use]
    pub fn quarantine(&self) -> &Q {
        &self.quarantine
    }

    /// Injected high-score store.
    #[must_use]
    pub fn scores(&self) -> &S {
        &self.scores
    }

    fn open_settlement(&mut self, snapshot: ArcadeSnapshot) {
        let entry = HighScoreEntry::from(&snapshot);
        let is_new_high_score = self.scores.is_new_high_score(&entry);
        if let Err(error) = self.scores.record(entry) {
            warn!("failed to record session statistics: {error}");
        }

        info!(
            "session ended: {} eliminations, best combo {}, {} queued{}",
            snapshot.total_eliminations,
            snapshot.highest_combo,
            snapshot.queue_size,
            if is_new_high_score {
                ", new high score"
            } else {
                ""
            }
        );
        self.settlement = Some(Settlement::new(snapshot, is_new_high_score));
    }

    fn submit_batch(&mut self) -> SettlementOutcome {
        let records = self.session.drain_queue();
        info!("submitting {} identities for quarantine", records.len());

        match self.quarantine.submit_batch(&records) {
            Ok(receipt) => {
                info!(
                    "quarantine accepted {} identities, rejected {}",
                    receipt.accepted,
                    receipt.rejected.len()
                );
                SettlementOutcome::Quarantined { receipt }
            }
            Err(error) => {
                warn!("quarantine submission failed: {error}");
                SettlementOutcome::QuarantineFailed { records, error }
            }
        }
    }
}
