#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the quarantine arcade engine.
//!
//! This crate defines the value types that flow between the host, the pure
//! session systems, and the settlement step. The host drives the session
//! controller once per tick, the controller reports what happened through
//! [`SessionEvent`] values, and the final [`ArcadeSnapshot`] is handed by value
//! to the settlement controller. External side effects are expressed only as
//! the [`QuarantineClient`] and [`HighScoreStore`] collaborator traits, which
//! the host injects; nothing in the systems crates calls them.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Length of the pre-roll countdown that precedes every session.
pub const COUNTDOWN_DURATION: Duration = Duration::from_secs(3);

/// Length of the active, timed portion of a session.
pub const SESSION_DURATION: Duration = Duration::from_secs(60);

/// Grace period after an elimination during which another one keeps the combo alive.
pub const COMBO_WINDOW: Duration = Duration::from_secs(3);

/// Combo length at which the boosted multiplier applies.
pub const COMBO_MULTIPLIER_THRESHOLD: u32 = 5;

/// Multiplier reported while the combo is below the threshold.
pub const BASE_MULTIPLIER: f32 = 1.0;

/// Multiplier reported once the combo reaches the threshold.
pub const COMBO_MULTIPLIER: f32 = 1.5;

/// Lower bound applied to elapsed active time when computing rates.
pub const MIN_ELAPSED_ACTIVE: Duration = Duration::from_millis(1);

/// Returns the multiplier associated with the provided combo length.
#[must_use]
pub const fn multiplier_for(combo_count: u32) -> f32 {
    if combo_count >= COMBO_MULTIPLIER_THRESHOLD {
        COMBO_MULTIPLIER
    } else {
        BASE_MULTIPLIER
    }
}

/// Opaque identifier of a real identity known to the quarantine service.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IdentityId(String);

impl IdentityId {
    /// Wraps the provided opaque identifier.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrowed view of the identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Identifier of the account that owns an identity.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AccountId(String);

impl AccountId {
    /// Wraps the provided account identifier.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrowed view of the identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Identity referenced by an in-game entity the player can eliminate.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity {
    id: IdentityId,
    display_name: String,
    account: AccountId,
}

impl Identity {
    /// Creates a new identity reference.
    #[must_use]
    pub fn new(id: IdentityId, display_name: impl Into<String>, account: AccountId) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            account,
        }
    }

    /// Opaque identifier understood by the quarantine service.
    #[must_use]
    pub fn id(&self) -> &IdentityId {
        &self.id
    }

    /// Human readable name shown in the HUD and the results screen.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Account that owns the identity.
    #[must_use]
    pub fn account(&self) -> &AccountId {
        &self.account
    }
}

/// Deferred elimination awaiting settlement.
///
/// Records are immutable once created. The sequence number reflects the order
/// in which the elimination was enqueued during the session.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EliminationRecord {
    identity: Identity,
    sequence: u64,
}

impl EliminationRecord {
    /// Creates a record for the provided identity at the given enqueue position.
    #[must_use]
    pub fn new(identity: Identity, sequence: u64) -> Self {
        Self { identity, sequence }
    }

    /// Identity that was eliminated.
    #[must_use]
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Zero-based enqueue position within the session.
    #[must_use]
    pub const fn sequence(&self) -> u64 {
        self.sequence
    }
}

/// Decaying combo counter state.
///
/// `combo_count` is zero exactly when `window_remaining` is zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ComboState {
    /// Eliminations chained inside the current window.
    pub combo_count: u32,
    /// Time left before the current chain expires.
    pub window_remaining: Duration,
    /// Longest chain observed since the last reset.
    pub highest_combo: u32,
}

impl ComboState {
    /// Multiplier earned by the current chain.
    #[must_use]
    pub const fn multiplier(&self) -> f32 {
        multiplier_for(self.combo_count)
    }
}

/// Lifecycle phase of an arcade session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionPhase {
    /// No session is running; timers are stopped.
    #[default]
    Idle,
    /// Pre-roll countdown before eliminations count.
    Countdown,
    /// Timed play window during which eliminations are queued.
    Active,
    /// Timer expired; the queued batch awaits settlement.
    Ended,
}

/// Coarse run state reported by the host engine every tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HostRunState {
    /// Interactive simulation is advancing.
    Running,
    /// The player paused the game.
    Paused,
    /// A dialogue or cutscene holds the simulation.
    Dialogue,
}

impl HostRunState {
    /// Reports whether session time should advance in this state.
    #[must_use]
    pub const fn is_interactive(self) -> bool {
        matches!(self, Self::Running)
    }
}

/// Immutable statistics captured when a session ends.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArcadeSnapshot {
    /// Eliminations recorded during the active phase.
    pub total_eliminations: u32,
    /// Longest combo reached during the session.
    pub highest_combo: u32,
    /// Powerups collected during the active phase.
    pub powerups_collected: u32,
    /// Interactive time spent in the active phase.
    pub elapsed_active: Duration,
    /// Eliminations divided by elapsed active seconds.
    pub eliminations_per_second: f64,
    /// Records still pending commit when the snapshot was taken.
    pub queue_size: usize,
}

impl ArcadeSnapshot {
    /// Captures a snapshot, deriving the elimination rate from the elapsed time.
    ///
    /// Elapsed time is clamped to [`MIN_ELAPSED_ACTIVE`] for the rate so a
    /// session that ends without advancing never divides by zero.
    #[must_use]
    pub fn capture(
        total_eliminations: u32,
        highest_combo: u32,
        powerups_collected: u32,
        elapsed_active: Duration,
        queue_size: usize,
    ) -> Self {
        let seconds = elapsed_active.max(MIN_ELAPSED_ACTIVE).as_secs_f64();
        Self {
            total_eliminations,
            highest_combo,
            powerups_collected,
            elapsed_active,
            eliminations_per_second: f64::from(total_eliminations) / seconds,
            queue_size,
        }
    }
}

/// Per-tick projection of session state used by the HUD.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HudSnapshot {
    /// Phase the session currently occupies.
    pub phase: SessionPhase,
    /// Countdown time left; zero outside the countdown.
    pub countdown_remaining: Duration,
    /// Session time left.
    pub time_remaining: Duration,
    /// Interactive time spent in the active phase so far.
    pub elapsed_active: Duration,
    /// Eliminations recorded so far.
    pub total_eliminations: u32,
    /// Powerups collected so far.
    pub powerups_collected: u32,
    /// Current combo state.
    pub combo: ComboState,
    /// Multiplier earned by the current combo.
    pub multiplier: f32,
    /// Records pending commit.
    pub queue_size: usize,
}

/// Notifications emitted by the session controller while advancing.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionEvent {
    /// The countdown elapsed and the active phase began.
    CountdownFinished,
    /// A combo chain expired without a follow-up elimination.
    ComboExpired {
        /// Length of the chain that expired.
        combo: u32,
    },
    /// The session timer reached zero.
    SessionEnded {
        /// Statistics frozen at the moment the session ended.
        snapshot: ArcadeSnapshot,
    },
}

/// Decision reported by the settlement controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SettlementAction {
    /// Nothing was committed; the menu remains open.
    None,
    /// Submit every queued record to the quarantine service.
    QuarantineAll,
    /// Drop the queued records without side effects.
    DiscardQueue,
    /// Start another session.
    Replay,
    /// Leave the arcade and return to the lobby.
    ExitToLobby,
}

/// Aggregate statistics compared against the historical best.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HighScoreEntry {
    /// Eliminations recorded during the session.
    pub total_eliminations: u32,
    /// Longest combo reached during the session.
    pub highest_combo: u32,
    /// Interactive time spent in the active phase.
    pub elapsed_active: Duration,
}

impl From<&ArcadeSnapshot> for HighScoreEntry {
    fn from(snapshot: &ArcadeSnapshot) -> Self {
        Self {
            total_eliminations: snapshot.total_eliminations,
            highest_combo: snapshot.highest_combo,
            elapsed_active: snapshot.elapsed_active,
        }
    }
}

/// Historical statistics used to detect new high scores.
pub trait HighScoreStore {
    /// Reports whether the entry beats every previously recorded session.
    fn is_new_high_score(&self, entry: &HighScoreEntry) -> bool;

    /// Persists the entry. Callers treat failures as best effort.
    fn record(&mut self, entry: HighScoreEntry) -> Result<(), StoreError>;
}

/// Failures surfaced by a [`HighScoreStore`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The backing store could not be reached.
    #[error("high score store unavailable: {0}")]
    Unavailable(String),
    /// Stored data could not be interpreted.
    #[error("high score store is corrupt: {0}")]
    Corrupt(String),
}

/// Outcome of a successful batch submission.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchReceipt {
    /// Number of identities the service accepted.
    pub accepted: usize,
    /// Identities the service declined individually.
    pub rejected: Vec<IdentityId>,
}

/// Client for the external, rate-sensitive quarantine endpoint.
pub trait QuarantineClient {
    /// Submits the records as a single batch.
    fn submit_batch(
        &mut self,
        records: &[EliminationRecord],
    ) -> Result<BatchReceipt, QuarantineError>;
}

/// Failures surfaced by a [`QuarantineClient`] for an entire batch.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum QuarantineError {
    /// The service could not be reached.
    #[error("quarantine service unavailable: {0}")]
    Unavailable(String),
    /// The service asked the caller to slow down.
    #[error("quarantine service rate limited the batch; retry after {retry_after:?}")]
    RateLimited {
        /// Minimum delay before another attempt.
        retry_after: Duration,
    },
    /// The service refused the batch as a whole.
    #[error("quarantine batch rejected: {0}")]
    Rejected(String),
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{
        multiplier_for, AccountId, ArcadeSnapshot, EliminationRecord, HighScoreEntry,
        HostRunState, Identity, IdentityId, QuarantineError,
    };
    use serde::{de::DeserializeOwned, Serialize};

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn multiplier_switches_at_threshold() {
        assert!((multiplier_for(4) - 1.0).abs() < f32::EPSILON);
        assert!((multiplier_for(5) - 1.5).abs() < f32::EPSILON);
    }

    #[test]
    fn snapshot_rate_uses_elapsed_seconds() {
        let snapshot = ArcadeSnapshot::capture(30, 4, 1, Duration::from_secs(60), 30);
        assert!((snapshot.eliminations_per_second - 0.5).abs() < 1e-9);
    }

    #[test]
    fn snapshot_rate_clamps_zero_elapsed() {
        let snapshot = ArcadeSnapshot::capture(2, 2, 0, Duration::ZERO, 2);
        assert!(snapshot.eliminations_per_second.is_finite());
        assert!((snapshot.eliminations_per_second - 2_000.0).abs() < 1e-6);
    }

    #[test]
    fn snapshot_round_trips_through_bincode() {
        let snapshot = ArcadeSnapshot::capture(7, 5, 2, Duration::from_millis(42_500), 7);
        assert_round_trip(&snapshot);
    }

    #[test]
    fn elimination_record_round_trips_through_bincode() {
        let identity = Identity::new(
            IdentityId::new("id-17"),
            "Mallory",
            AccountId::new("acct-3"),
        );
        assert_round_trip(&EliminationRecord::new(identity, 4));
    }

    #[test]
    fn only_running_is_interactive() {
        assert!(HostRunState::Running.is_interactive());
        assert!(!HostRunState::Paused.is_interactive());
        assert!(!HostRunState::Dialogue.is_interactive());
    }

    #[test]
    fn high_score_entry_copies_snapshot_fields() {
        let snapshot = ArcadeSnapshot::capture(9, 6, 0, Duration::from_secs(60), 9);
        let entry = HighScoreEntry::from(&snapshot);
        assert_eq!(entry.total_eliminations, 9);
        assert_eq!(entry.highest_combo, 6);
        assert_eq!(entry.elapsed_active, Duration::from_secs(60));
    }

    #[test]
    fn rate_limit_error_mentions_delay() {
        let error = QuarantineError::RateLimited {
            retry_after: Duration::from_secs(5),
        };
        assert!(error.to_string().contains("5s"));
    }
}
