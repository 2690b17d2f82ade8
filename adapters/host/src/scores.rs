//! Process-local historical statistics.

use quarantine_arcade_core::{HighScoreEntry, HighScoreStore, StoreError};

/// Number of recent entries kept by [`InMemoryHighScores::history`].
pub const HISTORY_CAPACITY: usize = 32;

/// High-score store kept in memory for the lifetime of the host.
///
/// Sessions are ranked by total eliminations with the highest combo breaking
/// ties. A session without eliminations never counts as a high score. Only the
/// last [`HISTORY_CAPACITY`] entries are retained; the best entry is kept
/// regardless of age.
#[derive(Clone, Debug, Default)]
pub struct InMemoryHighScores {
    best: Option<HighScoreEntry>,
    history: Vec<HighScoreEntry>,
}

impl InMemoryHighScores {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with a previous best.
    #[must_use]
    pub fn with_best(entry: HighScoreEntry) -> Self {
        Self {
            best: Some(entry),
            history: Vec::new(),
        }
    }

    /// Best entry recorded so far.
    #[must_use]
    pub fn best(&self) -> Option<&HighScoreEntry> {
        self.best.as_ref()
    }

    /// Most recent entries recorded through this store, oldest first.
    #[must_use]
    pub fn history(&self) -> &[HighScoreEntry] {
        &self.history
    }

    fn beats_best(&self, entry: &HighScoreEntry) -> bool {
        if entry.total_eliminations == 0 {
            return false;
        }
        self.best.map_or(true, |best| rank(entry) > rank(&best))
    }
}

fn rank(entry: &HighScoreEntry) -> (u32, u32) {
    (entry.total_eliminations, entry.highest_combo)
}

impl HighScoreStore for InMemoryHighScores {
    fn is_new_high_score(&self, entry: &HighScoreEntry) -> bool {
        self.beats_best(entry)
    }

    fn record(&mut self, entry: HighScoreEntry) -> Result<(), StoreError> {
        if self.beats_best(&entry) {
            self.best = Some(entry);
        }
        if self.history.len() == HISTORY_CAPACITY {
            let _ = self.history.remove(0);
        }
        self.history.push(entry);
        Ok(())
    }
}
