#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Insertion-ordered queue of eliminations deferred until settlement.

use log::debug;
use quarantine_arcade_core::{EliminationRecord, Identity};

/// Deferred elimination records plus the running enqueue counter.
#[derive(Debug, Default)]
pub struct EliminationQueue {
    records: Vec<EliminationRecord>,
    next_sequence: u64,
}

impl EliminationQueue {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record for the identity to the tail of the queue.
    pub fn enqueue(&mut self, identity: Identity) {
        let record = EliminationRecord::new(identity, self.next_sequence);
        self.next_sequence += 1;
        self.records.push(record);
    }

    /// Number of records awaiting settlement.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Reports whether no records are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in enqueue order without removing them.
    #[must_use]
    pub fn records(&self) -> &[EliminationRecord] {
        &self.records
    }

    /// Removes and returns every pending record in enqueue order.
    ///
    /// A second call without intervening enqueues returns an empty batch.
    #[must_use]
    pub fn drain(&mut self) -> Vec<EliminationRecord> {
        let drained = std::mem::take(&mut self.records);
        debug!("drained {} queued eliminations", drained.len());
        drained
    }

    /// Discards every pending record.
    pub fn clear(&mut self) {
        debug!("discarding {} queued eliminations", self.records.len());
        self.records.clear();
    }

    /// Discards pending records and restarts enqueue numbering.
    pub fn reset(&mut self) {
        self.records.clear();
        self.next_sequence = 0;
    }
}
