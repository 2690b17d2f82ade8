//! Quarantine client that reports batches through the log instead of a network call.

use log::info;
use quarantine_arcade_core::{BatchReceipt, EliminationRecord, QuarantineClient, QuarantineError};

/// Accepts every batch and logs each identity it would have quarantined.
#[derive(Debug, Default)]
pub(crate) struct DryRunQuarantineClient {
    batches: usize,
}

impl QuarantineClient for DryRunQuarantineClient {
    fn submit_batch(
        &mut self,
        records: &[EliminationRecord],
    ) -> Result<BatchReceipt, QuarantineError> {
        self.batches += 1;
        for record in records {
            let identity = record.identity();
            info!(
                "[dry run batch {}] quarantine #{} {} ({}) owned by {}",
                self.batches,
                record.sequence(),
                identity.display_name(),
                identity.id().as_str(),
                identity.account().as_str()
            );
        }

        Ok(BatchReceipt {
            accepted: records.len(),
            rejected: Vec::new(),
        })
    }
}
