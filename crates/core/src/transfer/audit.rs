//! Durable record of every settled attempt.

use crate::ports::{StorageResult, TransferStore};

use super::types::{SettledTransfer, Transfer};

/// Writes settled transfers outside any unit of work.
pub struct AuditRecorder<'a> {
    transfers: &'a dyn TransferStore,
}

impl<'a> AuditRecorder<'a> {
    /// Records into `transfers`, which must auto-commit.
    #[must_use]
    pub fn new(transfers: &'a dyn TransferStore) -> Self {
        Self { transfers }
    }

    /// Persists `settled` in one standalone write.
    pub async fn record(&self, settled: &SettledTransfer) -> StorageResult<Transfer> {
        self.transfers.add(settled).await
    }
}
