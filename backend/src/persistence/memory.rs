//! In-memory bid store
//!
//! Keeps the full record table in a Vec. Used by tests and by library
//! consumers that want the persistence contract without disk I/O.

use super::{BidStore, PersistenceError};
use crate::models::RoundRecord;

/// Bid store holding all records in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryBidStore {
    records: Vec<RoundRecord>,
}

impl MemoryBidStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// All stored records in write order
    pub fn records(&self) -> &[RoundRecord] {
        &self.records
    }
}

impl BidStore for MemoryBidStore {
    fn append_round(&mut self, records: &[RoundRecord]) -> Result<(), PersistenceError> {
        self.records.extend_from_slice(records);
        Ok(())
    }

    fn load_all(&self) -> Result<Vec<RoundRecord>, PersistenceError> {
        Ok(self.records.clone())
    }
}
