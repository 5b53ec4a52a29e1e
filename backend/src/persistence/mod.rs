//! Bid history persistence
//!
//! The engine hands each finished round's records to a [`BidStore`] and never
//! looks back; consumers (dashboards, analysis scripts) read the full table
//! through [`BidStore::load_all`]. The canonical backing format is a CSV
//! table with the stable header `{Round, Agent, Bid, Winning_Bid}`.
//!
//! A store failure is a per-round event: the engine logs it and carries on,
//! so a run always completes even if some rounds did not persist. Callers can
//! detect the gap by comparing the run's round count against the stored row
//! count.

mod csv_store;
mod memory;

pub use csv_store::CsvBidStore;
pub use memory::MemoryBidStore;

use crate::models::RoundRecord;
use thiserror::Error;

/// Errors from the persistence collaborator
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Append-only round-record storage
pub trait BidStore {
    /// Append one round's records
    ///
    /// The first write creates the table (including its header, for columnar
    /// backends); subsequent writes append rows only. Prior rounds are never
    /// re-read or rewritten.
    fn append_round(&mut self, records: &[RoundRecord]) -> Result<(), PersistenceError>;

    /// Load every stored record in write order
    ///
    /// Querying before any round has been written returns an empty vector,
    /// not an error.
    fn load_all(&self) -> Result<Vec<RoundRecord>, PersistenceError>;
}
