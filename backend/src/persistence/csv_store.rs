//! CSV-backed bid store

use super::{BidStore, PersistenceError};
use crate::models::RoundRecord;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

/// Rounding scale keeping 4 decimal places for bid values on disk
const BID_ROUND_SCALE: f64 = 10_000.0;

/// Bid store writing the `{Round, Agent, Bid, Winning_Bid}` CSV table
///
/// The header row is written exactly once, when the file is created (or is
/// still empty); every later append adds data rows only. Parent directories
/// are created on first write. Bids are rounded to 4 decimal places on the
/// way out so the table stays readable.
///
/// # Example
/// ```no_run
/// use auction_simulator_core_rs::persistence::{BidStore, CsvBidStore};
///
/// let store = CsvBidStore::new("data/bid_history.csv");
/// let records = store.load_all().unwrap();
/// assert!(records.is_empty()); // nothing written yet
/// ```
#[derive(Debug, Clone)]
pub struct CsvBidStore {
    path: PathBuf,
}

impl CsvBidStore {
    /// Create a store backed by the file at `path`
    ///
    /// The file itself is only created on the first append.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn has_data(&self) -> bool {
        fs::metadata(&self.path)
            .map(|meta| meta.len() > 0)
            .unwrap_or(false)
    }
}

impl BidStore for CsvBidStore {
    fn append_round(&mut self, records: &[RoundRecord]) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let write_header = !self.has_data();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(write_header)
            .from_writer(file);

        for record in records {
            let mut row = record.clone();
            row.bid = (row.bid * BID_ROUND_SCALE).round() / BID_ROUND_SCALE;
            writer.serialize(row)?;
        }

        writer.flush()?;
        Ok(())
    }

    fn load_all(&self) -> Result<Vec<RoundRecord>, PersistenceError> {
        if !self.has_data() {
            return Ok(Vec::new());
        }

        let mut reader = csv::Reader::from_path(&self.path)?;
        let mut records = Vec::new();
        for result in reader.deserialize() {
            records.push(result?);
        }
        Ok(records)
    }
}
