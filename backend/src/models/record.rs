//! Round records and bid history
//!
//! One [`RoundRecord`] is produced per (round, agent) pair. The ordered
//! sequence of records across a run is the [`BidHistory`].
//!
//! # Critical Invariants
//!
//! 1. **Append-only**: records are never deleted or reordered once pushed
//! 2. **Winner marking**: within a round, exactly the records whose bid
//!    equals the round's minimum bid carry `winning_bid = true` (ties all win)
//! 3. **Completeness**: after R rounds with A agents the history holds
//!    exactly R × A records

use serde::{Deserialize, Serialize};

/// One persisted row: a single agent's final bid in a single round
///
/// Field names are serialized to match the stable on-disk schema
/// `{Round, Agent, Bid, Winning_Bid}` consumed by the dashboard.
///
/// # Example
/// ```
/// use auction_simulator_core_rs::RoundRecord;
///
/// let record = RoundRecord {
///     round: 1,
///     agent: "Agent 1".to_string(),
///     bid: 95.0,
///     winning_bid: true,
/// };
/// assert!(record.bid > 0.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// Auction round number (1-based)
    #[serde(rename = "Round")]
    pub round: usize,

    /// Agent name, stable for the run
    #[serde(rename = "Agent")]
    pub agent: String,

    /// Final (post-negotiation) bid value, non-negative
    #[serde(rename = "Bid")]
    pub bid: f64,

    /// Whether this bid equals the round's minimum bid
    #[serde(rename = "Winning_Bid")]
    pub winning_bid: bool,
}

/// Append-only sequence of all round records for a run
///
/// Read by the threshold adjuster (full flattened bid sample) and by the
/// summary reporting at the end of the run. Persistence receives only the
/// latest round's batch; this in-memory history is authoritative for the
/// run itself.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BidHistory {
    records: Vec<RoundRecord>,
}

impl BidHistory {
    /// Create an empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one round's records
    ///
    /// Records are appended in the order given; nothing is re-read or
    /// rewritten.
    pub fn push_round(&mut self, records: &[RoundRecord]) {
        self.records.extend_from_slice(records);
    }

    /// All records in insertion order
    pub fn records(&self) -> &[RoundRecord] {
        &self.records
    }

    /// Number of records (rounds × agents so far)
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether any round has been recorded
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Every bid value from every recorded round, in insertion order
    ///
    /// This is the sample the threshold adjuster averages over.
    pub fn all_bids(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.bid).collect()
    }

    /// Highest round number recorded so far (0 when empty)
    pub fn rounds_recorded(&self) -> usize {
        self.records.iter().map(|r| r.round).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(round: usize, agent: &str, bid: f64, winning: bool) -> RoundRecord {
        RoundRecord {
            round,
            agent: agent.to_string(),
            bid,
            winning_bid: winning,
        }
    }

    #[test]
    fn test_history_is_append_only_and_ordered() {
        let mut history = BidHistory::new();
        assert!(history.is_empty());

        history.push_round(&[record(1, "A", 95.0, true), record(1, "B", 98.0, false)]);
        history.push_round(&[record(2, "A", 96.0, false), record(2, "B", 94.0, true)]);

        assert_eq!(history.len(), 4);
        assert_eq!(history.rounds_recorded(), 2);
        assert_eq!(history.all_bids(), vec![95.0, 98.0, 96.0, 94.0]);
        assert_eq!(history.records()[0].agent, "A");
    }
}
