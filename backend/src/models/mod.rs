//! Domain types for the auction simulation

pub mod record;

use std::collections::HashMap;

pub use record::{BidHistory, RoundRecord};

/// Transient mapping from agent name to current bid value.
///
/// Rebuilt every round during bid collection, mutated in place during
/// negotiation passes, and consumed by winner determination. Never persisted
/// as its own entity.
pub type CompetitorBids = HashMap<String, f64>;
