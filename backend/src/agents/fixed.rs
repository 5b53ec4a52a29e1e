//! Fixed-bid agent
//!
//! Deterministic constant bidder with no exploration and no learning.
//! Useful as a baseline opponent and for exercising the engine with fully
//! predictable bids.

use super::{BiddingAgent, MIN_BID};
use crate::rng::RngManager;

/// Agent that bids the same value every round
#[derive(Debug, Clone)]
pub struct FixedBidAgent {
    name: String,
    bid: f64,
    accumulated_reward: f64,
}

impl FixedBidAgent {
    /// Create a fixed-bid agent
    ///
    /// The bid is clamped to [`MIN_BID`] at construction.
    pub fn new(name: String, bid: f64) -> Self {
        Self {
            name,
            bid: bid.max(MIN_BID),
            accumulated_reward: 0.0,
        }
    }
}

impl BiddingAgent for FixedBidAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn generate_bid(
        &mut self,
        _market_threshold: f64,
        _rounds_remaining: usize,
        _rng: &mut RngManager,
    ) -> f64 {
        self.bid
    }

    fn update_reward(&mut self, reward: f64) {
        self.accumulated_reward += reward;
    }

    fn accumulated_reward(&self) -> f64 {
        self.accumulated_reward
    }

    fn predict(&self, _market_threshold: f64, _rounds_remaining: usize) -> f64 {
        self.bid
    }
}
