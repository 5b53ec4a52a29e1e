//! Negotiation-capable bidding agent

use super::{BiddingAgent, LearningAgent, LearningParams, MIN_BID};
use crate::models::CompetitorBids;
use crate::rng::RngManager;

/// Amount shaved off the minimum competitor bid when undercutting
const UNDERCUT_STEP: f64 = 1.0;

/// A learning agent that also revises its bid during negotiation passes
///
/// Bidding and reward behavior are exactly those of [`LearningAgent`]; the
/// negotiation step undercuts the current minimum competitor bid by
/// [`UNDERCUT_STEP`], clamped to [`MIN_BID`], and averages that baseline with
/// an external advisory bid when one is supplied.
///
/// # Example
/// ```
/// use auction_simulator_core_rs::agents::{BiddingAgent, LearningParams, NegotiatingAgent};
/// use std::collections::HashMap;
///
/// let mut agent = NegotiatingAgent::new("Agent 1".to_string(), LearningParams::default());
/// let bids: HashMap<String, f64> =
///     [("Agent 1".to_string(), 98.0), ("Agent 2".to_string(), 95.0)].into();
///
/// assert!(agent.can_negotiate());
/// assert_eq!(agent.negotiate(&bids, 100.0, None), 94.0);
/// ```
#[derive(Debug, Clone)]
pub struct NegotiatingAgent {
    inner: LearningAgent,
}

impl NegotiatingAgent {
    /// Create a new negotiation-capable agent
    pub fn new(name: String, params: LearningParams) -> Self {
        Self {
            inner: LearningAgent::new(name, params),
        }
    }

    /// Current exploration probability
    pub fn exploration_rate(&self) -> f64 {
        self.inner.exploration_rate()
    }
}

impl BiddingAgent for NegotiatingAgent {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn generate_bid(
        &mut self,
        market_threshold: f64,
        rounds_remaining: usize,
        rng: &mut RngManager,
    ) -> f64 {
        self.inner
            .generate_bid(market_threshold, rounds_remaining, rng)
    }

    fn update_reward(&mut self, reward: f64) {
        self.inner.update_reward(reward);
    }

    fn accumulated_reward(&self) -> f64 {
        self.inner.accumulated_reward()
    }

    fn predict(&self, market_threshold: f64, rounds_remaining: usize) -> f64 {
        self.inner.predict(market_threshold, rounds_remaining)
    }

    fn can_negotiate(&self) -> bool {
        true
    }

    fn negotiate(
        &mut self,
        competitor_bids: &CompetitorBids,
        _market_threshold: f64,
        advisory: Option<f64>,
    ) -> f64 {
        debug_assert!(!competitor_bids.is_empty(), "competitor bid map is empty");

        let min_competitor = competitor_bids
            .values()
            .copied()
            .fold(f64::INFINITY, f64::min);

        if !min_competitor.is_finite() {
            return MIN_BID;
        }

        let baseline = (min_competitor - UNDERCUT_STEP).max(MIN_BID);

        match advisory {
            Some(suggestion) => (baseline + suggestion) / 2.0,
            None => baseline,
        }
    }
}
