//! Bidding agents
//!
//! This module defines the agent interface for the auction simulation.
//!
//! # Overview
//!
//! Each agent produces one sealed bid per round from the pair
//! (market threshold, rounds remaining), then receives a reward signal once
//! the round's winner is known. Agents balance exploration (a randomized bid
//! inside a market-relative band) against exploitation (the value produced by
//! their learned policy), with exploration decaying geometrically after every
//! reward update.
//!
//! # Agent Interface
//!
//! All agents implement the `BiddingAgent` trait:
//! ```rust
//! use auction_simulator_core_rs::agents::BiddingAgent;
//! use auction_simulator_core_rs::RngManager;
//!
//! struct AlwaysHundred;
//!
//! impl BiddingAgent for AlwaysHundred {
//!     fn name(&self) -> &str {
//!         "Agent 100"
//!     }
//!
//!     fn generate_bid(&mut self, _threshold: f64, _remaining: usize, _rng: &mut RngManager) -> f64 {
//!         100.0
//!     }
//!
//!     fn update_reward(&mut self, _reward: f64) {}
//!
//!     fn accumulated_reward(&self) -> f64 {
//!         0.0
//!     }
//!
//!     fn predict(&self, _threshold: f64, _remaining: usize) -> f64 {
//!         100.0
//!     }
//! }
//! ```
//!
//! Available agents:
//! 1. **LearningAgent**: online-trained linear value model with decaying
//!    exploration (baseline learner)
//! 2. **NegotiatingAgent**: a LearningAgent that additionally revises its bid
//!    against the competitor bid set during negotiation passes
//! 3. **FixedBidAgent**: deterministic constant bidder
//!
//! NOTE: FixedBidAgent is available in all builds to support integration
//! testing and baseline comparisons, but carries no learning behavior.

mod fixed;
mod learning;
mod negotiating;

pub use fixed::FixedBidAgent;
pub use learning::LearningAgent;
pub use negotiating::NegotiatingAgent;

use crate::models::CompetitorBids;
use crate::rng::RngManager;

/// Smallest bid any agent may submit.
///
/// Bids are clamped here whenever an internal computation would otherwise
/// yield a non-positive value.
pub const MIN_BID: f64 = 1.0;

/// Learning hyperparameters shared by the learned-policy agents
#[derive(Debug, Clone)]
pub struct LearningParams {
    /// Gradient step size for the online policy update
    pub learning_rate: f64,
    /// Initial probability of bidding randomly instead of via the policy
    pub exploration_rate: f64,
    /// Geometric decay applied to the exploration rate after every reward,
    /// in (0, 1]
    pub exploration_decay: f64,
}

impl Default for LearningParams {
    fn default() -> Self {
        Self {
            learning_rate: 0.01,
            exploration_rate: 0.5,
            exploration_decay: 0.99,
        }
    }
}

/// A participant in the repeated sealed-bid auction
///
/// Implementations own their policy state; the simulation engine owns the
/// agents for the lifetime of one run and is the only caller of these
/// methods. Agents are processed in a fixed order each round.
pub trait BiddingAgent {
    /// Unique agent name, stable for the run
    fn name(&self) -> &str;

    /// Produce a sealed bid for the current round
    ///
    /// # Arguments
    /// * `market_threshold` - Current reference price level (> 0)
    /// * `rounds_remaining` - Rounds left after this one
    /// * `rng` - Seeded generator for the exploration draw
    ///
    /// # Guarantee
    /// The returned bid is strictly positive (clamped to [`MIN_BID`]).
    fn generate_bid(
        &mut self,
        market_threshold: f64,
        rounds_remaining: usize,
        rng: &mut RngManager,
    ) -> f64;

    /// Receive the round's reward and perform one online policy update
    ///
    /// Accumulates `reward` into the running total, trains the policy toward
    /// the reward for the state the agent most recently acted on, and applies
    /// the exploration decay. Must never fail for any finite reward.
    fn update_reward(&mut self, reward: f64);

    /// Total reward accumulated so far in this run
    fn accumulated_reward(&self) -> f64;

    /// The policy's bid for a given state, without exploration
    ///
    /// Used for the exploitation path and for end-of-run reporting.
    fn predict(&self, market_threshold: f64, rounds_remaining: usize) -> f64;

    /// Whether this agent takes part in negotiation passes
    fn can_negotiate(&self) -> bool {
        false
    }

    /// Revise this agent's bid against the current competitor bid set
    ///
    /// Only invoked for agents whose [`can_negotiate`](Self::can_negotiate)
    /// returns true; `competitor_bids` is non-empty and includes this agent's
    /// own current bid. `advisory` carries an external suggestion when one is
    /// available; absence degrades to the baseline strategy.
    ///
    /// The default implementation keeps the agent's current bid unchanged.
    fn negotiate(
        &mut self,
        competitor_bids: &CompetitorBids,
        market_threshold: f64,
        advisory: Option<f64>,
    ) -> f64 {
        let _ = market_threshold;
        let _ = advisory;
        competitor_bids.get(self.name()).copied().unwrap_or(MIN_BID)
    }
}
