//! Negotiation coordinator
//!
//! Before a round is finalized, negotiation-capable agents get a bounded
//! number of passes to revise their bids against the current competitor bid
//! set.
//!
//! # Sequencing
//!
//! Within a pass, agents are visited in their fixed construction order and
//! each revision overwrites the bid map **immediately**, so later agents in
//! the same pass already see earlier agents' counter-bids
//! (sequential-and-visible, not simultaneous). Non-negotiating agents keep
//! their original bid across all passes.
//!
//! The pass count is an explicit configuration constant, independent of the
//! simulation's round count.

use crate::agents::BiddingAgent;
use crate::models::CompetitorBids;
use crate::oracle::{AdvisoryOracle, BidQuery};
use std::cmp::Ordering;

/// Default number of negotiation passes per round
pub const DEFAULT_NEGOTIATION_PASSES: usize = 3;

/// Runs the bounded negotiation sub-protocol for one round
#[derive(Debug, Clone)]
pub struct NegotiationCoordinator {
    passes: usize,
}

impl NegotiationCoordinator {
    /// Create a coordinator running `passes` sweeps per round
    pub fn new(passes: usize) -> Self {
        Self { passes }
    }

    /// Configured number of passes
    pub fn passes(&self) -> usize {
        self.passes
    }

    /// Run the configured negotiation passes over the bid map
    ///
    /// Only agents reporting [`can_negotiate`](BiddingAgent::can_negotiate)
    /// are asked to revise; their map entry is replaced before the next
    /// agent's turn in the same pass. When an oracle is present, each
    /// revision is offered its suggestion; a failed suggestion degrades that
    /// single revision to the baseline strategy.
    pub fn negotiate_bids(
        &self,
        agents: &mut [Box<dyn BiddingAgent>],
        bids: &mut CompetitorBids,
        market_threshold: f64,
        rounds_remaining: usize,
        oracle: Option<&dyn AdvisoryOracle>,
    ) {
        for _ in 0..self.passes {
            for agent in agents.iter_mut() {
                if !agent.can_negotiate() {
                    continue;
                }

                let advisory = oracle.and_then(|o| {
                    let query = BidQuery {
                        agent: agent.name().to_string(),
                        market_threshold,
                        rounds_remaining,
                    };
                    match o.suggest_bid(&query) {
                        Ok(suggestion) => Some(suggestion),
                        Err(err) => {
                            log::debug!(
                                "advisory suggestion unavailable for {}: {}",
                                agent.name(),
                                err
                            );
                            None
                        }
                    }
                });

                let counter = agent.negotiate(bids, market_threshold, advisory);
                bids.insert(agent.name().to_string(), counter);
            }
        }
    }
}

impl Default for NegotiationCoordinator {
    fn default() -> Self {
        Self::new(DEFAULT_NEGOTIATION_PASSES)
    }
}

/// Order the final bid map ascending by bid value
///
/// Ties on the bid value are broken by ascending agent name so the ordering
/// is total and reproducible even for exactly equal floating-point bids.
pub fn finalize_bids(bids: &CompetitorBids) -> Vec<(String, f64)> {
    let mut ordered: Vec<(String, f64)> = bids.iter().map(|(n, b)| (n.clone(), *b)).collect();
    ordered.sort_by(|a, b| {
        a.1.partial_cmp(&b.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    ordered
}
