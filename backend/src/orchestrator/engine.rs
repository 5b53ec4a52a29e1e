//! Simulation Engine
//!
//! Main round loop integrating all components:
//! - Bid collection (agents asked in fixed order)
//! - Negotiation passes (capable agents revise against the bid map)
//! - Winner determination (minimum final bid wins; ties all win)
//! - Reward dispatch (one update per agent per round, same fixed order)
//! - Threshold update (full historical bid sample)
//! - Record emission (one row per agent per round, appended to the store)
//!
//! # Architecture
//!
//! ```text
//! For each round r in 1..=R:
//! 1. Collect bids: generate_bid(threshold, R - r), optional advisory blend
//! 2. Negotiate: bounded passes over negotiation-capable agents
//! 3. Determine winners: all agents at the minimum final bid
//! 4. Dispatch rewards: +winner_reward / loser_penalty, update every agent
//! 5. Adjust threshold: mean of every bid so far, fluctuation, floor
//! 6. Emit records: append this round's rows to the bid store
//! ```
//!
//! # Determinism
//!
//! All randomness flows through the seeded [`RngManager`]; the same seed and
//! configuration reproduce the same bid history exactly (given deterministic
//! or absent advisory input).
//!
//! # Example
//!
//! ```rust
//! use auction_simulator_core_rs::orchestrator::{
//!     AgentConfig, Simulation, SimulationConfig, StrategyConfig,
//! };
//! use auction_simulator_core_rs::persistence::MemoryBidStore;
//!
//! let config = SimulationConfig {
//!     rounds: 5,
//!     agent_configs: vec![
//!         AgentConfig {
//!             name: "Agent 1".to_string(),
//!             strategy: StrategyConfig::Learning(Default::default()),
//!         },
//!         AgentConfig {
//!             name: "Agent 2".to_string(),
//!             strategy: StrategyConfig::Negotiating(Default::default()),
//!         },
//!     ],
//!     ..SimulationConfig::default()
//! };
//!
//! let mut simulation = Simulation::new(config, Box::new(MemoryBidStore::new()), None).unwrap();
//! let summary = simulation.run().unwrap();
//! assert_eq!(summary.rounds_completed, 5);
//! assert_eq!(simulation.history().len(), 10); // rounds × agents
//! ```

use crate::agents::{
    BiddingAgent, FixedBidAgent, LearningAgent, LearningParams, NegotiatingAgent,
};
use crate::core::rounds::RoundClock;
use crate::market::{ThresholdAdjuster, ThresholdConfig};
use crate::models::{BidHistory, CompetitorBids, RoundRecord};
use crate::negotiation::{finalize_bids, NegotiationCoordinator, DEFAULT_NEGOTIATION_PASSES};
use crate::oracle::{AdvisoryOracle, BidQuery};
use crate::persistence::BidStore;
use crate::rng::RngManager;
use std::collections::HashSet;
use thiserror::Error;

// ============================================================================
// Configuration Types
// ============================================================================

/// Complete simulation configuration
///
/// The `Default` carries the reference tuning (10 rounds, threshold 1000,
/// 3 negotiation passes, +10/-5 rewards) but no agents; every run must
/// supply its own `agent_configs`.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Number of auction rounds (≥ 1)
    pub rounds: usize,

    /// Market threshold in force for round 1 (> 0)
    pub initial_threshold: f64,

    /// RNG seed for deterministic simulation
    pub rng_seed: u64,

    /// Negotiation passes per round (≥ 1)
    pub negotiation_passes: usize,

    /// Reward magnitudes dispatched after winner determination
    pub rewards: RewardConfig,

    /// Threshold adjustment tuning (floor, triggers, factors, fluctuation)
    pub threshold: ThresholdConfig,

    /// Per-agent configuration, in bidding order
    pub agent_configs: Vec<AgentConfig>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            rounds: 10,
            initial_threshold: 1000.0,
            rng_seed: 12345,
            negotiation_passes: DEFAULT_NEGOTIATION_PASSES,
            rewards: RewardConfig::default(),
            threshold: ThresholdConfig::default(),
            agent_configs: Vec::new(),
        }
    }
}

/// Per-agent configuration
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Unique agent name (e.g., "Agent 1")
    pub name: String,

    /// Bidding strategy for this agent
    pub strategy: StrategyConfig,
}

/// Strategy selection for an agent
///
/// Negotiation capability is fixed here, at construction; the engine and the
/// coordinator dispatch on the built agent's capability, never on its
/// concrete type.
#[derive(Debug, Clone)]
pub enum StrategyConfig {
    /// Online-learning bidder (no negotiation)
    Learning(LearningParams),

    /// Online-learning bidder that also negotiates
    Negotiating(LearningParams),

    /// Constant bidder (baseline / testing)
    Fixed {
        /// The bid submitted every round
        bid: f64,
    },
}

/// Reward magnitudes per round outcome
#[derive(Debug, Clone)]
pub struct RewardConfig {
    /// Dispatched to every agent whose final bid equals the round minimum
    pub winner_reward: f64,

    /// Dispatched to every other agent (negative)
    pub loser_penalty: f64,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            winner_reward: 10.0,
            loser_penalty: -5.0,
        }
    }
}

// ============================================================================
// Results & Errors
// ============================================================================

/// Result of a single round
#[derive(Debug, Clone)]
pub struct RoundResult {
    /// Round number (1-based)
    pub round: usize,

    /// The round's minimum final bid
    pub winning_bid: f64,

    /// Every agent whose final bid equals `winning_bid` (ties all win)
    pub winners: Vec<String>,

    /// Market threshold in force for the next round
    pub threshold: f64,

    /// Whether this round's records reached the bid store
    pub persisted: bool,
}

/// Final state of a completed run
#[derive(Debug, Clone)]
pub struct SimulationSummary {
    /// Rounds actually executed
    pub rounds_completed: usize,

    /// Threshold after the last adjustment
    pub final_threshold: f64,

    /// (agent name, accumulated reward) in bidding order
    pub final_rewards: Vec<(String, f64)>,

    /// Rounds whose records failed to persist (run continued regardless)
    pub unpersisted_rounds: usize,
}

/// Simulation error types
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SimulationError {
    /// Configuration validation error (fatal at construction)
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// An agent disappeared from the bid map mid-round (internal bug)
    #[error("agent not found: {0}")]
    AgentNotFound(String),

    /// `run_round` called after the final round
    #[error("simulation already complete")]
    Complete,
}

// ============================================================================
// Simulation
// ============================================================================

/// Main simulation engine owning all run state
///
/// The engine exclusively owns the agents, the market threshold, and the bid
/// history for the lifetime of one run; no other component mutates them. The
/// bid store and the optional advisory oracle are injected collaborators.
pub struct Simulation {
    /// All agents, in fixed bidding order
    agents: Vec<Box<dyn BiddingAgent>>,

    /// Round counting
    clock: RoundClock,

    /// Current market threshold (≥ configured floor after each adjustment)
    threshold: f64,

    /// Threshold feedback rule
    adjuster: ThresholdAdjuster,

    /// Negotiation sub-protocol
    coordinator: NegotiationCoordinator,

    /// Deterministic RNG (exploration draws and threshold fluctuation)
    rng: RngManager,

    /// Optional external suggestion source; `None` = no advisory for the run
    oracle: Option<Box<dyn AdvisoryOracle>>,

    /// Persistence collaborator receiving one batch per round
    store: Box<dyn BidStore>,

    /// Append-only record of every (round, agent) bid
    history: BidHistory,

    /// Reward magnitudes
    rewards: RewardConfig,

    /// Rounds whose emission failed
    unpersisted_rounds: usize,
}

impl Simulation {
    /// Create a new simulation from configuration
    ///
    /// Validates the configuration and builds the agents; an invalid
    /// configuration refuses to start.
    ///
    /// Whether advisory blending happens at all is decided here, once: pass
    /// `None` when no oracle credential is configured and the entire run
    /// takes the non-advisory path without further checks.
    pub fn new(
        config: SimulationConfig,
        store: Box<dyn BidStore>,
        oracle: Option<Box<dyn AdvisoryOracle>>,
    ) -> Result<Self, SimulationError> {
        Self::validate_config(&config)?;

        let agents: Vec<Box<dyn BiddingAgent>> = config
            .agent_configs
            .iter()
            .map(|ac| -> Box<dyn BiddingAgent> {
                match &ac.strategy {
                    StrategyConfig::Learning(params) => {
                        Box::new(LearningAgent::new(ac.name.clone(), params.clone()))
                    }
                    StrategyConfig::Negotiating(params) => {
                        Box::new(NegotiatingAgent::new(ac.name.clone(), params.clone()))
                    }
                    StrategyConfig::Fixed { bid } => {
                        Box::new(FixedBidAgent::new(ac.name.clone(), *bid))
                    }
                }
            })
            .collect();

        if oracle.is_none() {
            log::info!("no advisory oracle configured; running without advisory blending");
        }
        log::info!(
            "bidding simulation initialized: {} agents, {} rounds, initial threshold {:.2}",
            agents.len(),
            config.rounds,
            config.initial_threshold
        );

        Ok(Self {
            agents,
            clock: RoundClock::new(config.rounds),
            threshold: config.initial_threshold,
            adjuster: ThresholdAdjuster::new(config.threshold),
            coordinator: NegotiationCoordinator::new(config.negotiation_passes),
            rng: RngManager::new(config.rng_seed),
            oracle,
            store,
            history: BidHistory::new(),
            rewards: config.rewards,
            unpersisted_rounds: 0,
        })
    }

    /// Validate configuration
    fn validate_config(config: &SimulationConfig) -> Result<(), SimulationError> {
        if config.agent_configs.is_empty() {
            return Err(SimulationError::InvalidConfig(
                "must have at least one agent".to_string(),
            ));
        }

        if config.rounds == 0 {
            return Err(SimulationError::InvalidConfig(
                "rounds must be > 0".to_string(),
            ));
        }

        if config.initial_threshold <= 0.0 {
            return Err(SimulationError::InvalidConfig(
                "initial_threshold must be > 0".to_string(),
            ));
        }

        if config.negotiation_passes == 0 {
            return Err(SimulationError::InvalidConfig(
                "negotiation_passes must be > 0".to_string(),
            ));
        }

        if config.threshold.floor < 0.0 {
            return Err(SimulationError::InvalidConfig(
                "threshold floor must be >= 0".to_string(),
            ));
        }

        if config.threshold.fluctuation_range < 0.0 {
            return Err(SimulationError::InvalidConfig(
                "fluctuation_range must be >= 0".to_string(),
            ));
        }

        let mut names = HashSet::new();
        for agent_config in &config.agent_configs {
            if !names.insert(&agent_config.name) {
                return Err(SimulationError::InvalidConfig(format!(
                    "duplicate agent name: {}",
                    agent_config.name
                )));
            }

            match &agent_config.strategy {
                StrategyConfig::Learning(params) | StrategyConfig::Negotiating(params) => {
                    if params.learning_rate <= 0.0 {
                        return Err(SimulationError::InvalidConfig(format!(
                            "learning_rate must be > 0 for {}",
                            agent_config.name
                        )));
                    }
                    if !(0.0..=1.0).contains(&params.exploration_rate) {
                        return Err(SimulationError::InvalidConfig(format!(
                            "exploration_rate must be in [0, 1] for {}",
                            agent_config.name
                        )));
                    }
                    if params.exploration_decay <= 0.0 || params.exploration_decay > 1.0 {
                        return Err(SimulationError::InvalidConfig(format!(
                            "exploration_decay must be in (0, 1] for {}",
                            agent_config.name
                        )));
                    }
                }
                StrategyConfig::Fixed { bid } => {
                    if *bid <= 0.0 {
                        return Err(SimulationError::InvalidConfig(format!(
                            "fixed bid must be > 0 for {}",
                            agent_config.name
                        )));
                    }
                }
            }
        }

        Ok(())
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Last round entered (0 before the first)
    pub fn current_round(&self) -> usize {
        self.clock.current_round()
    }

    /// Market threshold currently in force
    pub fn current_threshold(&self) -> f64 {
        self.threshold
    }

    /// Full in-memory bid history
    pub fn history(&self) -> &BidHistory {
        &self.history
    }

    /// Agents in bidding order
    pub fn agents(&self) -> &[Box<dyn BiddingAgent>] {
        &self.agents
    }

    /// The persistence collaborator
    pub fn store(&self) -> &dyn BidStore {
        self.store.as_ref()
    }

    /// Rounds whose record emission failed so far
    pub fn unpersisted_rounds(&self) -> usize {
        self.unpersisted_rounds
    }

    /// Whether the final round has run
    pub fn is_complete(&self) -> bool {
        self.clock.is_complete()
    }

    // ========================================================================
    // Round Loop
    // ========================================================================

    /// Execute one auction round
    ///
    /// # Returns
    ///
    /// * `Ok(RoundResult)` - Round executed (persisted or not)
    /// * `Err(SimulationError::Complete)` - All rounds already ran
    pub fn run_round(&mut self) -> Result<RoundResult, SimulationError> {
        if self.clock.is_complete() {
            return Err(SimulationError::Complete);
        }

        let round = self.clock.advance();
        let rounds_remaining = self.clock.rounds_remaining();
        log::info!("round {} - market threshold {:.2}", round, self.threshold);

        // STEP 1: BID COLLECTION
        // Fixed agent order; blend with the oracle's suggestion when one is
        // configured and answers.
        let mut bids = CompetitorBids::new();
        for agent in self.agents.iter_mut() {
            let mut bid = agent.generate_bid(self.threshold, rounds_remaining, &mut self.rng);

            if let Some(oracle) = &self.oracle {
                let query = BidQuery {
                    agent: agent.name().to_string(),
                    market_threshold: self.threshold,
                    rounds_remaining,
                };
                match oracle.suggest_bid(&query) {
                    Ok(suggestion) => bid = (bid + suggestion) / 2.0,
                    Err(err) => log::debug!(
                        "advisory bid suggestion unavailable for {}: {}",
                        agent.name(),
                        err
                    ),
                }
            }

            bids.insert(agent.name().to_string(), bid);
        }

        // STEP 2: NEGOTIATION
        self.coordinator.negotiate_bids(
            &mut self.agents,
            &mut bids,
            self.threshold,
            rounds_remaining,
            self.oracle.as_deref(),
        );

        // STEP 3: WINNER DETERMINATION
        // Lowest final bid wins; exact equality keeps every tied agent.
        let ordered = finalize_bids(&bids);
        let winning_bid = ordered
            .first()
            .map(|(_, bid)| *bid)
            .ok_or_else(|| SimulationError::InvalidConfig("no bids collected".to_string()))?;
        let winners: Vec<String> = ordered
            .iter()
            .filter(|(_, bid)| *bid == winning_bid)
            .map(|(name, _)| name.clone())
            .collect();

        // STEP 4: REWARD DISPATCH
        // Same fixed order as bid collection, exactly once per agent.
        let mut records = Vec::with_capacity(self.agents.len());
        for agent in self.agents.iter_mut() {
            let bid = *bids
                .get(agent.name())
                .ok_or_else(|| SimulationError::AgentNotFound(agent.name().to_string()))?;
            let is_winner = bid == winning_bid;
            let reward = if is_winner {
                self.rewards.winner_reward
            } else {
                self.rewards.loser_penalty
            };
            agent.update_reward(reward);

            records.push(RoundRecord {
                round,
                agent: agent.name().to_string(),
                bid,
                winning_bid: is_winner,
            });
        }
        self.history.push_round(&records);

        // STEP 5: THRESHOLD UPDATE
        // Full flattened sample, including this round's bids.
        let all_bids = self.history.all_bids();
        let advisory = self.oracle.as_ref().and_then(|oracle| {
            let mean = all_bids.iter().sum::<f64>() / all_bids.len() as f64;
            match oracle.suggest_threshold(self.threshold, mean) {
                Ok(suggestion) => Some(suggestion),
                Err(err) => {
                    log::debug!("advisory threshold suggestion unavailable: {}", err);
                    None
                }
            }
        });
        self.threshold = self
            .adjuster
            .adjust(self.threshold, &all_bids, advisory, &mut self.rng);

        // STEP 6: EMISSION
        // A store failure is logged and counted; the run continues.
        let persisted = match self.store.append_round(&records) {
            Ok(()) => true,
            Err(err) => {
                log::warn!("failed to persist round {}: {}", round, err);
                self.unpersisted_rounds += 1;
                false
            }
        };

        log::info!(
            "round {} complete - winning bid {:.2} ({}), next threshold {:.2}",
            round,
            winning_bid,
            winners.join(", "),
            self.threshold
        );

        Ok(RoundResult {
            round,
            winning_bid,
            winners,
            threshold: self.threshold,
            persisted,
        })
    }

    /// Run every remaining round and return the summary
    pub fn run(&mut self) -> Result<SimulationSummary, SimulationError> {
        while !self.clock.is_complete() {
            self.run_round()?;
        }
        log::info!(
            "simulation complete: {} rounds, {} unpersisted",
            self.clock.total_rounds(),
            self.unpersisted_rounds
        );
        Ok(self.summary())
    }

    /// Final per-agent rewards and run counters
    pub fn summary(&self) -> SimulationSummary {
        SimulationSummary {
            rounds_completed: self.clock.current_round(),
            final_threshold: self.threshold,
            final_rewards: self
                .agents
                .iter()
                .map(|agent| (agent.name().to_string(), agent.accumulated_reward()))
                .collect(),
            unpersisted_rounds: self.unpersisted_rounds,
        }
    }
}
