//! Auction Simulator Core - Rust Engine
//!
//! Repeated sealed-bid auction among autonomous agents that learn and
//! negotiate bidding strategies against a dynamically moving market
//! threshold, with deterministic execution.
//!
//! # Architecture
//!
//! - **core**: Round counting
//! - **models**: Domain types (RoundRecord, BidHistory, CompetitorBids)
//! - **agents**: Bidding agents (learning, negotiating, fixed)
//! - **market**: Threshold adjustment feedback rule
//! - **negotiation**: Bounded negotiation passes and bid finalization
//! - **oracle**: Optional external advisory boundary
//! - **persistence**: Round-record storage (CSV table, in-memory)
//! - **orchestrator**: Main round loop
//! - **rng**: Deterministic random number generation
//!
//! # Critical Invariants
//!
//! 1. All randomness is deterministic (seeded RNG)
//! 2. The market threshold never drops below the configured floor
//! 3. Within a round, exactly the agents at the minimum final bid win
//! 4. The bid history is append-only: R rounds × A agents = R×A records
//! 5. Advisory and persistence failures never abort a round

// Module declarations
pub mod agents;
pub mod core;
pub mod market;
pub mod models;
pub mod negotiation;
pub mod oracle;
pub mod orchestrator;
pub mod persistence;
pub mod rng;

// Re-exports for convenience
pub use agents::{BiddingAgent, FixedBidAgent, LearningAgent, LearningParams, NegotiatingAgent};
pub use crate::core::rounds::RoundClock;
pub use market::{ThresholdAdjuster, ThresholdConfig};
pub use models::{BidHistory, CompetitorBids, RoundRecord};
pub use negotiation::{finalize_bids, NegotiationCoordinator};
pub use oracle::{AdvisoryError, AdvisoryOracle, BidQuery, BoundedOracle, FixedOracle};
pub use orchestrator::{
    AgentConfig, RewardConfig, RoundResult, Simulation, SimulationConfig, SimulationError,
    SimulationSummary, StrategyConfig,
};
pub use persistence::{BidStore, CsvBidStore, MemoryBidStore, PersistenceError};
pub use rng::RngManager;
