//! Simulation orchestration
//!
//! The round loop lives here: bid collection, negotiation, winner
//! determination, reward dispatch, threshold update, and record emission.

mod engine;

pub use engine::{
    AgentConfig, RewardConfig, RoundResult, Simulation, SimulationConfig, SimulationError,
    SimulationSummary, StrategyConfig,
};
