//! Integration tests for the simulation engine
//!
//! Fixed-bid agents make whole rounds exactly predictable; learning agents
//! with a seeded RNG cover the stochastic paths deterministically.

use auction_simulator_core_rs::oracle::FixedOracle;
use auction_simulator_core_rs::orchestrator::{
    AgentConfig, Simulation, SimulationConfig, SimulationError, StrategyConfig,
};
use auction_simulator_core_rs::persistence::{BidStore, MemoryBidStore, PersistenceError};
use auction_simulator_core_rs::{LearningParams, RoundRecord, ThresholdConfig};

fn fixed_agent(name: &str, bid: f64) -> AgentConfig {
    AgentConfig {
        name: name.to_string(),
        strategy: StrategyConfig::Fixed { bid },
    }
}

fn learning_agent(name: &str) -> AgentConfig {
    AgentConfig {
        name: name.to_string(),
        strategy: StrategyConfig::Learning(LearningParams::default()),
    }
}

fn negotiating_agent(name: &str) -> AgentConfig {
    AgentConfig {
        name: name.to_string(),
        strategy: StrategyConfig::Negotiating(LearningParams::default()),
    }
}

fn quiet_config(rounds: usize, agent_configs: Vec<AgentConfig>) -> SimulationConfig {
    SimulationConfig {
        rounds,
        initial_threshold: 100.0,
        threshold: ThresholdConfig {
            floor: 50.0,
            fluctuation_range: 0.0,
            ..ThresholdConfig::default()
        },
        agent_configs,
        ..SimulationConfig::default()
    }
}

/// Store whose every append fails, for partial-failure tolerance tests
struct FailingStore;

impl BidStore for FailingStore {
    fn append_round(&mut self, _records: &[RoundRecord]) -> Result<(), PersistenceError> {
        Err(PersistenceError::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            "disk full",
        )))
    }

    fn load_all(&self) -> Result<Vec<RoundRecord>, PersistenceError> {
        Ok(Vec::new())
    }
}

#[test]
fn test_single_round_three_fixed_bidders() {
    let config = quiet_config(
        1,
        vec![
            fixed_agent("Agent 1", 95.0),
            fixed_agent("Agent 2", 98.0),
            fixed_agent("Agent 3", 102.0),
        ],
    );
    let mut simulation = Simulation::new(config, Box::new(MemoryBidStore::new()), None).unwrap();

    let result = simulation.run_round().unwrap();
    assert_eq!(result.round, 1);
    assert_eq!(result.winning_bid, 95.0);
    assert_eq!(result.winners, vec!["Agent 1".to_string()]);
    assert!(result.persisted);

    let records = simulation.store().load_all().unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records.iter().filter(|r| r.winning_bid).count(), 1);
    assert!(records.iter().any(|r| r.agent == "Agent 1" && r.winning_bid));
}

#[test]
fn test_tied_minimum_bids_all_win() {
    let config = quiet_config(
        1,
        vec![
            fixed_agent("Agent 1", 95.0),
            fixed_agent("Agent 2", 95.0),
            fixed_agent("Agent 3", 100.0),
        ],
    );
    let mut simulation = Simulation::new(config, Box::new(MemoryBidStore::new()), None).unwrap();

    let result = simulation.run_round().unwrap();
    assert_eq!(
        result.winners,
        vec!["Agent 1".to_string(), "Agent 2".to_string()]
    );

    let records = simulation.store().load_all().unwrap();
    assert_eq!(records.iter().filter(|r| r.winning_bid).count(), 2);
}

#[test]
fn test_reward_accounting_over_rounds() {
    let rounds = 4;
    let config = quiet_config(
        rounds,
        vec![
            fixed_agent("Agent 1", 95.0),
            fixed_agent("Agent 2", 98.0),
            fixed_agent("Agent 3", 102.0),
        ],
    );
    let mut simulation = Simulation::new(config, Box::new(MemoryBidStore::new()), None).unwrap();
    simulation.run().unwrap();

    // Agent 1 wins every round: 4 × +10; the others lose every round: 4 × -5.
    let rewards: Vec<f64> = simulation
        .agents()
        .iter()
        .map(|a| a.accumulated_reward())
        .collect();
    assert_eq!(rewards, vec![40.0, -20.0, -20.0]);
}

#[test]
fn test_history_row_count_is_rounds_times_agents() {
    let config = quiet_config(
        5,
        vec![
            learning_agent("Agent 1"),
            learning_agent("Agent 2"),
            negotiating_agent("Agent 3"),
            negotiating_agent("Agent 4"),
            learning_agent("Agent 5"),
        ],
    );
    let mut simulation = Simulation::new(config, Box::new(MemoryBidStore::new()), None).unwrap();

    // No oracle configured: the whole run takes the non-advisory path.
    let summary = simulation.run().unwrap();

    assert_eq!(summary.rounds_completed, 5);
    assert_eq!(summary.unpersisted_rounds, 0);
    assert_eq!(simulation.history().len(), 25);
    assert_eq!(simulation.store().load_all().unwrap().len(), 25);

    // One record per (round, agent) pair, winners at the round minimum.
    for round in 1..=5 {
        let round_records: Vec<&RoundRecord> = simulation
            .history()
            .records()
            .iter()
            .filter(|r| r.round == round)
            .collect();
        assert_eq!(round_records.len(), 5);

        let min_bid = round_records
            .iter()
            .map(|r| r.bid)
            .fold(f64::INFINITY, f64::min);
        for record in round_records {
            assert_eq!(record.winning_bid, record.bid == min_bid);
        }
    }
}

#[test]
fn test_same_seed_reproduces_history() {
    let agent_configs = vec![
        learning_agent("Agent 1"),
        negotiating_agent("Agent 2"),
        learning_agent("Agent 3"),
    ];
    let config = SimulationConfig {
        rng_seed: 777,
        ..quiet_config(6, agent_configs)
    };

    let mut first = Simulation::new(config.clone(), Box::new(MemoryBidStore::new()), None).unwrap();
    let mut second = Simulation::new(config, Box::new(MemoryBidStore::new()), None).unwrap();

    first.run().unwrap();
    second.run().unwrap();

    assert_eq!(first.history().records(), second.history().records());
    assert_eq!(first.current_threshold(), second.current_threshold());
}

#[test]
fn test_persistence_failure_does_not_halt_run() {
    let config = quiet_config(
        3,
        vec![fixed_agent("Agent 1", 95.0), fixed_agent("Agent 2", 98.0)],
    );
    let mut simulation = Simulation::new(config, Box::new(FailingStore), None).unwrap();

    let summary = simulation.run().unwrap();

    // Every round completed; every emission failed; in-memory history intact.
    assert_eq!(summary.rounds_completed, 3);
    assert_eq!(summary.unpersisted_rounds, 3);
    assert_eq!(simulation.history().len(), 6);
    assert_eq!(simulation.store().load_all().unwrap().len(), 0);
}

#[test]
fn test_invalid_configurations_refuse_to_start() {
    let valid_agents = vec![fixed_agent("Agent 1", 95.0)];

    let no_agents = quiet_config(1, Vec::new());
    let zero_rounds = quiet_config(0, valid_agents.clone());
    let bad_threshold = SimulationConfig {
        initial_threshold: 0.0,
        ..quiet_config(1, valid_agents.clone())
    };
    let duplicate_names = quiet_config(
        1,
        vec![fixed_agent("Agent 1", 95.0), fixed_agent("Agent 1", 98.0)],
    );
    let zero_passes = SimulationConfig {
        negotiation_passes: 0,
        ..quiet_config(1, valid_agents.clone())
    };
    let bad_fixed_bid = quiet_config(1, vec![fixed_agent("Agent 1", 0.0)]);
    let bad_decay = quiet_config(
        1,
        vec![AgentConfig {
            name: "Agent 1".to_string(),
            strategy: StrategyConfig::Learning(LearningParams {
                exploration_decay: 0.0,
                ..LearningParams::default()
            }),
        }],
    );

    for config in [
        no_agents,
        zero_rounds,
        bad_threshold,
        duplicate_names,
        zero_passes,
        bad_fixed_bid,
        bad_decay,
    ] {
        let result = Simulation::new(config, Box::new(MemoryBidStore::new()), None);
        assert!(matches!(
            result,
            Err(SimulationError::InvalidConfig(_))
        ));
    }
}

#[test]
fn test_run_round_after_completion_is_an_error() {
    let config = quiet_config(1, vec![fixed_agent("Agent 1", 95.0)]);
    let mut simulation = Simulation::new(config, Box::new(MemoryBidStore::new()), None).unwrap();

    simulation.run_round().unwrap();
    assert!(simulation.is_complete());
    assert!(matches!(
        simulation.run_round(),
        Err(SimulationError::Complete)
    ));
}

#[test]
fn test_oracle_suggestion_blended_into_bids() {
    let config = quiet_config(1, vec![fixed_agent("Agent 1", 100.0)]);
    let oracle = FixedOracle::new(90.0);
    let mut simulation = Simulation::new(
        config,
        Box::new(MemoryBidStore::new()),
        Some(Box::new(oracle)),
    )
    .unwrap();

    simulation.run_round().unwrap();

    // Collected bid is the midpoint of the agent's 100 and the oracle's 90.
    let records = simulation.store().load_all().unwrap();
    assert_eq!(records[0].bid, 95.0);
}

#[test]
fn test_threshold_contracts_toward_low_bids() {
    let config = quiet_config(1, vec![fixed_agent("Agent 1", 50.0)]);
    let mut simulation = Simulation::new(config, Box::new(MemoryBidStore::new()), None).unwrap();

    let result = simulation.run_round().unwrap();

    // Mean bid 50 < 0.85 × 100: contraction by the default factor.
    assert!((result.threshold - 97.0).abs() < 1e-9);
    assert_eq!(simulation.current_threshold(), result.threshold);
}

#[test]
fn test_threshold_never_below_floor_through_run() {
    let config = SimulationConfig {
        threshold: ThresholdConfig {
            floor: 90.0,
            fluctuation_range: 0.0,
            ..ThresholdConfig::default()
        },
        ..quiet_config(20, vec![fixed_agent("Agent 1", 10.0)])
    };
    let mut simulation = Simulation::new(config, Box::new(MemoryBidStore::new()), None).unwrap();

    while !simulation.is_complete() {
        let result = simulation.run_round().unwrap();
        assert!(result.threshold >= 90.0);
    }
    assert_eq!(simulation.current_threshold(), 90.0);
}

#[test]
fn test_negotiating_agent_undercuts_in_full_round() {
    let mut agent_configs = vec![
        fixed_agent("Agent 1", 100.0),
        fixed_agent("Agent 2", 120.0),
    ];
    agent_configs.push(AgentConfig {
        name: "Agent 3".to_string(),
        strategy: StrategyConfig::Negotiating(LearningParams {
            exploration_rate: 0.0,
            ..LearningParams::default()
        }),
    });

    let config = quiet_config(1, agent_configs);
    let mut simulation = Simulation::new(config, Box::new(MemoryBidStore::new()), None).unwrap();

    // The untrained negotiator opens at the clamp minimum, stays the lowest
    // through negotiation, and wins the round outright.
    let result = simulation.run_round().unwrap();
    assert_eq!(result.winners, vec!["Agent 3".to_string()]);
    assert_eq!(result.winning_bid, 1.0);
}
