//! Multi-agent bidding simulation runner
//!
//! Wires a CSV-backed bid store into the simulation core, runs the
//! configured number of rounds, and prints the final rewards plus each
//! agent's policy predictions for a few sample market states.

mod config;

use anyhow::{bail, Context};
use auction_simulator_core_rs::{
    AgentConfig, CsvBidStore, LearningParams, Simulation, SimulationConfig, StrategyConfig,
    ThresholdConfig,
};
use clap::Parser;
use config::RunConfig;
use std::path::PathBuf;

/// Sample states reported after the run: (threshold, rounds remaining)
const SAMPLE_STATES: [(f64, usize); 3] = [(100.0, 10), (80.0, 5), (50.0, 1)];

#[derive(Debug, Parser)]
#[command(
    name = "auction-sim",
    about = "Run the multi-agent bidding and negotiation simulation"
)]
struct Cli {
    /// JSON run configuration (created with defaults if missing)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of auction rounds
    #[arg(long)]
    rounds: Option<usize>,

    /// Total number of agents
    #[arg(long)]
    agents: Option<usize>,

    /// How many of the agents negotiate (the first N)
    #[arg(long)]
    negotiators: Option<usize>,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// CSV file receiving the bid history
    #[arg(long)]
    data_file: Option<PathBuf>,

    /// Print the persisted bid table after the simulation
    #[arg(long)]
    show_history: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut run = match &cli.config {
        Some(path) => RunConfig::load_or_create(path)?,
        None => RunConfig::default(),
    };
    if let Some(rounds) = cli.rounds {
        run.rounds = rounds;
    }
    if let Some(agents) = cli.agents {
        run.agents = agents;
    }
    if let Some(negotiators) = cli.negotiators {
        run.negotiators = negotiators;
    }
    if let Some(seed) = cli.seed {
        run.seed = seed;
    }
    if let Some(data_file) = cli.data_file {
        run.data_file = data_file;
    }

    if run.negotiators > run.agents {
        bail!(
            "negotiators ({}) cannot exceed agents ({})",
            run.negotiators,
            run.agents
        );
    }

    let agent_configs = (1..=run.agents)
        .map(|i| AgentConfig {
            name: format!("Agent {}", i),
            strategy: if i <= run.negotiators {
                StrategyConfig::Negotiating(LearningParams::default())
            } else {
                StrategyConfig::Learning(LearningParams::default())
            },
        })
        .collect();

    let sim_config = SimulationConfig {
        rounds: run.rounds,
        initial_threshold: run.initial_threshold,
        rng_seed: run.seed,
        negotiation_passes: run.negotiation_passes,
        threshold: ThresholdConfig {
            floor: run.threshold_floor,
            ..ThresholdConfig::default()
        },
        agent_configs,
        ..SimulationConfig::default()
    };

    let store = CsvBidStore::new(&run.data_file);
    let mut simulation = Simulation::new(sim_config, Box::new(store), None)
        .context("simulation refused to start")?;
    let summary = simulation.run()?;

    println!("Final rewards:");
    for (name, reward) in &summary.final_rewards {
        println!("  {:<12} {:>8.1}", name, reward);
    }
    println!("Final market threshold: {:.2}", summary.final_threshold);
    if summary.unpersisted_rounds > 0 {
        println!(
            "Warning: {} round(s) failed to persist to {}",
            summary.unpersisted_rounds,
            run.data_file.display()
        );
    }

    println!("\nSample policy predictions (threshold, rounds remaining):");
    for agent in simulation.agents() {
        let predictions: Vec<String> = SAMPLE_STATES
            .iter()
            .map(|(t, r)| format!("({}, {}) -> {:.3}", t, r, agent.predict(*t, *r)))
            .collect();
        println!("  {:<12} {}", agent.name(), predictions.join("  "));
    }

    if cli.show_history {
        let records = simulation.store().load_all()?;
        println!("\n{} persisted records:", records.len());
        println!("{:<6} {:<12} {:>12} {:>8}", "Round", "Agent", "Bid", "Winner");
        for record in records {
            println!(
                "{:<6} {:<12} {:>12.4} {:>8}",
                record.round, record.agent, record.bid, record.winning_bid
            );
        }
    }

    Ok(())
}
