//! Run configuration
//!
//! Defaults mirror the reference setup: 5 agents, 10 rounds, bid history
//! under `data/bid_history.csv`. When pointed at a missing file the defaults
//! are written there first, so a fresh checkout gets a ready-to-edit config.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Values consumed by the simulation run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Number of auction rounds
    pub rounds: usize,
    /// Total number of agents
    pub agents: usize,
    /// How many agents are negotiation-capable (the first N)
    pub negotiators: usize,
    /// Market threshold for round 1
    pub initial_threshold: f64,
    /// Hard lower bound on the threshold
    pub threshold_floor: f64,
    /// Negotiation passes per round
    pub negotiation_passes: usize,
    /// RNG seed
    pub seed: u64,
    /// CSV file receiving the bid history
    pub data_file: PathBuf,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            rounds: 10,
            agents: 5,
            negotiators: 2,
            initial_threshold: 1000.0,
            threshold_floor: 500.0,
            negotiation_passes: 3,
            seed: 12345,
            data_file: PathBuf::from("data/bid_history.csv"),
        }
    }
}

impl RunConfig {
    /// Load the config from JSON, writing the defaults first if missing
    pub fn load_or_create(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            let config = serde_json::from_str(&raw)
                .with_context(|| format!("parsing config {}", path.display()))?;
            Ok(config)
        } else {
            let config = Self::default();
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            fs::write(path, serde_json::to_string_pretty(&config)?)
                .with_context(|| format!("writing default config {}", path.display()))?;
            log::info!("wrote default configuration to {}", path.display());
            Ok(config)
        }
    }
}
