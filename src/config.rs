//! Configuration loading for GuhaNav

use std::path::Path;

use serde::Deserialize;

use crate::error::{GuhaError, Result};

/// World configuration: grid dimension, hazard/treasure density, and the
/// cost/reward tables. Passed explicitly at world construction; there is no
/// process-wide default grid.
#[derive(Clone, Debug, Deserialize)]
pub struct WorldConfig {
    /// Grid dimension N (the world is N x N)
    #[serde(default = "default_size")]
    pub size: usize,

    /// Probability of a pit in each non-origin cell
    #[serde(default = "default_pit_rate")]
    pub pit_rate: f64,

    /// Probability of extra gold in each non-origin cell
    #[serde(default = "default_gold_rate")]
    pub gold_rate: f64,

    #[serde(default)]
    pub costs: CostConfig,

    #[serde(default)]
    pub rewards: RewardConfig,
}

/// Cost charged per world operation.
#[derive(Clone, Debug, Deserialize)]
pub struct CostConfig {
    /// Single adjacent step
    #[serde(default = "default_step_cost")]
    pub step: u64,

    /// Reading the current cell's percept
    #[serde(default = "default_percept_cost")]
    pub percept: u64,

    /// Unconditional probe move
    #[serde(default = "default_probe_cost")]
    pub probe: u64,

    /// Penalty when a probe lands on a hazard
    #[serde(default = "default_failed_probe_cost")]
    pub failed_probe: u64,

    /// Supervised probe move (always physically succeeds)
    #[serde(default = "default_cautious_probe_cost")]
    pub cautious_probe: u64,

    /// Penalty when the agent dies on a hazard
    #[serde(default = "default_death_cost")]
    pub death: u64,
}

/// Rewards granted by the world.
#[derive(Clone, Debug, Deserialize)]
pub struct RewardConfig {
    /// Reward for collecting one treasure
    #[serde(default = "default_gold_reward")]
    pub gold: u64,

    /// Starting reward balance
    #[serde(default = "default_initial_reward")]
    pub initial: u64,
}

fn default_size() -> usize {
    4
}
fn default_pit_rate() -> f64 {
    0.25
}
fn default_gold_rate() -> f64 {
    0.025
}

fn default_step_cost() -> u64 {
    1
}
fn default_percept_cost() -> u64 {
    1
}
fn default_probe_cost() -> u64 {
    10
}
fn default_failed_probe_cost() -> u64 {
    1000
}
fn default_cautious_probe_cost() -> u64 {
    50
}
fn default_death_cost() -> u64 {
    5000
}

fn default_gold_reward() -> u64 {
    1000
}
fn default_initial_reward() -> u64 {
    100
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            size: default_size(),
            pit_rate: default_pit_rate(),
            gold_rate: default_gold_rate(),
            costs: CostConfig::default(),
            rewards: RewardConfig::default(),
        }
    }
}

impl Default for CostConfig {
    fn default() -> Self {
        Self {
            step: default_step_cost(),
            percept: default_percept_cost(),
            probe: default_probe_cost(),
            failed_probe: default_failed_probe_cost(),
            cautious_probe: default_cautious_probe_cost(),
            death: default_death_cost(),
        }
    }
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            gold: default_gold_reward(),
            initial: default_initial_reward(),
        }
    }
}

impl WorldConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| GuhaError::Config(format!("Failed to read config file: {}", e)))?;
        let config: WorldConfig = toml::from_str(&content)?;
        Ok(config)
    }
}
