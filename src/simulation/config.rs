// src/simulation/config.rs

use crate::error::{SimError, SimResult};
use crate::model::line::LinePolicy;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Parameters of one checkout simulation. Rates are per minute, the horizon is in minutes.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub cart_max: f64,
    pub margin: f64,             // Fraction of the cart value kept as profit
    pub rearrangement_cost: f64, // Flat cost paid when a customer walks out
    pub server_cost: f64,        // Per server, per minute
    pub arrival_rate: f64,
    pub service_rate: f64,
    pub patience_rate: f64,
    pub beta: f64, // Accepted for compatibility, never sampled
    pub servers: usize,
    pub horizon: f64,
    pub line_policy: LinePolicy,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            cart_max: 50.0,
            margin: 0.1,
            rearrangement_cost: 5.0,
            server_cost: 2.0,
            arrival_rate: 2.0,
            service_rate: 1.5,
            patience_rate: 0.5,
            beta: 0.0,
            servers: 3,
            horizon: 60.0,
            line_policy: LinePolicy::Lifo,
        }
    }
}

fn require(ok: bool, name: &str, rule: &str, value: f64) -> SimResult<()> {
    if ok && value.is_finite() {
        Ok(())
    } else {
        Err(SimError::Configuration(format!("{} must be {}, got {}", name, rule, value)))
    }
}

impl SimulationConfig {
    /// Rejects any parameter that would make a run degenerate.
    pub fn validate(&self) -> SimResult<()> {
        require(self.cart_max > 0.0, "cart_max", "positive", self.cart_max)?;
        require(self.margin > 0.0 && self.margin <= 1.0, "margin", "in (0, 1]", self.margin)?;
        require(
            self.rearrangement_cost >= 0.0,
            "rearrangement_cost",
            "non-negative",
            self.rearrangement_cost,
        )?;
        require(self.server_cost >= 0.0, "server_cost", "non-negative", self.server_cost)?;
        require(self.arrival_rate > 0.0, "arrival_rate", "positive", self.arrival_rate)?;
        require(self.service_rate > 0.0, "service_rate", "positive", self.service_rate)?;
        require(self.patience_rate > 0.0, "patience_rate", "positive", self.patience_rate)?;
        require(self.horizon > 0.0, "horizon", "positive", self.horizon)?;
        if self.servers == 0 {
            return Err(SimError::Configuration("servers must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Same parameters with another number of servers.
    pub fn with_servers(&self, servers: usize) -> Self {
        Self {
            servers,
            ..self.clone()
        }
    }

    /// Fixed cost of keeping every server open for the whole horizon.
    pub fn operating_cost(&self) -> f64 {
        self.servers as f64 * self.server_cost * self.horizon
    }
}

/// Settings of a batch of repeated runs.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BatchSettings {
    pub min_servers: usize,
    pub max_servers: usize,
    pub repetitions: usize,
    pub seed: u64,
    pub output: String,
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            min_servers: 10,
            max_servers: 35,
            repetitions: 100,
            seed: 0,
            output: "batch_revenues.csv".to_string(),
        }
    }
}

// File layout: [constants] x y z w, [variables] lambda mu alpha beta,
// [simulation] servers horizon line_policy, optional [batch].
#[derive(Debug, Deserialize)]
struct TomlConfig {
    constants: TomlConstants,
    variables: TomlVariables,
    simulation: TomlSimulation,
    #[serde(default)]
    batch: BatchSettings,
}

#[derive(Debug, Deserialize)]
struct TomlConstants {
    x: f64,
    y: f64,
    z: f64,
    w: f64,
}

#[derive(Debug, Deserialize)]
struct TomlVariables {
    lambda: f64,
    mu: f64,
    alpha: f64,
    #[serde(default)]
    beta: f64,
}

#[derive(Debug, Deserialize)]
struct TomlSimulation {
    servers: usize,
    horizon: f64,
    #[serde(default)]
    line_policy: LinePolicy,
}

/// A parsed and validated config file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LoadedConfig {
    pub simulation: SimulationConfig,
    pub batch: BatchSettings,
}

impl LoadedConfig {
    pub fn from_toml_str(content: &str) -> SimResult<Self> {
        let raw: TomlConfig = toml::from_str(content)?;
        let simulation = SimulationConfig {
            cart_max: raw.constants.x,
            margin: raw.constants.y,
            rearrangement_cost: raw.constants.z,
            server_cost: raw.constants.w,
            arrival_rate: raw.variables.lambda,
            service_rate: raw.variables.mu,
            patience_rate: raw.variables.alpha,
            beta: raw.variables.beta,
            servers: raw.simulation.servers,
            horizon: raw.simulation.horizon,
            line_policy: raw.simulation.line_policy,
        };
        simulation.validate()?;
        if raw.batch.min_servers == 0 || raw.batch.min_servers > raw.batch.max_servers {
            return Err(SimError::Configuration(format!(
                "batch server range {}..={} is empty or starts at 0",
                raw.batch.min_servers, raw.batch.max_servers
            )));
        }
        Ok(Self {
            simulation,
            batch: raw.batch,
        })
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> SimResult<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }
}
