// src/simulation/runner.rs

use crate::error::SimResult;
use crate::model::server::Server;
use crate::sampling::implementations::RngVariates;
use crate::sampling::traits::VariateSource;
use crate::simulation::config::SimulationConfig;
use crate::simulation::engine::{Store, StoreStats};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::fmt;

/// One validated checkout simulation with its own random stream.
#[derive(Debug)]
pub struct Simulation<V> {
    config: SimulationConfig,
    variates: V,
}

impl<V: VariateSource> Simulation<V> {
    /// Fails with `SimError::Configuration` before anything is simulated.
    pub fn new(config: SimulationConfig, variates: V) -> SimResult<Self> {
        config.validate()?;
        Ok(Self { config, variates })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Runs a fresh store once and derives the financial summary.
    pub fn run(mut self) -> SimResult<SimulationResult> {
        let mut store = Store::new(self.config.servers, self.config.line_policy);
        store.run(&self.config, &mut self.variates)?;

        let unresolved = store.unresolved();
        let (servers, stats) = store.into_parts();
        let net_revenue = stats.revenue - stats.rearrangement_cost - self.config.operating_cost();

        Ok(SimulationResult {
            config: self.config,
            stats,
            servers,
            unresolved,
            net_revenue,
        })
    }
}

impl Simulation<RngVariates<ChaCha8Rng>> {
    pub fn seeded(config: SimulationConfig, seed: u64) -> SimResult<Self> {
        Self::new(config, RngVariates::seeded(seed))
    }
}

/// Read-only outcome of a single run.
#[derive(Debug, Clone)]
pub struct SimulationResult {
    config: SimulationConfig,
    stats: StoreStats,
    servers: Vec<Server>,
    unresolved: usize,
    net_revenue: f64,
}

impl SimulationResult {
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn stats(&self) -> &StoreStats {
        &self.stats
    }

    pub fn servers(&self) -> &[Server] {
        &self.servers
    }

    /// revenue - rearrangement costs - servers * server cost * horizon
    pub fn net_revenue(&self) -> f64 {
        self.net_revenue
    }

    pub fn total_arrivals(&self) -> u64 {
        self.stats.total_arrivals
    }

    pub fn served_count(&self) -> u64 {
        self.stats.served_count
    }

    pub fn abandoned_count(&self) -> u64 {
        self.stats.abandoned_count
    }

    /// Customers left in line at the horizon.
    pub fn unresolved(&self) -> usize {
        self.unresolved
    }

    pub fn mean_customers_in_system(&self) -> f64 {
        self.stats.expectations.customers_in_system / self.config.horizon
    }

    pub fn mean_customers_in_line(&self) -> f64 {
        self.stats.expectations.customers_in_line / self.config.horizon
    }

    pub fn mean_time_in_system(&self) -> f64 {
        self.per_visit(self.stats.expectations.time_in_system)
    }

    pub fn mean_time_in_line(&self) -> f64 {
        self.per_visit(self.stats.expectations.time_in_line)
    }

    // Nobody served means nothing to average.
    fn per_visit(&self, total: f64) -> f64 {
        if self.stats.served_count == 0 {
            0.0
        } else {
            total / self.stats.served_count as f64
        }
    }

    /// Per-server log of who was served.
    pub fn server_report(&self) -> String {
        let mut text = String::from("Checkout servers\n________________________________________\n");
        for server in &self.servers {
            text.push_str(&server.report());
            text.push_str("\n----------------------------------------\n");
        }
        text
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            servers: self.config.servers,
            total_arrivals: self.stats.total_arrivals,
            served: self.stats.served_count,
            abandoned: self.stats.abandoned_count,
            unresolved: self.unresolved,
            revenue: self.stats.revenue,
            lost_revenue: self.stats.lost_revenue,
            rearrangement_cost: self.stats.rearrangement_cost,
            net_revenue: self.net_revenue,
            mean_customers_in_system: self.mean_customers_in_system(),
            mean_customers_in_line: self.mean_customers_in_line(),
            mean_time_in_system: self.mean_time_in_system(),
            mean_time_in_line: self.mean_time_in_line(),
        }
    }
}

impl fmt::Display for SimulationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "-----------------------------------------------------------------------";
        writeln!(
            f,
            "On average {:.3} customers were in the store.",
            self.mean_customers_in_system()
        )?;
        writeln!(
            f,
            "On average {:.3} customers were waiting in line.",
            self.mean_customers_in_line()
        )?;
        writeln!(
            f,
            "A served customer spent {:.3} minutes in the store on average.",
            self.mean_time_in_system()
        )?;
        writeln!(
            f,
            "A served customer spent {:.3} minutes in line on average.",
            self.mean_time_in_line()
        )?;
        writeln!(f, "{}", rule)?;
        writeln!(f, "Revenue: {:.2}", self.stats.revenue)?;
        writeln!(
            f,
            "Operating costs: {:.2}",
            self.config.operating_cost() + self.stats.rearrangement_cost
        )?;
        writeln!(
            f,
            "Shortfall from departures: {:.2}",
            self.stats.lost_revenue + self.stats.rearrangement_cost
        )?;
        writeln!(f, "Net revenue: {:.2}", self.net_revenue)?;
        writeln!(f, "{}", rule)?;
        write!(
            f,
            "{} customers entered the store: {} served, {} left the line, {} still waiting",
            self.stats.total_arrivals,
            self.stats.served_count,
            self.stats.abandoned_count,
            self.unresolved
        )
    }
}

/// Flat row describing one run, written to CSV.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub servers: usize,
    pub total_arrivals: u64,
    pub served: u64,
    pub abandoned: u64,
    pub unresolved: usize,
    pub revenue: f64,
    pub lost_revenue: f64,
    pub rearrangement_cost: f64,
    pub net_revenue: f64,
    pub mean_customers_in_system: f64,
    pub mean_customers_in_line: f64,
    pub mean_time_in_system: f64,
    pub mean_time_in_line: f64,
}
