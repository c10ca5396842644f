// src/simulation/batch.rs

use crate::error::{SimError, SimResult};
use crate::simulation::config::SimulationConfig;
use crate::simulation::runner::Simulation;
use log::info;
use std::ops::RangeInclusive;

/// Net revenues of every repetition for one server count.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchRow {
    pub servers: usize,
    pub net_revenues: Vec<f64>,
}

impl BatchRow {
    pub fn mean(&self) -> f64 {
        if self.net_revenues.is_empty() {
            return 0.0;
        }
        self.net_revenues.iter().sum::<f64>() / self.net_revenues.len() as f64
    }
}

/// Repeats the simulation for every server count in `servers`.
///
/// Run `k` of the batch draws from its own stream seeded with `seed + k`, so
/// no two runs share random state and the whole batch replays from `seed`.
pub fn run_batch(
    config: &SimulationConfig,
    servers: RangeInclusive<usize>,
    repetitions: usize,
    seed: u64,
) -> SimResult<Vec<BatchRow>> {
    if servers.is_empty() || *servers.start() == 0 {
        return Err(SimError::Configuration(format!(
            "server range {:?} must be non-empty and start at 1 or more",
            servers
        )));
    }

    let mut rows = Vec::new();
    let mut run_index: u64 = 0;

    for server_count in servers {
        let run_config = config.with_servers(server_count);
        let mut net_revenues = Vec::with_capacity(repetitions);

        for _ in 0..repetitions {
            let simulation = Simulation::seeded(run_config.clone(), seed.wrapping_add(run_index))?;
            net_revenues.push(simulation.run()?.net_revenue());
            run_index += 1;
        }

        let row = BatchRow {
            servers: server_count,
            net_revenues,
        };
        info!(
            "{} servers: mean net revenue {:.2} over {} runs",
            server_count,
            row.mean(),
            repetitions
        );
        rows.push(row);
    }

    Ok(rows)
}
