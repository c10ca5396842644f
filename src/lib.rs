//! Discrete-event simulation of a multi-server checkout with impatient customers.

pub mod error;
pub mod io;
pub mod model;
pub mod sampling;
pub mod simulation;

pub use error::{SimError, SimResult};
pub use model::line::LinePolicy;
pub use sampling::{RngVariates, ScriptedVariates, VariateSource};
pub use simulation::batch::{run_batch, BatchRow};
pub use simulation::config::{BatchSettings, LoadedConfig, SimulationConfig};
pub use simulation::engine::{Expectations, Store, StoreStats};
pub use simulation::runner::{RunSummary, Simulation, SimulationResult};
