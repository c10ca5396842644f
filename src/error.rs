// src/error.rs

use thiserror::Error;

/// Errors raised while configuring, running or reporting a simulation.
#[derive(Debug, Error)]
pub enum SimError {
    /// A parameter was rejected when the simulation was built.
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// A random variate was requested outside its domain.
    #[error("Domain error: {0}")]
    Domain(String),

    /// A scripted variate stream ran out of values.
    #[error("Variate stream exhausted")]
    StreamExhausted,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Config file error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type SimResult<T> = Result<T, SimError>;
