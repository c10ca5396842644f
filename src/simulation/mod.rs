pub mod batch;
pub mod config;
pub mod engine;
pub mod runner;
