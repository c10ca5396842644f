use checkout_queue::io::reporting;
use checkout_queue::{run_batch, LoadedConfig, RngVariates, Simulation};
use clap::{Parser, Subcommand};
use log::{info, LevelFilter};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::error::Error;
use std::path::PathBuf;

/// Checkout queue simulation with impatient customers
#[derive(Parser, Debug)]
#[command(name = "checkout-queue", version, about)]
struct Cli {
    /// Path to TOML configuration file; built-in defaults when absent
    #[arg(short, long, global = true, env = "CHECKOUT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    /// Run once and print the full report
    Single {
        /// Seed of the random stream; drawn from entropy when absent
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Repeat runs over the configured range of server counts
    Batch {
        /// Overrides the seed from the [batch] table
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::parse();

    println!("=== Checkout Queue Simulation ===");

    // 1. SETUP CONFIGURATION
    let loaded = match &cli.config {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            LoadedConfig::from_file(path)?
        }
        None => LoadedConfig::default(),
    };
    let config = loaded.simulation;
    info!("Configuration: {:?}", config);

    match cli.command.unwrap_or(Command::Single { seed: None }) {
        // 2a. ONE RUN, printed in full
        Command::Single { seed } => {
            let simulation = match seed {
                Some(seed) => Simulation::seeded(config, seed)?,
                None => Simulation::new(config, RngVariates::new(ChaCha8Rng::from_entropy()))?,
            };
            let result = simulation.run()?;

            println!("{}", result.server_report());
            println!("{}", result);

            let output_file = "simulation_summary.csv";
            reporting::write_run_summaries(output_file, &[result.summary()])?;
            println!("Summary written to ./{}", output_file);
        }
        // 2b. REPEATED RUNS over a range of server counts
        Command::Batch { seed } => {
            let batch = loaded.batch;
            let seed = seed.unwrap_or(batch.seed);
            println!(
                "Running {} repetitions for {} to {} servers (seed {})...",
                batch.repetitions, batch.min_servers, batch.max_servers, seed
            );
            let rows = run_batch(
                &config,
                batch.min_servers..=batch.max_servers,
                batch.repetitions,
                seed,
            )?;

            println!("\n=== Mean Net Revenue ===");
            for row in &rows {
                println!("{} servers: {:.2}", row.servers, row.mean());
            }

            reporting::write_revenue_table(&batch.output, &rows)?;
            println!("Revenue table written to ./{}", batch.output);
        }
    }

    println!("\nSimulation Complete.");
    Ok(())
}
