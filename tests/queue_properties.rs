//! Statistical and structural properties of whole simulation runs.

use checkout_queue::{LinePolicy, LoadedConfig, Simulation, SimulationConfig, SimulationResult};

fn run(config: &SimulationConfig, seed: u64) -> SimulationResult {
    Simulation::seeded(config.clone(), seed)
        .unwrap()
        .run()
        .unwrap()
}

fn mean_over<F: Fn(&SimulationResult) -> f64>(config: &SimulationConfig, runs: u64, f: F) -> f64 {
    (0..runs).map(|seed| f(&run(config, seed))).sum::<f64>() / runs as f64
}

#[test]
fn every_arrival_is_served_abandoned_or_still_waiting() {
    let config = SimulationConfig::default();
    for seed in 0..200 {
        let result = run(&config, seed);
        assert_eq!(
            result.total_arrivals(),
            result.served_count() + result.abandoned_count() + result.unresolved() as u64
        );
        assert!(result.served_count() + result.abandoned_count() <= result.total_arrivals());
    }
}

#[test]
fn net_revenue_follows_the_cost_formula() {
    let config = SimulationConfig::default();
    for seed in 0..20 {
        let result = run(&config, seed);
        let stats = result.stats();
        let expected = stats.revenue
            - stats.rearrangement_cost
            - config.servers as f64 * config.server_cost * config.horizon;
        assert_eq!(result.net_revenue(), expected);
    }
}

#[test]
fn reference_scenario_arrivals_average_lambda_times_horizon() {
    let config = SimulationConfig::default();
    let mean_arrivals = mean_over(&config, 1_000, |r| r.total_arrivals() as f64);
    // Poisson(120): the mean of 1000 runs has a standard error near 0.35
    assert!(
        (mean_arrivals - 120.0).abs() < 3.0,
        "mean arrivals {}",
        mean_arrivals
    );
}

#[test]
fn plenty_of_fast_servers_means_nobody_leaves() {
    let config = SimulationConfig {
        servers: 12,
        arrival_rate: 1.0,
        service_rate: 20.0,
        ..SimulationConfig::default()
    };
    for seed in 0..100 {
        let result = run(&config, seed);
        assert_eq!(result.abandoned_count(), 0);
        assert_eq!(result.unresolved(), 0);
        assert_eq!(result.stats().lost_revenue, 0.0);
    }
}

#[test]
fn near_infinite_patience_means_nobody_leaves() {
    let config = SimulationConfig {
        servers: 1,
        arrival_rate: 3.0,
        service_rate: 1.0,
        patience_rate: 1e-9,
        ..SimulationConfig::default()
    };
    let total_abandoned: u64 = (0..200).map(|seed| run(&config, seed).abandoned_count()).sum();
    assert_eq!(total_abandoned, 0);
}

#[test]
fn identical_seed_and_config_give_identical_counters() {
    let config = SimulationConfig::default();
    let a = run(&config, 1234);
    let b = run(&config, 1234);
    assert_eq!(a.stats(), b.stats());
    assert_eq!(a.unresolved(), b.unresolved());
    assert_eq!(a.net_revenue().to_bits(), b.net_revenue().to_bits());
}

#[test]
fn overloaded_single_server_loses_more_customers_as_load_grows() {
    let base = SimulationConfig {
        servers: 1,
        service_rate: 1.0,
        patience_rate: 0.5,
        line_policy: LinePolicy::Lifo,
        ..SimulationConfig::default()
    };
    let light = SimulationConfig {
        arrival_rate: 0.3,
        ..base.clone()
    };
    let heavy = SimulationConfig {
        arrival_rate: 2.0,
        ..base
    };

    let light_abandoned = mean_over(&light, 200, |r| r.abandoned_count() as f64);
    let heavy_abandoned = mean_over(&heavy, 200, |r| r.abandoned_count() as f64);
    assert!(light_abandoned > 0.0);
    assert!(
        heavy_abandoned > light_abandoned,
        "light {} heavy {}",
        light_abandoned,
        heavy_abandoned
    );

    // the line is really used: customers wait before being served
    let waited = mean_over(&heavy, 50, |r| r.mean_customers_in_line());
    assert!(waited > 0.5);
}

#[test]
fn sample_config_file_loads() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config/checkout.toml");
    let loaded = LoadedConfig::from_file(path).unwrap();
    assert_eq!(loaded.simulation, SimulationConfig::default());
    assert_eq!(loaded.batch.min_servers, 10);
    assert_eq!(loaded.batch.max_servers, 35);
}
