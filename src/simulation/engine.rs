// src/simulation/engine.rs

use crate::error::SimResult;
use crate::model::customer::Customer;
use crate::model::line::{LinePolicy, WaitingLine};
use crate::model::server::Server;
use crate::sampling::traits::VariateSource;
use crate::simulation::config::SimulationConfig;
use log::{debug, trace};

/// Raw time-weighted and per-visit sums. Divide by the horizon or a count to get means.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Expectations {
    pub customers_in_system: f64, // Integral of (busy servers + line length) dt
    pub customers_in_line: f64,   // Integral of line length dt
    pub time_in_system: f64,      // Sum of wait + service over served customers
    pub time_in_line: f64,        // Sum of waits over served customers
}

/// Counters accumulated by a store over one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreStats {
    pub total_arrivals: u64,
    pub served_count: u64,
    pub abandoned_count: u64,
    pub revenue: f64,
    pub lost_revenue: f64,
    pub rearrangement_cost: f64,
    pub expectations: Expectations,
}

/// The next thing that happens. Completions carry the server that fires them.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Event {
    Arrival { time: f64 },
    Completion { server: usize, time: f64 },
}

impl Event {
    fn time(&self) -> f64 {
        match *self {
            Event::Arrival { time } | Event::Completion { time, .. } => time,
        }
    }
}

/// The checkout area: servers, the waiting line and the running counters.
pub struct Store {
    servers: Vec<Server>,
    line: WaitingLine,
    stats: StoreStats,
}

impl Store {
    pub fn new(server_count: usize, policy: LinePolicy) -> Self {
        Self {
            servers: (0..server_count).map(Server::new).collect(),
            line: WaitingLine::new(policy),
            stats: StoreStats::default(),
        }
    }

    /// Runs the event loop from time 0 until the next event falls at or past the horizon.
    ///
    /// The configuration is taken as given; validation belongs to the caller.
    pub fn run<V: VariateSource + ?Sized>(
        &mut self,
        config: &SimulationConfig,
        variates: &mut V,
    ) -> SimResult<()> {
        let horizon = config.horizon;
        let mut clock = 0.0;
        let mut next_arrival = variates.exponential(config.arrival_rate)?;

        loop {
            let event = self.next_event(next_arrival);
            let event_time = event.time();
            if event_time >= horizon {
                break;
            }

            self.accumulate(event_time - clock);
            clock = event_time;

            match event {
                Event::Arrival { .. } => {
                    next_arrival = self.handle_arrival(clock, config, variates)?;
                }
                Event::Completion { server, .. } => {
                    self.handle_completion(server, clock, config, variates)?;
                }
            }
        }

        debug!(
            "Run finished at t={:.3}: {} arrivals, {} served, {} abandoned, {} still waiting",
            clock,
            self.stats.total_arrivals,
            self.stats.served_count,
            self.stats.abandoned_count,
            self.unresolved()
        );
        Ok(())
    }

    // Arrival wins ties against completions; among servers the lowest index wins.
    fn next_event(&self, next_arrival: f64) -> Event {
        match self.earliest_completion() {
            Some((server, time)) if time < next_arrival => Event::Completion { server, time },
            _ => Event::Arrival { time: next_arrival },
        }
    }

    fn earliest_completion(&self) -> Option<(usize, f64)> {
        let mut earliest: Option<(usize, f64)> = None;
        for (index, server) in self.servers.iter().enumerate() {
            if server.is_free() {
                continue;
            }
            let time = server.next_completion_time();
            if earliest.map_or(true, |(_, best)| time < best) {
                earliest = Some((index, time));
            }
        }
        earliest
    }

    fn first_idle(&self) -> Option<usize> {
        self.servers.iter().position(Server::is_free)
    }

    fn accumulate(&mut self, elapsed: f64) {
        let in_line = self.line.len() as f64;
        let in_system = self.in_service() as f64 + in_line;
        self.stats.expectations.customers_in_system += in_system * elapsed;
        self.stats.expectations.customers_in_line += in_line * elapsed;
    }

    /// Returns the time of the following arrival, +inf once it would fall past the horizon.
    fn handle_arrival<V: VariateSource + ?Sized>(
        &mut self,
        now: f64,
        config: &SimulationConfig,
        variates: &mut V,
    ) -> SimResult<f64> {
        let mut customer = Customer::new(now, config.cart_max, config.patience_rate, variates)?;
        self.stats.total_arrivals += 1;

        let gap = variates.exponential(config.arrival_rate)?;
        let next_arrival = if now + gap < config.horizon {
            now + gap
        } else {
            f64::INFINITY
        };

        match self.first_idle() {
            Some(index) => {
                trace!("t={:.3}: arrival goes straight to server {}", now, index);
                customer.start_service(now);
                self.begin_service(index, customer, now, config, variates)?;
            }
            None => {
                trace!("t={:.3}: arrival joins a line of {}", now, self.line.len());
                self.line.push(customer);
            }
        }
        Ok(next_arrival)
    }

    /// The server that just finished calls waiting customers until one is still there.
    fn handle_completion<V: VariateSource + ?Sized>(
        &mut self,
        server: usize,
        now: f64,
        config: &SimulationConfig,
        variates: &mut V,
    ) -> SimResult<()> {
        while let Some(mut customer) = self.line.pop() {
            customer.start_service(now);
            if customer.is_patient() {
                trace!(
                    "t={:.3}: server {} takes a customer who waited {:.3}",
                    now,
                    server,
                    customer.wait_time()
                );
                return self.begin_service(server, customer, now, config, variates);
            }

            trace!(
                "t={:.3}: customer left after {:.3} (patience {:.3})",
                now,
                customer.wait_time(),
                customer.patience()
            );
            self.stats.abandoned_count += 1;
            self.stats.lost_revenue += customer.cart_value() * config.margin;
            self.stats.rearrangement_cost += config.rearrangement_cost;
        }

        self.servers[server].set_idle();
        Ok(())
    }

    fn begin_service<V: VariateSource + ?Sized>(
        &mut self,
        index: usize,
        customer: Customer,
        now: f64,
        config: &SimulationConfig,
        variates: &mut V,
    ) -> SimResult<()> {
        let duration = variates.exponential(config.service_rate)?;
        let wait = customer.wait_time();

        self.stats.served_count += 1;
        self.stats.revenue += customer.cart_value() * config.margin;
        self.stats.expectations.time_in_line += wait;
        self.stats.expectations.time_in_system += wait + duration;

        let server = &mut self.servers[index];
        server.set_busy(now + duration);
        server.assign(customer);
        Ok(())
    }

    pub fn stats(&self) -> &StoreStats {
        &self.stats
    }

    pub fn servers(&self) -> &[Server] {
        &self.servers
    }

    /// Servers currently busy.
    pub fn in_service(&self) -> usize {
        self.servers.iter().filter(|s| !s.is_free()).count()
    }

    /// Customers still waiting; their outcome is never decided.
    pub fn unresolved(&self) -> usize {
        self.line.len()
    }

    pub fn into_parts(self) -> (Vec<Server>, StoreStats) {
        (self.servers, self.stats)
    }
}
