// src/model/server.rs

use crate::model::customer::Customer;

/// One checkout counter.
#[derive(Debug, Clone)]
pub struct Server {
    id: usize,
    free: bool,
    next_completion_time: f64, // +inf while idle
    served_log: Vec<Customer>,
}

impl Server {
    pub fn new(id: usize) -> Self {
        Self {
            id,
            free: true,
            next_completion_time: f64::INFINITY,
            served_log: Vec::new(),
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn is_free(&self) -> bool {
        self.free
    }

    pub fn next_completion_time(&self) -> f64 {
        self.next_completion_time
    }

    pub fn set_busy(&mut self, completion_time: f64) {
        self.free = false;
        self.next_completion_time = completion_time;
    }

    pub fn set_idle(&mut self) {
        self.free = true;
        self.next_completion_time = f64::INFINITY;
    }

    /// Appends a customer to the served log.
    pub fn assign(&mut self, customer: Customer) {
        self.served_log.push(customer);
    }

    pub fn served(&self) -> &[Customer] {
        &self.served_log
    }

    /// Arrival time of every customer this counter served, then the total.
    pub fn report(&self) -> String {
        let mut text = format!("Server {} served these customers:\n", self.id);
        for customer in &self.served_log {
            text.push_str(&format!("\t{:.3}\n", customer.arrival_time()));
        }
        text.push_str(&format!(
            "\nServer {} served a total of {} customers",
            self.id,
            self.served_log.len()
        ));
        text
    }
}
