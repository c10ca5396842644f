// src/model/line.rs

use crate::model::customer::Customer;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Which waiting customer a freed server calls next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinePolicy {
    /// Most recently queued customer first. Historical behavior of the store model.
    #[default]
    Lifo,
    /// Longest waiting customer first.
    Fifo,
}

/// Customers waiting for a free server. Unbounded; nobody balks on arrival.
#[derive(Debug, Clone)]
pub struct WaitingLine {
    buffer: VecDeque<Customer>,
    policy: LinePolicy,
}

impl WaitingLine {
    pub fn new(policy: LinePolicy) -> Self {
        Self {
            buffer: VecDeque::new(),
            policy,
        }
    }

    pub fn policy(&self) -> LinePolicy {
        self.policy
    }

    /// A customer joins the back of the line.
    pub fn push(&mut self, customer: Customer) {
        debug_assert!(customer.is_waiting());
        self.buffer.push_back(customer);
    }

    /// Removes the next customer to call, according to the policy.
    pub fn pop(&mut self) -> Option<Customer> {
        match self.policy {
            LinePolicy::Lifo => self.buffer.pop_back(),
            LinePolicy::Fifo => self.buffer.pop_front(),
        }
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampling::ScriptedVariates;

    fn filled(policy: LinePolicy) -> WaitingLine {
        let mut variates = ScriptedVariates::new([1.0, 1.0, 2.0, 1.0, 3.0, 1.0]);
        let mut line = WaitingLine::new(policy);
        for arrival in [1.0, 2.0, 3.0] {
            line.push(Customer::new(arrival, 10.0, 1.0, &mut variates).unwrap());
        }
        line
    }

    #[test]
    fn lifo_calls_most_recent_first() {
        let mut line = filled(LinePolicy::Lifo);
        let order: Vec<f64> = std::iter::from_fn(|| line.pop())
            .map(|c| c.arrival_time())
            .collect();
        assert_eq!(order, vec![3.0, 2.0, 1.0]);
        assert!(line.is_empty());
    }

    #[test]
    fn fifo_calls_longest_waiting_first() {
        let mut line = filled(LinePolicy::Fifo);
        assert_eq!(line.len(), 3);
        let order: Vec<f64> = std::iter::from_fn(|| line.pop())
            .map(|c| c.arrival_time())
            .collect();
        assert_eq!(order, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn default_policy_is_lifo() {
        assert_eq!(LinePolicy::default(), LinePolicy::Lifo);
        assert!(WaitingLine::new(LinePolicy::default()).pop().is_none());
    }
}
