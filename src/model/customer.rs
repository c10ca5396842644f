// src/model/customer.rs

use crate::error::SimResult;
use crate::sampling::traits::VariateSource;

/// A shopper heading for the checkout.
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    // Fixed at arrival
    arrival_time: f64,
    cart_value: f64,
    patience: f64, // Longest wait (minutes) tolerated before leaving

    // +inf until the engine calls start_service
    service_start_time: f64,
}

impl Customer {
    /// Creates a customer arriving at `arrival_time`.
    ///
    /// The cart value and the patience budget are both drawn here, at arrival,
    /// not when the customer joins the line.
    pub fn new<V: VariateSource + ?Sized>(
        arrival_time: f64,
        cart_max: f64,
        patience_rate: f64,
        variates: &mut V,
    ) -> SimResult<Self> {
        let cart_value = variates.uniform(cart_max)?;
        let patience = variates.exponential(patience_rate)?;
        Ok(Self {
            arrival_time,
            cart_value,
            patience,
            service_start_time: f64::INFINITY,
        })
    }

    pub fn arrival_time(&self) -> f64 {
        self.arrival_time
    }

    pub fn cart_value(&self) -> f64 {
        self.cart_value
    }

    pub fn patience(&self) -> f64 {
        self.patience
    }

    pub fn service_start_time(&self) -> f64 {
        self.service_start_time
    }

    pub fn is_waiting(&self) -> bool {
        self.service_start_time.is_infinite()
    }

    /// Records the moment the customer reaches a server. Written once.
    pub fn start_service(&mut self, time: f64) {
        debug_assert!(self.is_waiting(), "service start written twice");
        self.service_start_time = time;
    }

    /// Time spent in line. Infinite while the customer is still waiting.
    pub fn wait_time(&self) -> f64 {
        self.service_start_time - self.arrival_time
    }

    /// True when the realized wait did not exceed the patience budget.
    pub fn is_patient(&self) -> bool {
        self.patience >= self.wait_time()
    }
}
