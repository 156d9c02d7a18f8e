//! Prometheus counters for the contacts endpoints.
//!
//! The registry is owned by the state rather than global so that each router
//! (and each test) counts independently.

use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};

pub struct Metrics {
    registry: Registry,
    contact_requests: IntCounterVec,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();
        let contact_requests = IntCounterVec::new(
            Opts::new("contacts_requests_total", "Contacts API requests by operation and outcome"),
            &["operation", "outcome"],
        )?;
        registry.register(Box::new(contact_requests.clone()))?;
        Ok(Self { registry, contact_requests })
    }

    pub fn record(&self, operation: &str, outcome: &str) {
        self.contact_requests.with_label_values(&[operation, outcome]).inc();
    }

    #[cfg(test)]
    fn count(&self, operation: &str, outcome: &str) -> u64 {
        self.contact_requests.with_label_values(&[operation, outcome]).get()
    }

    /// Render all metrics in the Prometheus text exposition format.
    pub fn render(&self) -> Result<String, prometheus::Error> {
        let mut buf = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buf)?;
        String::from_utf8(buf).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
