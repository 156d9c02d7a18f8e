use std::sync::Arc;

use service::contacts::ContactService;

use crate::metrics::Metrics;

/// Shared handler state: the contacts service plus request metrics.
#[derive(Clone)]
pub struct AppState {
    pub contacts: Arc<ContactService>,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    pub fn new(contacts: Arc<ContactService>) -> Result<Self, prometheus::Error> {
        Ok(Self { contacts, metrics: Arc::new(Metrics::new()?) })
    }
}
