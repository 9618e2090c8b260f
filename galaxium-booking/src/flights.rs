use std::sync::Arc;

use galaxium_core::{FlightView, ServiceError, Store};

/// Read-only flight listing with derived per-class prices.
#[derive(Clone)]
pub struct FlightService {
    store: Arc<dyn Store>,
}

impl FlightService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn list_flights(&self) -> Result<Vec<FlightView>, ServiceError> {
        let flights = self.store.list_flights().await?;
        Ok(flights.iter().map(FlightView::project).collect())
    }
}
