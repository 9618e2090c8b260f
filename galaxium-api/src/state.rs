use std::sync::Arc;

use galaxium_booking::{BookingService, FlightService, IdentityService};
use galaxium_core::Store;

#[derive(Clone)]
pub struct AppState {
    pub flights: FlightService,
    pub bookings: BookingService,
    pub identity: IdentityService,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            flights: FlightService::new(store.clone()),
            bookings: BookingService::new(store.clone()),
            identity: IdentityService::new(store),
        }
    }
}
