use serde::{Deserialize, Serialize};

use crate::models::{Flight, SeatClass};

// Class multipliers relative to the economy base price. Fixed constants,
// not configurable per flight.
const BUSINESS_MULTIPLIER_NUM: i64 = 5;
const BUSINESS_MULTIPLIER_DEN: i64 = 2;
const GALAXIUM_MULTIPLIER: i64 = 5;

/// Price paid for one seat of `class` on a flight with the given economy
/// base price. Business fares round down to the whole currency unit.
pub fn price_for(base_price: i64, class: SeatClass) -> i64 {
    match class {
        SeatClass::Economy => base_price,
        SeatClass::Business => base_price * BUSINESS_MULTIPLIER_NUM / BUSINESS_MULTIPLIER_DEN,
        SeatClass::Galaxium => base_price * GALAXIUM_MULTIPLIER,
    }
}

/// Read-only projection of a flight with the three derived class prices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightView {
    pub flight_id: i64,
    pub origin: String,
    pub destination: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub base_price: i64,
    pub economy_seats_available: i64,
    pub business_seats_available: i64,
    pub galaxium_seats_available: i64,
    pub economy_price: i64,
    pub business_price: i64,
    pub galaxium_price: i64,
}

impl FlightView {
    pub fn project(flight: &Flight) -> Self {
        Self {
            flight_id: flight.flight_id,
            origin: flight.origin.clone(),
            destination: flight.destination.clone(),
            departure_time: flight.departure_time.clone(),
            arrival_time: flight.arrival_time.clone(),
            base_price: flight.base_price,
            economy_seats_available: flight.economy_seats_available,
            business_seats_available: flight.business_seats_available,
            galaxium_seats_available: flight.galaxium_seats_available,
            economy_price: price_for(flight.base_price, SeatClass::Economy),
            business_price: price_for(flight.base_price, SeatClass::Business),
            galaxium_price: price_for(flight.base_price, SeatClass::Galaxium),
        }
    }
}
