use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Cabin classes sold on every flight. Each class has its own independent
/// seat counter and price multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatClass {
    Economy,
    Business,
    Galaxium,
}

impl SeatClass {
    /// Parse the wire spelling of a seat class. Anything other than the
    /// three canonical lowercase names is rejected.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "economy" => Some(Self::Economy),
            "business" => Some(Self::Business),
            "galaxium" => Some(Self::Galaxium),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Economy => "economy",
            Self::Business => "business",
            Self::Galaxium => "galaxium",
        }
    }
}

impl std::fmt::Display for SeatClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Booking lifecycle status. `Completed` is a valid persisted value that the
/// book/cancel paths never produce themselves; reads must pass it through
/// unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Booked,
    Cancelled,
    Completed,
}

impl BookingStatus {
    /// Parse a stored status. The American spelling "canceled" is accepted
    /// as an input alias; there is exactly one canonical output spelling.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "booked" => Some(Self::Booked),
            "cancelled" | "canceled" => Some(Self::Cancelled),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Booked => "booked",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Registered traveller. Immutable after creation; the email is globally
/// unique (case-sensitive exact match).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub user_id: i64,
    pub name: String,
    pub email: String,
}

/// Route record with one seat counter per cabin class. Departure and arrival
/// times are opaque ISO 8601 strings; the core never interprets them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flight {
    pub flight_id: i64,
    pub origin: String,
    pub destination: String,
    pub departure_time: String,
    pub arrival_time: String,
    /// Economy reference price in the smallest currency unit.
    pub base_price: i64,
    pub economy_seats_available: i64,
    pub business_seats_available: i64,
    pub galaxium_seats_available: i64,
}

impl Flight {
    pub fn seats_available(&self, class: SeatClass) -> i64 {
        match class {
            SeatClass::Economy => self.economy_seats_available,
            SeatClass::Business => self.business_seats_available,
            SeatClass::Galaxium => self.galaxium_seats_available,
        }
    }

    pub fn seats_available_mut(&mut self, class: SeatClass) -> &mut i64 {
        match class {
            SeatClass::Economy => &mut self.economy_seats_available,
            SeatClass::Business => &mut self.business_seats_available,
            SeatClass::Galaxium => &mut self.galaxium_seats_available,
        }
    }
}

/// Transactional booking record. `price_paid` and `seat_class` are snapshots
/// taken at booking time; cancellation only ever flips `status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub booking_id: i64,
    pub user_id: i64,
    pub flight_id: i64,
    pub status: BookingStatus,
    pub seat_class: SeatClass,
    pub booking_time: DateTime<Utc>,
    pub price_paid: i64,
}

/// Flight fields as supplied at seed/setup time, before the store assigns an id.
#[derive(Debug, Clone)]
pub struct NewFlight {
    pub origin: String,
    pub destination: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub base_price: i64,
    pub economy_seats_available: i64,
    pub business_seats_available: i64,
    pub galaxium_seats_available: i64,
}

/// Booking fields as supplied by the ledger, before the store assigns an id.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub user_id: i64,
    pub flight_id: i64,
    pub status: BookingStatus,
    pub seat_class: SeatClass,
    pub booking_time: DateTime<Utc>,
    pub price_paid: i64,
}
