use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, OwnedMutexGuard};

use galaxium_core::store::{BoxError, Store, StoreTx};
use galaxium_core::{Booking, BookingStatus, Flight, NewBooking, NewFlight, SeatClass, User};

/// In-memory store with the same transactional contract as the SQLite
/// backend: a transaction stages its changes against a copy of the state
/// and holds the single writer lock until commit or drop, so a
/// check-then-mutate sequence can never interleave with another writer.
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemState>>,
}

#[derive(Debug, Clone, Default)]
struct MemState {
    users: BTreeMap<i64, User>,
    flights: BTreeMap<i64, Flight>,
    bookings: BTreeMap<i64, Booking>,
    last_user_id: i64,
    last_flight_id: i64,
    last_booking_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn begin(&self) -> Result<Box<dyn StoreTx>, BoxError> {
        let guard = self.state.clone().lock_owned().await;
        let staged = guard.clone();
        Ok(Box::new(MemoryTx {
            guard,
            staged,
            committed: false,
        }))
    }

    async fn list_flights(&self) -> Result<Vec<Flight>, BoxError> {
        let state = self.state.lock().await;
        Ok(state.flights.values().cloned().collect())
    }

    async fn bookings_for_user(&self, user_id: i64) -> Result<Vec<Booking>, BoxError> {
        let state = self.state.lock().await;
        Ok(state
            .bookings
            .values()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn user_by_email(&self, email: &str) -> Result<Option<User>, BoxError> {
        let state = self.state.lock().await;
        Ok(state.users.values().find(|u| u.email == email).cloned())
    }

    async fn user_by_name_and_email(
        &self,
        name: &str,
        email: &str,
    ) -> Result<Option<User>, BoxError> {
        let state = self.state.lock().await;
        Ok(state
            .users
            .values()
            .find(|u| u.name == name && u.email == email)
            .cloned())
    }
}

struct MemoryTx {
    guard: OwnedMutexGuard<MemState>,
    staged: MemState,
    committed: bool,
}

#[async_trait]
impl StoreTx for MemoryTx {
    async fn flight(&mut self, flight_id: i64) -> Result<Option<Flight>, BoxError> {
        Ok(self.staged.flights.get(&flight_id).cloned())
    }

    async fn user(&mut self, user_id: i64) -> Result<Option<User>, BoxError> {
        Ok(self.staged.users.get(&user_id).cloned())
    }

    async fn user_by_email(&mut self, email: &str) -> Result<Option<User>, BoxError> {
        Ok(self.staged.users.values().find(|u| u.email == email).cloned())
    }

    async fn insert_user(&mut self, name: &str, email: &str) -> Result<User, BoxError> {
        if self.staged.users.values().any(|u| u.email == email) {
            return Err(format!("unique constraint violated for email '{email}'").into());
        }
        self.staged.last_user_id += 1;
        let user = User {
            user_id: self.staged.last_user_id,
            name: name.to_string(),
            email: email.to_string(),
        };
        self.staged.users.insert(user.user_id, user.clone());
        Ok(user)
    }

    async fn insert_flight(&mut self, flight: &NewFlight) -> Result<Flight, BoxError> {
        self.staged.last_flight_id += 1;
        let flight = Flight {
            flight_id: self.staged.last_flight_id,
            origin: flight.origin.clone(),
            destination: flight.destination.clone(),
            departure_time: flight.departure_time.clone(),
            arrival_time: flight.arrival_time.clone(),
            base_price: flight.base_price,
            economy_seats_available: flight.economy_seats_available,
            business_seats_available: flight.business_seats_available,
            galaxium_seats_available: flight.galaxium_seats_available,
        };
        self.staged.flights.insert(flight.flight_id, flight.clone());
        Ok(flight)
    }

    async fn reserve_seat(&mut self, flight_id: i64, class: SeatClass) -> Result<bool, BoxError> {
        match self.staged.flights.get_mut(&flight_id) {
            Some(flight) if flight.seats_available(class) > 0 => {
                *flight.seats_available_mut(class) -= 1;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn release_seat(&mut self, flight_id: i64, class: SeatClass) -> Result<(), BoxError> {
        match self.staged.flights.get_mut(&flight_id) {
            Some(flight) => *flight.seats_available_mut(class) += 1,
            None => {
                tracing::warn!(flight_id, class = %class, "seat release on unknown flight ignored");
            }
        }
        Ok(())
    }

    async fn insert_booking(&mut self, booking: &NewBooking) -> Result<Booking, BoxError> {
        self.staged.last_booking_id += 1;
        let booking = Booking {
            booking_id: self.staged.last_booking_id,
            user_id: booking.user_id,
            flight_id: booking.flight_id,
            status: booking.status,
            seat_class: booking.seat_class,
            booking_time: booking.booking_time,
            price_paid: booking.price_paid,
        };
        self.staged.bookings.insert(booking.booking_id, booking.clone());
        Ok(booking)
    }

    async fn booking(&mut self, booking_id: i64) -> Result<Option<Booking>, BoxError> {
        Ok(self.staged.bookings.get(&booking_id).cloned())
    }

    async fn set_booking_status(
        &mut self,
        booking_id: i64,
        status: BookingStatus,
    ) -> Result<(), BoxError> {
        if let Some(booking) = self.staged.bookings.get_mut(&booking_id) {
            booking.status = status;
        }
        Ok(())
    }

    async fn commit(&mut self) -> Result<(), BoxError> {
        if self.committed {
            return Err("transaction already committed".into());
        }
        *self.guard = std::mem::take(&mut self.staged);
        self.committed = true;
        Ok(())
    }
}
