use async_trait::async_trait;

use crate::models::{Booking, BookingStatus, Flight, NewBooking, NewFlight, SeatClass, User};

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Storage backend seam. Implementations must provide transactional writes
/// with single-writer semantics per flight row: the check-then-decrement
/// performed inside one transaction can never interleave with another
/// writer's on the same flight.
///
/// Reads outside a transaction are point-in-time and may be stale.
#[async_trait]
pub trait Store: Send + Sync {
    /// Open a write transaction. Dropping the handle without `commit`
    /// rolls back every pending change.
    async fn begin(&self) -> Result<Box<dyn StoreTx>, BoxError>;

    async fn list_flights(&self) -> Result<Vec<Flight>, BoxError>;

    /// All bookings owned by `user_id`, any status, in storage order.
    /// Unknown users yield an empty list, not an error.
    async fn bookings_for_user(&self, user_id: i64) -> Result<Vec<Booking>, BoxError>;

    async fn user_by_email(&self, email: &str) -> Result<Option<User>, BoxError>;

    /// Exact, case-sensitive match on both fields.
    async fn user_by_name_and_email(
        &self,
        name: &str,
        email: &str,
    ) -> Result<Option<User>, BoxError>;
}

/// Transaction-scoped operations. All mutations performed through one handle
/// become visible atomically at `commit`.
#[async_trait]
pub trait StoreTx: Send {
    async fn flight(&mut self, flight_id: i64) -> Result<Option<Flight>, BoxError>;

    async fn user(&mut self, user_id: i64) -> Result<Option<User>, BoxError>;

    async fn user_by_email(&mut self, email: &str) -> Result<Option<User>, BoxError>;

    /// Persist a new user under a fresh monotonic id.
    async fn insert_user(&mut self, name: &str, email: &str) -> Result<User, BoxError>;

    /// Persist a new flight under a fresh monotonic id. Used at seed/setup
    /// time only; flights are never created by the booking paths.
    async fn insert_flight(&mut self, flight: &NewFlight) -> Result<Flight, BoxError>;

    /// Atomically decrement the class counter by one. Returns `false`
    /// without mutating anything when the flight is missing or the counter
    /// is already zero.
    async fn reserve_seat(&mut self, flight_id: i64, class: SeatClass) -> Result<bool, BoxError>;

    /// Increment the class counter by one. A missing flight is a no-op.
    async fn release_seat(&mut self, flight_id: i64, class: SeatClass) -> Result<(), BoxError>;

    /// Persist a new booking under a fresh monotonic id.
    async fn insert_booking(&mut self, booking: &NewBooking) -> Result<Booking, BoxError>;

    async fn booking(&mut self, booking_id: i64) -> Result<Option<Booking>, BoxError>;

    /// Flip a booking's status. Never touches seat_class or price_paid.
    async fn set_booking_status(
        &mut self,
        booking_id: i64,
        status: BookingStatus,
    ) -> Result<(), BoxError>;

    /// Make all pending changes durable. Calling twice is an error.
    async fn commit(&mut self) -> Result<(), BoxError>;
}
