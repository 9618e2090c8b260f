use std::sync::Arc;

use chrono::Utc;

use galaxium_core::{
    pricing, Booking, BookingError, BookingStatus, NewBooking, SeatClass, ServiceError, Store,
};

use crate::identity;

/// Orchestrates the booking lifecycle: ties identity verification, seat
/// inventory, and pricing together so that each book/cancel runs as one
/// atomic unit against the store.
#[derive(Clone)]
pub struct BookingService {
    store: Arc<dyn Store>,
}

impl BookingService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Book one seat of `seat_class` on `flight_id` for the named user.
    /// Checks run in a fixed order and the first failure wins; nothing is
    /// mutated until every check has passed.
    pub async fn book_flight(
        &self,
        user_id: i64,
        name: &str,
        flight_id: i64,
        seat_class: &str,
    ) -> Result<Booking, ServiceError> {
        // 1. Seat class must be one of the three cabin classes
        let Some(class) = SeatClass::parse(seat_class) else {
            return Err(BookingError::InvalidSeatClass { class: seat_class.to_string() }.into());
        };

        let mut tx = self.store.begin().await?;

        // 2. Flight must exist
        let Some(flight) = tx.flight(flight_id).await? else {
            return Err(BookingError::FlightNotFound { flight_id }.into());
        };

        // 3. The requested class must still have a seat
        if flight.seats_available(class) < 1 {
            return Err(BookingError::NoSeatsAvailable { class }.into());
        }

        // 4. Identity check: id must exist and the name must match
        let user = identity::verify_identity(tx.as_mut(), user_id, name).await?;

        // 5. Snapshot the price, take the seat, persist the booking
        let price_paid = pricing::price_for(flight.base_price, class);
        if !tx.reserve_seat(flight_id, class).await? {
            // Lost the seat between the availability check and the decrement
            return Err(BookingError::NoSeatsAvailable { class }.into());
        }

        let booking = tx
            .insert_booking(&NewBooking {
                user_id: user.user_id,
                flight_id,
                status: BookingStatus::Booked,
                seat_class: class,
                booking_time: Utc::now(),
                price_paid,
            })
            .await?;
        tx.commit().await?;

        tracing::info!(
            booking_id = booking.booking_id,
            flight_id,
            class = %class,
            price_paid,
            "booked flight"
        );
        Ok(booking)
    }

    /// Cancel an existing booking, restoring one seat of the class recorded
    /// at booking time. Price paid and seat class are never touched.
    pub async fn cancel_booking(&self, booking_id: i64) -> Result<Booking, ServiceError> {
        let mut tx = self.store.begin().await?;

        // 1. Booking must exist
        let Some(mut booking) = tx.booking(booking_id).await? else {
            return Err(BookingError::BookingNotFound { booking_id }.into());
        };

        // 2. Cancellation is terminal
        if booking.status == BookingStatus::Cancelled {
            return Err(BookingError::AlreadyCancelled { booking_id, status: booking.status }.into());
        }

        // 3. Return the seat to the class it was taken from
        tx.release_seat(booking.flight_id, booking.seat_class).await?;

        // 4. Flip the status and commit
        tx.set_booking_status(booking_id, BookingStatus::Cancelled).await?;
        tx.commit().await?;

        booking.status = BookingStatus::Cancelled;
        tracing::info!(booking_id, "cancelled booking");
        Ok(booking)
    }

    /// All bookings for a user, any status. Unknown users get an empty list.
    pub async fn bookings_for_user(&self, user_id: i64) -> Result<Vec<Booking>, ServiceError> {
        Ok(self.store.bookings_for_user(user_id).await?)
    }
}
